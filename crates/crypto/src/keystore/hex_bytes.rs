//! Serde helper for hex-encoded byte strings in keystore params

use serde::{Deserialize, Deserializer};

/// Decode a lowercase or uppercase hex string, with no `0x` prefix.
pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    hex::decode(&s).map_err(serde::de::Error::custom)
}
