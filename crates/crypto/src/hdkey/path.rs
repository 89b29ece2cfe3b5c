//! BIP-32 derivation paths
//!
//! A path is an ordered list of segments from the master key to the leaf.
//! Order matters: `m/1/2` and `m/2/1` name different keys.

use std::fmt;
use std::str::FromStr;

use super::error::{HdError, HdResult};

/// Flag bit marking a hardened child index
pub const HARDENED_BIT: u32 = 0x8000_0000;

/// Ethereum account path (`purpose' / coin_type' / account' / change / address_index`)
pub const DEFAULT_DERIVATION_PATH: &str = "m/44'/60'/0'/0/0";

/// A single path component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PathSegment {
    index: u32,
    hardened: bool,
}

impl PathSegment {
    /// Non-hardened segment; `index` must be below 2^31
    pub fn normal(index: u32) -> HdResult<Self> {
        Self::new(index, false)
    }

    /// Hardened segment; `index` must be below 2^31
    pub fn hardened(index: u32) -> HdResult<Self> {
        Self::new(index, true)
    }

    /// Build a segment from a 31-bit index and a hardened flag
    pub fn new(index: u32, hardened: bool) -> HdResult<Self> {
        if index & HARDENED_BIT != 0 {
            return Err(HdError::InvalidPath(format!(
                "index {} does not fit in 31 bits",
                index
            )));
        }
        Ok(Self { index, hardened })
    }

    /// The 31-bit index
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Whether the segment is hardened
    pub fn is_hardened(&self) -> bool {
        self.hardened
    }

    /// The 32-bit child number fed to the HMAC (`index | 2^31` when hardened)
    pub fn child_number(&self) -> u32 {
        if self.hardened {
            self.index | HARDENED_BIT
        } else {
            self.index
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hardened {
            write!(f, "{}'", self.index)
        } else {
            write!(f, "{}", self.index)
        }
    }
}

impl FromStr for PathSegment {
    type Err = HdError;

    fn from_str(part: &str) -> HdResult<Self> {
        let (num_str, hardened) = match part.strip_suffix(&['\'', 'h', 'H'][..]) {
            Some(rest) => (rest, true),
            None => (part, false),
        };

        let index: u32 = num_str
            .parse()
            .map_err(|_| HdError::InvalidPath(format!("invalid path component: {}", part)))?;

        Self::new(index, hardened)
    }
}

/// Ordered derivation path, root to leaf
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DerivationPath {
    segments: Vec<PathSegment>,
}

impl DerivationPath {
    /// Build a path from segments
    pub fn new(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    /// The default Ethereum account path `m/44'/60'/0'/0/0`
    pub fn ethereum() -> Self {
        Self::new(vec![
            PathSegment {
                index: 44,
                hardened: true,
            },
            PathSegment {
                index: 60,
                hardened: true,
            },
            PathSegment {
                index: 0,
                hardened: true,
            },
            PathSegment {
                index: 0,
                hardened: false,
            },
            PathSegment {
                index: 0,
                hardened: false,
            },
        ])
    }

    /// Segments in derivation order
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Number of segments
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// True for the bare master path `m`
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("m")?;
        for segment in &self.segments {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}

/// Parses `m/44'/60'/0'/0/0`; `'`, `h` and `H` all mark hardened segments.
impl FromStr for DerivationPath {
    type Err = HdError;

    fn from_str(path: &str) -> HdResult<Self> {
        let path = path.trim();

        let rest = match path {
            "m" | "M" => return Ok(Self::default()),
            _ => path
                .strip_prefix("m/")
                .or_else(|| path.strip_prefix("M/"))
                .ok_or_else(|| HdError::InvalidPath("path must start with 'm/'".to_string()))?,
        };

        let segments = rest
            .split('/')
            .map(PathSegment::from_str)
            .collect::<HdResult<Vec<_>>>()?;

        Ok(Self { segments })
    }
}
