//! Password normalisation
//!
//! EIP-2335 strips control code points from the password before it is fed to
//! the KDF: C0 (U+0000..=U+001F), DEL (U+007F) and C1 (U+0080..=U+009F).
//! Everything else is passed through as UTF-8.

use secrecy::ExposeSecret;

use super::error::{KeystoreError, KeystoreResult};
use crate::secure::{IntoSecret, SecretBytes, SecretString};

/// True for code points removed before key derivation
fn is_stripped(c: char) -> bool {
    matches!(c, '\u{0000}'..='\u{001F}' | '\u{007F}' | '\u{0080}'..='\u{009F}')
}

/// Normalise `password` into the byte string given to the KDF.
///
/// An empty result is allowed; existing keystores may be locked with one.
pub fn normalize_password(password: &SecretString) -> SecretBytes {
    password
        .expose_secret()
        .chars()
        .filter(|c| !is_stripped(*c))
        .collect::<String>()
        .into_bytes()
        .into_secret()
}

/// Normalise a password that is about to lock a keystore.
///
/// Fails with `EmptyPassword` if nothing remains.
pub fn normalize_new_password(password: &SecretString) -> KeystoreResult<SecretBytes> {
    let bytes = normalize_password(password);
    if bytes.expose_secret().is_empty() {
        return Err(KeystoreError::EmptyPassword);
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalized(s: &str) -> Vec<u8> {
        let secret: SecretString = s.to_string().into();
        normalize_password(&secret).expose_secret().clone()
    }

    #[test]
    fn test_plain_password_unchanged() {
        assert_eq!(normalized("testpassword🔑"), "testpassword🔑".as_bytes());
    }

    #[test]
    fn test_control_codes_stripped() {
        assert_eq!(normalized("pass\u{7f}word\n"), b"password");
        assert_eq!(normalized("\u{0085}abc\u{009f}"), b"abc");
    }

    #[test]
    fn test_empty_after_stripping() {
        let secret: SecretString = "\n\t\r".to_string().into();
        assert!(normalize_password(&secret).expose_secret().is_empty());
        assert!(matches!(
            normalize_new_password(&secret),
            Err(KeystoreError::EmptyPassword)
        ));

        let secret: SecretString = "ok\n".to_string().into();
        assert_eq!(normalize_new_password(&secret).unwrap().expose_secret(), b"ok");
    }
}
