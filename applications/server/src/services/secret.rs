/// Password secret derivation - keyed HMAC-SHA256 digests
use crate::error::{Result, ServerError};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::fmt;

type HmacSha256 = Hmac<Sha256>;

/// Derives and verifies stored password secrets
///
/// The stored secret is the hex encoded HMAC-SHA256 of the plaintext under a
/// single process-wide key. There is no per-user salt, so equal passwords
/// produce equal secrets.
#[derive(Clone)]
pub struct SecretCodec {
    key: Vec<u8>,
}

impl fmt::Debug for SecretCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretCodec").finish_non_exhaustive()
    }
}

impl SecretCodec {
    pub fn new(key: impl Into<Vec<u8>>) -> Self {
        Self { key: key.into() }
    }

    /// Derive the stored secret for a plaintext password
    pub fn derive_secret(&self, plaintext: &str) -> Result<String> {
        let mut mac = self.mac()?;
        mac.update(plaintext.as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    /// Check a plaintext password against a stored secret
    ///
    /// The digest comparison runs in constant time. Only the exact lowercase
    /// hex encoding produced by [`Self::derive_secret`] matches.
    pub fn verify_secret(&self, plaintext: &str, stored_secret: &str) -> Result<bool> {
        if !is_lower_hex(stored_secret) {
            return Ok(false);
        }
        let Ok(expected) = hex::decode(stored_secret) else {
            return Ok(false);
        };

        let mut mac = self.mac()?;
        mac.update(plaintext.as_bytes());
        Ok(mac.verify_slice(&expected).is_ok())
    }

    fn mac(&self) -> Result<HmacSha256> {
        HmacSha256::new_from_slice(&self.key).map_err(|e| ServerError::Crypto(e.to_string()))
    }
}

fn is_lower_hex(value: &str) -> bool {
    value.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_and_verify() {
        let codec = SecretCodec::new("secret");
        let password = "abcd1234";

        let secret = codec.derive_secret(password).unwrap();
        assert!(codec.verify_secret(password, &secret).unwrap());
        assert!(!codec.verify_secret("abcd12345", &secret).unwrap());
    }

    #[test]
    fn test_derivation_is_deterministic_hex() {
        let codec = SecretCodec::new("secret");

        let a = codec.derive_secret("abcd1234").unwrap();
        let b = codec.derive_secret("abcd1234").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_known_vector() {
        // RFC 4231 test case 2
        let codec = SecretCodec::new("Jefe");
        assert_eq!(
            codec.derive_secret("what do ya want for nothing?").unwrap(),
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn test_key_changes_secret() {
        let a = SecretCodec::new("key-a").derive_secret("abcd1234").unwrap();
        let b = SecretCodec::new("key-b").derive_secret("abcd1234").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_malformed_stored_secret_never_matches() {
        let codec = SecretCodec::new("secret");

        assert!(!codec.verify_secret("abcd1234", "not-hex").unwrap());
        assert!(!codec.verify_secret("abcd1234", "").unwrap());
        assert!(!codec.verify_secret("abcd1234", "abcd").unwrap());
    }

    #[test]
    fn test_reencoded_secret_does_not_match() {
        let codec = SecretCodec::new("secret");
        let secret = codec.derive_secret("abcd1234").unwrap();

        assert!(!codec.verify_secret("abcd1234", &secret.to_uppercase()).unwrap());
        assert!(!codec.verify_secret("abcd1234", &format!(" {}", secret)).unwrap());
        assert!(codec.verify_secret("abcd1234", &secret).unwrap());
    }
}
