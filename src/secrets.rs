//! One-way hashing of user identities for cookie names.

use base64ct::{Base64UrlUnpadded, Encoding};
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use std::{convert::Infallible, fmt};
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Hash and constant-time verify primitive used to keep logins out of
/// client-visible cookies.
///
/// `verify` must accept both `hash(plaintext)` and any legacy form the
/// implementation still honours (a raw login for cookies minted before
/// identities were hashed).
pub trait IdentityHasher {
    type Error;

    /// # Errors
    /// Returns the implementation's error when hashing is unavailable.
    fn hash(&self, plaintext: &str) -> Result<String, Self::Error>;

    /// # Errors
    /// Returns the implementation's error when verification is unavailable.
    fn verify(&self, plaintext: &str, candidate: &str) -> Result<bool, Self::Error>;
}

impl<H: IdentityHasher + ?Sized> IdentityHasher for &H {
    type Error = H::Error;

    fn hash(&self, plaintext: &str) -> Result<String, Self::Error> {
        (**self).hash(plaintext)
    }

    fn verify(&self, plaintext: &str, candidate: &str) -> Result<bool, Self::Error> {
        (**self).verify(plaintext, candidate)
    }
}

#[derive(Debug, Error)]
pub enum SecretsError {
    #[error("identity hashing key must not be empty")]
    EmptyKey,
    #[error("invalid identity hashing key")]
    InvalidKey,
}

/// HMAC-SHA-256 identity hasher keyed with a server secret.
///
/// Hashes are deterministic for a given key and encoded as unpadded URL-safe
/// base64, so they can be embedded in a cookie name as-is.
#[derive(Clone)]
pub struct Secrets {
    mac: HmacSha256,
}

impl Secrets {
    /// # Errors
    /// Returns an error if the key is empty or rejected by HMAC.
    pub fn new(key: &SecretString) -> Result<Self, SecretsError> {
        let key = key.expose_secret();
        if key.is_empty() {
            return Err(SecretsError::EmptyKey);
        }

        let mac = HmacSha256::new_from_slice(key.as_bytes()).map_err(|_| SecretsError::InvalidKey)?;

        Ok(Self { mac })
    }

    fn digest(&self, plaintext: &str) -> HmacSha256 {
        let mut mac = self.mac.clone();
        mac.update(plaintext.as_bytes());
        mac
    }

    // Raw logins are compared through their MACs so the comparison stays
    // constant-time without another dependency.
    fn matches_legacy(&self, plaintext: &str, candidate: &str) -> bool {
        let expected = self.digest(plaintext).finalize().into_bytes();
        self.digest(candidate).verify_slice(&expected).is_ok()
    }
}

impl fmt::Debug for Secrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secrets").field("mac", &"[REDACTED]").finish()
    }
}

impl IdentityHasher for Secrets {
    type Error = Infallible;

    fn hash(&self, plaintext: &str) -> Result<String, Self::Error> {
        let tag = self.digest(plaintext).finalize().into_bytes();
        Ok(Base64UrlUnpadded::encode_string(&tag))
    }

    fn verify(&self, plaintext: &str, candidate: &str) -> Result<bool, Self::Error> {
        if let Ok(tag) = Base64UrlUnpadded::decode_vec(candidate) {
            if self.digest(plaintext).verify_slice(&tag).is_ok() {
                return Ok(true);
            }
        }

        Ok(self.matches_legacy(plaintext, candidate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secrets(key: &str) -> Secrets {
        Secrets::new(&SecretString::from(key.to_string())).expect("valid key")
    }

    #[test]
    fn hash_is_deterministic_and_keyed() {
        let first = secrets("key-one");
        let second = secrets("key-two");

        assert_eq!(first.hash("alice"), first.hash("alice"));
        assert_ne!(first.hash("alice"), first.hash("bob"));
        assert_ne!(first.hash("alice"), second.hash("alice"));
    }

    #[test]
    fn hash_is_cookie_name_safe() {
        let hashed = secrets("key").hash("alice@example.com").unwrap_or_default();

        assert_eq!(hashed.len(), 43);
        assert!(hashed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn verify_accepts_own_hash() {
        let secrets = secrets("key");
        let hashed = secrets.hash("alice").unwrap_or_default();

        assert_eq!(secrets.verify("alice", &hashed), Ok(true));
        assert_eq!(secrets.verify("bob", &hashed), Ok(false));
    }

    #[test]
    fn verify_accepts_legacy_raw_login() {
        let secrets = secrets("key");

        assert_eq!(secrets.verify("testUser", "testUser"), Ok(true));
        assert_eq!(secrets.verify("testUser", "anotherUser"), Ok(false));
        assert_eq!(secrets.verify("testUser", ""), Ok(false));
    }

    #[test]
    fn verify_rejects_hash_from_other_key() {
        let hashed = secrets("key-one").hash("alice").unwrap_or_default();

        assert_eq!(secrets("key-two").verify("alice", &hashed), Ok(false));
    }

    #[test]
    fn new_rejects_empty_key() {
        let result = Secrets::new(&SecretString::from(String::new()));

        assert!(matches!(result, Err(SecretsError::EmptyKey)));
    }

    #[test]
    fn debug_redacts_key() {
        let debug = format!("{:?}", secrets("super-secret"));

        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("super-secret"));
    }
}
