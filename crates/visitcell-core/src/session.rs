//! SessionKey derivation.
//!
//! A key is the first 16 lowercase hex characters of the SHA-256 digest of a
//! seed. Derivation is pure; the same seed always names the same counter.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Seed used when the deployment does not configure one.
pub const DEFAULT_SEED: &str = "global-demo-session";

/// Length of a SessionKey in hex characters.
pub const KEY_LEN: usize = 16;

/// Fixed-length hexadecimal identifier naming one counter instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionKey(String);

impl SessionKey {
    /// Derive a key from `seed`.
    pub fn derive(seed: &str) -> Self {
        let digest = Sha256::digest(seed.as_bytes());
        let mut hex = hex::encode(digest);
        hex.truncate(KEY_LEN);
        Self(hex)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SessionKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_seed_key() {
        assert_eq!(SessionKey::derive(DEFAULT_SEED).as_str(), "e53f626fa705e33e");
    }

    #[test]
    fn derive_is_deterministic() {
        for seed in ["", "a", "global-demo-session", "ünïcödé"] {
            assert_eq!(SessionKey::derive(seed), SessionKey::derive(seed));
        }
    }

    #[test]
    fn key_shape() {
        let k = SessionKey::derive("anything");
        assert_eq!(k.as_str().len(), KEY_LEN);
        assert!(k
            .as_str()
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn different_seeds_differ() {
        assert_ne!(SessionKey::derive("user-1"), SessionKey::derive("user-2"));
    }
}
