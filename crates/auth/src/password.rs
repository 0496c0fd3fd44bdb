//! Salted password digests.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use pokeworld_core::ValueObject;

/// Irreversible, salted digest of a password.
///
/// Stored as `"<salt>$<digest>"`, both hex. `hash`/`verify` are the whole
/// surface; swapping the digest for a KDF stays local to this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Digest a clear-text password under a fresh random salt.
    pub fn hash(password: &str) -> Self {
        let salt: u128 = rand::random();
        let salt = format!("{salt:032x}");
        Self(format!("{salt}${}", digest(&salt, password)))
    }

    /// Check a login attempt against the stored digest.
    ///
    /// A stored value that does not parse verifies as false rather than
    /// erroring; the caller cannot do anything more useful with it.
    pub fn verify(&self, candidate: &str) -> bool {
        let Some((salt, stored)) = self.0.split_once('$') else {
            return false;
        };
        digest(salt, candidate) == stored
    }

    /// Rebuild from a previously stored representation.
    pub fn from_storage(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for PasswordHash {}

fn digest(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}
