//! Per-link symmetric keys
//!
//! Unlike the asymmetric pair, which is shared by every link a service
//! instance creates, a fresh symmetric key is derived for each link: a random
//! identifier is hashed and the digest truncated to the cipher's key length.

use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::errors::{CryptoLinkError, Result};

/// Key length of the 128-bit block cipher, in bytes.
pub const SYMMETRIC_KEY_LEN: usize = 16;

/// A 128-bit symmetric content key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymmetricKey([u8; SYMMETRIC_KEY_LEN]);

impl SymmetricKey {
    /// Derive a fresh key: UUIDv4 -> SHA-256 -> first 16 hex characters of
    /// the digest taken as the raw key bytes.
    pub fn generate() -> Self {
        let seed = Uuid::new_v4().to_string();
        let digest_hex = hex::encode(Sha256::digest(seed.as_bytes()));

        let mut bytes = [0u8; SYMMETRIC_KEY_LEN];
        bytes.copy_from_slice(&digest_hex.as_bytes()[..SYMMETRIC_KEY_LEN]);
        SymmetricKey(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; SYMMETRIC_KEY_LEN] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = hex::decode(s)
            .map_err(|e| CryptoLinkError::validation(format!("invalid key hex: {}", e)))?;
        SymmetricKey::try_from(bytes.as_slice())
    }
}

impl TryFrom<&[u8]> for SymmetricKey {
    type Error = CryptoLinkError;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != SYMMETRIC_KEY_LEN {
            return Err(CryptoLinkError::validation(format!(
                "symmetric key must be {} bytes, got {}",
                SYMMETRIC_KEY_LEN,
                bytes.len()
            )));
        }
        let mut key = [0u8; SYMMETRIC_KEY_LEN];
        key.copy_from_slice(bytes);
        Ok(SymmetricKey(key))
    }
}
