//! Service asymmetric key pair
//!
//! One secp256k1 key pair is generated per service instance and reused for
//! wrapping the per-link symmetric keys. There is no rotation: the pair lives
//! exactly as long as the service that owns it.

use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::{PublicKey, SecretKey};
use rand::RngCore;
use rand::rngs::OsRng;

use crate::errors::{CryptoLinkError, Result};

/// An elliptic-curve key pair over secp256k1.
pub struct KeyPair {
    secret: SecretKey,
    public: PublicKey,
}

impl KeyPair {
    /// Generate a fresh key pair from the operating system RNG.
    ///
    /// The private scalar is drawn directly from OS randomness; the public
    /// point is derived by scalar multiplication of the curve generator.
    /// Fails with `KeyGeneration` if randomness is unavailable or the drawn
    /// bytes do not form a valid scalar.
    pub fn generate() -> Result<Self> {
        let mut scalar_bytes = [0u8; 32];
        OsRng.try_fill_bytes(&mut scalar_bytes).map_err(|e| {
            CryptoLinkError::key_generation(format!("system randomness unavailable: {}", e))
        })?;

        let secret = SecretKey::from_slice(&scalar_bytes).map_err(|e| {
            CryptoLinkError::key_generation(format!("drawn bytes are not a valid scalar: {}", e))
        })?;
        let public = secret.public_key();

        Ok(KeyPair { secret, public })
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }

    pub fn secret_key(&self) -> &SecretKey {
        &self.secret
    }

    /// Hex encoding of the public point (SEC1 uncompressed, 65 bytes).
    pub fn public_key_hex(&self) -> String {
        hex::encode(self.public.to_encoded_point(false).as_bytes())
    }

    /// Hex encoding of the private scalar (big-endian, 32 bytes).
    pub fn private_key_hex(&self) -> String {
        hex::encode(self.secret.to_bytes())
    }
}
