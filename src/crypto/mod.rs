//! Cryptographic building blocks of the link pipeline
//!
//! - `keypair`: per-service secp256k1 key pair
//! - `symmetric`: per-link 128-bit content keys
//! - `hybrid`: content encryption and asymmetric key wrapping
//! - `signature`: canonical field-set digests for tamper detection

pub mod hybrid;
pub mod keypair;
pub mod signature;
pub mod symmetric;

pub use hybrid::{decrypt_content, encrypt_content, unwrap_key, wrap_key};
pub use keypair::KeyPair;
pub use symmetric::{SYMMETRIC_KEY_LEN, SymmetricKey};
