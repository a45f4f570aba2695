//! Hybrid encryption engine
//!
//! Content is encrypted under the per-link symmetric key with AES-128 in ECB
//! mode (PKCS#7 padded). The symmetric key itself is wrapped under the
//! service public key with an ECIES-style envelope: ephemeral secp256k1
//! point, ECDH + HKDF-SHA256 derived wrapping key, XChaCha20-Poly1305 seal.
//!
//! ECB is deterministic and unauthenticated: equal plaintext blocks produce
//! equal ciphertext blocks, and tampering is only caught downstream by the
//! record signature check. Callers must not assume anything stronger.

use aes::Aes128;
use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyInit};
use chacha20poly1305::aead::Aead;
use chacha20poly1305::{XChaCha20Poly1305, XNonce};
use hkdf::Hkdf;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::{PublicKey, SecretKey, ecdh};
use rand::RngCore;
use rand::rngs::OsRng;
use sha2::Sha256;

use super::symmetric::{SYMMETRIC_KEY_LEN, SymmetricKey};
use crate::errors::{CryptoLinkError, Result};

type Aes128EcbEnc = ecb::Encryptor<Aes128>;
type Aes128EcbDec = ecb::Decryptor<Aes128>;

/// AES block size in bytes.
const BLOCK_LEN: usize = 16;
/// SEC1 compressed point length.
const EPHEMERAL_POINT_LEN: usize = 33;
/// XChaCha20-Poly1305 nonce length.
const NONCE_LEN: usize = 24;
/// Poly1305 authentication tag length.
const TAG_LEN: usize = 16;

/// HKDF context string binding derived keys to this envelope format.
const KEY_WRAP_INFO: &[u8] = b"cryptolink key wrap v1";

/// Encrypt content under the symmetric key (AES-128-ECB, PKCS#7).
pub fn encrypt_content(plaintext: &str, key: &SymmetricKey) -> Vec<u8> {
    Aes128EcbEnc::new(key.as_bytes().into())
        .encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes())
}

/// Decrypt content; fails with `SymmetricDecrypt` on a non-block-multiple
/// length, invalid padding, or non-UTF-8 plaintext.
pub fn decrypt_content(ciphertext: &[u8], key: &SymmetricKey) -> Result<String> {
    if ciphertext.is_empty() || ciphertext.len() % BLOCK_LEN != 0 {
        return Err(CryptoLinkError::symmetric_decrypt(format!(
            "ciphertext length {} is not a positive multiple of the {}-byte block size",
            ciphertext.len(),
            BLOCK_LEN
        )));
    }

    let plaintext = Aes128EcbDec::new(key.as_bytes().into())
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| CryptoLinkError::symmetric_decrypt("invalid PKCS#7 padding"))?;

    String::from_utf8(plaintext)
        .map_err(|e| CryptoLinkError::symmetric_decrypt(format!("plaintext is not UTF-8: {}", e)))
}

/// Wrap a symmetric key under the recipient public key.
///
/// Envelope layout: compressed ephemeral point (33 bytes) || nonce (24 bytes)
/// || sealed key + tag (32 bytes).
pub fn wrap_key(key: &SymmetricKey, recipient: &PublicKey) -> Result<Vec<u8>> {
    let ephemeral = SecretKey::random(&mut OsRng);
    let ephemeral_point = ephemeral.public_key().to_encoded_point(true);

    let shared = ecdh::diffie_hellman(ephemeral.to_nonzero_scalar(), recipient.as_affine());
    let cipher = wrapping_cipher(shared.raw_secret_bytes().as_slice())?;

    let mut nonce = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce);

    let sealed = cipher
        .encrypt(XNonce::from_slice(&nonce), key.as_bytes().as_slice())
        .map_err(|e| CryptoLinkError::key_generation(format!("key seal failed: {}", e)))?;

    let mut envelope = Vec::with_capacity(EPHEMERAL_POINT_LEN + NONCE_LEN + sealed.len());
    envelope.extend_from_slice(ephemeral_point.as_bytes());
    envelope.extend_from_slice(&nonce);
    envelope.extend_from_slice(&sealed);
    Ok(envelope)
}

/// Unwrap a symmetric key with the service private key.
///
/// Fails with `AsymmetricDecrypt` if the envelope is malformed, the ephemeral
/// point is invalid, or the private key does not correspond to the wrapping
/// public key (authentication tag mismatch).
pub fn unwrap_key(envelope: &[u8], private: &SecretKey) -> Result<SymmetricKey> {
    let min_len = EPHEMERAL_POINT_LEN + NONCE_LEN + SYMMETRIC_KEY_LEN + TAG_LEN;
    if envelope.len() < min_len {
        return Err(CryptoLinkError::asymmetric_decrypt(format!(
            "envelope too short: {} bytes, expected at least {}",
            envelope.len(),
            min_len
        )));
    }

    let (point_bytes, rest) = envelope.split_at(EPHEMERAL_POINT_LEN);
    let (nonce, sealed) = rest.split_at(NONCE_LEN);

    let ephemeral_public = PublicKey::from_sec1_bytes(point_bytes).map_err(|e| {
        CryptoLinkError::asymmetric_decrypt(format!("invalid ephemeral point: {}", e))
    })?;

    let shared = ecdh::diffie_hellman(private.to_nonzero_scalar(), ephemeral_public.as_affine());
    let cipher = wrapping_cipher(shared.raw_secret_bytes().as_slice())?;

    let key_bytes = cipher
        .decrypt(XNonce::from_slice(nonce), sealed)
        .map_err(|_| {
            CryptoLinkError::asymmetric_decrypt(
                "authentication failed: wrong private key or corrupted envelope",
            )
        })?;

    SymmetricKey::try_from(key_bytes.as_slice())
        .map_err(|e| CryptoLinkError::asymmetric_decrypt(e.message().to_string()))
}

fn wrapping_cipher(shared_secret: &[u8]) -> Result<XChaCha20Poly1305> {
    let hk = Hkdf::<Sha256>::new(None, shared_secret);
    let mut wrap_key = [0u8; 32];
    hk.expand(KEY_WRAP_INFO, &mut wrap_key)
        .map_err(|e| CryptoLinkError::key_generation(format!("HKDF expand failed: {}", e)))?;

    XChaCha20Poly1305::new_from_slice(&wrap_key)
        .map_err(|e| CryptoLinkError::key_generation(format!("cipher init failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::keypair::KeyPair;

    #[test]
    fn test_content_round_trip() {
        let key = SymmetricKey::generate();
        let plaintext = "https://www.example.com/path?param1=value1&param2=value2";

        let ciphertext = encrypt_content(plaintext, &key);
        assert_eq!(ciphertext.len() % BLOCK_LEN, 0);

        let decrypted = decrypt_content(&ciphertext, &key).unwrap();
        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn test_content_encryption_is_deterministic() {
        // ECB: same key and plaintext always give the same ciphertext.
        let key = SymmetricKey::generate();
        let a = encrypt_content("https://example.com/a", &key);
        let b = encrypt_content("https://example.com/a", &key);
        assert_eq!(a, b);
    }

    #[test]
    fn test_decrypt_rejects_malformed_length() {
        let key = SymmetricKey::generate();
        let err = decrypt_content(&[0u8; 15], &key).unwrap_err();
        assert!(matches!(
            err,
            crate::errors::CryptoLinkError::SymmetricDecrypt(_)
        ));

        let err = decrypt_content(&[], &key).unwrap_err();
        assert!(matches!(
            err,
            crate::errors::CryptoLinkError::SymmetricDecrypt(_)
        ));
    }

    #[test]
    fn test_decrypt_with_wrong_key_fails() {
        let key = SymmetricKey::generate();
        let other = SymmetricKey::generate();
        let ciphertext = encrypt_content("https://example.com", &key);

        // Wrong key yields garbage: either the padding check or the UTF-8
        // check fails, never a silent wrong answer for this input.
        let result = decrypt_content(&ciphertext, &other);
        if let Ok(decrypted) = result {
            assert_ne!(decrypted, "https://example.com");
        }
    }

    #[test]
    fn test_key_wrap_round_trip() {
        let pair = KeyPair::generate().unwrap();
        let key = SymmetricKey::generate();

        let envelope = wrap_key(&key, pair.public_key()).unwrap();
        assert_eq!(
            envelope.len(),
            EPHEMERAL_POINT_LEN + NONCE_LEN + SYMMETRIC_KEY_LEN + TAG_LEN
        );

        let unwrapped = unwrap_key(&envelope, pair.secret_key()).unwrap();
        assert_eq!(unwrapped, key);
    }

    #[test]
    fn test_key_wrap_is_randomized() {
        // Fresh ephemeral keypair and nonce per wrap: envelopes never repeat.
        let pair = KeyPair::generate().unwrap();
        let key = SymmetricKey::generate();

        let a = wrap_key(&key, pair.public_key()).unwrap();
        let b = wrap_key(&key, pair.public_key()).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_unwrap_with_wrong_private_key_fails() {
        let pair = KeyPair::generate().unwrap();
        let wrong = KeyPair::generate().unwrap();
        let key = SymmetricKey::generate();

        let envelope = wrap_key(&key, pair.public_key()).unwrap();
        let err = unwrap_key(&envelope, wrong.secret_key()).unwrap_err();
        assert!(matches!(
            err,
            crate::errors::CryptoLinkError::AsymmetricDecrypt(_)
        ));
    }

    #[test]
    fn test_unwrap_rejects_truncated_envelope() {
        let pair = KeyPair::generate().unwrap();
        let err = unwrap_key(&[0u8; 40], pair.secret_key()).unwrap_err();
        assert!(matches!(
            err,
            crate::errors::CryptoLinkError::AsymmetricDecrypt(_)
        ));
    }

    #[test]
    fn test_unwrap_rejects_tampered_envelope() {
        let pair = KeyPair::generate().unwrap();
        let key = SymmetricKey::generate();

        let mut envelope = wrap_key(&key, pair.public_key()).unwrap();
        let last = envelope.len() - 1;
        envelope[last] ^= 0x01;

        let err = unwrap_key(&envelope, pair.secret_key()).unwrap_err();
        assert!(matches!(
            err,
            crate::errors::CryptoLinkError::AsymmetricDecrypt(_)
        ));
    }
}
