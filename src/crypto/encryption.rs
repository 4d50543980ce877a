//! AES-GCM authenticated encryption.
//!
//! The cipher is picked from the key length: 24-byte legacy keys use
//! AES-192-GCM, 32-byte keys AES-256-GCM. The IV is 12 bytes and stored
//! separately by the caller; the returned ciphertext carries the 16-byte
//! authentication tag at its end. No associated data is used.

use aes_gcm::aead::consts::U12;
use aes_gcm::aead::{Aead, KeyInit, Nonce};
use aes_gcm::aes::Aes192;
use aes_gcm::{Aes256Gcm, AesGcm};

use super::kdf::{KEY_LEN, LEGACY_KEY_LEN};
use super::keys::ContainerKey;
use crate::errors::{Result, TombError};

/// Size of the GCM initialization vector in bytes.
pub const IV_LEN: usize = 12;

/// Size of the GCM authentication tag in bytes.
pub const TAG_LEN: usize = 16;

type Aes192Gcm = AesGcm<Aes192, U12>;

/// Encrypt and authenticate `plaintext` under `key` and `iv`.
///
/// Returns ciphertext || tag.
pub fn encrypt(key: &ContainerKey, iv: &[u8; IV_LEN], plaintext: &[u8]) -> Result<Vec<u8>> {
    match key.len() {
        LEGACY_KEY_LEN => seal::<Aes192Gcm>(key.as_bytes(), iv, plaintext),
        KEY_LEN => seal::<Aes256Gcm>(key.as_bytes(), iv, plaintext),
        other => Err(TombError::EncryptionFailed(format!(
            "unsupported key length {other}"
        ))),
    }
}

/// Verify and decrypt ciphertext produced by `encrypt`.
///
/// Any failure (wrong key, flipped bit, truncation) is reported as the same
/// `AuthenticationFailed` error.
pub fn decrypt(key: &ContainerKey, iv: &[u8; IV_LEN], ciphertext: &[u8]) -> Result<Vec<u8>> {
    match key.len() {
        LEGACY_KEY_LEN => open::<Aes192Gcm>(key.as_bytes(), iv, ciphertext),
        KEY_LEN => open::<Aes256Gcm>(key.as_bytes(), iv, ciphertext),
        _ => Err(TombError::AuthenticationFailed),
    }
}

/// Generate a cryptographically random 12-byte IV.
pub fn generate_iv() -> Result<[u8; IV_LEN]> {
    super::random_bytes()
}

fn seal<C: KeyInit + Aead>(key: &[u8], iv: &[u8; IV_LEN], plaintext: &[u8]) -> Result<Vec<u8>> {
    let cipher = C::new_from_slice(key)
        .map_err(|e| TombError::EncryptionFailed(format!("invalid key length: {e}")))?;

    cipher
        .encrypt(Nonce::<C>::from_slice(iv), plaintext)
        .map_err(|e| TombError::EncryptionFailed(format!("encryption error: {e}")))
}

fn open<C: KeyInit + Aead>(key: &[u8], iv: &[u8; IV_LEN], ciphertext: &[u8]) -> Result<Vec<u8>> {
    let cipher = C::new_from_slice(key).map_err(|_| TombError::AuthenticationFailed)?;

    cipher
        .decrypt(Nonce::<C>::from_slice(iv), ciphertext)
        .map_err(|_| TombError::AuthenticationFailed)
}
