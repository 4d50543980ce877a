//! Cryptographic primitives for Tomb.
//!
//! This module provides:
//! - AES-GCM encryption and decryption (`encryption`)
//! - Passphrase key derivation, legacy bcrypt and current Argon2id (`kdf`)
//! - A zeroize-on-drop container key (`keys`)

pub mod encryption;
pub mod kdf;
pub mod keys;

use rand::rngs::OsRng;
use rand::TryRngCore;

use crate::errors::{Result, TombError};

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{encrypt, decrypt, KdfParams, ...};
pub use encryption::{decrypt, encrypt, generate_iv, IV_LEN};
pub use kdf::{generate_salt, Argon2Params, KdfParams, SALT_LEN};
pub use keys::ContainerKey;

/// Fill an `N`-byte array from the operating system's secure random source.
///
/// No fallback source exists: an OS failure is returned to the caller.
pub fn random_bytes<const N: usize>() -> Result<[u8; N]> {
    let mut bytes = [0u8; N];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| TombError::StrongRandomUnavailable(e.to_string()))?;
    Ok(bytes)
}
