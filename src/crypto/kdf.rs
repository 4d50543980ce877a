//! Passphrase-based key derivation.
//!
//! Two recipes exist, selected by the container version byte:
//!
//! - **Legacy** (version 2): raw bcrypt over `passphrase || 0x00` with a
//!   16-byte salt and a single cost byte, yielding a 24-byte AES-192 key.
//!   The trailing NUL keeps a passphrase that tiles bcrypt's 72-byte key
//!   schedule from colliding with a shorter one.
//! - **Current** (version 3): Argon2id with memory cost, iterations and
//!   parallelism stored in the header, yielding a 32-byte AES-256 key.
//!
//! Both are pure functions of `(passphrase, salt, params)`. A wrong
//! passphrase simply produces a different key; detection happens when the
//! AEAD tag fails to verify.

use argon2::{Algorithm, Argon2, Params, Version};
use zeroize::Zeroizing;

use super::keys::ContainerKey;
use crate::errors::{Result, TombError};

/// Length of the salt in bytes (128 bits).
pub const SALT_LEN: usize = 16;

/// Length of a legacy bcrypt key in bytes (192 bits, for AES-192).
pub const LEGACY_KEY_LEN: usize = 24;

/// Length of an Argon2id key in bytes (256 bits, for AES-256).
pub const KEY_LEN: usize = 32;

/// bcrypt cost bounds accepted when reading a legacy container.
pub const MIN_LEGACY_COST: u8 = 4;
pub const MAX_LEGACY_COST: u8 = 16;

/// bcrypt only consumes the first 72 bytes of its input.
const BCRYPT_MAX_INPUT: usize = 72;

/// Argon2id bounds accepted for both writing and reading.
const MIN_MEMORY_KIB: u32 = 8_192;
const MAX_MEMORY_KIB: u32 = 4_194_304;
const MAX_ITERATIONS: u32 = 64;
const MAX_PARALLELISM: u32 = 64;

/// Argon2id cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Argon2Params {
    /// Memory cost in KiB (default: 131 072 = 128 MB).
    pub memory_kib: u32,
    /// Number of iterations (default: 3).
    pub iterations: u32,
    /// Parallelism lanes (default: 4).
    pub parallelism: u32,
}

impl Default for Argon2Params {
    fn default() -> Self {
        Self {
            memory_kib: 131_072,
            iterations: 3,
            parallelism: 4,
        }
    }
}

impl Argon2Params {
    /// Reject parameters that are dangerously weak or absurdly expensive.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_MEMORY_KIB..=MAX_MEMORY_KIB).contains(&self.memory_kib) {
            return Err(TombError::KeyDerivationFailed(format!(
                "Argon2 memory_kib must be between {MIN_MEMORY_KIB} and {MAX_MEMORY_KIB} (got {})",
                self.memory_kib
            )));
        }
        if !(1..=MAX_ITERATIONS).contains(&self.iterations) {
            return Err(TombError::KeyDerivationFailed(format!(
                "Argon2 iterations must be between 1 and {MAX_ITERATIONS} (got {})",
                self.iterations
            )));
        }
        if !(1..=MAX_PARALLELISM).contains(&self.parallelism) {
            return Err(TombError::KeyDerivationFailed(format!(
                "Argon2 parallelism must be between 1 and {MAX_PARALLELISM} (got {})",
                self.parallelism
            )));
        }
        Ok(())
    }
}

/// Key derivation recipe plus its stored parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KdfParams {
    /// Legacy bcrypt recipe (container version 2).
    Bcrypt { cost: u8 },
    /// Current Argon2id recipe (container version 3).
    Argon2id(Argon2Params),
}

impl KdfParams {
    /// Derive the container key for these parameters.
    pub fn derive_key(&self, passphrase: &[u8], salt: &[u8; SALT_LEN]) -> Result<ContainerKey> {
        match self {
            KdfParams::Bcrypt { cost } => derive_legacy_key(passphrase, salt, *cost),
            KdfParams::Argon2id(params) => derive_key(passphrase, salt, params),
        }
    }
}

/// Derive a 24-byte key with the legacy bcrypt recipe.
pub fn derive_legacy_key(passphrase: &[u8], salt: &[u8; SALT_LEN], cost: u8) -> Result<ContainerKey> {
    if !(MIN_LEGACY_COST..=MAX_LEGACY_COST).contains(&cost) {
        return Err(TombError::KeyDerivationFailed(format!(
            "bcrypt cost must be between {MIN_LEGACY_COST} and {MAX_LEGACY_COST} (got {cost})"
        )));
    }

    let mut input = Zeroizing::new(Vec::with_capacity(passphrase.len() + 1));
    input.extend_from_slice(passphrase);
    input.push(0);
    // Bytes past 72 never reach the key schedule, so dropping them is exact.
    input.truncate(BCRYPT_MAX_INPUT);

    tracing::debug!(cost, "deriving legacy bcrypt key");
    let raw = Zeroizing::new(bcrypt::bcrypt(u32::from(cost), *salt, &input));
    Ok(ContainerKey::new(raw.to_vec()))
}

/// Derive a 32-byte key with Argon2id.
///
/// The same passphrase + salt + params always produce the same key. The
/// Argon2 working memory is allocated for this call only and wiped and
/// freed before it returns.
pub fn derive_key(
    passphrase: &[u8],
    salt: &[u8; SALT_LEN],
    argon2_params: &Argon2Params,
) -> Result<ContainerKey> {
    argon2_params.validate()?;

    let params = Params::new(
        argon2_params.memory_kib,
        argon2_params.iterations,
        argon2_params.parallelism,
        Some(KEY_LEN),
    )
    .map_err(|e| TombError::KeyDerivationFailed(format!("invalid Argon2 params: {e}")))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    tracing::debug!(
        memory_kib = argon2_params.memory_kib,
        iterations = argon2_params.iterations,
        parallelism = argon2_params.parallelism,
        "deriving Argon2id key"
    );
    let mut key = ContainerKey::zeroed(KEY_LEN);
    argon2
        .hash_password_into(passphrase, salt, key.as_mut_bytes())
        .map_err(|e| TombError::KeyDerivationFailed(format!("Argon2id hashing failed: {e}")))?;

    Ok(key)
}

/// Generate a cryptographically random 16-byte salt.
pub fn generate_salt() -> Result<[u8; SALT_LEN]> {
    super::random_bytes()
}
