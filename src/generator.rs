//! Random password generation.

use rand::Rng;

use crate::errors::{Result, TombError};

pub const NUMBERS: &str = "0123456789";
pub const UPPERS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const LOWERS: &str = "abcdefghijklmnopqrstuvwxyz";
pub const ALPHA_NUMERIC: &str =
    "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Build a password of `length` characters drawn uniformly from `charset`.
///
/// Uses the thread-local CSPRNG, which is seeded from the OS.
pub fn generate(length: usize, charset: &str) -> Result<String> {
    let chars: Vec<char> = charset.chars().collect();
    if chars.is_empty() {
        return Err(TombError::CommandFailed(
            "password charset cannot be empty".into(),
        ));
    }

    let mut rng = rand::rng();
    Ok((0..length)
        .map(|_| chars[rng.random_range(0..chars.len())])
        .collect())
}

/// Shorthand for an alphanumeric password.
pub fn generate_alphanumeric(length: usize) -> Result<String> {
    generate(length, ALPHA_NUMERIC)
}
