//! Container key wrapper.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Symmetric key derived from a passphrase, zeroed when dropped.
///
/// The legacy recipe yields 24 bytes (AES-192), the current one 32 bytes
/// (AES-256).
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ContainerKey {
    bytes: Vec<u8>,
}

impl ContainerKey {
    /// Wrap raw key bytes.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// An all-zero key of `len` bytes for a KDF to write into.
    pub(crate) fn zeroed(len: usize) -> Self {
        Self {
            bytes: vec![0u8; len],
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub(crate) fn as_mut_bytes(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    /// Key length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for ContainerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContainerKey({} bytes)", self.bytes.len())
    }
}

impl PartialEq for ContainerKey {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}
