use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in Tomb.
#[derive(Debug, Error)]
pub enum TombError {
    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed — wrong passphrase or corrupted container")]
    AuthenticationFailed,

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    #[error("Secure random source unavailable: {0}")]
    StrongRandomUnavailable(String),

    // --- Container errors ---
    #[error("Container not found at {0}")]
    ContainerNotFound(PathBuf),

    #[error("Container already exists at {0}")]
    ContainerAlreadyExists(PathBuf),

    #[error("Unable to write container {0}: {1}")]
    ContainerUnwritable(PathBuf, String),

    #[error("Not a valid Tomb container: {0}")]
    InvalidFormat(String),

    #[error("Container payload is malformed: {0}")]
    MalformedPayload(String),

    // --- Entry tree errors ---
    #[error("'{0}' is not a folder")]
    NotAFolder(String),

    #[error("Index {index} is out of bounds for a folder with {len} entries")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Folder '{0}' not found")]
    FolderNotFound(String),

    #[error("Entry '{0}' not found")]
    EntryNotFound(String),

    #[error("Invalid move: {0}")]
    InvalidMove(String),

    #[error("Invalid search pattern: {0}")]
    InvalidPattern(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("User cancelled operation")]
    UserCancelled,
}

/// Convenience type alias for Tomb results.
pub type Result<T> = std::result::Result<T, TombError>;
