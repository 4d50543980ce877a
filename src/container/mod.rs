//! Container module — the encrypted file holding one credential tree.
//!
//! This module provides:
//! - Binary container format, compression and encryption pipeline (`format`)
//! - High-level `Container` handle for loading, saving and editing (`store`)

pub mod format;
pub mod store;

// Re-export the most commonly used items.
pub use format::{ContainerHeader, CURRENT_VERSION, LEGACY_VERSION};
pub use store::Container;
