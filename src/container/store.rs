//! High-level container handle used by CLI commands and other front ends.
//!
//! `Container` owns the credential tree of the currently open file and
//! wraps the format layer, so callers work with simple method calls like
//! `container.save(path, passphrase)`.

use std::path::Path;

use chrono::{DateTime, Utc};

use crate::crypto::kdf::{Argon2Params, KdfParams};
use crate::entry::RootEntry;
use crate::errors::Result;

use super::format;

/// The in-memory state of one open container.
///
/// Save and load each run a deliberately slow key derivation and block the
/// calling thread until it finishes. Front ends that need to stay
/// responsive should run them on a worker thread.
#[derive(Debug, Clone, Default)]
pub struct Container {
    /// The credential tree.
    root: RootEntry,

    /// Argon2id cost used for every save.
    argon2_params: Argon2Params,
}

impl Container {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// An empty container with default Argon2id cost.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty container that saves with the given Argon2id cost.
    pub fn with_params(argon2_params: Argon2Params) -> Self {
        Self {
            root: RootEntry::new(),
            argon2_params,
        }
    }

    /// Wrap an existing tree.
    pub fn from_root(root: RootEntry, argon2_params: Argon2Params) -> Self {
        Self {
            root,
            argon2_params,
        }
    }

    /// Read and decrypt the container at `path`.
    pub fn open(path: &Path, passphrase: &[u8], argon2_params: Argon2Params) -> Result<Self> {
        let mut container = Self::with_params(argon2_params);
        container.load(path, passphrase)?;
        Ok(container)
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Replace the open tree with the one stored at `path`.
    ///
    /// On any failure the current tree is left exactly as it was.
    pub fn load(&mut self, path: &Path, passphrase: &[u8]) -> Result<()> {
        let data = format::read_container(path)?;
        let document = format::open(&data, passphrase)?;
        self.root = RootEntry::from_document(&document)?;

        tracing::debug!(path = %path.display(), "loaded container");
        Ok(())
    }

    /// Encrypt the open tree and write it to `path` atomically.
    ///
    /// Always writes the current format, so saving a legacy container
    /// upgrades it.
    pub fn save(&self, path: &Path, passphrase: &[u8]) -> Result<()> {
        let document = zeroize::Zeroizing::new(self.root.to_document()?);
        let sealed = format::seal(
            document.as_bytes(),
            passphrase,
            KdfParams::Argon2id(self.argon2_params),
        )?;
        format::write_container(path, &sealed)?;

        tracing::debug!(path = %path.display(), "saved container");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Plaintext interchange
    // ------------------------------------------------------------------

    /// The whole tree as pretty-printed JSON, **unencrypted**.
    pub fn export_json(&self) -> Result<String> {
        self.root.to_document()
    }

    /// Replace the open tree with one parsed from plaintext JSON.
    ///
    /// On a parse failure the current tree is left untouched.
    pub fn import_json(&mut self, text: &str) -> Result<()> {
        self.root = RootEntry::from_document(text.as_bytes())?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn root(&self) -> &RootEntry {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut RootEntry {
        &mut self.root
    }

    /// Discard the open tree and start over with an empty one.
    ///
    /// Returns the discarded tree.
    pub fn replace_root(&mut self, root: RootEntry) -> RootEntry {
        std::mem::replace(&mut self.root, root)
    }

    /// Newest `updated_at` anywhere in the tree, recomputed on every call.
    ///
    /// Compare against the value captured at the last save to tell whether
    /// there are unsaved changes.
    pub fn most_recent_update(&self) -> DateTime<Utc> {
        self.root.most_recent_update()
    }

    pub fn argon2_params(&self) -> Argon2Params {
        self.argon2_params
    }

    pub fn set_argon2_params(&mut self, argon2_params: Argon2Params) {
        self.argon2_params = argon2_params;
    }
}
