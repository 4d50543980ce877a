//! The root of a credential tree and path-addressed tree operations.
//!
//! Entries below the root are addressed by index paths: `&[]` is the root
//! itself, `&[2]` its third child, `&[2, 0]` that child's first child, and
//! so on.

use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};

use super::{Entry, FolderEntry};
use crate::errors::{Result, TombError};

/// Fixed name of every root node.
pub const ROOT_NAME: &str = "top-level-root";

/// Producer tag written by this build.
pub const PRODUCER: &str = concat!("tomb-cli v", env!("CARGO_PKG_VERSION"));

/// The single top-level folder of a container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootEntry {
    #[serde(flatten)]
    folder: FolderEntry,

    /// Free-form tag naming the program that produced the document.
    #[serde(rename = "user_agent", default = "default_producer")]
    producer: String,
}

/// Wire shape of a whole document: a root carrying `"type": "root"`.
#[derive(Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum DocumentRef<'a> {
    Root(&'a RootEntry),
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum Document {
    Root(RootEntry),
}

fn default_producer() -> String {
    PRODUCER.to_string()
}

impl Default for RootEntry {
    fn default() -> Self {
        Self::new()
    }
}

impl RootEntry {
    /// Create an empty root.
    pub fn new() -> Self {
        Self {
            folder: FolderEntry::new(ROOT_NAME, ""),
            producer: default_producer(),
        }
    }

    pub fn producer(&self) -> &str {
        &self.producer
    }

    // ------------------------------------------------------------------
    // Structured document
    // ------------------------------------------------------------------

    /// Parse a JSON document into a tree.
    ///
    /// An unknown `type` anywhere in the tree, a missing field, or a node
    /// updated before it was created fails the whole parse.
    pub fn from_document(bytes: &[u8]) -> Result<Self> {
        let Document::Root(root) = serde_json::from_slice(bytes)
            .map_err(|e| TombError::MalformedPayload(format!("document: {e}")))?;
        root.folder.check_timestamps()?;
        Ok(root)
    }

    /// Serialize the tree as pretty-printed JSON (two-space indent).
    pub fn to_document(&self) -> Result<String> {
        serde_json::to_string_pretty(&DocumentRef::Root(self))
            .map_err(|e| TombError::SerializationError(format!("document: {e}")))
    }

    // ------------------------------------------------------------------
    // Path addressing
    // ------------------------------------------------------------------

    /// The folder at `path`; the empty path is the root itself.
    pub fn folder_at(&self, path: &[usize]) -> Result<&FolderEntry> {
        let mut folder = &self.folder;
        for &index in path {
            let entry = folder
                .get(index)
                .ok_or(TombError::IndexOutOfBounds { index, len: folder.len() })?;
            folder = entry
                .as_folder()
                .ok_or_else(|| TombError::NotAFolder(entry.name().to_string()))?;
        }
        Ok(folder)
    }

    pub fn folder_at_mut(&mut self, path: &[usize]) -> Result<&mut FolderEntry> {
        let mut folder = &mut self.folder;
        for &index in path {
            let len = folder.len();
            folder = match folder.get_mut(index) {
                Some(Entry::Folder(child)) => child,
                Some(other) => return Err(TombError::NotAFolder(other.name().to_string())),
                None => return Err(TombError::IndexOutOfBounds { index, len }),
            };
        }
        Ok(folder)
    }

    /// The entry at a non-empty `path`.
    pub fn entry_at(&self, path: &[usize]) -> Result<&Entry> {
        let (&index, parent) = path
            .split_last()
            .ok_or_else(|| TombError::EntryNotFound("empty path".into()))?;
        let folder = self.folder_at(parent)?;
        folder
            .get(index)
            .ok_or(TombError::IndexOutOfBounds { index, len: folder.len() })
    }

    pub fn entry_at_mut(&mut self, path: &[usize]) -> Result<&mut Entry> {
        let (&index, parent) = path
            .split_last()
            .ok_or_else(|| TombError::EntryNotFound("empty path".into()))?;
        let folder = self.folder_at_mut(parent)?;
        let len = folder.len();
        folder
            .get_mut(index)
            .ok_or(TombError::IndexOutOfBounds { index, len })
    }

    /// Walk a chain of folder names from the root, resolving each segment
    /// with `find_first_folder_by_name`.
    pub fn find_folder_path<S: AsRef<str>>(&self, names: &[S]) -> Result<&FolderEntry> {
        let mut folder = &self.folder;
        for name in names {
            let name = name.as_ref();
            folder = folder
                .find_first_folder_by_name(name)
                .ok_or_else(|| TombError::FolderNotFound(name.to_string()))?;
        }
        Ok(folder)
    }

    pub fn find_folder_path_mut<S: AsRef<str>>(&mut self, names: &[S]) -> Result<&mut FolderEntry> {
        let mut folder = &mut self.folder;
        for name in names {
            let name = name.as_ref();
            folder = folder
                .find_first_folder_by_name_mut(name)
                .ok_or_else(|| TombError::FolderNotFound(name.to_string()))?;
        }
        Ok(folder)
    }

    // ------------------------------------------------------------------
    // Move
    // ------------------------------------------------------------------

    /// Move the child at `source_index` of the folder at `source_parent`
    /// so that it lands at `dest_index` of the folder at `dest_parent`.
    ///
    /// `dest_index` is interpreted against the destination as it looks
    /// *before* the move, so within one folder moving index 0 to index 3
    /// places the entry just ahead of the entry that was at index 3.
    /// Both folders are touched. Nothing changes if any argument is invalid.
    pub fn move_entry(
        &mut self,
        source_parent: &[usize],
        source_index: usize,
        dest_parent: &[usize],
        dest_index: usize,
    ) -> Result<()> {
        let source_len = self.folder_at(source_parent)?.len();
        if source_index >= source_len {
            return Err(TombError::IndexOutOfBounds {
                index: source_index,
                len: source_len,
            });
        }

        let mut moved_path = source_parent.to_vec();
        moved_path.push(source_index);
        if dest_parent.starts_with(&moved_path) {
            return Err(TombError::InvalidMove(
                "cannot move a folder into itself or one of its descendants".into(),
            ));
        }

        let dest_len = self.folder_at(dest_parent)?.len();
        if dest_index > dest_len {
            return Err(TombError::IndexOutOfBounds {
                index: dest_index,
                len: dest_len,
            });
        }

        if source_parent == dest_parent {
            // Landing after the source: the removal shifts the target left.
            let dest_index = if dest_index <= source_index {
                dest_index
            } else {
                dest_index - 1
            };
            let folder = self.folder_at_mut(source_parent)?;
            if let Some(entry) = folder.remove(source_index) {
                folder.add_child(entry, Some(dest_index))?;
            }
            return Ok(());
        }

        // Removing the source shifts later siblings, which may sit on the
        // destination path.
        let mut dest_path = dest_parent.to_vec();
        let depth = source_parent.len();
        if dest_path.len() > depth
            && dest_path.starts_with(source_parent)
            && dest_path[depth] > source_index
        {
            dest_path[depth] -= 1;
        }

        if let Some(entry) = self.folder_at_mut(source_parent)?.remove(source_index) {
            self.folder_at_mut(&dest_path)?
                .add_child(entry, Some(dest_index))?;
        }
        Ok(())
    }
}

impl Deref for RootEntry {
    type Target = FolderEntry;

    fn deref(&self) -> &FolderEntry {
        &self.folder
    }
}

impl DerefMut for RootEntry {
    fn deref_mut(&mut self) -> &mut FolderEntry {
        &mut self.folder
    }
}
