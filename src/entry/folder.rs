//! Folder entries: an ordered, mutable sequence of child entries.

use std::slice;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Entry, EntryMeta};
use crate::errors::{Result, TombError};

/// A named folder whose children keep their insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderEntry {
    #[serde(flatten)]
    pub(crate) meta: EntryMeta,

    entries: Vec<Entry>,
}

impl FolderEntry {
    /// Create an empty folder.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            meta: EntryMeta::new(name, description),
            entries: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.meta.name
    }

    pub fn description(&self) -> &str {
        &self.meta.description
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.meta.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.meta.updated_at
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.meta.set_name(name);
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.meta.set_description(description);
    }

    // ------------------------------------------------------------------
    // Children
    // ------------------------------------------------------------------

    /// Number of direct children.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Entry> {
        self.entries.get_mut(index)
    }

    pub fn iter(&self) -> slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Position of `entry` among the direct children, compared by identity.
    pub fn index_of(&self, entry: &Entry) -> Option<usize> {
        self.entries.iter().position(|child| std::ptr::eq(child, entry))
    }

    /// Insert `entry` at `index`, or append it when `index` is `None`.
    ///
    /// Returns the index the entry landed at.
    pub fn add_child(&mut self, entry: impl Into<Entry>, index: Option<usize>) -> Result<usize> {
        let len = self.entries.len();
        let index = index.unwrap_or(len);
        if index > len {
            return Err(TombError::IndexOutOfBounds { index, len });
        }

        self.meta.touch();
        self.entries.insert(index, entry.into());
        Ok(index)
    }

    /// Remove the child at `index`.
    ///
    /// An out-of-range index is reported as a warning and leaves the folder
    /// untouched.
    pub fn remove(&mut self, index: usize) -> Option<Entry> {
        if index >= self.entries.len() {
            tracing::warn!(
                folder = %self.meta.name,
                index,
                len = self.entries.len(),
                "entry not found during removal"
            );
            return None;
        }

        self.meta.touch();
        Some(self.entries.remove(index))
    }

    /// Remove the first child whose name equals `name` (case-sensitive).
    pub fn remove_first_named(&mut self, name: &str) -> Option<Entry> {
        match self.entries.iter().position(|child| child.name() == name) {
            Some(index) => self.remove(index),
            None => {
                tracing::warn!(
                    folder = %self.meta.name,
                    entry = name,
                    "entry not found during removal"
                );
                None
            }
        }
    }

    // ------------------------------------------------------------------
    // Lookup by name (direct children only)
    // ------------------------------------------------------------------

    /// Look up a direct child by name.
    ///
    /// When several children share the name, the *last* one wins. Callers
    /// rely on this tie-break, so it must not be changed to first-match.
    pub fn find_first_by_name(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().rev().find(|child| child.name() == name)
    }

    /// Look up a direct child folder by name, with the same last-match
    /// tie-break as `find_first_by_name`.
    pub fn find_first_folder_by_name(&self, name: &str) -> Option<&FolderEntry> {
        self.entries
            .iter()
            .rev()
            .filter_map(Entry::as_folder)
            .find(|folder| folder.name() == name)
    }

    pub fn find_first_folder_by_name_mut(&mut self, name: &str) -> Option<&mut FolderEntry> {
        self.entries
            .iter_mut()
            .rev()
            .filter_map(Entry::as_folder_mut)
            .find(|folder| folder.name() == name)
    }

    // ------------------------------------------------------------------
    // Derived values
    // ------------------------------------------------------------------

    /// Newest `updated_at` of this folder and all of its descendants.
    ///
    /// Recomputed on every call.
    pub fn most_recent_update(&self) -> DateTime<Utc> {
        self.entries
            .iter()
            .map(Entry::most_recent_update)
            .fold(self.meta.updated_at, Ord::max)
    }

    /// Number of entries beneath this folder, at any depth.
    pub fn descendant_count(&self) -> usize {
        self.entries
            .iter()
            .map(|child| 1 + child.as_folder().map_or(0, FolderEntry::descendant_count))
            .sum()
    }

    /// Check that `updated_at >= created_at` holds for this folder and
    /// every descendant, that no timestamp lies past the clock's range,
    /// and feed all timestamps into the entry clock.
    pub(crate) fn check_timestamps(&self) -> Result<()> {
        check_meta(&self.meta)?;
        for child in &self.entries {
            match child {
                Entry::Folder(folder) => folder.check_timestamps()?,
                Entry::Password(password) => check_meta(&password.meta)?,
            }
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a FolderEntry {
    type Item = &'a Entry;
    type IntoIter = slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

fn check_meta(meta: &EntryMeta) -> Result<()> {
    if !super::clock::in_range(meta.created_at) || !super::clock::in_range(meta.updated_at) {
        return Err(TombError::MalformedPayload(format!(
            "entry '{}' carries a timestamp past year 9999",
            meta.name
        )));
    }
    if meta.updated_at < meta.created_at {
        return Err(TombError::MalformedPayload(format!(
            "entry '{}' was updated before it was created",
            meta.name
        )));
    }
    super::clock::observe(meta.updated_at);
    Ok(())
}
