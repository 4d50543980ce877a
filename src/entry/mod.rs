//! Entry tree model — the credential hierarchy stored in a container.
//!
//! This module provides:
//! - `Entry`, the tagged union of every node that can live in a folder
//! - `FolderEntry` and `PasswordEntry`, the two child node kinds (`folder`, `password`)
//! - `RootEntry`, the single top-level node of a container (`root`)
//! - Depth-first keyword search (`search`)
//!
//! Every node serializes to one JSON object carrying a `type` discriminant,
//! `name`, `description`, and `created_at` / `updated_at` in epoch milliseconds.

pub mod clock;
pub mod folder;
pub mod password;
pub mod root;
pub mod search;

use chrono::serde::ts_milliseconds;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use folder::FolderEntry;
pub use password::PasswordEntry;
pub use root::RootEntry;
pub use search::{search, SearchHit};

/// Any node that can be a child of a folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Entry {
    Folder(FolderEntry),
    Password(PasswordEntry),
}

impl Entry {
    /// The `type` discriminant written to the document.
    pub fn type_tag(&self) -> &'static str {
        match self {
            Entry::Folder(_) => "folder",
            Entry::Password(_) => "password",
        }
    }

    pub fn name(&self) -> &str {
        &self.meta().name
    }

    pub fn description(&self) -> &str {
        &self.meta().description
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.meta().created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.meta().updated_at
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.meta_mut().set_name(name);
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.meta_mut().set_description(description);
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, Entry::Folder(_))
    }

    pub fn as_folder(&self) -> Option<&FolderEntry> {
        match self {
            Entry::Folder(folder) => Some(folder),
            Entry::Password(_) => None,
        }
    }

    pub fn as_folder_mut(&mut self) -> Option<&mut FolderEntry> {
        match self {
            Entry::Folder(folder) => Some(folder),
            Entry::Password(_) => None,
        }
    }

    pub fn as_password(&self) -> Option<&PasswordEntry> {
        match self {
            Entry::Password(password) => Some(password),
            Entry::Folder(_) => None,
        }
    }

    pub fn as_password_mut(&mut self) -> Option<&mut PasswordEntry> {
        match self {
            Entry::Password(password) => Some(password),
            Entry::Folder(_) => None,
        }
    }

    /// Newest `updated_at` of this entry and everything beneath it.
    pub fn most_recent_update(&self) -> DateTime<Utc> {
        match self {
            Entry::Folder(folder) => folder.most_recent_update(),
            Entry::Password(password) => password.updated_at(),
        }
    }

    fn meta(&self) -> &EntryMeta {
        match self {
            Entry::Folder(folder) => &folder.meta,
            Entry::Password(password) => &password.meta,
        }
    }

    fn meta_mut(&mut self) -> &mut EntryMeta {
        match self {
            Entry::Folder(folder) => &mut folder.meta,
            Entry::Password(password) => &mut password.meta,
        }
    }
}

impl From<FolderEntry> for Entry {
    fn from(folder: FolderEntry) -> Self {
        Entry::Folder(folder)
    }
}

impl From<PasswordEntry> for Entry {
    fn from(password: PasswordEntry) -> Self {
        Entry::Password(password)
    }
}

/// Fields shared by every node kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct EntryMeta {
    pub(crate) name: String,
    pub(crate) description: String,
    #[serde(with = "ts_milliseconds")]
    pub(crate) created_at: DateTime<Utc>,
    #[serde(with = "ts_milliseconds")]
    pub(crate) updated_at: DateTime<Utc>,
}

impl EntryMeta {
    pub(crate) fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        let now = clock::now();
        Self {
            name: name.into(),
            description: description.into(),
            created_at: now,
            updated_at: now,
        }
    }

    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.touch();
        self.name = name.into();
    }

    pub(crate) fn set_description(&mut self, description: impl Into<String>) {
        self.touch();
        self.description = description.into();
    }

    pub(crate) fn touch(&mut self) {
        self.updated_at = clock::now();
    }
}
