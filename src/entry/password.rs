//! Leaf entry holding one set of credentials.
//!
//! The secret is kept in clear inside the tree; confidentiality comes from
//! the container encryption, not from field-level encryption.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::EntryMeta;

/// A username / password pair with a name and description.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordEntry {
    #[serde(flatten)]
    pub(crate) meta: EntryMeta,

    #[serde(rename = "user")]
    username: String,

    #[serde(rename = "password")]
    secret: String,
}

impl PasswordEntry {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        username: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        Self {
            meta: EntryMeta::new(name, description),
            username: username.into(),
            secret: secret.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.meta.name
    }

    pub fn description(&self) -> &str {
        &self.meta.description
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// The password value itself.
    pub fn secret(&self) -> &str {
        &self.secret
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

    pub fn set_username(&mut self, username: impl Into<String>) {
        self.meta.touch();
        self.username = username.into();
    }

    pub fn set_secret(&mut self, secret: impl Into<String>) {
        self.meta.touch();
        self.secret = secret.into();
    }
}

// Keep the secret out of logs and panic messages.
impl fmt::Debug for PasswordEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordEntry")
            .field("meta", &self.meta)
            .field("username", &self.username)
            .field("secret", &"<redacted>")
            .finish()
    }
}
