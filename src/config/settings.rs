use std::path::Path;

use serde::Deserialize;

use crate::crypto::kdf::Argon2Params;
use crate::errors::{Result, TombError};

/// Per-directory configuration, loaded from `.tomb.toml`.
///
/// Every field has a default, so Tomb works without any config file.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Argon2 memory cost in KiB (default: 128 MB).
    #[serde(default = "default_argon2_memory_kib")]
    pub argon2_memory_kib: u32,

    /// Argon2 iteration count (default: 3).
    #[serde(default = "default_argon2_iterations")]
    pub argon2_iterations: u32,

    /// Argon2 parallelism degree (default: 4).
    #[serde(default = "default_argon2_parallelism")]
    pub argon2_parallelism: u32,

    /// Length of passwords produced by `tomb generate`.
    #[serde(default = "default_generate_length")]
    pub generate_length: usize,

    /// How many passwords `tomb generate` prints.
    #[serde(default = "default_generate_count")]
    pub generate_count: usize,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_argon2_memory_kib() -> u32 {
    131_072 // 128 MB
}

fn default_argon2_iterations() -> u32 {
    3
}

fn default_argon2_parallelism() -> u32 {
    4
}

fn default_generate_length() -> usize {
    16
}

fn default_generate_count() -> usize {
    10
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            argon2_memory_kib: default_argon2_memory_kib(),
            argon2_iterations: default_argon2_iterations(),
            argon2_parallelism: default_argon2_parallelism(),
            generate_length: default_generate_length(),
            generate_count: default_generate_count(),
        }
    }
}

impl Settings {
    /// Name of the config file looked up in the working directory.
    pub const FILE_NAME: &'static str = ".tomb.toml";

    /// Load settings from `<dir>/.tomb.toml`.
    ///
    /// A missing file yields defaults. A file that does not parse, or
    /// whose Argon2 values are out of range, is an error.
    pub fn load(dir: &Path) -> Result<Self> {
        let config_path = dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            TombError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        settings
            .argon2_params()
            .validate()
            .map_err(|e| TombError::ConfigError(format!("{}: {e}", config_path.display())))?;

        tracing::debug!(path = %config_path.display(), "loaded settings");
        Ok(settings)
    }

    /// Convert the Argon2 settings into crypto-layer params.
    pub fn argon2_params(&self) -> Argon2Params {
        Argon2Params {
            memory_kib: self.argon2_memory_kib,
            iterations: self.argon2_iterations,
            parallelism: self.argon2_parallelism,
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────
