//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::{Path, PathBuf};

use clap::Parser;

use zeroize::Zeroizing;

use crate::config::Settings;
use crate::container::Container;
use crate::crypto::Argon2Params;
use crate::errors::{Result, TombError};

/// Minimum passphrase length to prevent trivially weak passphrases.
const MIN_PASSPHRASE_LEN: usize = 8;

/// Environment variable consulted before prompting for the passphrase.
pub const PASSWORD_ENV: &str = "TOMB_PASSWORD";

/// Environment variable consulted before prompting for a replacement
/// passphrase in `rotate-key`.
pub const NEW_PASSWORD_ENV: &str = "TOMB_NEW_PASSWORD";

/// Tomb CLI: encrypted password container.
#[derive(Parser)]
#[command(name = "tomb", about = "Encrypted password container", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Container file (default: passwords.tomb)
    #[arg(
        short,
        long,
        env = "TOMB_FILE",
        default_value = "passwords.tomb",
        global = true
    )]
    pub file: PathBuf,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Create a new, empty container
    Init,

    /// Print the decrypted tree as JSON (or write it to a file)
    Export {
        /// Output file path (prints to stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Create a container from a JSON export
    Import {
        /// JSON file to read (reads stdin if omitted)
        input: Option<PathBuf>,

        /// Overwrite an existing container
        #[arg(long)]
        force: bool,
    },

    /// Add a password entry
    AddPass {
        /// Folder names followed by the new entry's name
        #[arg(required = true, num_args = 1..)]
        path: Vec<String>,

        /// Free-text description
        #[arg(short, long, default_value = "")]
        description: String,

        /// Username or login for the account
        #[arg(short, long, default_value = "")]
        username: String,

        /// The secret to store (omit for interactive prompt)
        #[arg(short, long, conflicts_with = "generate")]
        password: Option<String>,

        /// Store a freshly generated password instead of prompting
        #[arg(short, long)]
        generate: bool,
    },

    /// Add a folder
    AddFolder {
        /// Folder names followed by the new folder's name
        #[arg(required = true, num_args = 1..)]
        path: Vec<String>,

        /// Free-text description
        #[arg(short, long, default_value = "")]
        description: String,
    },

    /// Remove an entry (and everything below it)
    Remove {
        /// Folder names followed by the name of the entry to remove
        #[arg(required = true, num_args = 1..)]
        path: Vec<String>,

        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },

    /// Find entries whose name matches a regular expression
    Search {
        /// Case-insensitive regular expression
        pattern: String,

        /// Show stored passwords in the output
        #[arg(long)]
        reveal: bool,
    },

    /// List the entries of a folder (the top level if no folders given)
    List {
        /// Folder names leading to the folder to list
        folders: Vec<String>,

        /// Show stored passwords in the output
        #[arg(long)]
        reveal: bool,
    },

    /// Change the container passphrase
    RotateKey,

    /// Print random passwords
    Generate {
        /// Password length (default from .tomb.toml, else 16)
        length: Option<usize>,

        /// How many passwords to print (default from .tomb.toml, else 10)
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Get the passphrase of an existing container, trying in order:
/// 1. `TOMB_PASSWORD` env var (scripts/CI), even when set to the empty string
/// 2. Interactive prompt
///
/// Returns `Zeroizing<String>` so the passphrase is wiped from memory on drop.
pub fn prompt_passphrase() -> Result<Zeroizing<String>> {
    if let Some(pw) = passphrase_from_env(PASSWORD_ENV) {
        return Ok(pw);
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Enter container passphrase")
        .allow_empty_password(true)
        .interact()
        .map_err(|e| TombError::CommandFailed(format!("passphrase prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new passphrase with confirmation.
///
/// `env_var` is checked first for scripted use. Enforces a minimum length.
///
/// Returns `Zeroizing<String>` so the passphrase is wiped from memory on drop.
pub fn prompt_new_passphrase(env_var: &str) -> Result<Zeroizing<String>> {
    if let Some(pw) = passphrase_from_env(env_var) {
        if pw.chars().count() < MIN_PASSPHRASE_LEN {
            return Err(TombError::CommandFailed(format!(
                "passphrase must be at least {MIN_PASSPHRASE_LEN} characters"
            )));
        }
        return Ok(pw);
    }

    loop {
        let passphrase = Zeroizing::new(
            dialoguer::Password::new()
                .with_prompt("Choose container passphrase")
                .with_confirmation(
                    "Confirm container passphrase",
                    "Passphrases do not match, try again",
                )
                .interact()
                .map_err(|e| TombError::CommandFailed(format!("passphrase prompt: {e}")))?,
        );

        if passphrase.chars().count() < MIN_PASSPHRASE_LEN {
            output::warning(&format!(
                "Passphrase must be at least {MIN_PASSPHRASE_LEN} characters. Try again."
            ));
            continue;
        }

        return Ok(passphrase);
    }
}

/// Read a passphrase from `var`. A variable that is set but empty yields
/// the empty passphrase; only an unset variable falls through to a prompt.
fn passphrase_from_env(var: &str) -> Option<Zeroizing<String>> {
    std::env::var(var).ok().map(Zeroizing::new)
}

/// Resolve the container path from the CLI arguments against the cwd.
pub fn container_path(cli: &Cli) -> Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(&cli.file))
}

/// Load `.tomb.toml` from the current directory.
pub fn load_settings() -> Result<Settings> {
    let cwd = std::env::current_dir()?;
    Settings::load(&cwd)
}

/// Prompt for the passphrase and open the container named on the command line.
///
/// Returns the passphrase too, so commands that modify the tree can save
/// it back under the same passphrase. `.tomb.toml` is not read here: the
/// header carries its own KDF parameters, and only [`save_container`]
/// needs the configured ones.
pub fn open_container(cli: &Cli) -> Result<(Container, PathBuf, Zeroizing<String>)> {
    let path = container_path(cli)?;
    if !path.exists() {
        output::tip("Run `tomb init` to create a container.");
        return Err(TombError::ContainerNotFound(path));
    }

    let passphrase = prompt_passphrase()?;
    let container = Container::open(&path, passphrase.as_bytes(), Argon2Params::default())?;
    Ok((container, path, passphrase))
}

/// Save `container` to `path` with the Argon2 cost configured in `.tomb.toml`.
pub fn save_container(container: &mut Container, path: &Path, passphrase: &[u8]) -> Result<()> {
    container.set_argon2_params(load_settings()?.argon2_params());
    container.save(path, passphrase)
}

/// Split `[folder.., name]` into the folder chain and the final name.
pub fn split_entry_path(path: &[String]) -> Result<(&[String], &str)> {
    match path.split_last() {
        Some((name, folders)) => {
            if name.is_empty() {
                return Err(TombError::CommandFailed("entry name cannot be empty".into()));
            }
            Ok((folders, name.as_str()))
        }
        None => Err(TombError::CommandFailed("an entry name is required".into())),
    }
}
