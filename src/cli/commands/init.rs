//! `tomb init` — create a new, empty container.

use crate::cli::output;
use crate::cli::{container_path, load_settings, prompt_new_passphrase, Cli, PASSWORD_ENV};
use crate::container::Container;
use crate::errors::{Result, TombError};

/// Execute the `init` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let path = container_path(cli)?;

    // 1. Refuse to clobber an existing container.
    if path.exists() {
        output::tip("Use `tomb add-pass` to add entries to the existing container.");
        return Err(TombError::ContainerAlreadyExists(path));
    }

    // 2. Prompt for a new passphrase (with confirmation).
    let passphrase = prompt_new_passphrase(PASSWORD_ENV)?;

    // 3. Write an empty tree under it.
    let settings = load_settings()?;
    let container = Container::with_params(settings.argon2_params());
    container.save(&path, passphrase.as_bytes())?;

    output::success(&format!("Container created at {}", path.display()));
    output::tip("Run `tomb add-folder <NAME>` to organize entries.");
    output::tip("Run `tomb add-pass <NAME>` to store a password.");

    Ok(())
}
