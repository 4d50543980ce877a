//! `tomb rotate-key` — change the container passphrase.
//!
//! Decrypts the tree with the current passphrase and saves it under the new
//! one, which draws a fresh salt and IV and re-derives the key. A legacy
//! container is upgraded to the current format on the way.

use crate::cli::output;
use crate::cli::{open_container, prompt_new_passphrase, save_container, Cli, NEW_PASSWORD_ENV};
use crate::errors::Result;

/// Execute the `rotate-key` command.
pub fn execute(cli: &Cli) -> Result<()> {
    // 1. Open the container with the current passphrase.
    output::info("Enter your current container passphrase.");
    let (mut container, path, _old_passphrase) = open_container(cli)?;

    // 2. Prompt for the new passphrase.
    output::info("Choose your new container passphrase.");
    let new_passphrase = prompt_new_passphrase(NEW_PASSWORD_ENV)?;

    // 3. Save atomically under the new passphrase.
    save_container(&mut container, &path, new_passphrase.as_bytes())?;

    output::success(&format!(
        "Passphrase changed for {} ({} entries re-encrypted)",
        path.display(),
        container.root().descendant_count()
    ));

    Ok(())
}
