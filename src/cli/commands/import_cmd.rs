//! `tomb import` — build a container from a JSON export.

use std::fs;
use std::io::Read;
use std::path::Path;

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{container_path, load_settings, prompt_new_passphrase, Cli, PASSWORD_ENV};
use crate::container::Container;
use crate::errors::{Result, TombError};

/// Execute the `import` command.
pub fn execute(cli: &Cli, input: Option<&Path>, force: bool) -> Result<()> {
    let path = container_path(cli)?;

    if path.exists() && !force {
        output::tip("Pass --force to replace it.");
        return Err(TombError::ContainerAlreadyExists(path));
    }

    // 1. Read the document from the file or stdin.
    let text = Zeroizing::new(match input {
        Some(source) => fs::read_to_string(source).map_err(|e| {
            TombError::CommandFailed(format!(
                "failed to read import file {}: {e}",
                source.display()
            ))
        })?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    });

    // 2. Parse before asking for anything, so a bad file fails fast.
    let settings = load_settings()?;
    let mut container = Container::with_params(settings.argon2_params());
    container.import_json(&text)?;

    // 3. Encrypt under a new passphrase.
    let passphrase = prompt_new_passphrase(PASSWORD_ENV)?;
    container.save(&path, passphrase.as_bytes())?;

    output::success(&format!(
        "Imported {} entries into {}",
        container.root().descendant_count(),
        path.display()
    ));

    Ok(())
}
