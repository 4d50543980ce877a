//! `tomb add-pass` — store a new password entry.

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{load_settings, open_container, save_container, split_entry_path, Cli};
use crate::entry::PasswordEntry;
use crate::errors::{Result, TombError};
use crate::generator;

/// Arguments of `add-pass`, grouped to keep the call site readable.
pub struct AddPass<'a> {
    pub path: &'a [String],
    pub description: &'a str,
    pub username: &'a str,
    pub password: Option<&'a str>,
    pub generate: bool,
}

/// Execute the `add-pass` command.
pub fn execute(cli: &Cli, args: AddPass<'_>) -> Result<()> {
    let (folders, name) = split_entry_path(args.path)?;

    let (mut container, path, passphrase) = open_container(cli)?;

    // Resolve the secret: flag, generated, or prompted.
    let secret = match (args.password, args.generate) {
        (Some(pw), _) => Zeroizing::new(pw.to_string()),
        (None, true) => {
            let settings = load_settings()?;
            Zeroizing::new(generator::generate_alphanumeric(settings.generate_length)?)
        }
        (None, false) => Zeroizing::new(
            dialoguer::Password::new()
                .with_prompt(format!("Password for '{name}'"))
                .allow_empty_password(true)
                .interact()
                .map_err(|e| TombError::CommandFailed(format!("password prompt: {e}")))?,
        ),
    };

    let folder = container.root_mut().find_folder_path_mut(folders)?;
    folder.add_child(
        PasswordEntry::new(name, args.description, args.username, secret.as_str()),
        None,
    )?;

    save_container(&mut container, &path, passphrase.as_bytes())?;

    output::success(&format!("Password '{name}' added"));
    if args.generate {
        output::tip("Run `tomb list --reveal` to see the generated password.");
    }

    Ok(())
}
