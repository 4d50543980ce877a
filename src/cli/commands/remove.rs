//! `tomb remove` — delete an entry and everything below it.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{open_container, save_container, split_entry_path, Cli};
use crate::errors::{Result, TombError};

/// Execute the `remove` command.
pub fn execute(cli: &Cli, path: &[String], force: bool) -> Result<()> {
    let (folders, name) = split_entry_path(path)?;

    let (mut container, file, passphrase) = open_container(cli)?;
    let folder = container.root_mut().find_folder_path_mut(folders)?;

    let Some(entry) = folder.find_first_by_name(name) else {
        return Err(TombError::EntryNotFound(name.to_string()));
    };
    let Some(index) = folder.index_of(entry) else {
        return Err(TombError::EntryNotFound(name.to_string()));
    };

    // Unless --force is set, ask for confirmation before removing.
    if !force {
        let what = match entry.as_folder() {
            Some(f) if !f.is_empty() => {
                format!("folder '{name}' and its {} entries", f.descendant_count())
            }
            Some(_) => format!("folder '{name}'"),
            None => format!("password '{name}'"),
        };
        let confirmed = Confirm::new()
            .with_prompt(format!("Remove {what}?"))
            .default(false)
            .interact()
            .map_err(|e| TombError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            return Err(TombError::UserCancelled);
        }
    }

    folder.remove(index);
    save_container(&mut container, &file, passphrase.as_bytes())?;

    output::success(&format!("Removed '{name}'"));

    Ok(())
}
