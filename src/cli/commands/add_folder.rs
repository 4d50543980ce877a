//! `tomb add-folder` — create a new folder.

use crate::cli::output;
use crate::cli::{open_container, save_container, split_entry_path, Cli};
use crate::entry::FolderEntry;
use crate::errors::Result;

/// Execute the `add-folder` command.
pub fn execute(cli: &Cli, path: &[String], description: &str) -> Result<()> {
    let (folders, name) = split_entry_path(path)?;

    let (mut container, file, passphrase) = open_container(cli)?;

    let parent = container.root_mut().find_folder_path_mut(folders)?;
    parent.add_child(FolderEntry::new(name, description), None)?;

    save_container(&mut container, &file, passphrase.as_bytes())?;

    output::success(&format!("Folder '{name}' added"));

    Ok(())
}
