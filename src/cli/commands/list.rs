//! `tomb list` — display the entries of one folder in a table.

use crate::cli::output;
use crate::cli::{open_container, Cli};
use crate::errors::Result;

/// Execute the `list` command.
pub fn execute(cli: &Cli, folders: &[String], reveal: bool) -> Result<()> {
    let (container, _, _passphrase) = open_container(cli)?;

    let folder = container.root().find_folder_path(folders)?;

    let location = if folders.is_empty() {
        "Top level".to_string()
    } else {
        output::folder_trail(folders)
    };
    output::info(&format!("{location} — {} entries", folder.len()));

    output::print_entries_table(folder, reveal);

    Ok(())
}
