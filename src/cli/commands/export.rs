//! `tomb export` — print the decrypted tree as JSON.
//!
//! The output is the same document stored inside the container, pretty
//! printed and **unencrypted**. `tomb import` reads it back.

use std::fs;
use std::path::Path;

use crate::cli::output;
use crate::cli::{open_container, Cli};
use crate::errors::{Result, TombError};

/// Execute the `export` command.
pub fn execute(cli: &Cli, output_path: Option<&Path>) -> Result<()> {
    let (container, _, _passphrase) = open_container(cli)?;
    let content = zeroize::Zeroizing::new(container.export_json()?);

    match output_path {
        Some(dest) => {
            // Refuse to overwrite a container with its own plaintext.
            if dest
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("tomb"))
            {
                return Err(TombError::CommandFailed(
                    "refusing to export over a .tomb file".into(),
                ));
            }

            fs::write(dest, content.as_bytes()).map_err(|e| {
                TombError::CommandFailed(format!("failed to write export file: {e}"))
            })?;

            output::success(&format!(
                "Exported {} entries to {}",
                container.root().descendant_count(),
                dest.display()
            ));
            output::warning("The export is not encrypted. Delete it when you are done.");
        }
        None => {
            // Raw output only, so it can be piped.
            println!("{}", content.as_str());
        }
    }

    Ok(())
}
