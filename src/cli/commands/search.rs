//! `tomb search` — find entries whose name matches a regular expression.

use crate::cli::output;
use crate::cli::{open_container, Cli};
use crate::entry;
use crate::errors::Result;

/// Execute the `search` command.
pub fn execute(cli: &Cli, pattern: &str, reveal: bool) -> Result<()> {
    let (container, _, _passphrase) = open_container(cli)?;

    let hits = entry::search(container.root(), pattern)?;

    output::info(&format!("{} match(es) for '{pattern}'", hits.len()));
    output::print_search_hits(&hits, reveal);

    Ok(())
}
