//! `tomb generate` — print random alphanumeric passwords.

use crate::cli::load_settings;
use crate::errors::Result;
use crate::generator;

/// Execute the `generate` command.
pub fn execute(length: Option<usize>, count: Option<usize>) -> Result<()> {
    let settings = load_settings()?;
    let length = length.unwrap_or(settings.generate_length);
    let count = count.unwrap_or(settings.generate_count);

    for _ in 0..count {
        println!("{}", generator::generate_alphanumeric(length)?);
    }

    Ok(())
}
