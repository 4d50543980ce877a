//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::entry::{Entry, SearchHit};

/// What a hidden password is shown as.
const MASK: &str = "********";

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Render a folder chain as `A > B > C`.
pub fn folder_trail<S: AsRef<str>>(folders: &[S]) -> String {
    folders
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(" > ")
}

/// Print a table of entries (Type, Name, Username, Password, Description, Updated).
///
/// Passwords are masked unless `reveal` is set.
pub fn print_entries_table<'a>(entries: impl IntoIterator<Item = &'a Entry>, reveal: bool) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "Type",
        "Name",
        "Username",
        "Password",
        "Description",
        "Updated",
    ]);

    let mut rows = 0;
    for entry in entries {
        table.add_row(entry_row(entry, reveal));
        rows += 1;
    }

    if rows == 0 {
        info("This folder is empty.");
        tip("Run `tomb add-pass <NAME>` to add your first password.");
        return;
    }

    println!("{table}");
}

/// Print search hits, each prefixed with the folder it lives in.
pub fn print_search_hits(hits: &[SearchHit<'_>], reveal: bool) {
    if hits.is_empty() {
        info("No matching entries.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "Folder",
        "Type",
        "Name",
        "Username",
        "Password",
        "Description",
        "Updated",
    ]);

    for hit in hits {
        let mut row = vec![folder_trail(&hit.parents)];
        row.extend(entry_row(hit.entry, reveal));
        table.add_row(row);
    }

    println!("{table}");
}

fn entry_row(entry: &Entry, reveal: bool) -> Vec<String> {
    let (username, password) = match entry {
        Entry::Password(p) => {
            let secret = if reveal {
                p.secret().to_string()
            } else {
                MASK.to_string()
            };
            (p.username().to_string(), secret)
        }
        Entry::Folder(f) => (String::new(), format!("({} entries)", f.len())),
    };

    vec![
        entry.type_tag().to_string(),
        entry.name().to_string(),
        username,
        password,
        entry.description().to_string(),
        entry
            .updated_at()
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
    ]
}
