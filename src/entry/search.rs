//! Depth-first keyword search over entry names.

use regex::{Regex, RegexBuilder};

use super::{Entry, FolderEntry};
use crate::errors::{Result, TombError};

/// One entry whose name matched, with the names of the folders above it
/// (outermost first, the searched folder itself excluded).
#[derive(Debug, Clone)]
pub struct SearchHit<'a> {
    pub parents: Vec<&'a str>,
    pub entry: &'a Entry,
}

/// Search `folder` and every descendant for names matching `keyword`.
///
/// `keyword` is a regular expression matched case-insensitively anywhere in
/// the name. A folder's descendants are reported before the folder itself.
pub fn search<'a>(folder: &'a FolderEntry, keyword: &str) -> Result<Vec<SearchHit<'a>>> {
    let pattern = RegexBuilder::new(keyword)
        .case_insensitive(true)
        .build()
        .map_err(|e| TombError::InvalidPattern(e.to_string()))?;

    let mut hits = Vec::new();
    let mut parents = Vec::new();
    search_folder(folder, &pattern, &mut parents, &mut hits);
    Ok(hits)
}

fn search_folder<'a>(
    folder: &'a FolderEntry,
    pattern: &Regex,
    parents: &mut Vec<&'a str>,
    hits: &mut Vec<SearchHit<'a>>,
) {
    for entry in folder {
        if let Entry::Folder(child) = entry {
            parents.push(child.name());
            search_folder(child, pattern, parents, hits);
            parents.pop();
        }

        if pattern.is_match(entry.name()) {
            hits.push(SearchHit {
                parents: parents.clone(),
                entry,
            });
        }
    }
}
