use std::fmt::Write;
use std::path::PathBuf;

use crate::error::Result;
use crate::walker::{DirectoryEntry, DirectoryListing};

const EMPTY_MARKER: &str = "(empty)";

fn entry_line(entry: &DirectoryEntry) -> String {
    if entry.is_dir {
        format!("{}/", entry.path.display())
    } else {
        entry.path.display().to_string()
    }
}

/// One line per entry (directories end with `/`), then one `Warning:` line per skipped subtree.
pub fn render_listing(listing: &DirectoryListing) -> String {
    let mut lines: Vec<String> = listing.entries.iter().map(entry_line).collect();
    if lines.is_empty() {
        lines.push(EMPTY_MARKER.to_string());
    }
    lines.extend(
        listing
            .warnings
            .iter()
            .map(|warning| format!("Warning: {warning}")),
    );
    lines.join("\n")
}

/// Renders per-root sections, each headed by `=== <root> ===`.
///
/// A root that could not be walked renders its error inline instead of aborting the others.
pub fn render_roots(sections: &[(PathBuf, Result<DirectoryListing>)]) -> String {
    let mut out = String::new();
    for (idx, (root, result)) in sections.iter().enumerate() {
        if idx > 0 {
            out.push_str("\n\n");
        }
        let _ = writeln!(out, "=== {} ===", root.display());
        match result {
            Ok(listing) => out.push_str(&render_listing(listing)),
            Err(err) => {
                let _ = write!(out, "Error: {err}");
            }
        }
    }
    out
}
