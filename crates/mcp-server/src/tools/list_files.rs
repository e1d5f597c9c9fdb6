use explorer_files::{render_listing, render_roots};
use rmcp::model::{CallToolResult, Content};
use rmcp::ErrorData as McpError;
use std::path::{Path, PathBuf};

use super::schemas::list_files::ListFilesRequest;
use super::util::{explorer_error_result, run_blocking};
use super::ExplorerService;

/// Where a `list_files` call should walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum ListTarget {
    /// Every configured search root, each in its own section.
    SearchRoots,
    Directory(PathBuf),
}

/// `"."`/empty means the configured roots; `~` expands to home; relative paths resolve from `cwd`.
pub(super) fn list_target(raw: Option<&str>, home: Option<&Path>, cwd: &Path) -> ListTarget {
    let raw = raw.map(str::trim).unwrap_or_default();
    if raw.is_empty() || raw == "." {
        return ListTarget::SearchRoots;
    }

    let expanded = match (raw.strip_prefix('~'), home) {
        (Some(""), Some(home)) => home.to_path_buf(),
        (Some(rest), Some(home)) if rest.starts_with('/') || rest.starts_with('\\') => {
            home.join(&rest[1..])
        }
        _ => PathBuf::from(raw),
    };

    if expanded.is_absolute() {
        ListTarget::Directory(expanded)
    } else {
        ListTarget::Directory(cwd.join(expanded))
    }
}

/// List the configured roots (default) or an explicit directory.
pub(super) async fn list_files(
    service: &ExplorerService,
    request: ListFilesRequest,
) -> Result<CallToolResult, McpError> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let home = dirs::home_dir();
    let target = list_target(request.directory.as_deref(), home.as_deref(), &cwd);

    let explorer = service.explorer();
    match target {
        ListTarget::SearchRoots => {
            let sections = match run_blocking("list_files", move || explorer.list_all()).await {
                Ok(sections) => sections,
                Err(result) => return Ok(result),
            };
            for (root, result) in &sections {
                if let Err(err) = result {
                    log::warn!("Search root not accessible {}: {err}", root.display());
                }
            }
            log::info!("Listed {} search root(s)", sections.len());
            Ok(CallToolResult::success(vec![Content::text(render_roots(
                &sections,
            ))]))
        }
        ListTarget::Directory(dir) => {
            log::info!("Listing directory: {}", dir.display());
            let outcome = match run_blocking("list_files", move || explorer.list(&dir)).await {
                Ok(outcome) => outcome,
                Err(result) => return Ok(result),
            };
            match outcome {
                Ok(listing) => {
                    log::info!(
                        "Listed {} entries under {}",
                        listing.entries.len(),
                        listing.root.display()
                    );
                    Ok(CallToolResult::success(vec![Content::text(
                        render_listing(&listing),
                    )]))
                }
                Err(err) => Ok(explorer_error_result("list_files", &err)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn dot_and_empty_mean_search_roots() {
        let cwd = Path::new("/work");
        for raw in [None, Some(""), Some("."), Some("  .  ")] {
            assert_eq!(list_target(raw, None, cwd), ListTarget::SearchRoots);
        }
    }

    #[test]
    fn home_shorthand_is_expanded() {
        let cwd = Path::new("/work");
        let home = Path::new("/home/alex");
        assert_eq!(
            list_target(Some("~"), Some(home), cwd),
            ListTarget::Directory(PathBuf::from("/home/alex"))
        );
        assert_eq!(
            list_target(Some("~/projects"), Some(home), cwd),
            ListTarget::Directory(PathBuf::from("/home/alex/projects"))
        );
        // `~user` is not expanded.
        assert_eq!(
            list_target(Some("~other"), Some(home), cwd),
            ListTarget::Directory(PathBuf::from("/work/~other"))
        );
    }

    #[test]
    fn relative_paths_resolve_against_cwd() {
        let cwd = Path::new("/work");
        assert_eq!(
            list_target(Some("docs/specs"), None, cwd),
            ListTarget::Directory(PathBuf::from("/work/docs/specs"))
        );
        assert_eq!(
            list_target(Some("/abs/dir"), None, cwd),
            ListTarget::Directory(PathBuf::from("/abs/dir"))
        );
    }
}
