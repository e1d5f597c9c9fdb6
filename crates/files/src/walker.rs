use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::config::DEFAULT_MAX_DEPTH;
use crate::error::{ExplorerError, Result};

/// Name of the version-control metadata directory that is never entered.
pub const VCS_DIR_NAME: &str = ".git";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub path: PathBuf,
    pub is_dir: bool,
    /// Regular file, or a symlink whose target is one.
    pub is_file: bool,
    /// Distance from the traversal root; direct children have depth 1.
    pub depth: usize,
}

/// Result of one traversal: sorted entries plus the subtrees that could not be opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryListing {
    pub root: PathBuf,
    pub entries: Vec<DirectoryEntry>,
    pub warnings: Vec<ExplorerError>,
}

impl DirectoryListing {
    pub fn files(&self) -> impl Iterator<Item = &DirectoryEntry> {
        self.entries.iter().filter(|entry| entry.is_file)
    }
}

/// Depth-bounded recursive lister that skips `.git` and survives unreadable subtrees.
#[derive(Debug, Clone, Copy)]
pub struct DirectoryWalker {
    max_depth: usize,
}

impl Default for DirectoryWalker {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

impl DirectoryWalker {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn list(&self, root: &Path) -> Result<DirectoryListing> {
        let metadata =
            std::fs::metadata(root).map_err(|err| ExplorerError::directory_access(root, &err))?;
        if !metadata.is_dir() {
            return Err(ExplorerError::DirectoryAccess {
                path: root.to_path_buf(),
                reason: "Path is not a directory".to_string(),
            });
        }

        let mut entries = Vec::new();
        let mut warnings = Vec::new();

        let walker = WalkDir::new(root)
            .min_depth(1)
            .max_depth(self.max_depth)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_vcs_dir(entry));

        for item in walker {
            match item {
                Ok(entry) => entries.push(DirectoryEntry {
                    path: entry.path().to_path_buf(),
                    is_dir: entry.file_type().is_dir(),
                    is_file: resolves_to_file(&entry),
                    depth: entry.depth(),
                }),
                Err(err) => {
                    let path = err.path().unwrap_or(root).to_path_buf();
                    let warning = match err.io_error() {
                        Some(io_err) => ExplorerError::directory_access(&path, io_err),
                        None => ExplorerError::DirectoryAccess {
                            path,
                            reason: err.to_string(),
                        },
                    };
                    log::warn!("Skipping subtree: {warning}");
                    warnings.push(warning);
                }
            }
        }

        entries.sort_by(|a, b| a.path.cmp(&b.path));
        log::debug!(
            "Listed {} entries under {} (max_depth={}, warnings={})",
            entries.len(),
            root.display(),
            self.max_depth,
            warnings.len()
        );

        Ok(DirectoryListing {
            root: root.to_path_buf(),
            entries,
            warnings,
        })
    }
}

fn resolves_to_file(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    file_type.is_file() || (file_type.is_symlink() && entry.path().is_file())
}

fn is_vcs_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir() && entry.file_name() == VCS_DIR_NAME
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    fn relative(listing: &DirectoryListing) -> Vec<String> {
        listing
            .entries
            .iter()
            .map(|entry| {
                let rel = entry
                    .path
                    .strip_prefix(&listing.root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/");
                if entry.is_dir {
                    format!("{rel}/")
                } else {
                    rel
                }
            })
            .collect()
    }

    #[test]
    fn lists_sorted_and_skips_git() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join(".git").join("objects")).unwrap();
        fs::write(root.join(".git").join("HEAD"), b"ref: refs/heads/main").unwrap();
        fs::create_dir_all(root.join("src").join(".git")).unwrap();
        fs::write(root.join("src").join("main.rs"), b"fn main() {}").unwrap();
        fs::write(root.join("b.txt"), b"b").unwrap();
        fs::write(root.join("a.txt"), b"a").unwrap();
        fs::write(root.join(".gitignore"), b"target").unwrap();

        let listing = DirectoryWalker::default().list(root).unwrap();
        assert_eq!(
            relative(&listing),
            vec![".gitignore", "a.txt", "b.txt", "src/", "src/main.rs"]
        );
        assert!(listing.warnings.is_empty());
        assert!(listing
            .entries
            .iter()
            .all(|entry| !entry.path.components().any(|c| c.as_os_str() == ".git")));
    }

    #[test]
    fn respects_max_depth() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("a").join("b").join("c")).unwrap();
        fs::write(root.join("a").join("b").join("c").join("deep.txt"), b"x").unwrap();

        let listing = DirectoryWalker::new(2).list(root).unwrap();
        assert_eq!(relative(&listing), vec!["a/", "a/b/"]);
        assert_eq!(
            listing.entries.iter().map(|e| e.depth).collect::<Vec<_>>(),
            vec![1, 2]
        );

        let empty = DirectoryWalker::new(0).list(root).unwrap();
        assert!(empty.entries.is_empty());
    }

    #[test]
    fn missing_root_is_an_access_error() {
        let temp = tempdir().unwrap();
        let err = DirectoryWalker::default()
            .list(&temp.path().join("nope"))
            .unwrap_err();
        assert_eq!(err.kind(), "directory_access");

        let file = temp.path().join("file.txt");
        fs::write(&file, b"x").unwrap();
        let err = DirectoryWalker::default().list(&file).unwrap_err();
        assert!(err.to_string().contains("Path is not a directory"));
    }

    #[cfg(unix)]
    #[test]
    fn symlinks_count_as_files_only_when_their_target_is_one() {
        let temp = tempdir().unwrap();
        let other = temp.path().join("other");
        let root = temp.path().join("root");
        fs::create_dir_all(&other).unwrap();
        fs::create_dir_all(&root).unwrap();
        fs::write(other.join("inner.txt"), b"i").unwrap();
        fs::write(root.join("real.txt"), b"r").unwrap();
        std::os::unix::fs::symlink(&other, root.join("dir_link")).unwrap();
        std::os::unix::fs::symlink(root.join("real.txt"), root.join("file_link")).unwrap();
        std::os::unix::fs::symlink(root.join("nowhere"), root.join("dangling")).unwrap();

        let listing = DirectoryWalker::default().list(&root).unwrap();
        let files: Vec<_> = listing
            .files()
            .map(|entry| entry.path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(files, vec!["file_link", "real.txt"]);
        assert!(listing
            .entries
            .iter()
            .any(|entry| entry.path == root.join("dir_link") && !entry.is_file));
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_subtree_becomes_a_warning() {
        use std::os::unix::fs::PermissionsExt;

        let temp = tempdir().unwrap();
        let root = temp.path();
        let locked = root.join("locked");
        fs::create_dir_all(&locked).unwrap();
        fs::write(locked.join("secret.txt"), b"s").unwrap();
        fs::write(root.join("open.txt"), b"o").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Privileged users can still read the directory; nothing to assert then.
        let readable = fs::read_dir(&locked).is_ok();
        let listing = DirectoryWalker::default().list(root);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        if readable {
            return;
        }

        let listing = listing.unwrap();
        assert_eq!(relative(&listing), vec!["locked/", "open.txt"]);
        assert_eq!(listing.warnings.len(), 1);
        assert!(matches!(
            &listing.warnings[0],
            ExplorerError::DirectoryAccess { path, .. } if path == &locked
        ));
    }
}
