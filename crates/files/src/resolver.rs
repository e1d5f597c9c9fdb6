use std::path::{Path, PathBuf};

use crate::config::{normalize_extension, SearchPathSet, DEFAULT_MAX_DEPTH};
use crate::decoder::FileCategory;
use crate::error::{ExplorerError, Result};
use crate::walker::DirectoryWalker;

/// A file discovered while resolving a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub path: PathBuf,
    /// File name without its extension.
    pub base_name: String,
    /// Lower-cased extension, empty when the file has none.
    pub extension: String,
    /// Position of the originating root in the search path set.
    pub root_index: usize,
}

impl Candidate {
    fn from_path(path: &Path, root_index: usize) -> Option<Self> {
        let file_name = path.file_name()?.to_string_lossy();
        let (base_name, extension) = split_name(&file_name);
        Some(Self {
            path: path.to_path_buf(),
            base_name: base_name.to_string(),
            extension: normalize_extension(extension),
            root_index,
        })
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Exact,
    Partial,
}

/// The single file chosen for a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFile {
    pub candidate: Candidate,
    pub match_kind: MatchKind,
    pub category: FileCategory,
}

impl ResolvedFile {
    pub fn path(&self) -> &Path {
        &self.candidate.path
    }
}

/// Lower-cased query split the same way candidate names are.
struct Query {
    full: String,
    base_name: String,
    extension: Option<String>,
}

impl Query {
    fn parse(raw: &str) -> Self {
        let full = raw.to_lowercase();
        let (base_name, extension) = split_name(&full);
        let extension = (!extension.is_empty()).then(|| normalize_extension(extension));
        Self {
            base_name: base_name.to_string(),
            full,
            extension,
        }
    }

    fn is_exact(&self, candidate: &Candidate) -> bool {
        candidate.file_name().to_lowercase() == self.full
    }

    fn is_partial(&self, candidate: &Candidate) -> bool {
        let base_name = candidate.base_name.to_lowercase();
        if base_name.contains(&self.full) {
            return true;
        }
        match &self.extension {
            Some(extension) => {
                !self.base_name.is_empty()
                    && extension == &candidate.extension
                    && base_name.contains(&self.base_name)
            }
            None => false,
        }
    }
}

/// Splits `name.ext` at the last dot; dotfiles (`.env`) have no extension.
fn split_name(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if idx > 0 => (&name[..idx], &name[idx + 1..]),
        _ => (name, ""),
    }
}

/// Two-tier (exact, then partial) case-insensitive matcher over the configured roots.
#[derive(Debug, Clone)]
pub struct FileResolver {
    roots: SearchPathSet,
    walker: DirectoryWalker,
}

impl FileResolver {
    pub fn new(roots: SearchPathSet) -> Self {
        Self::with_max_depth(roots, DEFAULT_MAX_DEPTH)
    }

    pub fn with_max_depth(roots: SearchPathSet, max_depth: usize) -> Self {
        Self {
            roots,
            walker: DirectoryWalker::new(max_depth),
        }
    }

    pub fn roots(&self) -> &SearchPathSet {
        &self.roots
    }

    /// Finds the best candidate for `query`.
    ///
    /// The first root holding an exact full-name match wins outright. Otherwise the first partial
    /// match wins, scanning roots in priority order and each root in sorted path order.
    pub fn find(&self, query: &str) -> Result<(Candidate, MatchKind)> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(self.not_found(query));
        }
        let parsed = Query::parse(trimmed);

        let mut first_partial: Option<Candidate> = None;
        let mut other_partials = 0usize;

        for (root_index, root) in self.roots.iter() {
            let candidates = self.candidates_in(root_index, root);

            if let Some(exact) = candidates.iter().find(|c| parsed.is_exact(c)) {
                log::info!("File '{trimmed}' matched exactly: {}", exact.path.display());
                return Ok((exact.clone(), MatchKind::Exact));
            }

            for candidate in candidates {
                if !parsed.is_partial(&candidate) {
                    continue;
                }
                if first_partial.is_none() {
                    first_partial = Some(candidate);
                } else {
                    other_partials += 1;
                }
            }
        }

        match first_partial {
            Some(candidate) => {
                if other_partials > 0 {
                    log::info!(
                        "File '{trimmed}' is ambiguous ({} other partial matches); using {}",
                        other_partials,
                        candidate.path.display()
                    );
                } else {
                    log::info!("File '{trimmed}' matched partially: {}", candidate.path.display());
                }
                Ok((candidate, MatchKind::Partial))
            }
            None => Err(self.not_found(trimmed)),
        }
    }

    fn candidates_in(&self, root_index: usize, root: &Path) -> Vec<Candidate> {
        let listing = match self.walker.list(root) {
            Ok(listing) => listing,
            Err(err) => {
                log::warn!("Search path skipped: {err}");
                return Vec::new();
            }
        };
        listing
            .files()
            .filter_map(|entry| Candidate::from_path(&entry.path, root_index))
            .collect()
    }

    fn not_found(&self, query: &str) -> ExplorerError {
        ExplorerError::FileNotFound {
            query: query.to_string(),
            searched: self.roots.roots().to_vec(),
        }
    }
}
