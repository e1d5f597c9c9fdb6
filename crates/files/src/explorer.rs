use std::path::{Path, PathBuf};

use crate::config::{ExplorerConfig, FileTypes, SearchPathSet};
use crate::decoder::{Content, ContentDecoder};
use crate::error::Result;
use crate::resolver::{FileResolver, ResolvedFile};
use crate::walker::{DirectoryListing, DirectoryWalker};

/// Resolver, decoder and walker wired to one immutable configuration.
#[derive(Debug, Clone)]
pub struct FileExplorer {
    resolver: FileResolver,
    decoder: ContentDecoder,
    walker: DirectoryWalker,
}

impl FileExplorer {
    pub fn new(roots: SearchPathSet, types: FileTypes, max_depth: usize) -> Self {
        Self {
            resolver: FileResolver::with_max_depth(roots, max_depth),
            decoder: ContentDecoder::new(types),
            walker: DirectoryWalker::new(max_depth),
        }
    }

    pub fn from_config(config: &ExplorerConfig) -> Self {
        Self::new(config.search_paths(), config.file_types(), config.max_depth)
    }

    pub fn search_paths(&self) -> &SearchPathSet {
        self.resolver.roots()
    }

    pub fn resolve(&self, query: &str) -> Result<ResolvedFile> {
        let (candidate, match_kind) = self.resolver.find(query)?;
        let category = self.decoder.detect(&candidate.path);
        Ok(ResolvedFile {
            candidate,
            match_kind,
            category,
        })
    }

    /// Resolves `query` and decodes the winning file.
    pub fn read(&self, query: &str) -> Result<(ResolvedFile, Content)> {
        let resolved = self.resolve(query)?;
        let content = self.decoder.decode(resolved.path())?;
        Ok((resolved, content))
    }

    pub fn list(&self, root: &Path) -> Result<DirectoryListing> {
        self.walker.list(root)
    }

    /// Walks every configured root separately, keeping per-root failures.
    pub fn list_all(&self) -> Vec<(PathBuf, Result<DirectoryListing>)> {
        self.search_paths()
            .roots()
            .iter()
            .map(|root| (root.clone(), self.walker.list(root)))
            .collect()
    }
}
