use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ExplorerError, Result};

pub const DEFAULT_MAX_DEPTH: usize = 100;
pub const DEFAULT_BINARY_CHECK_BYTES: usize = 1024;
pub const DEFAULT_CLONE_TIMEOUT_SECS: u64 = 300;
pub const DEFAULT_DOCUMENT_EXTENSION: &str = "pdf";
pub const DEFAULT_IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp", "svg"];

/// Ordered, de-duplicated set of roots searched by the resolver.
///
/// Position in the set is the priority used to break ties between roots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPathSet {
    roots: Vec<PathBuf>,
}

impl SearchPathSet {
    pub fn new(roots: impl IntoIterator<Item = PathBuf>) -> Self {
        let mut unique: Vec<PathBuf> = Vec::new();
        for root in roots {
            if !unique.contains(&root) {
                unique.push(root);
            }
        }
        Self { roots: unique }
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Path)> {
        self.roots.iter().map(PathBuf::as_path).enumerate()
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

/// Extension tables driving content classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTypes {
    image_extensions: BTreeSet<String>,
    document_extension: String,
    binary_check_bytes: usize,
}

impl FileTypes {
    pub fn new<I, S>(image_extensions: I, document_extension: &str, binary_check_bytes: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            image_extensions: image_extensions
                .into_iter()
                .map(|ext| normalize_extension(ext.as_ref()))
                .filter(|ext| !ext.is_empty())
                .collect(),
            document_extension: normalize_extension(document_extension),
            binary_check_bytes: binary_check_bytes.max(1),
        }
    }

    pub fn is_image(&self, extension: &str) -> bool {
        self.image_extensions.contains(extension)
    }

    pub fn is_document(&self, extension: &str) -> bool {
        !self.document_extension.is_empty() && self.document_extension == extension
    }

    pub fn binary_check_bytes(&self) -> usize {
        self.binary_check_bytes
    }
}

impl Default for FileTypes {
    fn default() -> Self {
        Self::new(
            DEFAULT_IMAGE_EXTENSIONS.iter().copied(),
            DEFAULT_DOCUMENT_EXTENSION,
            DEFAULT_BINARY_CHECK_BYTES,
        )
    }
}

/// Lower-cases an extension and strips a leading dot (`".PNG"` -> `"png"`).
pub fn normalize_extension(raw: &str) -> String {
    raw.trim().trim_start_matches('.').to_ascii_lowercase()
}

/// Process-wide settings, read once at startup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ExplorerConfig {
    /// Primary root; first in search priority and destination for clones.
    pub storage_path: PathBuf,
    /// Upload roots searched after storage (only when they exist).
    pub upload_paths: Vec<PathBuf>,
    pub image_extensions: Vec<String>,
    pub document_extension: String,
    pub binary_check_bytes: usize,
    pub max_depth: usize,
    pub clone_timeout_secs: u64,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self {
            storage_path: cwd.join("storage"),
            upload_paths: Vec::new(),
            image_extensions: DEFAULT_IMAGE_EXTENSIONS
                .iter()
                .map(|ext| (*ext).to_string())
                .collect(),
            document_extension: DEFAULT_DOCUMENT_EXTENSION.to_string(),
            binary_check_bytes: DEFAULT_BINARY_CHECK_BYTES,
            max_depth: DEFAULT_MAX_DEPTH,
            clone_timeout_secs: DEFAULT_CLONE_TIMEOUT_SECS,
        }
    }
}

impl ExplorerConfig {
    /// Loads a TOML config file; absent keys keep their defaults.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|err| ExplorerError::file_read(path, &err))?;
        Self::from_toml_str(&raw).map_err(|reason| ExplorerError::FileRead {
            path: path.to_path_buf(),
            reason,
        })
    }

    pub fn from_toml_str(raw: &str) -> std::result::Result<Self, String> {
        toml::from_str(raw).map_err(|err| format!("invalid config: {err}"))
    }

    /// Storage first, then every upload root that currently exists.
    pub fn search_paths(&self) -> SearchPathSet {
        let uploads = self.upload_paths.iter().filter(|path| {
            let exists = path.is_dir();
            if !exists {
                log::warn!("Upload path does not exist, skipping: {}", path.display());
            }
            exists
        });
        SearchPathSet::new(
            std::iter::once(&self.storage_path)
                .chain(uploads)
                .cloned(),
        )
    }

    pub fn file_types(&self) -> FileTypes {
        FileTypes::new(
            &self.image_extensions,
            &self.document_extension,
            self.binary_check_bytes,
        )
    }

    pub fn clone_timeout(&self) -> Duration {
        Duration::from_secs(self.clone_timeout_secs.max(1))
    }

    pub fn ensure_directories_exist(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.storage_path)
    }
}
