use std::path::{Path, PathBuf};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExplorerError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExplorerError {
    #[error("File '{query}' not found (searched: {})", join_paths(.searched))]
    FileNotFound {
        query: String,
        searched: Vec<PathBuf>,
    },

    #[error("Invalid or unsupported file type for '{}' ({file_type}): {reason}", .path.display())]
    InvalidFileType {
        path: PathBuf,
        file_type: String,
        reason: String,
    },

    #[error("Failed to read file '{}': {reason}", .path.display())]
    FileRead { path: PathBuf, reason: String },

    #[error("Cannot access directory '{}': {reason}", .path.display())]
    DirectoryAccess { path: PathBuf, reason: String },

    #[error("Failed to clone repository '{url}': {reason}")]
    RepositoryClone { url: String, reason: String },
}

impl ExplorerError {
    pub fn file_read(path: impl AsRef<Path>, err: &std::io::Error) -> Self {
        Self::FileRead {
            path: path.as_ref().to_path_buf(),
            reason: describe_io_error(err),
        }
    }

    pub fn directory_access(path: impl AsRef<Path>, err: &std::io::Error) -> Self {
        Self::DirectoryAccess {
            path: path.as_ref().to_path_buf(),
            reason: describe_io_error(err),
        }
    }

    /// Stable snake_case code for logs and structured output.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::FileNotFound { .. } => "file_not_found",
            Self::InvalidFileType { .. } => "invalid_file_type",
            Self::FileRead { .. } => "file_read",
            Self::DirectoryAccess { .. } => "directory_access",
            Self::RepositoryClone { .. } => "repository_clone",
        }
    }

    /// Human-readable rendering returned to tool callers.
    pub fn user_message(&self) -> String {
        match self {
            Self::FileNotFound { query, searched } => {
                if searched.is_empty() {
                    format!("Error: File '{query}' not found.")
                } else {
                    format!(
                        "Error: File '{query}' not found.\nSearched in: {}",
                        join_paths(searched)
                    )
                }
            }
            Self::InvalidFileType {
                path,
                file_type,
                reason,
            } => format!(
                "Error: Invalid or unsupported file type for '{}'\nType: {file_type}, {reason}",
                path.display()
            ),
            Self::FileRead { path, reason } => format!(
                "Error: Failed to read file '{}'\nDetails: {reason}",
                path.display()
            ),
            Self::DirectoryAccess { path, reason } => format!(
                "Error: Cannot access directory '{}'\nDetails: {reason}",
                path.display()
            ),
            Self::RepositoryClone { url, reason } => {
                format!("Error: Failed to clone repository '{url}'\nDetails: {reason}")
            }
        }
    }
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn describe_io_error(err: &std::io::Error) -> String {
    match err.kind() {
        std::io::ErrorKind::NotFound => "File does not exist".to_string(),
        std::io::ErrorKind::PermissionDenied => "Permission denied".to_string(),
        _ => err.to_string(),
    }
}
