//! # Explorer Files
//!
//! Locate and read files by approximate name across a fixed set of storage roots.
//!
//! ## Pipeline
//!
//! ```text
//! query ("report")
//!     │
//!     ├──> FileResolver (exact name, then partial base-name match, root priority order)
//!     │      └─> ResolvedFile
//!     │
//!     └──> ContentDecoder (by extension)
//!            ├─> image    -> base64
//!            ├─> pdf      -> page text
//!            └─> text     -> utf-8, else latin-1 (binary refused)
//! ```
//!
//! [`DirectoryWalker`] enumerates trees under a depth bound, skipping `.git`.
//!
//! ## Example
//!
//! ```no_run
//! use explorer_files::{Content, ExplorerConfig, FileExplorer};
//!
//! fn main() -> explorer_files::Result<()> {
//!     let explorer = FileExplorer::from_config(&ExplorerConfig::default());
//!     let (resolved, content) = explorer.read("report")?;
//!     if let Content::Document { text, .. } = content {
//!         println!("{}: {text}", resolved.path().display());
//!     }
//!     Ok(())
//! }
//! ```

mod config;
mod decoder;
mod error;
mod explorer;
mod listing;
mod resolver;
mod walker;

#[doc(hidden)]
pub mod test_support;

pub use config::{
    normalize_extension, ExplorerConfig, FileTypes, SearchPathSet, DEFAULT_BINARY_CHECK_BYTES,
    DEFAULT_CLONE_TIMEOUT_SECS, DEFAULT_DOCUMENT_EXTENSION, DEFAULT_IMAGE_EXTENSIONS,
    DEFAULT_MAX_DEPTH,
};
pub use decoder::{
    decode_with_fallback, looks_binary, Content, ContentDecoder, FileCategory, TextEncoding,
    PAGE_SEPARATOR,
};
pub use error::{ExplorerError, Result};
pub use explorer::FileExplorer;
pub use listing::{render_listing, render_roots};
pub use resolver::{Candidate, FileResolver, MatchKind, ResolvedFile};
pub use walker::{DirectoryEntry, DirectoryListing, DirectoryWalker, VCS_DIR_NAME};
