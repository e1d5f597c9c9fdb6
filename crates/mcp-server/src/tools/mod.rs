//! Filesystem explorer MCP tool surface.
//!
//! Schemas, dispatch, and per-tool handlers live in separate submodules; the file logic itself is
//! in `explorer-files`.

mod clone_repo;
mod dispatch;
mod list_files;
mod read_file;
mod schemas;
mod util;

pub use dispatch::ExplorerService;
