//! MCP tool dispatch for the filesystem explorer.

use super::clone_repo;
use super::list_files;
use super::read_file;
use super::schemas::clone_repo::CloneRepoRequest;
use super::schemas::list_files::ListFilesRequest;
use super::schemas::read_file::ReadFileRequest;
use explorer_files::{ExplorerConfig, FileExplorer};
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Implementation, ServerCapabilities, ServerInfo, Tool};
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Immutable per-process state shared by every tool call.
#[derive(Debug)]
pub(super) struct ServiceState {
    pub(super) explorer: Arc<FileExplorer>,
    pub(super) storage_path: PathBuf,
    pub(super) clone_timeout: Duration,
}

/// Filesystem Explorer MCP Service
#[derive(Clone)]
pub struct ExplorerService {
    /// Tool router
    tool_router: ToolRouter<Self>,
    /// Configuration-derived state (read-only)
    state: Arc<ServiceState>,
}

impl ExplorerService {
    pub fn new(config: &ExplorerConfig) -> Self {
        Self {
            tool_router: Self::tool_router(),
            state: Arc::new(ServiceState {
                explorer: Arc::new(FileExplorer::from_config(config)),
                storage_path: config.storage_path.clone(),
                clone_timeout: config.clone_timeout(),
            }),
        }
    }

    /// Tool definitions as advertised by `tools/list`.
    pub fn tool_catalog() -> Vec<Tool> {
        Self::tool_router().list_all()
    }

    pub(super) fn explorer(&self) -> Arc<FileExplorer> {
        Arc::clone(&self.state.explorer)
    }

    pub(super) fn storage_path(&self) -> &Path {
        &self.state.storage_path
    }

    pub(super) fn clone_timeout(&self) -> Duration {
        self.state.clone_timeout
    }
}

#[tool_router]
impl ExplorerService {
    /// Read a file by (partial) name from the storage and upload folders.
    #[tool(
        description = "Read the contents of a file. Supports text files, PDFs (text is extracted) and images (returned base64-encoded). The file name may be partial and is matched case-insensitively; an exact name match always wins."
    )]
    pub async fn read_file(
        &self,
        Parameters(request): Parameters<ReadFileRequest>,
    ) -> Result<CallToolResult, McpError> {
        read_file::read_file(self, request).await
    }

    /// List files and directories (depth-bounded, `.git` skipped).
    #[tool(
        description = "List files and directories recursively. Use '.' or '' for the configured storage and upload folders, or pass an explicit directory. `.git` directories are skipped; unreadable subdirectories are reported as warnings."
    )]
    pub async fn list_files(
        &self,
        Parameters(request): Parameters<ListFilesRequest>,
    ) -> Result<CallToolResult, McpError> {
        list_files::list_files(self, request).await
    }

    /// Clone a git repository into the storage folder.
    #[tool(
        description = "Clone a GitHub (or any git) repository into the storage folder so its files can be listed and read."
    )]
    pub async fn clone_github_repo(
        &self,
        Parameters(request): Parameters<CloneRepoRequest>,
    ) -> Result<CallToolResult, McpError> {
        clone_repo::clone_github_repo(self, request).await
    }
}

#[tool_handler]
impl ServerHandler for ExplorerService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some("Filesystem Explorer reads and lists files in the configured storage and upload folders. Use 'list_files' to see what exists, 'read_file' with a full or partial file name to read text, PDF or image content, and 'clone_github_repo' to fetch a repository into storage.".into()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            ..Default::default()
        }
    }
}
