//! Filesystem Explorer MCP Server
//!
//! Lets AI agents locate, read and list files kept in a storage folder and any number of upload
//! folders, via the MCP protocol over stdio.
//!
//! ## Tools
//!
//! - `read_file` - Read a file by full or partial name (text, PDF text, base64 images)
//! - `list_files` - Recursive listing of the search roots or an explicit directory
//! - `clone_github_repo` - Clone a git repository into the storage folder
//!
//! ## Usage
//!
//! Add to your MCP client configuration:
//! ```json
//! {
//!   "mcpServers": {
//!     "filesystem-explorer": {
//!       "command": "filesystem-explorer-mcp",
//!       "args": ["--storage", "/srv/explorer/storage", "--upload", "/srv/explorer/uploads"]
//!     }
//!   }
//! }
//! ```

use anyhow::{Context as AnyhowContext, Result};
use clap::Parser;
use rmcp::ServiceExt;

mod runtime_env;
mod tools;

pub use runtime_env::Cli;
pub use tools::ExplorerService;

/// Parses flags, then either prints the tool catalog or serves MCP on stdio until the client hangs up.
pub async fn main_entry() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_tools {
        let payload = serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "tools": ExplorerService::tool_catalog(),
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&payload).context("serialize tool catalog")?
        );
        return Ok(());
    }

    runtime_env::init_logging(cli.log_file.as_deref())?;
    let config = cli.load_config()?;
    config.ensure_directories_exist().with_context(|| {
        format!(
            "create storage directory {}",
            config.storage_path.display()
        )
    })?;

    log::info!("Starting Filesystem Explorer MCP server");
    log::info!("Storage path: {}", config.storage_path.display());
    for upload in &config.upload_paths {
        log::info!("Upload path: {}", upload.display());
    }

    let transport = (tokio::io::stdin(), runtime_env::protocol_stdout()?);
    let service = ExplorerService::new(&config);
    let server = service.serve(transport).await?;
    server.waiting().await?;

    log::info!("Filesystem Explorer MCP server stopped");
    Ok(())
}
