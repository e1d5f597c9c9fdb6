use anyhow::{Context as AnyhowContext, Result};
use clap::Parser;
use explorer_files::ExplorerConfig;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWrite;

#[derive(Parser, Debug, Default)]
#[command(name = "filesystem-explorer-mcp")]
#[command(about = "MCP server for reading and listing files across storage roots", long_about = None)]
#[command(version)]
pub struct Cli {
    /// TOML config file; flags below override its values
    #[arg(long, env = "EXPLORER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Primary storage root (default: ./storage, created on startup)
    #[arg(long, env = "EXPLORER_STORAGE_PATH")]
    pub storage: Option<PathBuf>,

    /// Additional upload roots, searched after storage (repeatable; env is ':'-separated)
    #[arg(long = "upload", env = "EXPLORER_UPLOAD_PATHS", value_delimiter = ':')]
    pub uploads: Vec<PathBuf>,

    /// Maximum traversal depth for listing and resolution
    #[arg(long, env = "EXPLORER_MAX_DEPTH")]
    pub max_depth: Option<usize>,

    /// Write logs to this file instead of stderr
    #[arg(long, env = "EXPLORER_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Print the tool catalog as JSON and exit
    #[arg(long)]
    pub print_tools: bool,
}

impl Cli {
    pub fn load_config(&self) -> Result<ExplorerConfig> {
        let mut config = match self.config.as_deref() {
            Some(path) => ExplorerConfig::from_toml_file(path)
                .with_context(|| format!("load config {}", path.display()))?,
            None => ExplorerConfig::default(),
        };

        if let Some(storage) = self.storage.as_deref() {
            config.storage_path = absolutize(storage);
        }
        let uploads: Vec<PathBuf> = self
            .uploads
            .iter()
            .filter(|path| !path.as_os_str().is_empty())
            .map(|path| absolutize(path))
            .collect();
        if !uploads.is_empty() {
            config.upload_paths = uploads;
        }
        if let Some(max_depth) = self.max_depth {
            config.max_depth = max_depth;
        }
        Ok(config)
    }
}

fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

/// Logging goes to stderr (stdout carries the MCP protocol) or to `log_file` when given.
pub fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("open log file {}", path.display()))?;
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        None => {
            builder.target(env_logger::Target::Stderr);
        }
    }
    builder.init();
    Ok(())
}

/// Writer for MCP frames, detached from fd 1.
///
/// On unix the real stdout is duplicated for the protocol and fd 1 is pointed at stderr, so a
/// stray `println!` from any dependency lands in the log stream instead of the JSON-RPC stream.
#[cfg(unix)]
pub fn protocol_stdout() -> Result<Box<dyn AsyncWrite + Send + Unpin>> {
    use std::os::fd::FromRawFd;

    let fd = unsafe { libc::dup(libc::STDOUT_FILENO) };
    if fd < 0 {
        return Err(std::io::Error::last_os_error()).context("duplicate stdout for MCP transport");
    }
    let rc = unsafe { libc::dup2(libc::STDERR_FILENO, libc::STDOUT_FILENO) };
    if rc < 0 {
        let err = std::io::Error::last_os_error();
        unsafe {
            let _ = libc::close(fd);
        }
        return Err(err).context("redirect stdout to stderr");
    }
    // SAFETY: `fd` was just returned by `dup` and is owned by nothing else.
    let file = unsafe { std::fs::File::from_raw_fd(fd) };
    Ok(Box::new(tokio::fs::File::from_std(file)))
}

#[cfg(not(unix))]
pub fn protocol_stdout() -> Result<Box<dyn AsyncWrite + Send + Unpin>> {
    Ok(Box::new(tokio::io::stdout()))
}
