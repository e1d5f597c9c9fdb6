use anyhow::{Context, Result};
use rmcp::model::CallToolResult;
use std::path::{Path, PathBuf};
use tokio::process::Command;

const BIN_NAME: &str = "filesystem-explorer-mcp";

pub fn locate_filesystem_explorer_mcp_bin() -> Result<PathBuf> {
    if let Some(path) = option_env!("CARGO_BIN_EXE_filesystem-explorer-mcp") {
        return Ok(PathBuf::from(path));
    }

    // `.../target/{debug|release}/deps/<test>` -> `.../target/{debug|release}/<bin>`
    if let Ok(exe) = std::env::current_exe() {
        if let Some(target_profile_dir) = exe.parent().and_then(|p| p.parent()) {
            let candidate = target_profile_dir.join(BIN_NAME);
            if candidate.exists() {
                return Ok(candidate);
            }
        }
    }

    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let repo_root = manifest_dir
        .ancestors()
        .nth(2)
        .context("failed to resolve repo root from CARGO_MANIFEST_DIR")?;
    for profile in ["debug", "release"] {
        let candidate = repo_root.join("target").join(profile).join(BIN_NAME);
        if candidate.exists() {
            return Ok(candidate);
        }
    }

    anyhow::bail!(
        "failed to locate {BIN_NAME} binary; build with: cargo build -p explorer-mcp --bin {BIN_NAME}"
    )
}

/// Server command rooted at the given folders, with no config file or env overrides leaking in.
pub fn server_command(storage: &Path, uploads: &[&Path]) -> Result<Command> {
    let mut cmd = Command::new(locate_filesystem_explorer_mcp_bin()?);
    for var in [
        "EXPLORER_CONFIG",
        "EXPLORER_STORAGE_PATH",
        "EXPLORER_UPLOAD_PATHS",
        "EXPLORER_MAX_DEPTH",
        "EXPLORER_LOG_FILE",
    ] {
        cmd.env_remove(var);
    }
    cmd.env("RUST_LOG", "warn");
    cmd.arg("--storage").arg(storage);
    for upload in uploads {
        cmd.arg("--upload").arg(upload);
    }
    Ok(cmd)
}

pub fn result_text(result: &CallToolResult) -> Result<String> {
    result
        .content
        .first()
        .and_then(|c| c.as_text())
        .map(|t| t.text.clone())
        .context("tool did not return text content")
}
