use explorer_files::ExplorerError;
use rmcp::model::{CallToolResult, Content};
use rmcp::ErrorData as McpError;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

use super::schemas::clone_repo::CloneRepoRequest;
use super::util::{explorer_error_result, message_error_result};
use super::ExplorerService;

const ALLOWED_URL_PREFIXES: &[&str] = &["http://", "https://", "git@"];

pub(super) fn has_supported_scheme(url: &str) -> bool {
    ALLOWED_URL_PREFIXES
        .iter()
        .any(|prefix| url.starts_with(prefix))
}

/// Last path segment of the URL without a trailing `.git` (`git@host:owner/repo.git` -> `repo`).
pub(super) fn repo_name_from_url(url: &str) -> Option<String> {
    let trimmed = url.trim().trim_end_matches('/');
    let last = trimmed.rsplit(['/', ':']).next()?;
    let name = last.strip_suffix(".git").unwrap_or(last);
    if name.is_empty() || name == "." || name == ".." || name.contains('@') {
        return None;
    }
    Some(name.to_string())
}

fn clone_error(url: &str, reason: impl Into<String>) -> ExplorerError {
    ExplorerError::RepositoryClone {
        url: url.to_string(),
        reason: reason.into(),
    }
}

async fn run_git_clone(
    url: &str,
    destination: &Path,
    timeout: Duration,
) -> Result<(), ExplorerError> {
    let mut cmd = Command::new("git");
    cmd.arg("clone")
        .arg(url)
        .arg(destination)
        .env("GIT_TERMINAL_PROMPT", "0")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    log::debug!("Executing: git clone {url} {}", destination.display());

    let output = match tokio::time::timeout(timeout, cmd.output()).await {
        Ok(Ok(output)) => output,
        Ok(Err(err)) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(clone_error(url, "Git is not installed or not in PATH"));
        }
        Ok(Err(err)) => return Err(clone_error(url, err.to_string())),
        Err(_) => {
            return Err(clone_error(
                url,
                format!(
                    "Clone operation timed out after {} seconds",
                    timeout.as_secs()
                ),
            ));
        }
    };

    if output.status.success() {
        return Ok(());
    }
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    Err(clone_error(
        url,
        if stderr.is_empty() {
            format!("git exited with {}", output.status)
        } else {
            stderr
        },
    ))
}

/// Clone a repository into `<storage>/<repo name>` unless that directory already exists.
pub(super) async fn clone_github_repo(
    service: &ExplorerService,
    request: CloneRepoRequest,
) -> Result<CallToolResult, McpError> {
    let url = request.url.trim().to_string();
    if url.is_empty() {
        return Ok(message_error_result("Error: Repository URL cannot be empty."));
    }
    log::info!("Cloning repository: {url}");

    if !has_supported_scheme(&url) {
        return Ok(message_error_result(
            "Error: Invalid repository URL format. Must start with http://, https://, or git@",
        ));
    }
    let Some(repo_name) = repo_name_from_url(&url) else {
        return Ok(message_error_result(
            "Error: Could not extract repository name from URL.",
        ));
    };

    let destination = service.storage_path().join(&repo_name);
    if destination.exists() {
        log::warn!("Repository already exists at: {}", destination.display());
        return Ok(CallToolResult::success(vec![Content::text(format!(
            "Warning: Repository '{repo_name}' already exists at '{}'.",
            destination.display()
        ))]));
    }

    match run_git_clone(&url, &destination, service.clone_timeout()).await {
        Ok(()) => {
            log::info!("Repository cloned successfully to: {}", destination.display());
            Ok(CallToolResult::success(vec![Content::text(format!(
                "Repository '{url}' cloned successfully to '{}'.",
                destination.display()
            ))]))
        }
        Err(err) => Ok(explorer_error_result("clone_github_repo", &err)),
    }
}
