use explorer_files::ExplorerError;
use rmcp::model::{CallToolResult, Content};

/// Converts a typed error into the tool's error result, logging the full error first.
pub(super) fn explorer_error_result(tool: &str, err: &ExplorerError) -> CallToolResult {
    log::error!("{tool} failed [{}]: {err}", err.kind());
    CallToolResult::error(vec![Content::text(err.user_message())])
}

pub(super) fn message_error_result(message: impl Into<String>) -> CallToolResult {
    CallToolResult::error(vec![Content::text(message)])
}

/// Runs blocking filesystem work off the async executor.
///
/// A panicking or cancelled task becomes an error message instead of tearing down the session.
pub(super) async fn run_blocking<T, F>(tool: &str, work: F) -> Result<T, CallToolResult>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work).await.map_err(|err| {
        log::error!("{tool} worker failed: {err}");
        message_error_result(format!("Error: An unexpected error occurred: {err}"))
    })
}
