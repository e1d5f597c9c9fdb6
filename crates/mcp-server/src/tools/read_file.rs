use explorer_files::Content as FileContent;
use rmcp::model::{CallToolResult, Content};
use rmcp::ErrorData as McpError;

use super::schemas::read_file::ReadFileRequest;
use super::util::{explorer_error_result, message_error_result, run_blocking};
use super::ExplorerService;

/// Renders decoded content as the string handed back to the client.
pub(super) fn render_content(content: &FileContent) -> String {
    match content {
        FileContent::Text { text, .. } | FileContent::Document { text, .. } => text.clone(),
        FileContent::Image { extension, base64 } => {
            format!("Image file (.{extension}) - Base64 encoded:\n{base64}")
        }
    }
}

/// Resolve a (partial) file name across the search roots and return its decoded content.
pub(super) async fn read_file(
    service: &ExplorerService,
    request: ReadFileRequest,
) -> Result<CallToolResult, McpError> {
    let file_name = request.file_name.trim().to_string();
    if file_name.is_empty() {
        return Ok(message_error_result("Error: File name cannot be empty."));
    }
    log::info!("Reading file: {file_name}");

    let explorer = service.explorer();
    let query = file_name.clone();
    let outcome = match run_blocking("read_file", move || explorer.read(&query)).await {
        Ok(outcome) => outcome,
        Err(result) => return Ok(result),
    };

    match outcome {
        Ok((resolved, content)) => {
            log::info!(
                "Read '{file_name}' from {} ({:?} match, {})",
                resolved.path().display(),
                resolved.match_kind,
                content.category().as_str()
            );
            Ok(CallToolResult::success(vec![Content::text(
                render_content(&content),
            )]))
        }
        Err(err) => Ok(explorer_error_result("read_file", &err)),
    }
}
