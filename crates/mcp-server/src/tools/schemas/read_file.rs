use rmcp::schemars;
use serde::Deserialize;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ReadFileRequest {
    /// Name of the file to read; may be partial (matched case-insensitively)
    #[schemars(
        description = "Name of the file to read. May be partial: an exact file name wins, otherwise the first file whose name contains this text (case-insensitive) is read."
    )]
    pub file_name: String,
}
