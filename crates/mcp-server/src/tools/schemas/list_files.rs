use rmcp::schemars;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct ListFilesRequest {
    /// Directory to list. "." or empty lists every configured storage/upload root.
    #[schemars(
        description = "Directory to list. Use '.' or '' (default) for the configured storage and upload folders; '~' expands to the home directory; relative paths resolve against the server working directory."
    )]
    pub directory: Option<String>,
}
