use rmcp::schemars;
use serde::Deserialize;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CloneRepoRequest {
    /// Repository URL (http://, https:// or git@)
    #[schemars(
        description = "URL of the repository to clone (must start with http://, https:// or git@). The clone lands in the storage folder under the repository name."
    )]
    pub url: String,
}
