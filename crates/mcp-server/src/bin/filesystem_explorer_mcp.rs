use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    explorer_mcp::main_entry().await
}
