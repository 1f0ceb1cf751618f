use std::sync::Arc;

use openai_mcp::client::OpenAiClient;
use openai_mcp::mcp::McpServer;
use openai_mcp::tools::ToolRegistry;
use openai_mcp::util::{build_http_client_from_env, init_tracing, openai_api_key, openai_base_url};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    tracing::info!("starting OpenAI MCP server");

    // The credential is the one piece of required configuration; without it
    // the server cannot make a single call, so refuse to start.
    let api_key = match openai_api_key() {
        Some(key) => key,
        None => {
            tracing::error!("Missing required environment variable: OPENAI_API_KEY");
            std::process::exit(1);
        }
    };
    tracing::info!("environment validation passed");

    let client = OpenAiClient::new(build_http_client_from_env(), openai_base_url(), api_key);
    let registry = ToolRegistry::new(Arc::new(client));

    McpServer::new(registry).run_stdio().await
}
