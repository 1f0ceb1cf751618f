use std::time::Duration;

use tracing_subscriber::{fmt, EnvFilter};

/// Default public endpoint; override with OPENAI_BASE_URL.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default overall request timeout in seconds (per deployment, not per request).
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 300;

/// Initialize dotenv and structured tracing based on RUST_LOG.
///
/// Supports an explicit env file path via ENV_FILE before falling back to
/// the default .env discovery. The subscriber writes to stderr: stdout is
/// reserved for the protocol stream.
pub fn init_tracing() {
    let mut env_source: String = "none".into();
    if let Ok(p) = std::env::var("ENV_FILE") {
        let p = p.trim();
        if !p.is_empty() && std::path::Path::new(p).is_file() && dotenvy::from_filename(p).is_ok() {
            env_source = format!("{p} (ENV_FILE)");
        }
    }
    if env_source == "none" && dotenvy::dotenv().is_ok() {
        env_source = ".env".into();
    }

    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
    let subscriber = fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    tracing::info!("Environment loaded from: {}", env_source);
}

/// Build an HTTP client honoring proxy and timeout environment variables.
///
/// Environment:
/// - OPENAI_MCP_NO_PROXY = 1|true|yes|on     -> disable all proxies
/// - OPENAI_MCP_PROXY_URL = <url>            -> proxy for all schemes
/// - HTTP_PROXY / http_proxy                 -> HTTP proxy
/// - HTTPS_PROXY / https_proxy               -> HTTPS proxy
/// - OPENAI_MCP_HTTP_TIMEOUT_SECONDS         -> overall request timeout (u64, default 300)
pub fn build_http_client_from_env() -> reqwest::Client {
    let mut builder = reqwest::Client::builder();

    let timeout_secs = std::env::var("OPENAI_MCP_HTTP_TIMEOUT_SECONDS")
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECONDS);
    builder = builder.timeout(Duration::from_secs(timeout_secs));

    let no_proxy = std::env::var("OPENAI_MCP_NO_PROXY")
        .map(|v| v.trim().to_ascii_lowercase())
        .map(|v| v == "1" || v == "true" || v == "yes" || v == "on")
        .unwrap_or(false);

    if no_proxy {
        builder = builder.no_proxy();
    } else {
        if let Ok(url) = std::env::var("OPENAI_MCP_PROXY_URL") {
            let u = url.trim();
            if !u.is_empty() {
                if let Ok(p) = reqwest::Proxy::all(u) {
                    builder = builder.proxy(p);
                }
            }
        }
        if let Ok(http_p) = std::env::var("HTTP_PROXY").or_else(|_| std::env::var("http_proxy")) {
            let u = http_p.trim();
            if !u.is_empty() {
                if let Ok(p) = reqwest::Proxy::http(u) {
                    builder = builder.proxy(p);
                }
            }
        }
        if let Ok(https_p) = std::env::var("HTTPS_PROXY").or_else(|_| std::env::var("https_proxy"))
        {
            let u = https_p.trim();
            if !u.is_empty() {
                if let Ok(p) = reqwest::Proxy::https(u) {
                    builder = builder.proxy(p);
                }
            }
        }
    }

    // User-Agent for observability
    builder = builder.user_agent(format!("openai-mcp/{}", env!("CARGO_PKG_VERSION")));

    builder.build().unwrap_or_else(|_| reqwest::Client::new())
}

/// Resolve the OpenAI base URL from environment or use the default public endpoint.
pub fn openai_base_url() -> String {
    std::env::var("OPENAI_BASE_URL")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}

/// Read the required API credential. `None` when unset or blank; the caller
/// decides whether that is fatal.
pub fn openai_api_key() -> Option<String> {
    std::env::var("OPENAI_API_KEY")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
