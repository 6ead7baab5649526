use library_catalog::config::{AppConfig, DEFAULT_LOG_FILTER};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdoutはMCPトランスポートが使うため、ログはstderrへ
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let config = AppConfig::from_env();
    library_catalog::interface::mcp::run(config.catalog_path).await
}
