use anyhow::Result;
use favorites_service::config::{self, Config};
use favorites_service::server;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = config::load_from_env()?;
    init_tracing(&config)?;
    config.print_summary();

    server::run(config).await
}

/// Installs the global subscriber; `RUST_LOG` directives override the
/// configured level.
fn init_tracing(config: &Config) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if config.log_format == "json" {
        builder.json().with_current_span(true).init();
    } else {
        builder.init();
    }

    Ok(())
}
