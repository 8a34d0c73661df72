use anyhow::Result;
use clap::Parser;
use job_tracker::app_log;
use job_tracker::cli::{run, Cli};
use job_tracker::core::ConfigManager;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging first
    Registry::default()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("job_tracker=info,rocket=warn")),
        )
        .init();

    let cli = Cli::parse();
    let config = ConfigManager::load()?;

    app_log!(info, "Environment: {}", config.environment);
    app_log!(info, "Storage backend: {:?}", config.storage.backend);
    app_log!(
        info,
        "Google Sheet ID: {}",
        if config.storage.sheets.is_some() {
            "Configured"
        } else {
            "Not configured"
        }
    );

    run(cli, config).await
}
