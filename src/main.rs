use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;
use watchtower::config::Settings;
use watchtower::domain::LogFormat;
use watchtower::Application;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::new()?;

    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.logging.level.as_str()));
    match settings.logging.format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Compact => tracing_subscriber::fmt()
            .compact()
            .with_env_filter(filter)
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }

    info!("Starting Watchtower");

    let app = Application::with_settings(settings)?;
    app.run().await?;

    Ok(())
}
