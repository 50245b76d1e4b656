use anyhow::{Context, Result};
use pipeline_server::config::{LoadedConfig, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration from an optional file and environment variables
    let LoadedConfig { config, warnings } = ServerConfig::load()
        .context("Failed to load configuration")?;

    // Set up logging before anything else reports through tracing
    pipeline_server::init_logging(&config)
        .context("Failed to initialize logging")?;
    pipeline_server::log_config(&config, &warnings);

    // Run the server using the library's run function
    pipeline_server::run(config).await
        .context("Server error")?;

    Ok(())
}
