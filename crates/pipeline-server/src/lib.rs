//!
//! Pipeline Server - HTTP front for pipeline graph validation
//!
//! This module exports all the components of the Pipeline Server.

use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

/// API module
pub mod api;

/// Configuration module
pub mod config;

/// Error module
pub mod error;

/// Server module
pub mod server;

// Re-export key types
pub use crate::config::{LoadedConfig, LogFormat, ServerConfig};
pub use crate::error::{ServerError, ServerResult};
pub use crate::server::PipelineServer;

/// Run function. Expects logging to be initialized already.
pub async fn run(config: ServerConfig) -> ServerResult<()> {
    PipelineServer::new(config).run().await
}

/// Log the effective configuration and the warnings gathered while loading it
pub fn log_config(config: &ServerConfig, warnings: &[String]) {
    for warning in warnings {
        warn!("{}", warning);
    }

    if config.allows_any_origin() {
        warn!("CORS allows any origin - restrict ALLOWED_ORIGINS outside development");
    }

    info!(
        bind_address = %config.bind_address,
        port = config.port,
        unknown_node_policy = %config.unknown_node_policy,
        allowed_origins = ?config.allowed_origins,
        "Loaded server configuration"
    );
}

/// Initialize logging. `RUST_LOG` takes precedence over the configured level.
pub fn init_logging(config: &ServerConfig) -> ServerResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let builder = fmt().with_env_filter(filter).with_target(true);

    let result = match config.log_format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.try_init(),
    };

    result.map_err(|err| {
        ServerError::InternalError(format!("Failed to initialize logging: {}", err))
    })
}
