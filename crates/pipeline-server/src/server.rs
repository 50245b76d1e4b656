//! Main Pipeline Server implementation
//!
//! This module contains the PipelineServer implementation.

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

use pipeline_graph::{DagValidator, Pipeline, PipelineValidator, ValidationReport};

use crate::config::ServerConfig;
use crate::error::ServerResult;

/// Main server implementation
#[derive(Clone)]
pub struct PipelineServer {
    /// Configuration
    pub config: ServerConfig,

    /// Validator applied to every submitted pipeline
    validator: Arc<dyn PipelineValidator>,
}

/// Manual Debug implementation that doesn't try to debug the trait object
impl std::fmt::Debug for PipelineServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineServer")
            .field("config", &self.config)
            .finish()
    }
}

impl PipelineServer {
    /// Create a new PipelineServer using the DAG validator for the configured policy
    pub fn new(config: ServerConfig) -> Self {
        let validator = Arc::new(DagValidator::new(config.unknown_node_policy));
        Self::with_validator(config, validator)
    }

    /// Create a server around an existing validator
    pub fn with_validator(config: ServerConfig, validator: Arc<dyn PipelineValidator>) -> Self {
        Self { config, validator }
    }

    /// Validate a submitted pipeline
    pub fn validate(&self, pipeline: &Pipeline) -> ValidationReport {
        self.validator.validate(pipeline)
    }

    /// Bind the configured address and serve until a shutdown signal arrives
    pub async fn run(self) -> ServerResult<()> {
        info!("Starting Pipeline Server");

        let listener =
            TcpListener::bind((self.config.bind_address.as_str(), self.config.port)).await?;
        self.serve(listener).await
    }

    /// Serve on an already bound listener
    pub async fn serve(self, listener: TcpListener) -> ServerResult<()> {
        let addr: SocketAddr = listener.local_addr()?;
        info!("Listening on {}", addr);

        let app = crate::api::build_router(Arc::new(self));
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Pipeline Server stopped");
        Ok(())
    }
}

/// Resolves on Ctrl-C or, on unix, SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                error!("Failed to listen for SIGTERM: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
