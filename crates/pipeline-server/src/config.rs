//! Configuration for the Pipeline Server
//!
//! Values come from built-in defaults, an optional configuration file named by
//! `PIPELINE_CONFIG`, and finally environment variables.

use std::env;

use axum::http::HeaderValue;
use config::{Config, File, Source};
use pipeline_graph::UnknownNodePolicy;
use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

/// Environment variable naming an optional configuration file
pub const CONFIG_FILE_ENV: &str = "PIPELINE_CONFIG";

/// Wildcard origin accepting requests from anywhere
pub const ANY_ORIGIN: &str = "*";

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable output for development
    #[default]
    Pretty,
    /// One JSON object per event for log aggregation
    Json,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Host to bind to
    #[serde(default = "default_host")]
    pub bind_address: String,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log output format
    #[serde(default)]
    pub log_format: LogFormat,

    /// Handling of edges that point at undeclared nodes
    #[serde(default)]
    pub unknown_node_policy: UnknownNodePolicy,

    /// Origins allowed to call the API, `*` for any
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,

    /// Maximum accepted request body size
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_port() -> u16 {
    8000
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_allowed_origins() -> Vec<String> {
    vec![ANY_ORIGIN.to_string()]
}

fn default_max_body_bytes() -> usize {
    2 * 1024 * 1024 // 2MB
}

/// Configuration together with the problems found while loading it.
///
/// Loading happens before logging is initialized, so warnings are kept here
/// and emitted by the caller once a subscriber is installed.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// The effective configuration
    pub config: ServerConfig,

    /// Ignored or suspicious override values
    pub warnings: Vec<String>,
}

impl ServerConfig {
    /// Load configuration from an optional config file and environment variables
    pub fn load() -> ServerResult<LoadedConfig> {
        let mut config = match env::var(CONFIG_FILE_ENV) {
            Ok(path) => Self::from_source(File::with_name(&path))?,
            Err(_) => Self::default(),
        };

        let warnings = config.apply_env_overrides(|key| env::var(key).ok());
        config.validate()?;

        Ok(LoadedConfig { config, warnings })
    }

    /// Build a configuration from a single `config` source on top of defaults
    fn from_source<S>(source: S) -> ServerResult<Self>
    where
        S: Source + Send + Sync + 'static,
    {
        let settings = Config::builder().add_source(source).build()?;
        Ok(settings.try_deserialize()?)
    }

    /// Override fields from environment-style variables.
    ///
    /// Values that fail to parse are ignored and described in the returned list.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Vec<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut warnings = Vec::new();

        if let Some(port) = lookup("SERVER_PORT") {
            if let Ok(port) = port.parse::<u16>() {
                self.port = port;
            } else {
                warnings.push(format!("Invalid SERVER_PORT value: {}", port));
            }
        }

        if let Some(host) = lookup("SERVER_HOST") {
            self.bind_address = host;
        }

        if let Some(log_level) = lookup("LOG_LEVEL") {
            self.log_level = log_level;
        }

        if let Some(format) = lookup("LOG_FORMAT") {
            match format.to_lowercase().as_str() {
                "pretty" => self.log_format = LogFormat::Pretty,
                "json" => self.log_format = LogFormat::Json,
                _ => warnings.push(format!("Invalid LOG_FORMAT value: {}", format)),
            }
        }

        if let Some(policy) = lookup("UNKNOWN_NODE_POLICY") {
            match policy.parse::<UnknownNodePolicy>() {
                Ok(policy) => self.unknown_node_policy = policy,
                Err(err) => {
                    warnings.push(format!("Invalid UNKNOWN_NODE_POLICY value: {}", err));
                }
            }
        }

        if let Some(origins) = lookup("ALLOWED_ORIGINS") {
            let origins: Vec<String> = origins
                .split(',')
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect();

            if origins.is_empty() {
                warnings.push(format!(
                    "Empty ALLOWED_ORIGINS value, keeping {:?}",
                    self.allowed_origins,
                ));
            } else {
                self.allowed_origins = origins;
            }
        }

        if let Some(limit) = lookup("MAX_BODY_BYTES") {
            if let Ok(limit) = limit.parse::<usize>() {
                self.max_body_bytes = limit;
            } else {
                warnings.push(format!("Invalid MAX_BODY_BYTES value: {}", limit));
            }
        }

        warnings
    }

    /// Check cross-field constraints
    pub fn validate(&self) -> ServerResult<()> {
        if self.max_body_bytes == 0 {
            return Err(ServerError::ConfigError(
                "max_body_bytes must be greater than zero".to_string(),
            ));
        }

        if self.allowed_origins.is_empty() {
            return Err(ServerError::ConfigError(
                "At least one allowed origin is required".to_string(),
            ));
        }

        for origin in self.allowed_origins.iter().filter(|o| o.as_str() != ANY_ORIGIN) {
            if HeaderValue::from_str(origin).is_err() {
                return Err(ServerError::ConfigError(format!(
                    "Invalid allowed origin: {}",
                    origin,
                )));
            }
        }

        Ok(())
    }

    /// Whether the wildcard origin is configured
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|o| o == ANY_ORIGIN)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            bind_address: default_host(),
            log_level: default_log_level(),
            log_format: LogFormat::default(),
            unknown_node_policy: UnknownNodePolicy::default(),
            allowed_origins: default_allowed_origins(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}
