//! Configuration module for xmlecho
//!
//! Provides layered configuration loading from files, environment variables, and defaults.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`XMLECHO_*`)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)
//!
//! # Example
//!
//! ```rust
//! use xmlecho::config::XmlEchoConfig;
//!
//! let config = XmlEchoConfig::default();
//! assert_eq!(config.server.port, 8080);
//! assert_eq!(config.client.read_timeout_seconds, 5);
//!
//! let toml = r#"
//! [client]
//! read_timeout_seconds = 2
//! "#;
//! let config: XmlEchoConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.client.read_timeout_seconds, 2);
//! ```

pub mod client;
pub mod dispatch;
pub mod error;
pub mod logging;
pub mod server;

pub use client::ClientConfig;
pub use dispatch::DispatchConfig;
pub use error::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use server::ServerConfig;

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Path the responder is mounted on.
pub const RESPONDER_PATH: &str = "/echoXml";

/// Path the dispatcher is mounted on.
pub const DISPATCHER_PATH: &str = "/sendXml";

/// Unified configuration for the xmlecho server.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct XmlEchoConfig {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Outbound client timeouts
    pub client: ClientConfig,
    /// Dispatcher limits and target
    pub dispatch: DispatchConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl XmlEchoConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p).map_err(|source| ConfigError::Read {
                    path: p.to_path_buf(),
                    source,
                })?;
                toml::from_str(&content).map_err(|e| ConfigError::Parse {
                    path: p.to_path_buf(),
                    message: e.message().to_string(),
                })
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Invalid values are silently ignored (the current value is kept).
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(port) = std::env::var("XMLECHO_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }
        if let Ok(host) = std::env::var("XMLECHO_HOST") {
            self.server.host = host;
        }

        if let Ok(level) = std::env::var("XMLECHO_LOG_LEVEL") {
            if logging::is_valid_level(&level) {
                self.logging.level = level;
            }
        }
        if let Ok(format) = std::env::var("XMLECHO_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }

        if let Ok(url) = std::env::var("XMLECHO_RESPONDER_URL") {
            if !url.is_empty() {
                self.dispatch.responder_url = Some(url);
            }
        }

        self
    }

    /// URL the dispatcher posts to.
    pub fn responder_url(&self) -> String {
        match &self.dispatch.responder_url {
            Some(url) => url.clone(),
            None => format!("{}{}", self.server.local_base_url(), RESPONDER_PATH),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::invalid("server.port", "port must be non-zero"));
        }

        if self.client.connect_timeout_seconds == 0 {
            return Err(ConfigError::invalid(
                "client.connect_timeout_seconds",
                "timeout must be non-zero",
            ));
        }
        if self.client.read_timeout_seconds == 0 {
            return Err(ConfigError::invalid(
                "client.read_timeout_seconds",
                "timeout must be non-zero",
            ));
        }

        if self.dispatch.default_timeout_seconds > self.dispatch.max_timeout_seconds {
            return Err(ConfigError::invalid(
                "dispatch.default_timeout_seconds",
                format!(
                    "default {} exceeds max_timeout_seconds {}",
                    self.dispatch.default_timeout_seconds, self.dispatch.max_timeout_seconds
                ),
            ));
        }

        if matches!(&self.dispatch.responder_url, Some(url) if url.is_empty()) {
            return Err(ConfigError::invalid(
                "dispatch.responder_url",
                "URL cannot be empty",
            ));
        }

        self.logging.validate()
    }
}
