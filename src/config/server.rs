//! Server configuration

use serde::{Deserialize, Serialize};

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Maximum accepted request body size in bytes
    pub max_body_bytes: usize,
}

impl ServerConfig {
    /// Address to bind the listener to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Base URL a local client uses to reach this server.
    ///
    /// Wildcard hosts are not dialable, so they are replaced with loopback.
    pub fn local_base_url(&self) -> String {
        let host = match self.host.as_str() {
            "0.0.0.0" | "" => "127.0.0.1",
            "::" | "[::]" => "[::1]",
            other => other,
        };
        format!("http://{}:{}", host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            max_body_bytes: 1024 * 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.max_body_bytes, 1024 * 1024);
    }

    #[test]
    fn test_local_base_url_replaces_wildcard() {
        let config = ServerConfig::default();
        assert_eq!(config.local_base_url(), "http://127.0.0.1:8080");
    }

    #[test]
    fn test_local_base_url_keeps_explicit_host() {
        let config = ServerConfig {
            host: "localhost".to_string(),
            port: 9000,
            ..Default::default()
        };
        assert_eq!(config.local_base_url(), "http://localhost:9000");
        assert_eq!(config.bind_addr(), "localhost:9000");
    }
}
