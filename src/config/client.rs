//! Outbound HTTP client configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timeouts for the client the dispatcher uses to reach the responder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Max wait to establish the TCP connection
    pub connect_timeout_seconds: u64,
    /// Max wait for response data once the request is sent
    pub read_timeout_seconds: u64,
}

impl ClientConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_seconds)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout_seconds: 5,
            read_timeout_seconds: 5,
        }
    }
}
