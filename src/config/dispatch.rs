//! Dispatcher configuration

use serde::{Deserialize, Serialize};

/// Settings for the `/sendXml` dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Delay requested when the caller omits `timeoutSecond`
    pub default_timeout_seconds: u64,
    /// Largest delay the dispatcher will forward (5 minutes)
    pub max_timeout_seconds: u64,
    /// Responder endpoint. Derived from the server address when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responder_url: Option<String>,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            default_timeout_seconds: 3,
            max_timeout_seconds: 300,
            responder_url: None,
        }
    }
}
