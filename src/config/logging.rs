//! `[logging]` section

use super::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use tracing::level_filters::LevelFilter;

/// Modules that accept a level in `[logging.component_levels]`.
pub const COMPONENTS: &[&str] = &["api", "cli", "config", "dispatch", "logging", "responder", "xml"];

/// Output format of the fmt layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(ConfigError::invalid(
                "logging.format",
                format!("'{}' is not one of pretty, json", s),
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Base level for every target, e.g. "info"
    pub level: String,
    pub format: LogFormat,
    /// Levels for single components, keyed by module name
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub component_levels: BTreeMap<String, String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            component_levels: BTreeMap::new(),
        }
    }
}

/// True when `level` names a tracing level or "off".
pub fn is_valid_level(level: &str) -> bool {
    LevelFilter::from_str(level).is_ok()
}

impl LoggingConfig {
    /// Reject levels tracing would not understand and unknown components.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_valid_level(&self.level) {
            return Err(ConfigError::invalid(
                "logging.level",
                format!("unknown level '{}'", self.level),
            ));
        }

        for (component, level) in &self.component_levels {
            let field = format!("logging.component_levels.{}", component);
            if !COMPONENTS.contains(&component.as_str()) {
                return Err(ConfigError::invalid(
                    &field,
                    format!("unknown component, expected one of {}", COMPONENTS.join(", ")),
                ));
            }
            if !is_valid_level(level) {
                return Err(ConfigError::invalid(&field, format!("unknown level '{}'", level)));
            }
        }

        Ok(())
    }
}
