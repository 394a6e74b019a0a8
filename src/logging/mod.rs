//! Structured logging setup and request correlation
//!
//! Builds the tracing subscriber from [`LoggingConfig`] and provides the
//! request ID that links a dispatcher call to the responder's log lines.

pub mod middleware;

pub use middleware::{generate_request_id, REQUEST_ID_HEADER};

use crate::config::{LogFormat, LoggingConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Build filter directives string from LoggingConfig
///
/// Produces `"base_level,xmlecho::component=level,..."` with components in
/// name order.
///
/// # Examples
///
/// ```
/// use xmlecho::config::LoggingConfig;
/// use xmlecho::logging::build_filter_directives;
///
/// let mut config = LoggingConfig::default();
/// config
///     .component_levels
///     .insert("dispatch".to_string(), "debug".to_string());
///
/// assert_eq!(build_filter_directives(&config), "info,xmlecho::dispatch=debug");
/// ```
pub fn build_filter_directives(config: &LoggingConfig) -> String {
    let mut filter_str = config.level.clone();

    for (component, level) in &config.component_levels {
        filter_str.push_str(&format!(",xmlecho::{}={}", component, level));
    }

    filter_str
}

/// Initialize tracing based on configuration
///
/// `RUST_LOG` takes precedence over the configured directives.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let filter_str = build_filter_directives(config);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    match config.format {
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .try_init()?;
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .try_init()?;
        }
    }

    Ok(())
}
