//! Send command implementation

use crate::cli::SendArgs;
use crate::config::XmlEchoConfig;
use crate::dispatch::{DispatchOutcome, Dispatcher};

/// Resolve config for a one-off dispatch.
pub fn load_send_config(args: &SendArgs) -> Result<XmlEchoConfig, Box<dyn std::error::Error>> {
    let mut config = if args.config.exists() {
        XmlEchoConfig::load(Some(&args.config))?
    } else {
        XmlEchoConfig::default()
    };
    config = config.with_env_overrides();

    if let Some(ref url) = args.url {
        config.dispatch.responder_url = Some(url.clone());
    }
    if let Some(read_timeout) = args.read_timeout {
        config.client.read_timeout_seconds = read_timeout;
    }

    config.validate()?;
    Ok(config)
}

/// Render a completed round trip for the terminal.
pub fn format_outcome(outcome: &DispatchOutcome) -> String {
    format!(
        "response ({} ms) >> {}",
        outcome.elapsed.as_millis(),
        outcome.body
    )
}

/// Handle `xmlecho send`
pub async fn handle_send(args: &SendArgs) -> Result<String, Box<dyn std::error::Error>> {
    let config = load_send_config(args)?;
    let dispatcher = Dispatcher::from_config(&config)?;
    let timeout = args
        .timeout
        .unwrap_or_else(|| dispatcher.default_timeout_seconds());

    let outcome = dispatcher.dispatch(timeout).await?;
    Ok(format_outcome(&outcome))
}
