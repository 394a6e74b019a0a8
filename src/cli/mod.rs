//! CLI module for xmlecho
//!
//! # Commands
//!
//! - `serve` - Start the server with both endpoints
//! - `send` - Run a single dispatcher call against a running responder
//! - `config` - Configuration utilities (init)
//! - `completions` - Generate shell completions
//!
//! # Example
//!
//! ```bash
//! # Start server on the default port 8080
//! xmlecho serve
//!
//! # Ask the responder to wait 7 seconds (times out with the default 5s read timeout)
//! xmlecho send --timeout 7
//! ```

pub mod completions;
pub mod config;
pub mod send;
pub mod serve;

pub use completions::handle_completions;
pub use config::handle_config_init;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// xmlecho - XML request/response timeout sample
#[derive(Parser, Debug)]
#[command(
    name = "xmlecho",
    version,
    about = "XML request/response sample demonstrating client read timeouts"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the xmlecho server
    Serve(ServeArgs),
    /// Send one XML request to a responder and print the reply
    Send(SendArgs),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "xmlecho.toml")]
    pub config: PathBuf,

    /// Override server port
    #[arg(short, long, env = "XMLECHO_PORT")]
    pub port: Option<u16>,

    /// Override server host
    #[arg(short = 'H', long, env = "XMLECHO_HOST")]
    pub host: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "XMLECHO_LOG_LEVEL")]
    pub log_level: Option<String>,
}

#[derive(Args, Debug)]
pub struct SendArgs {
    /// Seconds the responder should wait (defaults to dispatch.default_timeout_seconds)
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Responder URL (defaults to this host's /echoXml)
    #[arg(short, long)]
    pub url: Option<String>,

    /// Override the client read timeout in seconds
    #[arg(long)]
    pub read_timeout: Option<u64>,

    /// Path to configuration file
    #[arg(short, long, default_value = "xmlecho.toml")]
    pub config: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Initialize a new configuration file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = "xmlecho.toml")]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
