//! # HTTP API
//!
//! The two endpoints of the timeout sample.
//!
//! ## Endpoints
//!
//! - `GET /sendXml?timeoutSecond=N` - Dispatcher: posts an XML envelope to the
//!   responder with a bounded read timeout, answers `success`
//! - `POST /echoXml` - Responder: waits N seconds, answers
//!   `<root><success>true</success></root>`
//!
//! ## Example
//!
//! ```no_run
//! use xmlecho::api::{create_router, AppState};
//! use xmlecho::config::XmlEchoConfig;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Arc::new(XmlEchoConfig::default());
//! let state = Arc::new(AppState::new(config)?);
//! let app = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Failures are returned as a JSON envelope:
//! ```json
//! {
//!   "error": {
//!     "message": "read timeout after 5s",
//!     "type": "server_error",
//!     "code": "gateway_timeout"
//!   }
//! }
//! ```
//!
//! | Failure | Status |
//! |---|---|
//! | `timeoutSecond` above the limit or not a number | 400 |
//! | Malformed XML body | 400 |
//! | Responder connection refused or non-2xx | 502 |
//! | Connect or read timeout | 504 |

mod echo_xml;
mod send_xml;
pub mod types;

pub use send_xml::SUCCESS_TEXT;
pub use types::*;

use crate::config::{XmlEchoConfig, DISPATCHER_PATH, RESPONDER_PATH};
use crate::dispatch::{DispatchError, Dispatcher};
use crate::responder::Responder;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Shared application state accessible to all handlers.
pub struct AppState {
    pub config: Arc<XmlEchoConfig>,
    pub dispatcher: Dispatcher,
    pub responder: Responder,
}

impl AppState {
    /// Create application state, building the dispatcher's HTTP client.
    pub fn new(config: Arc<XmlEchoConfig>) -> Result<Self, DispatchError> {
        let dispatcher = Dispatcher::from_config(&config)?;

        tracing::debug!(
            responder_url = %dispatcher.responder_url(),
            connect_timeout_seconds = config.client.connect_timeout_seconds,
            read_timeout_seconds = config.client.read_timeout_seconds,
            "Dispatcher client ready"
        );

        Ok(Self {
            config,
            dispatcher,
            responder: Responder::new(),
        })
    }
}

/// Create the API router with both endpoints configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    let max_body_bytes = state.config.server.max_body_bytes;

    Router::new()
        .route(DISPATCHER_PATH, get(send_xml::handle))
        .route(RESPONDER_PATH, post(echo_xml::handle))
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
