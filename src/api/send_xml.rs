//! Dispatcher endpoint handler.

use crate::api::{ApiError, AppState, SendXmlParams};
use axum::extract::{rejection::QueryRejection, Query, State};
use std::sync::Arc;
use tracing::info;

/// Body returned when the responder replied in time.
pub const SUCCESS_TEXT: &str = "success";

/// GET /sendXml - Ask the responder to wait `timeoutSecond` seconds.
pub async fn handle(
    State(state): State<Arc<AppState>>,
    params: Result<Query<SendXmlParams>, QueryRejection>,
) -> Result<&'static str, ApiError> {
    let Query(params) = params.map_err(|e| {
        ApiError::invalid_parameter("timeoutSecond", &e.body_text())
    })?;

    let timeout_seconds = params
        .timeout_second
        .unwrap_or_else(|| state.dispatcher.default_timeout_seconds());

    info!(timeout_seconds, "sendXml request");

    state.dispatcher.dispatch(timeout_seconds).await?;

    Ok(SUCCESS_TEXT)
}
