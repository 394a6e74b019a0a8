//! Responder endpoint handler.

use crate::api::{ApiError, AppState};
use crate::logging::middleware::request_id_from;
use crate::xml::XML_CONTENT_TYPE;
use axum::{
    extract::{rejection::StringRejection, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

/// POST /echoXml - Wait the requested delay, then reply with the success envelope.
pub async fn handle(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Result<String, StringRejection>,
) -> Result<Response, ApiError> {
    let body = body.map_err(|e| ApiError::bad_request(&e.body_text()))?;
    let request_id = request_id_from(&headers);
    let reply = state.responder.respond(&request_id, &body).await?;

    Ok(([(header::CONTENT_TYPE, XML_CONTENT_TYPE)], reply).into_response())
}
