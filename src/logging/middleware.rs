//! Request ID generation and propagation

use axum::http::HeaderMap;
use uuid::Uuid;

/// Header carrying the dispatcher's correlation ID to the responder.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Generate a new request ID using UUID v4
///
/// # Examples
///
/// ```
/// use xmlecho::logging::generate_request_id;
///
/// let request_id = generate_request_id();
/// assert_eq!(request_id.len(), 36);
/// ```
pub fn generate_request_id() -> String {
    Uuid::new_v4().to_string()
}

/// Request ID from inbound headers, or a fresh one when absent or not UTF-8.
pub fn request_id_from(headers: &HeaderMap) -> String {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .unwrap_or_else(generate_request_id)
}
