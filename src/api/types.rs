//! Request parameters and error envelope for the HTTP API.

use crate::dispatch::DispatchError;
use crate::responder::ResponderError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Deserializer, Serialize};

/// Query parameters of `GET /sendXml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SendXmlParams {
    /// Seconds the responder should wait. Falls back to the configured default
    /// when absent or empty.
    #[serde(
        rename = "timeoutSecond",
        default,
        deserialize_with = "empty_as_none"
    )]
    pub timeout_second: Option<u64>,
}

/// `timeoutSecond=` is treated like a missing parameter.
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref() {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Error response envelope.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiError {
    pub error: ApiErrorBody,
}

/// Error details.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiErrorBody {
    pub message: String,
    pub r#type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ApiError {
    fn new(message: &str, r#type: &str, param: Option<&str>, code: &str) -> Self {
        Self {
            error: ApiErrorBody {
                message: message.to_string(),
                r#type: r#type.to_string(),
                param: param.map(str::to_string),
                code: Some(code.to_string()),
            },
        }
    }

    /// Create a bad request error (400).
    pub fn bad_request(message: &str) -> Self {
        Self::new(message, "invalid_request_error", None, "invalid_request_error")
    }

    /// Create an invalid parameter error (400) naming the offending parameter.
    pub fn invalid_parameter(param: &str, message: &str) -> Self {
        Self::new(message, "invalid_request_error", Some(param), "invalid_parameter")
    }

    /// Create a malformed XML body error (400).
    pub fn malformed_xml(message: &str) -> Self {
        Self::new(message, "invalid_request_error", None, "malformed_xml")
    }

    /// Create a bad gateway error (502).
    pub fn bad_gateway(message: &str) -> Self {
        Self::new(message, "server_error", None, "bad_gateway")
    }

    /// Create a gateway timeout error (504).
    pub fn gateway_timeout(message: &str) -> Self {
        Self::new(message, "server_error", None, "gateway_timeout")
    }

    /// Create an internal server error (500).
    pub fn internal(message: &str) -> Self {
        Self::new(message, "server_error", None, "internal_error")
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self.error.code.as_deref() {
            Some("invalid_request_error") | Some("invalid_parameter") | Some("malformed_xml") => {
                StatusCode::BAD_REQUEST
            }
            Some("bad_gateway") => StatusCode::BAD_GATEWAY,
            Some("gateway_timeout") => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DispatchError> for ApiError {
    fn from(e: DispatchError) -> Self {
        let message = e.to_string();
        match e {
            DispatchError::InvalidParameter { .. } => {
                ApiError::invalid_parameter("timeoutSecond", &message)
            }
            DispatchError::ConnectTimeout(_) | DispatchError::ReadTimeout(_) => {
                ApiError::gateway_timeout(&message)
            }
            DispatchError::Connect(_)
            | DispatchError::Transport(_)
            | DispatchError::UpstreamStatus(_) => ApiError::bad_gateway(&message),
            DispatchError::Client(_) => ApiError::internal(&message),
        }
    }
}

impl From<ResponderError> for ApiError {
    fn from(e: ResponderError) -> Self {
        let message = e.to_string();
        match e {
            ResponderError::Xml(_) => ApiError::malformed_xml(&message),
            ResponderError::Task(_) => ApiError::internal(&message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}
