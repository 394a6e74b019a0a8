//! Error types for the dispatcher.

use thiserror::Error;

/// Errors returned by [`super::Dispatcher`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// Requested delay is above the configured ceiling
    #[error(
        "timeoutSecond {value} is too large, enter a value within {minutes} minutes ({max} seconds)",
        minutes = .max / 60
    )]
    InvalidParameter { value: u64, max: u64 },

    /// Connection to the responder was not established in time
    #[error("connect timeout after {0}s")]
    ConnectTimeout(u64),

    /// Responder did not send data in time
    #[error("read timeout after {0}s")]
    ReadTimeout(u64),

    /// Connection failed
    #[error("connection failed: {0}")]
    Connect(String),

    /// Any other transport failure
    #[error("transport error: {0}")]
    Transport(String),

    /// Responder answered with a non-success status
    #[error("responder returned HTTP {0}")]
    UpstreamStatus(u16),

    /// HTTP client could not be built
    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

impl DispatchError {
    /// True for either timeout kind.
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            DispatchError::ConnectTimeout(_) | DispatchError::ReadTimeout(_)
        )
    }
}
