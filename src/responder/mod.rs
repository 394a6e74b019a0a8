//! Responder: waits the requested number of seconds, then answers.
//!
//! The wait runs in its own task. If the caller goes away (for example after
//! its read timeout fires) the handler future is dropped but the wait still
//! runs to completion and is counted.

use crate::xml::{TimeoutRequest, XmlError, SUCCESS_REPLY};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Errors returned by [`Responder::respond`].
#[derive(Debug, Error)]
pub enum ResponderError {
    /// Body could not be read as a timeout envelope
    #[error(transparent)]
    Xml(#[from] XmlError),

    /// Delay task ended without completing
    #[error("delay task failed: {0}")]
    Task(String),
}

/// Handles `/echoXml` requests.
#[derive(Debug, Clone, Default)]
pub struct Responder {
    completed: Arc<AtomicU64>,
}

impl Responder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of delays that ran to completion, whether or not the caller
    /// was still waiting.
    pub fn completed_replies(&self) -> u64 {
        self.completed.load(Ordering::SeqCst)
    }

    /// Parse `body`, wait the requested delay and return the success reply.
    pub async fn respond(&self, request_id: &str, body: &str) -> Result<&'static str, ResponderError> {
        let request = TimeoutRequest::from_xml(body)?;
        debug!(
            request_id = %request_id,
            timeout_seconds = request.timeout,
            "Responder waiting"
        );

        let completed = Arc::clone(&self.completed);
        let request_id = request_id.to_string();
        let delay = tokio::spawn(async move {
            tokio::time::sleep(request.delay()).await;
            completed.fetch_add(1, Ordering::SeqCst);
            info!(
                request_id = %request_id,
                timeout_seconds = request.timeout,
                "Responder delay elapsed"
            );
        });

        delay
            .await
            .map_err(|e| ResponderError::Task(e.to_string()))?;

        Ok(SUCCESS_REPLY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_respond_waits_requested_delay() {
        let responder = Responder::new();
        let start = Instant::now();

        let reply = responder
            .respond("req-1", "<root><timeout>3</timeout></root>")
            .await
            .unwrap();

        assert_eq!(reply, "<root><success>true</success></root>");
        assert!(start.elapsed() >= Duration::from_secs(3));
        assert_eq!(responder.completed_replies(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_respond_is_repeatable() {
        let responder = Responder::new();
        let body = "<root><timeout>2</timeout></root>";

        let start = Instant::now();
        let first = responder.respond("a", body).await.unwrap();
        let first_elapsed = start.elapsed();

        let start = Instant::now();
        let second = responder.respond("b", body).await.unwrap();
        let second_elapsed = start.elapsed();

        assert_eq!(first, second);
        for elapsed in [first_elapsed, second_elapsed] {
            assert!(elapsed >= Duration::from_secs(2));
            assert!(elapsed < Duration::from_millis(2100));
        }
        assert_eq!(responder.completed_replies(), 2);
    }

    #[tokio::test]
    async fn test_respond_rejects_malformed_body() {
        let responder = Responder::new();
        let err = responder.respond("req", "<root><timeout>").await.unwrap_err();

        assert!(matches!(err, ResponderError::Xml(_)));
        assert_eq!(responder.completed_replies(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_survives_dropped_caller() {
        let responder = Responder::new();

        // Caller gives up after one second of a ten second delay
        let call = responder.respond("req", "<root><timeout>10</timeout></root>");
        let gave_up = tokio::time::timeout(Duration::from_secs(1), call).await;
        assert!(gave_up.is_err());
        assert_eq!(responder.completed_replies(), 0);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(responder.completed_replies(), 1);
    }
}
