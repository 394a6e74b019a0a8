//! Dispatcher: sends a timeout envelope to the responder and waits for the reply.
//!
//! The dispatcher owns its HTTP client. The client has a connect timeout and a
//! read timeout and no overall request timeout, so a responder that stays
//! silent longer than the read timeout fails the call with
//! [`DispatchError::ReadTimeout`]. Nothing is retried.

mod error;

pub use error::DispatchError;

use crate::config::{ClientConfig, DispatchConfig, XmlEchoConfig};
use crate::logging::{generate_request_id, REQUEST_ID_HEADER};
use crate::xml::{TimeoutRequest, XML_CONTENT_TYPE};
use reqwest::header::CONTENT_TYPE;
use std::error::Error as _;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Result of a completed round trip.
#[derive(Debug, Clone)]
pub struct DispatchOutcome {
    /// Correlation ID sent to the responder
    pub request_id: String,
    /// Wall-clock time of the outbound call
    pub elapsed: Duration,
    /// Raw reply body
    pub body: String,
}

/// Outbound caller of the responder endpoint.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    client: reqwest::Client,
    client_config: ClientConfig,
    responder_url: String,
    default_timeout_seconds: u64,
    max_timeout_seconds: u64,
}

impl Dispatcher {
    /// Build a dispatcher and its HTTP client.
    pub fn new(
        client_config: &ClientConfig,
        dispatch_config: &DispatchConfig,
        responder_url: impl Into<String>,
    ) -> Result<Self, DispatchError> {
        let client = reqwest::Client::builder()
            .connect_timeout(client_config.connect_timeout())
            .read_timeout(client_config.read_timeout())
            .build()
            .map_err(|e| DispatchError::Client(e.to_string()))?;

        Ok(Self {
            client,
            client_config: client_config.clone(),
            responder_url: responder_url.into(),
            default_timeout_seconds: dispatch_config.default_timeout_seconds,
            max_timeout_seconds: dispatch_config.max_timeout_seconds,
        })
    }

    /// Build a dispatcher targeting the responder named by `config`.
    pub fn from_config(config: &XmlEchoConfig) -> Result<Self, DispatchError> {
        Self::new(&config.client, &config.dispatch, config.responder_url())
    }

    pub fn responder_url(&self) -> &str {
        &self.responder_url
    }

    pub fn default_timeout_seconds(&self) -> u64 {
        self.default_timeout_seconds
    }

    /// Reject delays above the configured ceiling.
    pub fn validate(&self, timeout_seconds: u64) -> Result<u64, DispatchError> {
        if timeout_seconds > self.max_timeout_seconds {
            return Err(DispatchError::InvalidParameter {
                value: timeout_seconds,
                max: self.max_timeout_seconds,
            });
        }
        Ok(timeout_seconds)
    }

    /// Ask the responder to wait `timeout_seconds` and return its reply.
    pub async fn dispatch(&self, timeout_seconds: u64) -> Result<DispatchOutcome, DispatchError> {
        let timeout_seconds = self.validate(timeout_seconds)?;
        let request_id = generate_request_id();
        let body = TimeoutRequest::new(timeout_seconds).to_xml();

        debug!(
            request_id = %request_id,
            url = %self.responder_url,
            timeout_seconds,
            "Sending XML request to responder"
        );

        let start = Instant::now();
        let result = self.round_trip(&request_id, body).await;
        let elapsed = start.elapsed();

        match result {
            Ok(reply) => {
                info!(
                    request_id = %request_id,
                    elapsed_ms = elapsed.as_millis() as u64,
                    response = %reply,
                    "Responder replied"
                );
                Ok(DispatchOutcome {
                    request_id,
                    elapsed,
                    body: reply,
                })
            }
            Err(e) => {
                warn!(
                    request_id = %request_id,
                    elapsed_ms = elapsed.as_millis() as u64,
                    error = %e,
                    "Responder call failed"
                );
                Err(e)
            }
        }
    }

    async fn round_trip(&self, request_id: &str, body: String) -> Result<String, DispatchError> {
        let response = self
            .client
            .post(&self.responder_url)
            .header(CONTENT_TYPE, XML_CONTENT_TYPE)
            .header(REQUEST_ID_HEADER, request_id)
            .body(body)
            .send()
            .await
            .map_err(|e| self.classify_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DispatchError::UpstreamStatus(status.as_u16()));
        }

        response.text().await.map_err(|e| self.classify_error(e))
    }

    /// Classify reqwest error into DispatchError.
    fn classify_error(&self, e: reqwest::Error) -> DispatchError {
        if is_timeout(&e) {
            if e.is_connect() {
                DispatchError::ConnectTimeout(self.client_config.connect_timeout_seconds)
            } else {
                DispatchError::ReadTimeout(self.client_config.read_timeout_seconds)
            }
        } else if e.is_connect() {
            DispatchError::Connect(e.to_string())
        } else {
            DispatchError::Transport(e.to_string())
        }
    }
}

/// reqwest reports some timeouts only through an `io::ErrorKind::TimedOut` source.
fn is_timeout(e: &reqwest::Error) -> bool {
    if e.is_timeout() {
        return true;
    }
    let mut source = e.source();
    while let Some(err) = source {
        if let Some(io) = err.downcast_ref::<std::io::Error>() {
            if io.kind() == std::io::ErrorKind::TimedOut {
                return true;
            }
        }
        source = err.source();
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string, header, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn dispatcher_for(url: String, read_timeout_seconds: u64) -> Dispatcher {
        let client = ClientConfig {
            connect_timeout_seconds: 5,
            read_timeout_seconds,
        };
        Dispatcher::new(&client, &DispatchConfig::default(), url).unwrap()
    }

    #[test]
    fn test_validate_boundary() {
        let dispatcher = dispatcher_for("http://127.0.0.1:1/echoXml".to_string(), 5);
        assert_eq!(dispatcher.validate(0).unwrap(), 0);
        assert_eq!(dispatcher.validate(300).unwrap(), 300);
        assert_eq!(
            dispatcher.validate(301).unwrap_err(),
            DispatchError::InvalidParameter {
                value: 301,
                max: 300
            }
        );
    }

    #[test]
    fn test_from_config_uses_derived_url() {
        let mut config = XmlEchoConfig::default();
        config.server.port = 9100;
        let dispatcher = Dispatcher::from_config(&config).unwrap();
        assert_eq!(dispatcher.responder_url(), "http://127.0.0.1:9100/echoXml");
        assert_eq!(dispatcher.default_timeout_seconds(), 3);
    }

    #[tokio::test]
    async fn test_dispatch_posts_xml_envelope() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/echoXml"))
            .and(header("content-type", "application/xml"))
            .and(header_exists("x-request-id"))
            .and(body_string("<root><timeout>3</timeout></root>"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string("<root><success>true</success></root>"),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let dispatcher = dispatcher_for(format!("{}/echoXml", mock_server.uri()), 5);
        let outcome = dispatcher.dispatch(3).await.unwrap();

        assert_eq!(outcome.body, "<root><success>true</success></root>");
        assert_eq!(outcome.request_id.len(), 36);
    }

    #[tokio::test]
    async fn test_dispatch_rejects_before_network_call() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let dispatcher = dispatcher_for(format!("{}/echoXml", mock_server.uri()), 5);
        let err = dispatcher.dispatch(301).await.unwrap_err();

        assert!(matches!(err, DispatchError::InvalidParameter { .. }));
    }

    #[tokio::test]
    async fn test_dispatch_read_timeout() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/echoXml"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
            .mount(&mock_server)
            .await;

        let dispatcher = dispatcher_for(format!("{}/echoXml", mock_server.uri()), 1);
        let start = Instant::now();
        let err = dispatcher.dispatch(3).await.unwrap_err();

        assert_eq!(err, DispatchError::ReadTimeout(1));
        assert!(start.elapsed() < Duration::from_secs(3));
    }

    #[tokio::test]
    async fn test_dispatch_upstream_error_status() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400))
            .mount(&mock_server)
            .await;

        let dispatcher = dispatcher_for(format!("{}/echoXml", mock_server.uri()), 5);
        let err = dispatcher.dispatch(1).await.unwrap_err();

        assert_eq!(err, DispatchError::UpstreamStatus(400));
    }

    #[tokio::test]
    async fn test_dispatch_connection_refused() {
        // Bind then drop to get a port nothing listens on
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let dispatcher = dispatcher_for(format!("http://127.0.0.1:{}/echoXml", port), 5);
        let err = dispatcher.dispatch(0).await.unwrap_err();

        assert!(matches!(err, DispatchError::Connect(_)));
    }
}
