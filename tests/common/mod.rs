//! Shared test utilities for xmlecho integration tests.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::Response;
use std::sync::Arc;
use xmlecho::api::{create_router, AppState};
use xmlecho::config::XmlEchoConfig;

/// A server running on an ephemeral loopback port.
pub struct TestServer {
    pub base_url: String,
    pub state: Arc<AppState>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Start a real server whose dispatcher targets its own `/echoXml`.
///
/// `configure` runs before the dispatcher client is built.
pub async fn spawn_server(configure: impl FnOnce(&mut XmlEchoConfig)) -> TestServer {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let mut config = XmlEchoConfig::default();
    config.server.host = "127.0.0.1".to_string();
    config.server.port = port;
    configure(&mut config);

    let state = Arc::new(AppState::new(Arc::new(config)).unwrap());
    let app = create_router(Arc::clone(&state));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestServer {
        base_url: format!("http://127.0.0.1:{}", port),
        state,
    }
}

/// Router whose dispatcher targets `responder_url`.
pub fn router_for(responder_url: &str) -> (axum::Router, Arc<AppState>) {
    let mut config = XmlEchoConfig::default();
    config.dispatch.responder_url = Some(responder_url.to_string());
    let state = Arc::new(AppState::new(Arc::new(config)).unwrap());
    (create_router(Arc::clone(&state)), state)
}

/// Collect a response body as a string.
pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
