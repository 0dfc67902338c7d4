//! Test utilities for ggr-client
//!
//! [`MockVendor`] is an in-process HTTP server that records every request
//! and answers with scripted bodies, so tests can assert on the exact
//! payloads a client sends.

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use parking_lot::Mutex;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use crate::config::ClientConfig;

/// A request received by the mock vendor
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Request path, e.g. `/api/v2/user_create`
    pub path: String,
    pub content_type: Option<String>,
    pub accept_encoding: Option<String>,
    /// Parsed JSON body, or the raw text as a string if it was not JSON
    pub body: Value,
}

/// Scripted reply for the next request
#[derive(Debug, Clone)]
pub enum MockResponse {
    Json(Value),
    /// Sent verbatim as `text/plain`
    Raw(String),
}

#[derive(Default)]
struct VendorState {
    requests: Mutex<Vec<RecordedRequest>>,
    responses: Mutex<VecDeque<MockResponse>>,
}

/// A mock vendor server that automatically shuts down when dropped
pub struct MockVendor {
    pub addr: SocketAddr,
    state: Arc<VendorState>,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl MockVendor {
    /// Start a mock vendor on an ephemeral port
    ///
    /// # Example
    ///
    /// ```ignore
    /// use ggr_client::testing::MockVendor;
    /// use ggr_client::NexusggrClient;
    ///
    /// let vendor = MockVendor::start().await?;
    /// vendor.respond_json(json!({"status": 1}));
    ///
    /// let client = NexusggrClient::new(vendor.config("A", "T"))?;
    /// client.register("player1").await?;
    /// assert_eq!(vendor.last_request().unwrap().body["user_code"], "player1");
    /// ```
    pub async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let state = Arc::new(VendorState::default());
        let router = Router::new().fallback(record).with_state(state.clone());

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

        let handle = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .ok();
        });

        // Give server a moment to start
        tokio::time::sleep(Duration::from_millis(10)).await;

        Ok(Self {
            addr,
            state,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        })
    }

    /// Base URL of the mock vendor
    pub fn endpoint(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Client configuration pointing at the mock vendor
    pub fn config(&self, agent: &str, token: &str) -> ClientConfig {
        ClientConfig::new(agent, token, self.endpoint())
    }

    /// Client configuration pointing at `path` on the mock vendor
    pub fn config_with_path(&self, agent: &str, token: &str, path: &str) -> ClientConfig {
        ClientConfig::new(agent, token, format!("{}{}", self.endpoint(), path))
    }

    /// Queue a reply; requests beyond the queue get `{"status": 1}`
    pub fn respond(&self, response: MockResponse) {
        self.state.responses.lock().push_back(response);
    }

    pub fn respond_json(&self, body: Value) {
        self.respond(MockResponse::Json(body));
    }

    pub fn respond_raw(&self, body: impl Into<String>) {
        self.respond(MockResponse::Raw(body.into()));
    }

    /// All requests received so far, oldest first
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().clone()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.state.requests.lock().last().cloned()
    }

    pub fn request_count(&self) -> usize {
        self.state.requests.lock().len()
    }

    /// Shutdown the server gracefully
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for MockVendor {
    fn drop(&mut self) {
        // Send shutdown signal if not already done
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        // Abort the task if still running
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

async fn record(
    State(state): State<Arc<VendorState>>,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let header_text = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    let body = serde_json::from_slice(&body)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body).into_owned()));

    state.requests.lock().push(RecordedRequest {
        path: uri.path().to_string(),
        content_type: header_text(header::CONTENT_TYPE),
        accept_encoding: header_text(header::ACCEPT_ENCODING),
        body,
    });

    let response = state
        .responses
        .lock()
        .pop_front()
        .unwrap_or_else(|| MockResponse::Json(json!({ "status": 1 })));

    match response {
        MockResponse::Json(value) => axum::Json(value).into_response(),
        MockResponse::Raw(text) => ([(header::CONTENT_TYPE, "text/plain")], text).into_response(),
    }
}

/// An endpoint on which nothing is listening
pub fn unreachable_endpoint() -> std::io::Result<String> {
    let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{}", addr))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreachable_endpoint_format() {
        let endpoint = unreachable_endpoint().unwrap();
        assert!(endpoint.starts_with("http://127.0.0.1:"));
    }
}
