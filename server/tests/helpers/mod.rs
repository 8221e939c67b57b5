//! Reusable test helpers for HTTP integration tests.
//!
//! Provides `TestApp` for sending signed webhook requests through the full
//! axum router, fixtures for webhook payloads, and a mock Messaging API
//! server for exercising the outbound client.
//!
//! ## Test Servers
//!
//! Use [`spawn_test_server()`] to serve any router on a random port, e.g. a
//! fake Messaging API for [`line_bot::messaging::HttpTransport`].
#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::http::{self, HeaderMap, Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use line_bot::api::{create_router, AppState};
use line_bot::config::Config;
use line_bot::webhook::Dispatcher;
use line_crypto::{sign, SIGNATURE_HEADER};
use serde_json::{json, Value};
use tokio::task::JoinHandle;
use tower::ServiceExt;

// ============================================================================
// Test app
// ============================================================================

/// Router plus the config it was built with.
pub struct TestApp {
    pub router: Router,
    pub config: Config,
}

impl TestApp {
    /// Create a test app around a dispatcher with listeners already registered.
    pub fn new(build: impl FnOnce(&mut Dispatcher)) -> Self {
        let config = Config::default_for_test();
        let mut dispatcher = Dispatcher::new(config.channel_secret.clone());
        build(&mut dispatcher);
        let router = create_router(AppState::new(config.clone(), dispatcher));
        Self { router, config }
    }

    /// Build an HTTP request with the given method and URI.
    pub fn request(method: Method, uri: &str) -> http::request::Builder {
        Request::builder().method(method).uri(uri)
    }

    /// Build a `POST /webhook` request signed with the app's channel secret.
    pub fn signed_webhook(&self, body: &Value) -> Request<Body> {
        let bytes = serde_json::to_vec(body).expect("serialize webhook body");
        let signature = sign(&self.config.channel_secret, &bytes);
        Self::request(Method::POST, "/webhook")
            .header(SIGNATURE_HEADER, signature)
            .header("Content-Type", "application/json")
            .body(Body::from(bytes))
            .expect("build webhook request")
    }

    /// Send a request through the router via `tower::ServiceExt::oneshot`.
    pub async fn oneshot(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("oneshot request failed")
    }
}

// ============================================================================
// Webhook fixtures
// ============================================================================

/// A follow event from a one-to-one chat with `user_id`.
pub fn follow_event(event_id: &str, user_id: &str) -> Value {
    json!({
        "type": "follow",
        "replyToken": "85cbe770fa8b4f45bbe077b1d4be4a36",
        "mode": "active",
        "timestamp": 1_705_891_467_176_i64,
        "source": {"type": "user", "userId": user_id},
        "webhookEventId": event_id,
        "deliveryContext": {"isRedelivery": false},
        "follow": {"isUnblocked": false}
    })
}

/// An unfollow event from a one-to-one chat with `user_id`.
pub fn unfollow_event(event_id: &str, user_id: &str) -> Value {
    json!({
        "type": "unfollow",
        "mode": "active",
        "timestamp": 1_705_891_467_177_i64,
        "source": {"type": "user", "userId": user_id},
        "webhookEventId": event_id,
        "deliveryContext": {"isRedelivery": false}
    })
}

/// Wrap events in a webhook request body.
pub fn webhook_body(events: Vec<Value>) -> Value {
    json!({"destination": "U0123456789abcdef", "events": events})
}

/// Collect a response body and parse it as JSON.
pub async fn body_to_json(response: Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to collect response body")
        .to_bytes();
    serde_json::from_slice(&bytes).unwrap_or_else(|e| {
        let preview = String::from_utf8_lossy(&bytes);
        panic!("Failed to parse response as JSON: {e}\nBody: {preview}")
    })
}

// ============================================================================
// Test Server
// ============================================================================

/// A running test server bound to a random port.
pub struct TestServer {
    /// Server address (127.0.0.1:PORT).
    pub addr: SocketAddr,
    /// Base URL for HTTP requests (e.g., `http://127.0.0.1:12345`).
    pub url: String,
    /// Handle to the server task for cleanup.
    _handle: JoinHandle<()>,
}

/// Spawn a real HTTP server on a random port.
pub async fn spawn_test_server(router: Router) -> TestServer {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test server");
    let addr = listener.local_addr().expect("Failed to get local addr");
    let url = format!("http://{addr}");

    let handle = tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("Test server failed");
    });

    TestServer {
        addr,
        url,
        _handle: handle,
    }
}

// ============================================================================
// Mock Messaging API
// ============================================================================

/// A request received by [`MockApi`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RecordedRequest {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("request body is JSON")
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Fake Messaging API answering every request with one canned response.
pub struct MockApi {
    pub server: TestServer,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockApi {
    /// Start a mock that replies with `status` and `body` to any request.
    pub async fn replying(status: StatusCode, reply: &'static str) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&requests);

        let router = Router::new().fallback(move |request: Request<Body>| {
            let recorded = Arc::clone(&recorded);
            async move {
                let (parts, body) = request.into_parts();
                let body = body
                    .collect()
                    .await
                    .expect("collect request body")
                    .to_bytes();
                recorded.lock().unwrap().push(RecordedRequest {
                    method: parts.method,
                    path: parts.uri.path().to_string(),
                    headers: parts.headers,
                    body,
                });
                (status, [("Content-Type", "application/json")], reply)
            }
        });

        Self {
            server: spawn_test_server(router).await,
            requests,
        }
    }

    /// Base URL to hand to the transport.
    pub fn base_url(&self) -> String {
        format!("{}/", self.server.url)
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

/// Transport timeout used against local mocks.
pub const MOCK_TIMEOUT: Duration = Duration::from_secs(5);
