//! Integration tests for the webhook endpoint.

mod helpers;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::{body::Body, http::Method};
use helpers::{body_to_json, follow_event, unfollow_event, webhook_body, TestApp};
use line_crypto::SIGNATURE_HEADER;
use serde_json::json;

/// App with one counting follow listener.
fn counting_app() -> (TestApp, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let app = TestApp::new(move |dispatcher| {
        dispatcher.on_follow(move |_, _| {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        });
    });
    (app, calls)
}

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new(|_| {});
    let request = TestApp::request(Method::GET, "/health")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await;
    assert_eq!(response.status(), 200);
    assert_eq!(body_to_json(response).await, json!({"status": "ok"}));
}

#[tokio::test]
async fn test_valid_signature_invokes_listener() {
    let (app, calls) = counting_app();
    let body = webhook_body(vec![follow_event("01HMF6Z8V2", "U4af4980629")]);

    let response = app.oneshot(app.signed_webhook(&body)).await;
    assert_eq!(response.status(), 200);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_bad_signature_rejected() {
    let (app, calls) = counting_app();
    let body = serde_json::to_vec(&webhook_body(vec![follow_event("01HMF6Z8V2", "U1")])).unwrap();

    let request = TestApp::request(Method::POST, "/webhook")
        .header(SIGNATURE_HEADER, "c2lnbmVkIGJ5IHNvbWVvbmUgZWxzZQ==")
        .body(Body::from(body))
        .unwrap();

    let response = app.oneshot(request).await;
    assert_eq!(response.status(), 401);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_missing_signature_rejected() {
    let (app, calls) = counting_app();
    let body = serde_json::to_vec(&webhook_body(vec![follow_event("01HMF6Z8V2", "U1")])).unwrap();

    let request = TestApp::request(Method::POST, "/webhook")
        .body(Body::from(body))
        .unwrap();

    let response = app.oneshot(request).await;
    assert_eq!(response.status(), 401);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_empty_events_is_bad_request() {
    let (app, calls) = counting_app();

    let response = app.oneshot(app.signed_webhook(&webhook_body(vec![]))).await;
    assert_eq!(response.status(), 400);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_event_without_type_is_bad_request() {
    let (app, _) = counting_app();
    let body = webhook_body(vec![json!({"timestamp": 1})]);

    let response = app.oneshot(app.signed_webhook(&body)).await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_unknown_events_only_is_ok() {
    let (app, calls) = counting_app();
    let body = webhook_body(vec![json!({"type": "videoPlayComplete", "timestamp": 1})]);

    let response = app.oneshot(app.signed_webhook(&body)).await;
    assert_eq!(response.status(), 200);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_listener_error_is_server_error() {
    let app = TestApp::new(|dispatcher| {
        dispatcher.on_unfollow(|_, _| async { Err("storage unavailable".into()) });
    });
    let body = webhook_body(vec![unfollow_event("01HMF7", "U1")]);

    let response = app.oneshot(app.signed_webhook(&body)).await;
    assert_eq!(response.status(), 500);

    let text = http_body_util::BodyExt::collect(response.into_body())
        .await
        .unwrap()
        .to_bytes();
    assert!(!String::from_utf8_lossy(&text).contains("storage unavailable"));
}
