//! Integration tests: run the completion client against an in-process upstream.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use mindful_core::chat::{
    ChatCompletion, ChatConfig, CompletionClient, CompletionError, ErrorKind, build_payload,
};
use serde_json::{Value, json};

/// What the upstream saw on its last request.
#[derive(Clone, Default)]
struct Captured {
    body: Arc<Mutex<Option<Value>>>,
    api_key: Arc<Mutex<Option<String>>>,
    content_type: Arc<Mutex<Option<String>>>,
}

/// Canned upstream behaviour.
#[derive(Clone)]
struct Upstream {
    status: StatusCode,
    body: String,
    delay: Duration,
    captured: Captured,
}

async fn upstream_handler(
    State(upstream): State<Upstream>,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    *upstream.captured.api_key.lock().unwrap() = header("api-key");
    *upstream.captured.content_type.lock().unwrap() = header("content-type");
    *upstream.captured.body.lock().unwrap() = serde_json::from_str(&body).ok();

    tokio::time::sleep(upstream.delay).await;
    (upstream.status, upstream.body.clone())
}

async fn spawn_upstream(status: StatusCode, body: impl Into<String>, delay: Duration) -> (SocketAddr, Captured) {
    let captured = Captured::default();
    let state = Upstream {
        status,
        body: body.into(),
        delay,
        captured: captured.clone(),
    };
    let app = Router::new()
        .route("/chat/completions", post(upstream_handler))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind upstream");
    let addr = listener.local_addr().expect("upstream addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("upstream serve");
    });
    (addr, captured)
}

fn client_for(addr: SocketAddr, timeout: Duration) -> CompletionClient {
    let config = ChatConfig::new(
        "test-api-key".into(),
        &format!("http://{addr}/chat/completions"),
        timeout,
    )
    .expect("config");
    CompletionClient::new(&config).expect("client")
}

fn ok_body(content: &str) -> String {
    json!({"choices": [{"message": {"role": "assistant", "content": content}}]}).to_string()
}

#[tokio::test]
async fn returns_first_choice_content() {
    let (addr, _) = spawn_upstream(StatusCode::OK, ok_body("Hello"), Duration::ZERO).await;
    let client = client_for(addr, Duration::from_secs(5));

    let completion = client.complete(&build_payload("hi")).await.expect("completion");

    assert_eq!(completion.content, "Hello");
}

#[tokio::test]
async fn sends_payload_with_api_key_header() {
    let (addr, captured) = spawn_upstream(
        StatusCode::OK,
        ok_body("That sounds difficult..."),
        Duration::ZERO,
    )
    .await;
    let client = client_for(addr, Duration::from_secs(5));

    client
        .complete(&build_payload("I feel anxious today"))
        .await
        .expect("completion");

    assert_eq!(
        captured.api_key.lock().unwrap().as_deref(),
        Some("test-api-key")
    );
    assert_eq!(
        captured.content_type.lock().unwrap().as_deref(),
        Some("application/json")
    );
    let body = captured.body.lock().unwrap().clone().expect("json body");
    assert_eq!(body["messages"].as_array().map(Vec::len), Some(2));
    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(
        body["messages"][1],
        json!({"role": "user", "content": "I feel anxious today"})
    );
    assert_eq!(body["temperature"], 0.7);
    assert_eq!(body["top_p"], 0.95);
    assert_eq!(body["max_tokens"], 200);
}

#[tokio::test]
async fn missing_choices_is_malformed_response() {
    let (addr, _) = spawn_upstream(StatusCode::OK, r#"{"id": "abc"}"#, Duration::ZERO).await;
    let client = client_for(addr, Duration::from_secs(5));

    let err = client.complete(&build_payload("hi")).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::MalformedResponse);
}

#[tokio::test]
async fn empty_choices_is_malformed_response() {
    let (addr, _) = spawn_upstream(StatusCode::OK, r#"{"choices": []}"#, Duration::ZERO).await;
    let client = client_for(addr, Duration::from_secs(5));

    let err = client.complete(&build_payload("hi")).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::MalformedResponse);
}

#[tokio::test]
async fn non_success_status_is_http_error() {
    let (addr, _) = spawn_upstream(
        StatusCode::TOO_MANY_REQUESTS,
        r#"{"error": {"message": "rate limited"}}"#,
        Duration::ZERO,
    )
    .await;
    let client = client_for(addr, Duration::from_secs(5));

    let err = client.complete(&build_payload("hi")).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::HttpError);
    let details = err.to_string();
    assert!(details.contains("429"), "details: {details}");
    assert!(details.contains("rate limited"), "details: {details}");
}

#[tokio::test]
async fn oversized_error_body_is_capped() {
    let (addr, _) = spawn_upstream(
        StatusCode::INTERNAL_SERVER_ERROR,
        "x".repeat(4 * 1024 * 1024),
        Duration::ZERO,
    )
    .await;
    let client = client_for(addr, Duration::from_secs(5));

    let err = client.complete(&build_payload("hi")).await.unwrap_err();

    match err {
        CompletionError::Http { status, body } => {
            assert_eq!(status, 500);
            assert!(body.starts_with("xxx"));
            assert!(body.chars().count() <= 513, "kept {} chars", body.chars().count());
        }
        other => panic!("expected HttpError, got {other:?}"),
    }
}

#[tokio::test]
async fn slow_upstream_is_timeout_error() {
    let (addr, _) =
        spawn_upstream(StatusCode::OK, ok_body("late"), Duration::from_secs(5)).await;
    let client = client_for(addr, Duration::from_millis(200));

    let started = std::time::Instant::now();
    let err = client.complete(&build_payload("hi")).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::TimeoutError);
    assert!(started.elapsed() < Duration::from_secs(4));
}

#[tokio::test]
async fn refused_connection_is_connection_error() {
    // Grab a free port, then close it so nothing is listening.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let client = client_for(addr, Duration::from_secs(5));
    let err = client.complete(&build_payload("hi")).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ConnectionError);
    assert_eq!(err.category(), "Connection Error occurred");
}
