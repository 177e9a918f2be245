//! Integration tests for transport middleware.

use courier::tower::util::MapRequestLayer;
use courier::{ApiClient, HyperClient, Request};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path},
};

fn with_request_id(request: Request) -> Request {
    let (method, url, headers, body) = request.into_parts();
    Request::builder(method, url)
        .headers(headers)
        .header("X-Request-Id", "req-1")
        .maybe_body(body)
        .build()
}

/// Test that a custom layer sees and rewrites every request.
#[tokio::test]
async fn test_custom_layer_rewrites_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/status"))
        .and(header("X-Request-Id", "req-1"))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let transport = HyperClient::builder()
        .layer(MapRequestLayer::new(with_request_id))
        .build();
    let client = ApiClient::builder(mock_server.uri())
        .client(transport)
        .build()
        .expect("client");

    let status: serde_json::Value = client.get("/status", None).await.expect("status");
    assert_eq!(status, serde_json::json!({"ok": true}));
}

/// Test that logging middleware doesn't break request/response flow.
#[tokio::test]
async fn test_logging_middleware() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/items"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({"id": 3})))
        .mount(&mock_server)
        .await;

    let transport = HyperClient::builder().with_logging().build();
    let client = ApiClient::builder(mock_server.uri())
        .client(transport)
        .build()
        .expect("client");

    let created: serde_json::Value = client
        .post_with_body("/items", None, &serde_json::json!({"name": "x"}))
        .await
        .expect("created");
    assert_eq!(created["id"], 3);
}

/// Test that debug logging passes error statuses through untouched.
#[tokio::test]
async fn test_debug_logging_keeps_error_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let transport = HyperClient::builder().with_debug_logging().build();
    let client = ApiClient::builder(mock_server.uri())
        .client(transport)
        .build()
        .expect("client");

    let err = client.post_void("/missing", None).await;
    assert!(err.is_err());

    let err = client
        .get::<serde_json::Value>("/missing", None)
        .await
        .expect_err("not found");
    assert_eq!(err.status(), Some(404));
}
