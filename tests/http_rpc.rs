//! Plain JSON-RPC endpoint tests, driven through the axum router.

#![cfg(feature = "http")]

use axum::body::Body;
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use overheid_mcp_server::core::config::Config;
use overheid_mcp_server::core::transport::HttpConfig;
use overheid_mcp_server::core::transport::http::HttpTransport;
use overheid_mcp_server::McpServer;
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn app(base_url: String) -> axum::Router {
    let mut config = Config::default();
    config.upstream.base_url = base_url;
    let server = McpServer::new(config).unwrap();
    HttpTransport::new(HttpConfig::default())
        .router(server, CancellationToken::new())
        .unwrap()
}

async fn rpc(app: axum::Router, body: Value) -> (StatusCode, Option<Value>) {
    let request = Request::builder()
        .method("POST")
        .uri("/rpc")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).ok();
    (status, value)
}

#[tokio::test]
async fn tools_list_returns_all_tools() {
    let (status, body) = rpc(
        app("http://127.0.0.1:1".to_string()),
        json!({"jsonrpc": "2.0", "id": 1, "method": "tools/list"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let body = body.unwrap();
    let names: Vec<_> = body["result"]["tools"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["list_apis", "get_api", "list_repositories"]);
}

#[tokio::test]
async fn tools_call_not_found_sets_error_flag() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/apis/nope"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&upstream)
        .await;

    let (status, body) = rpc(
        app(upstream.uri()),
        json!({
            "jsonrpc": "2.0",
            "id": "call-1",
            "method": "tools/call",
            "params": {"name": "get_api", "arguments": {"id": "nope"}}
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let body = body.unwrap();
    assert_eq!(body["id"], "call-1");
    assert_eq!(body["result"]["isError"], true);
    assert_eq!(body["result"]["content"][0]["text"], "API with ID nope not found");
}

#[tokio::test]
async fn tools_call_unknown_tool_is_protocol_error() {
    let (_, body) = rpc(
        app("http://127.0.0.1:1".to_string()),
        json!({
            "jsonrpc": "2.0",
            "id": 7,
            "method": "tools/call",
            "params": {"name": "drop_tables"}
        }),
    )
    .await;

    let body = body.unwrap();
    assert_eq!(body["error"]["code"], -32602);
    assert!(body.get("result").is_none());
}

#[tokio::test]
async fn tools_call_rejects_non_object_arguments() {
    let (_, body) = rpc(
        app("http://127.0.0.1:1".to_string()),
        json!({
            "jsonrpc": "2.0",
            "id": 8,
            "method": "tools/call",
            "params": {"name": "list_apis", "arguments": [1, 2]}
        }),
    )
    .await;

    assert_eq!(body.unwrap()["error"]["code"], -32602);
}

#[tokio::test]
async fn initialize_and_unknown_method() {
    let (_, body) = rpc(
        app("http://127.0.0.1:1".to_string()),
        json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {}}),
    )
    .await;
    let body = body.unwrap();
    assert_eq!(body["result"]["serverInfo"]["name"], "developer-overheid-mcp");
    assert!(body["result"]["capabilities"]["tools"].is_object());

    let (_, body) = rpc(
        app("http://127.0.0.1:1".to_string()),
        json!({"jsonrpc": "2.0", "id": 2, "method": "resources/list"}),
    )
    .await;
    assert_eq!(body.unwrap()["error"]["code"], -32601);
}

#[tokio::test]
async fn notifications_are_accepted_without_body() {
    let (status, body) = rpc(
        app("http://127.0.0.1:1".to_string()),
        json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
    )
    .await;

    assert_eq!(status, StatusCode::ACCEPTED);
    assert!(body.is_none());
}

#[tokio::test]
async fn invalid_mcp_path_is_rejected() {
    let server = McpServer::new(Config::default()).unwrap();
    let config = HttpConfig {
        mcp_path: "/rpc".to_string(),
        ..HttpConfig::default()
    };
    assert!(
        HttpTransport::new(config)
            .router(server, CancellationToken::new())
            .is_err()
    );
}
