//! End-to-end tests: tool call → registry → upstream stub → tool result.

use std::sync::Arc;

use overheid_mcp_server::core::config::UpstreamConfig;
use overheid_mcp_server::domains::tools::{ToolError, ToolRegistry, ToolResult};
use overheid_mcp_server::domains::upstream::UpstreamClient;
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn registry(server: &MockServer) -> ToolRegistry {
    let config = UpstreamConfig {
        base_url: format!("{}/api/v0", server.uri()),
        ..UpstreamConfig::default()
    };
    let client = Arc::new(UpstreamClient::new(&config).unwrap());
    ToolRegistry::overheid(client).unwrap()
}

fn args(value: Value) -> serde_json::Map<String, Value> {
    value.as_object().cloned().unwrap()
}

#[tokio::test]
async fn list_apis_without_page_follows_link_header() {
    let server = MockServer::start().await;
    let link = format!(r#"<{}/api/v0/apis?page=2>; rel="next""#, server.uri());
    Mock::given(method("GET"))
        .and(path("/api/v0/apis"))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Link", link.as_str())
                .set_body_json(json!([{"id": "a"}, {"id": "b"}])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let result = registry(&server)
        .call_tool("list_apis", args(json!({})), CancellationToken::new())
        .await
        .unwrap();

    assert!(!result.is_error());
    let payload: Value = serde_json::from_str(result.first_text().unwrap()).unwrap();
    assert_eq!(payload, json!({"data": [{"id": "a"}, {"id": "b"}], "nextPage": 2}));
}

#[tokio::test]
async fn list_repositories_zero_page_means_first() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v0/repositories"))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header(
                    "Link",
                    r#"<https://x/repositories?page=1>; rel="first", <https://x/repositories?page=2>; rel="next""#,
                )
                .set_body_json(json!({"results": []})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let result = registry(&server)
        .call_tool("list_repositories", args(json!({"page": 0})), CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(
        result,
        ToolResult::text(r#"{"data":{"results":[]},"nextPage":2}"#)
    );
}

#[tokio::test]
async fn get_api_not_found_mentions_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v0/apis/does-not-exist"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let result = registry(&server)
        .call_tool("get_api", args(json!({"id": "does-not-exist"})), CancellationToken::new())
        .await
        .unwrap();

    assert!(result.is_error());
    assert!(result.first_text().unwrap().contains("does-not-exist"));
}

#[tokio::test]
async fn get_api_requires_id() {
    let server = MockServer::start().await;

    let result = registry(&server)
        .call_tool("get_api", args(json!({})), CancellationToken::new())
        .await;

    assert!(matches!(result, Err(ToolError::InvalidArguments(_))));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn concurrent_calls_are_independent() {
    let server = MockServer::start().await;
    for page in 1..=4 {
        Mock::given(method("GET"))
            .and(path("/api/v0/apis"))
            .and(query_param("page", page.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"page": page})))
            .mount(&server)
            .await;
    }

    let registry = Arc::new(registry(&server));
    let calls = (1..=4).map(|page| {
        let registry = registry.clone();
        tokio::spawn(async move {
            registry
                .call_tool("list_apis", args(json!({"page": page})), CancellationToken::new())
                .await
                .unwrap()
        })
    });

    for (index, call) in calls.collect::<Vec<_>>().into_iter().enumerate() {
        let result = call.await.unwrap();
        let payload: Value = serde_json::from_str(result.first_text().unwrap()).unwrap();
        assert_eq!(payload["data"]["page"], index + 1);
        assert!(payload.get("nextPage").is_none());
    }
}
