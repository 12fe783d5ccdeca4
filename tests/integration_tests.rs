//! Integration tests using mock HTTP server
//!
//! Tests the full flow: first page → PageIterator → HttpClient → next pages

use clap::Parser;
use futures::StreamExt;
use linkpager::cli::{Cli, Runner};
use linkpager::{
    CollectionResponse, Error, HttpClient, HttpClientConfig, JsonResponseParser, PageIterator,
    RequestOption,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
struct User {
    id: String,
    display_name: String,
}

/// Mount `/users` pages: three users, two users, one user
async fn mount_user_pages(server: &MockServer) {
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/users"))
        .and(query_param("$skiptoken", "page2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [
                {"id": "4", "displayName": "Dan"},
                {"id": "5", "displayName": "Erin"}
            ],
            "@odata.nextLink": format!("{base}/users?$skiptoken=page3")
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .and(query_param("$skiptoken", "page3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [{"id": "6", "displayName": "Frank"}]
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [
                {"id": "1", "displayName": "Alice"},
                {"id": "2", "displayName": "Bob"},
                {"id": "3", "displayName": "Carol"}
            ],
            "@odata.nextLink": format!("{base}/users?$skiptoken=page2")
        })))
        .mount(server)
        .await;
}

async fn user_iterator(
    server: &MockServer,
) -> PageIterator<CollectionResponse<User>, HttpClient> {
    let client = Arc::new(HttpClient::with_config(
        HttpClientConfig::builder().base_url(server.uri()).build(),
    ));
    let first: Option<CollectionResponse<User>> = client.get_json("/users").await.unwrap();

    PageIterator::new(first, client, JsonResponseParser::new()).unwrap()
}

fn ids(users: &[User]) -> Vec<&str> {
    users.iter().map(|user| user.id.as_str()).collect()
}

// ============================================================================
// Traversal
// ============================================================================

#[tokio::test]
async fn test_walk_all_pages() {
    let server = MockServer::start().await;
    mount_user_pages(&server).await;

    let mut iterator = user_iterator(&server).await;

    let mut users = Vec::new();
    iterator
        .iterate(|user| {
            users.push(user.clone());
            true
        })
        .await
        .unwrap();

    assert_eq!(ids(&users), vec!["1", "2", "3", "4", "5", "6"]);
    assert_eq!(users[3].display_name, "Dan");
    assert_eq!(iterator.pages_fetched(), 2);
    assert!(iterator.is_exhausted());
}

#[tokio::test]
async fn test_pause_and_resume_over_http() {
    let server = MockServer::start().await;
    mount_user_pages(&server).await;

    let mut iterator = user_iterator(&server).await;

    let mut first = Vec::new();
    iterator
        .iterate(|user| {
            first.push(user.clone());
            first.len() < 4
        })
        .await
        .unwrap();
    assert_eq!(ids(&first), vec!["1", "2", "3", "4"]);

    let mut rest = Vec::new();
    iterator
        .iterate(|user| {
            rest.push(user.clone());
            true
        })
        .await
        .unwrap();
    assert_eq!(ids(&rest), vec!["5", "6"]);
}

#[tokio::test]
async fn test_headers_and_options_sent_with_next_pages() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/groups"))
        .and(query_param("page", "2"))
        .and(header("ConsistencyLevel", "eventual"))
        .and(header("Authorization", "Bearer abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": ["g3"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = Arc::new(HttpClient::new());
    let first = Some(json!({
        "value": ["g1", "g2"],
        "@odata.nextLink": format!("{base}/groups?page=2")
    }));
    let mut iterator = PageIterator::new(first, client, JsonResponseParser::new()).unwrap();

    let mut headers = HashMap::new();
    headers.insert("ConsistencyLevel".to_string(), "eventual".to_string());
    iterator.set_headers(headers);
    iterator.set_request_options(vec![
        RequestOption::BearerToken("abc".to_string()),
        RequestOption::Timeout(Duration::from_secs(5)),
    ]);

    let mut groups = Vec::new();
    iterator
        .iterate(|group: &Value| {
            groups.push(group.as_str().unwrap_or_default().to_string());
            true
        })
        .await
        .unwrap();

    assert_eq!(groups, vec!["g1", "g2", "g3"]);
}

#[tokio::test]
async fn test_relative_next_links() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [2],
            "nextLink": "/items?page=3"
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": [3]})))
        .mount(&server)
        .await;

    let first_url = url::Url::parse(&format!("{}/items", server.uri())).unwrap();
    let mut iterator = PageIterator::new(
        Some(CollectionResponse::new(vec![1u32], Some("?page=2".to_string()))),
        Arc::new(HttpClient::new()),
        JsonResponseParser::new(),
    )
    .unwrap()
    .with_base_url(first_url);

    let mut items = Vec::new();
    iterator
        .iterate(|item| {
            items.push(*item);
            true
        })
        .await
        .unwrap();

    assert_eq!(items, vec![1, 2, 3]);
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn test_failed_fetch_can_be_retried() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/items/2"))
        .respond_with(ResponseTemplate::new(503).set_body_string("busy"))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/items/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": [3, 4]})))
        .mount(&server)
        .await;

    let mut iterator = PageIterator::new(
        Some(CollectionResponse::new(
            vec![1u32, 2],
            Some(format!("{base}/items/2")),
        )),
        Arc::new(HttpClient::new()),
        JsonResponseParser::new(),
    )
    .unwrap();

    let mut items = Vec::new();
    let err = iterator
        .iterate(|item| {
            items.push(*item);
            true
        })
        .await
        .unwrap_err();

    assert!(matches!(err, Error::FetchFailed { .. }));
    assert!(err.is_retryable());
    assert_eq!(items, vec![1, 2]);

    iterator
        .iterate(|item| {
            items.push(*item);
            true
        })
        .await
        .unwrap();

    assert_eq!(items, vec![1, 2, 3, 4]);
}

#[tokio::test]
async fn test_next_page_without_value_field() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": "gone"})))
        .mount(&server)
        .await;

    let mut iterator = PageIterator::new(
        Some(json!({"value": [], "nextLink": format!("{}/broken", server.uri())})),
        Arc::new(HttpClient::new()),
        JsonResponseParser::new(),
    )
    .unwrap();

    let err = iterator.iterate(|_| true).await.unwrap_err();
    assert!(matches!(err, Error::MissingValueField));
}

// ============================================================================
// Stream
// ============================================================================

#[tokio::test]
async fn test_stream_over_http() {
    let server = MockServer::start().await;
    mount_user_pages(&server).await;

    let iterator = user_iterator(&server).await;
    let names: Vec<String> = iterator
        .into_stream()
        .map(|user| user.unwrap().display_name)
        .take(5)
        .collect()
        .await;

    assert_eq!(names, vec!["Alice", "Bob", "Carol", "Dan", "Erin"]);
}

// ============================================================================
// CLI
// ============================================================================

#[tokio::test]
async fn test_cli_count() {
    let server = MockServer::start().await;
    mount_user_pages(&server).await;

    let cli = Cli::try_parse_from([
        "linkpager".to_string(),
        "count".to_string(),
        format!("{}/users", server.uri()),
    ])
    .unwrap();

    Runner::new(cli).run().await.unwrap();
}

#[tokio::test]
async fn test_cli_walk_from_config_file() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/things"))
        .and(header("X-Api-Key", "k"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": [1, 2, 3]})))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("walk.yaml");
    std::fs::write(
        &config_path,
        format!("url: {}/things\nmax_items: 2\n", server.uri()),
    )
    .unwrap();

    let cli = Cli::try_parse_from([
        "linkpager".to_string(),
        "--config".to_string(),
        config_path.display().to_string(),
        "-H".to_string(),
        "X-Api-Key: k".to_string(),
        "walk".to_string(),
    ])
    .unwrap();

    Runner::new(cli).run().await.unwrap();
}

#[tokio::test]
async fn test_cli_requires_url() {
    let cli = Cli::try_parse_from(["linkpager", "count"]).unwrap();
    let err = Runner::new(cli).run().await.unwrap_err();
    assert!(matches!(err, Error::MissingConfigField { .. }));
}
