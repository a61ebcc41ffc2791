//! Tests for the database query loop

use super::*;
use crate::config::NotionConfig;
use crate::diagnostics::MemorySink;
use crate::error::{Error, ErrorCategory};
use crate::pagination::QueryPaginator;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const QUERY_PATH: &str = "/v1/databases/db1/query";

fn config_for(server: &MockServer) -> NotionConfig {
    NotionConfig::new("secret_test", "db1").with_api_base_url(server.uri())
}

fn records(start: usize, count: usize) -> Vec<Value> {
    (start..start + count)
        .map(|i| json!({"object": "page", "id": format!("page-{i}")}))
        .collect()
}

async fn mount_page(server: &MockServer, request: Value, response: Value) {
    Mock::given(method("POST"))
        .and(path(QUERY_PATH))
        .and(body_json(request))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_fetch_all_follows_cursors() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        json!({"page_size": 100}),
        json!({"results": records(0, 100), "has_more": true, "next_cursor": "c1"}),
    )
    .await;
    mount_page(
        &server,
        json!({"page_size": 100, "start_cursor": "c1"}),
        json!({"results": records(100, 100), "has_more": true, "next_cursor": "c2"}),
    )
    .await;
    mount_page(
        &server,
        json!({"page_size": 100, "start_cursor": "c2"}),
        json!({"results": records(200, 37), "has_more": false, "next_cursor": null}),
    )
    .await;

    let query = DatabaseQuery::new(&config_for(&server)).unwrap();
    let fetched = query.fetch_all().await.unwrap();

    assert_eq!(fetched.len(), 237);
    for (i, record) in fetched.iter().enumerate() {
        assert_eq!(record["id"], format!("page-{i}"));
    }
}

#[tokio::test]
async fn test_fetch_all_single_page_without_has_more() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        json!({"page_size": 100}),
        json!({"results": records(0, 3), "next_cursor": "ignored"}),
    )
    .await;

    let query = DatabaseQuery::new(&config_for(&server)).unwrap();
    let fetched = query.fetch_all().await.unwrap();

    assert_eq!(fetched.len(), 3);
}

#[tokio::test]
async fn test_fetch_all_stops_when_has_more_false_despite_cursor() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        json!({"page_size": 100}),
        json!({"results": records(0, 2), "has_more": false, "next_cursor": "c1"}),
    )
    .await;

    let query = DatabaseQuery::new(&config_for(&server)).unwrap();
    assert_eq!(query.fetch_all().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_fetch_all_sends_auth_and_version_headers() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(QUERY_PATH))
        .and(header("Authorization", "Bearer secret_test"))
        .and(header("Notion-Version", "2022-06-28"))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .expect(1)
        .mount(&server)
        .await;

    let query = DatabaseQuery::new(&config_for(&server)).unwrap();
    assert!(query.fetch_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_fetch_all_tolerates_page_without_results() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        json!({"page_size": 100}),
        json!({"has_more": true, "next_cursor": "c1"}),
    )
    .await;
    mount_page(
        &server,
        json!({"page_size": 100, "start_cursor": "c1"}),
        json!({"results": [{"id": "x"}, 7, "y", {"id": "z"}], "has_more": false}),
    )
    .await;

    let query = DatabaseQuery::new(&config_for(&server)).unwrap();
    let fetched = query.fetch_all().await.unwrap();

    assert_eq!(fetched.len(), 2);
    assert_eq!(fetched[0]["id"], "x");
    assert_eq!(fetched[1]["id"], "z");
}

#[tokio::test]
async fn test_fetch_all_keeps_partial_records_on_status_error() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        json!({"page_size": 100}),
        json!({"results": records(0, 100), "has_more": true, "next_cursor": "c1"}),
    )
    .await;
    Mock::given(method("POST"))
        .and(path(QUERY_PATH))
        .and(body_json(json!({"page_size": 100, "start_cursor": "c1"})))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .expect(1)
        .mount(&server)
        .await;

    let query = DatabaseQuery::new(&config_for(&server)).unwrap();
    let partial = query.fetch_all().await.unwrap_err();

    assert_eq!(partial.records.len(), 100);
    assert!(matches!(partial.source, Error::HttpStatus { status: 502, .. }));
    assert_eq!(partial.source.category(), ErrorCategory::Transport);
}

#[tokio::test]
async fn test_fetch_all_timeout_aborts_without_retry() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(QUERY_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"results": []}))
                .set_delay(Duration::from_secs(3)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server).with_timeout(Duration::from_secs(1));
    let query = DatabaseQuery::new(&config).unwrap();
    let partial = query.fetch_all().await.unwrap_err();

    assert!(partial.records.is_empty());
    assert!(matches!(partial.source, Error::Timeout { timeout_ms: 1000 }));
}

#[tokio::test]
async fn test_fetch_all_decode_failure_is_fatal() {
    let server = MockServer::start().await;
    let sink = Arc::new(MemorySink::new());

    mount_page(
        &server,
        json!({"page_size": 100}),
        json!({"results": records(0, 4), "has_more": true, "next_cursor": "c1"}),
    )
    .await;
    Mock::given(method("POST"))
        .and(path(QUERY_PATH))
        .and(body_json(json!({"page_size": 100, "start_cursor": "c1"})))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"results\": [trunc"))
        .expect(1)
        .mount(&server)
        .await;

    let query = DatabaseQuery::new(&config_for(&server))
        .unwrap()
        .with_sink(sink.clone());
    let partial = query.fetch_all().await.unwrap_err();

    assert_eq!(partial.records.len(), 4);
    assert!(matches!(partial.source, Error::Decode { .. }));
    assert_eq!(sink.pages().len(), 2);
    assert_eq!(sink.pages()[1], "{\"results\": [trunc");
}

#[tokio::test]
async fn test_fetch_all_reports_every_body_to_sink() {
    let server = MockServer::start().await;
    let sink = Arc::new(MemorySink::new());

    mount_page(
        &server,
        json!({"page_size": 100}),
        json!({"results": records(0, 1), "has_more": true, "next_cursor": "c1"}),
    )
    .await;
    mount_page(
        &server,
        json!({"page_size": 100, "start_cursor": "c1"}),
        json!({"results": records(1, 1), "has_more": false}),
    )
    .await;

    let query = DatabaseQuery::new(&config_for(&server))
        .unwrap()
        .with_sink(sink.clone());
    let fetched = query.fetch_all().await.unwrap();

    assert_eq!(fetched.len(), 2);
    assert_eq!(sink.begin_count(), 1);
    let pages = sink.pages();
    assert_eq!(pages.len(), 2);
    let first: Value = serde_json::from_str(&pages[0]).unwrap();
    assert_eq!(first["next_cursor"], "c1");
}

#[tokio::test]
async fn test_probe_reads_first_page_only() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        json!({"page_size": 100}),
        json!({"results": records(0, 100), "has_more": true, "next_cursor": "c1"}),
    )
    .await;

    let query = DatabaseQuery::new(&config_for(&server)).unwrap();
    let summary = query.probe().await.unwrap();

    assert_eq!(
        summary,
        FetchSummary {
            records: 100,
            has_more: true
        }
    );
}

#[test]
fn test_new_rejects_invalid_config() {
    let config = NotionConfig::new("", "db1");
    let err = DatabaseQuery::new(&config).unwrap_err();
    assert!(matches!(err, Error::MissingConfigField { .. }));
}

#[test]
fn test_endpoint() {
    let query = DatabaseQuery::new(&NotionConfig::new("t", "abc")).unwrap();
    assert_eq!(
        query.endpoint().as_str(),
        "https://api.notion.com/v1/databases/abc/query"
    );
}

#[test]
fn test_partial_fetch_into_error() {
    let partial = PartialFetch {
        records: vec![serde_json::Map::new()],
        source: Error::decode("bad body"),
    };
    assert_eq!(
        partial.to_string(),
        "fetch aborted after 1 records: Failed to decode response: bad body"
    );

    let err: Error = partial.into();
    assert!(matches!(err, Error::Decode { .. }));
}

#[tokio::test]
async fn test_custom_page_size() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        json!({"page_size": 25}),
        json!({"results": records(0, 25), "has_more": true, "next_cursor": "c1"}),
    )
    .await;
    mount_page(
        &server,
        json!({"page_size": 25, "start_cursor": "c1"}),
        json!({"results": records(25, 3), "has_more": false}),
    )
    .await;

    let query = DatabaseQuery::new(&config_for(&server))
        .unwrap()
        .with_paginator(QueryPaginator::new().with_page_size(25));
    assert_eq!(query.fetch_all().await.unwrap().len(), 28);
}

#[tokio::test]
async fn test_error_reply_reaches_sink() {
    let server = MockServer::start().await;
    let sink = Arc::new(MemorySink::new());
    let error_body = json!({
        "object": "error",
        "status": 401,
        "code": "unauthorized",
        "message": "API token is invalid."
    });

    Mock::given(method("POST"))
        .and(path(QUERY_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_json(&error_body))
        .expect(1)
        .mount(&server)
        .await;

    let query = DatabaseQuery::new(&config_for(&server))
        .unwrap()
        .with_sink(sink.clone());
    let partial = query.fetch_all().await.unwrap_err();

    assert!(partial.records.is_empty());
    assert!(matches!(
        partial.source,
        Error::HttpStatus { status: 401, ref body } if body == "unauthorized: API token is invalid."
    ));

    let pages = sink.pages();
    assert_eq!(pages.len(), 1);
    let recorded: Value = serde_json::from_str(&pages[0]).unwrap();
    assert_eq!(recorded, error_body);
}
