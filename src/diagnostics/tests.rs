//! Tests for diagnostics sinks

use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_pretty_json_uses_four_spaces() {
    let formatted = pretty_json(r#"{"results":[{"id":1}],"has_more":false}"#).unwrap();
    assert_eq!(
        formatted,
        "{\n    \"results\": [\n        {\n            \"id\": 1\n        }\n    ],\n    \"has_more\": false\n}"
    );
}

#[test]
fn test_pretty_json_keeps_raw_tokens() {
    let formatted = pretty_json(r#"{"n":1e5,"f":1.50,"s":"a, b: {c} [d]","q":"say \"hi\", ok"}"#)
        .unwrap();
    assert_eq!(
        formatted,
        "{\n    \"n\": 1e5,\n    \"f\": 1.50,\n    \"s\": \"a, b: {c} [d]\",\n    \"q\": \"say \\\"hi\\\", ok\"\n}"
    );
}

#[test]
fn test_pretty_json_reflows_whitespace() {
    let formatted = pretty_json("  {\n \"a\" : [ 1 , 2 ],\t\"e\": [ ], \"o\": {}  }\n").unwrap();
    assert_eq!(
        formatted,
        "{\n    \"a\": [\n        1,\n        2\n    ],\n    \"e\": [],\n    \"o\": {}\n}"
    );
}

#[test]
fn test_pretty_json_rejects_invalid() {
    assert!(pretty_json("not json").is_err());
    assert!(pretty_json(r#"{"a": 1} trailing"#).is_err());
}

#[tokio::test]
async fn test_file_sink_begin_resets_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("api_response.json");
    std::fs::write(&path, "stale contents").unwrap();

    let sink = FileSink::new(&path);
    sink.begin().await;

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
}

#[tokio::test]
async fn test_file_sink_overwrites_with_last_page() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("api_response.json");
    let sink = FileSink::new(&path);

    sink.begin().await;
    sink.record_page(0, r#"{"page":1}"#).await;
    sink.record_page(1, r#"{"page":2}"#).await;

    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "{\n    \"page\": 2\n}"
    );
}

#[tokio::test]
async fn test_file_sink_keeps_previous_on_invalid_body() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("api_response.json");
    let sink = FileSink::new(&path);

    sink.record_page(0, r#"{"page":1}"#).await;
    sink.record_page(1, "<html>").await;

    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "{\n    \"page\": 1\n}"
    );
}

#[tokio::test]
async fn test_file_sink_unwritable_path_does_not_panic() {
    let dir = tempfile::tempdir().unwrap();
    let sink = FileSink::new(dir.path().join("missing").join("out.json"));

    sink.begin().await;
    sink.record_page(0, "{}").await;

    assert!(!sink.path().exists());
}

#[tokio::test]
async fn test_memory_sink_collects_in_order() {
    let sink = MemorySink::new();
    sink.begin().await;
    sink.record_page(0, "a").await;
    sink.record_page(1, "b").await;

    assert_eq!(sink.pages(), vec!["a".to_string(), "b".to_string()]);
    assert_eq!(sink.begin_count(), 1);

    sink.begin().await;
    assert!(sink.pages().is_empty());
    assert_eq!(sink.begin_count(), 2);
}

#[tokio::test]
async fn test_null_sink() {
    let sink = NullSink;
    sink.begin().await;
    sink.record_page(0, "ignored").await;
}
