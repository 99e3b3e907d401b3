//! Upstream fetch tests: one GET, failures collapse into `FetchError`.

mod common;

use caresync_audit::client::AuditClient;
use caresync_audit::errors::FetchError;
use common::*;

#[actix_rt::test]
async fn test_fetch_parses_records() {
    let upstream = spawn_upstream(200, MIXED_LOGS);
    let client = AuditClient::new(&test_config(&upstream.url)).expect("client");

    let batch = client.fetch().await.expect("fetch should succeed");
    assert_eq!(batch.records.len(), 5);
    assert!(batch.rejected.is_empty());
    assert_eq!(batch.records[2].user_type, "admin");

    upstream.stop().await;
}

#[actix_rt::test]
async fn test_fetch_empty_array() {
    let upstream = spawn_upstream(200, "[]");
    let client = AuditClient::new(&test_config(&upstream.url)).expect("client");

    let batch = client.fetch().await.expect("fetch should succeed");
    assert!(batch.is_empty());

    upstream.stop().await;
}

#[actix_rt::test]
async fn test_fetch_non_2xx_is_status_error() {
    let upstream = spawn_upstream(503, r#"{"error":"down"}"#);
    let client = AuditClient::new(&test_config(&upstream.url)).expect("client");

    let err = client.fetch().await.unwrap_err();
    assert!(matches!(err, FetchError::Status(s) if s.as_u16() == 503));

    upstream.stop().await;
}

#[actix_rt::test]
async fn test_fetch_malformed_json_is_decode_error() {
    let upstream = spawn_upstream(200, "<html>oops</html>");
    let client = AuditClient::new(&test_config(&upstream.url)).expect("client");

    let err = client.fetch().await.unwrap_err();
    assert!(matches!(err, FetchError::Decode(_)));

    upstream.stop().await;
}

#[actix_rt::test]
async fn test_fetch_unreachable_is_network_error() {
    let client = AuditClient::new(&test_config(UNREACHABLE_URL)).expect("client");

    let err = client.fetch().await.unwrap_err();
    assert!(matches!(err, FetchError::Network(_)));
    assert!(err.to_string().starts_with("Network error"));
}
