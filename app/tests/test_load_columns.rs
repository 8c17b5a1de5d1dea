//! FILENAME: tests/test_load_columns.rs
//! Integration tests for the worksheet metadata fetch and its load state.

mod common;

use app_lib::{get_load_state, get_selection_view, load_columns, retry_load, AppError, LoadState};
use common::{SalesFixture, TestHarness, EXPORT_PATH, WORKSHEET_ID};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_load_requests_configured_worksheet() {
    let harness = TestHarness::new().await;

    Mock::given(method("POST"))
        .and(path(EXPORT_PATH))
        .and(body_partial_json(json!({
            "metadata": [{"identifier": WORKSHEET_ID, "type": "LOGICAL_TABLE"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(SalesFixture::export_response()))
        .expect(1)
        .mount(&harness.server)
        .await;

    let count = load_columns(&harness.state, &harness.client).await.unwrap();
    assert_eq!(count, 4);
    assert_eq!(get_load_state(&harness.state), LoadState::Ready { column_count: 4 });
    assert_eq!(get_selection_view(&harness.state).available.len(), 4);
}

#[tokio::test]
async fn test_state_starts_idle() {
    let harness = TestHarness::new().await;
    assert_eq!(get_load_state(&harness.state), LoadState::Idle);
    assert!(get_selection_view(&harness.state).available.is_empty());
}

#[tokio::test]
async fn test_http_failure_becomes_retryable_error_state() {
    let harness = TestHarness::new().await;

    Mock::given(method("POST"))
        .and(path(EXPORT_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&harness.server)
        .await;

    let err = load_columns(&harness.state, &harness.client).await.unwrap_err();
    assert!(matches!(err, AppError::TransportFailure(_)));
    assert!(err.is_retryable());

    match get_load_state(&harness.state) {
        LoadState::Failed { message, retryable } => {
            assert!(retryable);
            assert!(message.contains("500"), "message was {message}");
        }
        other => panic!("expected Failed, got {other:?}"),
    }
    assert!(get_selection_view(&harness.state).available.is_empty());
}

#[tokio::test]
async fn test_retry_after_failure_loads_columns() {
    let harness = TestHarness::new().await;

    Mock::given(method("POST"))
        .and(path(EXPORT_PATH))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&harness.server)
        .await;
    harness.mount_export(SalesFixture::export_response()).await;

    assert!(load_columns(&harness.state, &harness.client).await.is_err());
    let count = retry_load(&harness.state, &harness.client).await.unwrap();

    assert_eq!(count, 4);
    assert_eq!(get_load_state(&harness.state), LoadState::Ready { column_count: 4 });
}

#[tokio::test]
async fn test_retry_when_ready_does_not_refetch() {
    let harness = TestHarness::new().await;

    Mock::given(method("POST"))
        .and(path(EXPORT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(SalesFixture::export_response()))
        .expect(1)
        .mount(&harness.server)
        .await;

    load_columns(&harness.state, &harness.client).await.unwrap();
    assert_eq!(retry_load(&harness.state, &harness.client).await.unwrap(), 4);
}

#[tokio::test]
async fn test_export_without_documents_fails() {
    let harness = TestHarness::new().await;
    harness.mount_export(json!([])).await;

    let err = load_columns(&harness.state, &harness.client).await.unwrap_err();
    assert!(matches!(err, AppError::TransportFailure(_)));
    assert!(matches!(get_load_state(&harness.state), LoadState::Failed { .. }));
}

#[test]
fn test_load_state_serializes_with_status_tag() {
    let json = serde_json::to_value(LoadState::Failed {
        message: "HTTP 500".to_string(),
        retryable: true,
    })
    .unwrap();
    assert_eq!(json["status"], "failed");
    assert_eq!(json["retryable"], true);
}
