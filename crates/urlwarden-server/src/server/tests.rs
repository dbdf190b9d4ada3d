// urlwarden-server/src/server/tests.rs
// ============================================================================
// Module: Server Unit Tests
// Description: Handler-level tests over in-memory fixtures.
// Purpose: Validate status mapping, error envelopes, and metrics recording.
// Dependencies: urlwarden-server
// ============================================================================

//! ## Overview
//! Exercises the handlers directly with constructed extractors, including
//! the error paths the routed integration tests cannot reach.

// ============================================================================
// SECTION: Lint Configuration
// ============================================================================

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Tests unwrap on deterministic in-memory fixtures."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use axum::http::Uri;
use serde_json::Value;
use urlwarden_core::ReputationRecord;
use urlwarden_core::SignatureRecord;
use urlwarden_core::StoreError;

use super::*;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

/// Audit sink that drops every event.
struct NullAuditSink;

impl AuditSink for NullAuditSink {
    fn record_check(&self, _event: &CheckAuditEvent) {}
}

/// Store that always fails, for propagation tests.
struct UnreachableStore;

impl urlwarden_core::SignatureStore for UnreachableStore {
    fn records(&self) -> Result<Vec<SignatureRecord>, StoreError> {
        Err(StoreError::Unavailable("signature backend down".to_string()))
    }
}

impl urlwarden_core::ReputationStore for UnreachableStore {
    fn lookup(&self, _hostname: &str) -> Result<Option<ReputationRecord>, StoreError> {
        Err(StoreError::Unavailable("reputation backend down".to_string()))
    }
}

/// Builds handler state over the default seeded in-memory stores.
fn memory_state() -> Arc<AppState> {
    let config = UrlwardenConfig::default();
    let (signatures, reputation) = build_stores(&config).unwrap();
    state_with(UrlInspector::new(signatures, reputation, config.pipeline_config()))
}

/// Builds handler state over failing stores.
fn failing_state() -> Arc<AppState> {
    let config = UrlwardenConfig::default();
    state_with(UrlInspector::new(
        SharedSignatureStore::from_store(UnreachableStore),
        SharedReputationStore::from_store(UnreachableStore),
        config.pipeline_config(),
    ))
}

/// Wraps an inspector into app state with a null audit sink.
fn state_with(
    inspector: UrlInspector<SharedSignatureStore, SharedReputationStore>,
) -> Arc<AppState> {
    Arc::new(AppState {
        inspector,
        metrics: SecurityMetrics::new(),
        audit: Arc::new(NullAuditSink),
        started_at: 0,
        start_time: "1970-01-01T00:00:00Z".to_string(),
    })
}

/// Runs the check handler against a raw URI string.
async fn check(state: Arc<AppState>, uri: &str) -> (StatusCode, Value) {
    let uri: Uri = uri.parse().unwrap();
    let response = handle_urlinfo(State(state), uri).await;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

// ============================================================================
// SECTION: Status Mapping
// ============================================================================

#[tokio::test]
async fn test_allowed_check_returns_ok_verdict() {
    let (status, body) = check(memory_state(), "/urlinfo/1/unlisted-host.org/path").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["decision"], "ALLOW");
    assert_eq!(body["valid"], true);
    assert_eq!(body["security_checks"]["domain_reputation"]["found"], false);
}

#[tokio::test]
async fn test_empty_fragment_returns_client_error() {
    let (status, body) = check(memory_state(), "/urlinfo/1/").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_request");
    assert!(body.get("decision").is_none());
}

#[tokio::test]
async fn test_invalid_format_returns_ok_deny() {
    let (status, body) = check(memory_state(), "/urlinfo/1/example.com:99999/path").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["decision"], "DENY");
    assert_eq!(body["valid"], false);
}

#[tokio::test]
async fn test_store_failure_returns_processing_error_not_verdict() {
    let (status, body) = check(failing_state(), "/urlinfo/1/example.com/path").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "processing_error");
    // A malfunction must never look like a security verdict.
    assert!(body.get("decision").is_none());
    assert!(body.get("threat_detected").is_none());
    assert!(!body["message"].as_str().unwrap().contains("backend down"));
}

// ============================================================================
// SECTION: Side Effects
// ============================================================================

#[tokio::test]
async fn test_completed_checks_are_recorded_in_metrics() {
    let state = memory_state();
    let _ = check(Arc::clone(&state), "/urlinfo/1/example.com/path").await;
    let _ = check(Arc::clone(&state), "/urlinfo/1/malicious-site.com/download").await;

    let snapshot = state.metrics.snapshot(unix_seconds()).unwrap();
    assert_eq!(snapshot.total_checks, 2);
    assert_eq!(snapshot.safe, 1);
    assert_eq!(snapshot.threats_detected, 1);
    assert_eq!(snapshot.recent_checks.len(), 2);
}

#[tokio::test]
async fn test_health_reports_uptime_and_start_time() {
    let response = handle_health(State(memory_state())).await;
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "healthy");
    assert!(body["uptime_seconds"].as_i64().unwrap() >= 0);
    assert_eq!(body["start_time"], "1970-01-01T00:00:00Z");
}
