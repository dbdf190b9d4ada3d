// urlwarden-core/tests/signature_match.rs
// ============================================================================
// Module: Signature Matcher Tests
// Description: Tests for first-hit substring matching over records.
// ============================================================================
//! ## Overview
//! Validates store-order precedence and case-insensitive containment.

use urlwarden_core::PatternType;
use urlwarden_core::SignatureRecord;
use urlwarden_core::ThreatType;
use urlwarden_core::runtime::signature::first_match;
use urlwarden_core::runtime::signature::summarize_match;

/// Builds a query-typed signature record.
fn record(pattern: &str, threat_type: ThreatType) -> SignatureRecord {
    SignatureRecord {
        pattern: pattern.to_string(),
        pattern_type: PatternType::Query,
        threat_type,
        description: format!("{pattern} signature"),
    }
}

// ============================================================================
// SECTION: Matching
// ============================================================================

#[test]
fn test_case_insensitive_containment() {
    let records = vec![record("SELECT * FROM", ThreatType::SqlInjection)];
    let hit = first_match(&records, "/search?q=select * from users");
    assert_eq!(hit.map(|h| h.threat_type), Some(ThreatType::SqlInjection));
}

#[test]
fn test_first_record_in_store_order_wins() {
    let records = vec![
        record("script", ThreatType::Xss),
        record("<script>alert", ThreatType::SqlInjection),
    ];
    let hit = first_match(&records, "/page?input=<script>alert(1)</script>");
    assert_eq!(hit.map(|h| h.threat_type), Some(ThreatType::Xss));
}

#[test]
fn test_no_hit_returns_none() {
    let records = vec![record("SELECT * FROM", ThreatType::SqlInjection)];
    assert_eq!(first_match(&records, "/products?id=123"), None);
}

#[test]
fn test_pattern_absent_in_encoded_form_is_not_matched_here() {
    let records = vec![record("' OR 1=1", ThreatType::SqlInjection)];
    assert_eq!(first_match(&records, "/q=%27OR%201%3D1"), None);
}

// ============================================================================
// SECTION: Summaries
// ============================================================================

#[test]
fn test_hit_summary_carries_record_fields() {
    let records = vec![record("<script", ThreatType::Xss)];
    let hit = first_match(&records, "/page?input=<script>");
    let summary = summarize_match(hit.as_ref());
    assert!(summary.checked);
    assert!(summary.found);
    assert_eq!(summary.pattern.as_deref(), Some("<script"));
    assert_eq!(summary.threat_type, Some(ThreatType::Xss));
}

#[test]
fn test_miss_summary_is_checked_but_not_found() {
    let summary = summarize_match(None);
    assert!(summary.checked);
    assert!(!summary.found);
    assert_eq!(summary.pattern, None);
}
