// urlwarden-core/tests/report_serialization.rs
// ============================================================================
// Module: Report Serialization Tests
// Description: Wire-format tests for verdicts and check summaries.
// ============================================================================
//! ## Overview
//! Locks down the JSON field names and enum labels callers depend on.

#![allow(
    clippy::unwrap_used,
    reason = "Tests unwrap on serialization of fully populated fixtures."
)]

use serde_json::Value;
use serde_json::json;
use urlwarden_core::CheckReport;
use urlwarden_core::Decision;
use urlwarden_core::DetectedThreat;
use urlwarden_core::ReputationCheckSummary;
use urlwarden_core::ReputationStatus;
use urlwarden_core::SecurityChecks;
use urlwarden_core::Severity;
use urlwarden_core::SignatureCheckSummary;
use urlwarden_core::ThreatCategory;
use urlwarden_core::ThreatType;

/// Builds a fully populated DENY report.
fn deny_report() -> CheckReport {
    CheckReport {
        valid: true,
        decision: Decision::Deny,
        url: "http://example.com/q".to_string(),
        reason: Some("Malicious pattern detected: sql_injection".to_string()),
        threat_detected: Some(DetectedThreat {
            threat_type: ThreatCategory::SqlInjection,
            severity: Severity::Critical,
            description: "SQL select statement in query".to_string(),
        }),
        security_checks: SecurityChecks {
            malicious_patterns: SignatureCheckSummary {
                checked: true,
                found: true,
                pattern: Some("SELECT * FROM".to_string()),
                threat_type: Some(ThreatType::SqlInjection),
                description: Some("SQL select statement in query".to_string()),
            },
            domain_reputation: ReputationCheckSummary {
                checked: true,
                found: false,
                status: ReputationStatus::Unknown,
                description: None,
                last_updated: None,
            },
        },
    }
}

// ============================================================================
// SECTION: Wire Format
// ============================================================================

#[test]
fn test_deny_report_field_names_and_labels() {
    let value: Value = serde_json::to_value(deny_report()).unwrap();
    assert_eq!(value["decision"], "DENY");
    assert_eq!(value["threat_detected"]["type"], "sql_injection");
    assert_eq!(value["threat_detected"]["severity"], "critical");
    assert_eq!(value["security_checks"]["malicious_patterns"]["found"], true);
    assert_eq!(value["security_checks"]["domain_reputation"]["status"], "unknown");
}

#[test]
fn test_allow_report_omits_absent_fields() {
    let report = CheckReport {
        valid: true,
        decision: Decision::Allow,
        url: "http://example.com".to_string(),
        reason: None,
        threat_detected: None,
        security_checks: SecurityChecks {
            malicious_patterns: SignatureCheckSummary {
                checked: true,
                found: false,
                pattern: None,
                threat_type: None,
                description: None,
            },
            domain_reputation: ReputationCheckSummary {
                checked: true,
                found: true,
                status: ReputationStatus::Safe,
                description: None,
                last_updated: None,
            },
        },
    };
    let value: Value = serde_json::to_value(report).unwrap();
    assert_eq!(value["decision"], "ALLOW");
    assert!(value.get("reason").is_none());
    assert!(value.get("threat_detected").is_none());
    assert!(value["security_checks"]["malicious_patterns"].get("pattern").is_none());
}

#[test]
fn test_report_round_trips_through_json() {
    let report = deny_report();
    let encoded = serde_json::to_string(&report).unwrap();
    let decoded: CheckReport = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, report);
}

#[test]
fn test_unrecognized_labels_fall_back_to_catch_all() {
    let threat: ThreatType = serde_json::from_value(json!("novel_attack")).unwrap();
    assert_eq!(threat, ThreatType::Other);
    let status: ReputationStatus = serde_json::from_value(json!("suspicious")).unwrap();
    assert_eq!(status, ReputationStatus::Unknown);
}
