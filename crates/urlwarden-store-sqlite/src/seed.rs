// urlwarden-store-sqlite/src/seed.rs
// ============================================================================
// Module: Default Reference Data
// Description: Built-in signature patterns and reputation entries.
// Purpose: Provide the baseline rule set seeded into empty stores.
// Dependencies: urlwarden-core, time
// ============================================================================

//! ## Overview
//! The default rule set covers the common injection, scripting, and
//! traversal payloads plus a small reputation list used by deployments and
//! the test suites. Seeding only runs against empty tables; operators
//! extend the set through the store insertion APIs.

// ============================================================================
// SECTION: Imports
// ============================================================================

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use urlwarden_core::PatternType;
use urlwarden_core::ReputationRecord;
use urlwarden_core::ReputationStatus;
use urlwarden_core::SignatureRecord;
use urlwarden_core::ThreatType;

// ============================================================================
// SECTION: Signatures
// ============================================================================

/// Builds one signature record.
fn signature(
    pattern: &str,
    pattern_type: PatternType,
    threat_type: ThreatType,
    description: &str,
) -> SignatureRecord {
    SignatureRecord {
        pattern: pattern.to_string(),
        pattern_type,
        threat_type,
        description: description.to_string(),
    }
}

/// Returns the default signature set in scan order.
#[must_use]
pub fn default_signatures() -> Vec<SignatureRecord> {
    vec![
        signature(
            "SELECT * FROM",
            PatternType::Query,
            ThreatType::SqlInjection,
            "SQL select statement in query",
        ),
        signature(
            "UNION SELECT",
            PatternType::Query,
            ThreatType::SqlInjection,
            "SQL union-based injection",
        ),
        signature(
            "DROP TABLE",
            PatternType::Query,
            ThreatType::SqlInjection,
            "SQL destructive statement",
        ),
        signature(
            "' OR '1'='1",
            PatternType::Query,
            ThreatType::SqlInjection,
            "SQL tautology injection",
        ),
        signature("<script", PatternType::Query, ThreatType::Xss, "Inline script tag"),
        signature("javascript:", PatternType::Query, ThreatType::Xss, "Script URI payload"),
        signature("onerror=", PatternType::Query, ThreatType::Xss, "Event handler injection"),
        signature("../", PatternType::Path, ThreatType::PathTraversal, "Parent directory escape"),
        signature(
            "..%2F",
            PatternType::Path,
            ThreatType::PathTraversal,
            "Encoded parent directory escape",
        ),
        signature(
            "%2e%2e",
            PatternType::Path,
            ThreatType::PathTraversal,
            "Encoded parent directory dots",
        ),
    ]
}

// ============================================================================
// SECTION: Reputation
// ============================================================================

/// Builds one reputation record stamped with the current time.
fn reputation(hostname: &str, status: ReputationStatus, description: &str) -> ReputationRecord {
    ReputationRecord {
        hostname: hostname.to_string(),
        status,
        description: Some(description.to_string()),
        last_updated: now_rfc3339(),
    }
}

/// Returns the default reputation entries.
#[must_use]
pub fn default_reputation() -> Vec<ReputationRecord> {
    vec![
        reputation("example.com", ReputationStatus::Safe, "Known safe test domain"),
        reputation("malicious-site.com", ReputationStatus::Malicious, "Distributes malware"),
        reputation("phishing-bank.com", ReputationStatus::Phishing, "Credential phishing site"),
        reputation("spam-domain.net", ReputationStatus::Blacklisted, "Administratively blocked"),
    ]
}

/// Returns the current UTC time as an RFC 3339 string.
fn now_rfc3339() -> Option<String> {
    OffsetDateTime::now_utc().format(&Rfc3339).ok()
}
