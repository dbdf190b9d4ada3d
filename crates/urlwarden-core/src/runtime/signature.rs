// urlwarden-core/src/runtime/signature.rs
// ============================================================================
// Module: Signature Matcher
// Description: First-hit substring scan over signature records.
// Purpose: Detect known-malicious patterns in the decoded path and query.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Matching is a case-insensitive substring containment test, intentionally
//! not regex, so cost stays linear and bounded by store size. Records are
//! scanned in store order and only the first hit is ever reported.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::records::SignatureRecord;
use crate::core::verdict::SignatureCheckSummary;

// ============================================================================
// SECTION: Matching
// ============================================================================

/// Returns the first record whose pattern occurs in the target.
///
/// The target is the decoded path+query; comparison lowercases both sides.
#[must_use]
pub fn first_match(records: &[SignatureRecord], target: &str) -> Option<SignatureRecord> {
    let haystack = target.to_ascii_lowercase();
    records
        .iter()
        .find(|record| haystack.contains(&record.pattern.to_ascii_lowercase()))
        .cloned()
}

// ============================================================================
// SECTION: Summaries
// ============================================================================

/// Builds the check summary for a completed signature scan.
#[must_use]
pub fn summarize_match(hit: Option<&SignatureRecord>) -> SignatureCheckSummary {
    match hit {
        Some(record) => SignatureCheckSummary {
            checked: true,
            found: true,
            pattern: Some(record.pattern.clone()),
            threat_type: Some(record.threat_type),
            description: Some(record.description.clone()),
        },
        None => SignatureCheckSummary {
            checked: true,
            found: false,
            pattern: None,
            threat_type: None,
            description: None,
        },
    }
}

/// Builds the check summary for a skipped signature scan.
#[must_use]
pub const fn skipped_signatures() -> SignatureCheckSummary {
    SignatureCheckSummary {
        checked: false,
        found: false,
        pattern: None,
        threat_type: None,
        description: None,
    }
}
