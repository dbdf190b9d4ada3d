// urlwarden-core/src/runtime/reputation.rs
// ============================================================================
// Module: Reputation Resolver
// Description: Summary construction for hostname reputation lookups.
// Purpose: Map store lookups onto per-request reputation summaries.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! The resolver performs an exact-match lookup of the sanitized URL's
//! hostname. A missing record is a normal outcome and reports status
//! `unknown`; the store is never mutated by the pipeline.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::records::ReputationRecord;
use crate::core::records::ReputationStatus;
use crate::core::verdict::ReputationCheckSummary;

// ============================================================================
// SECTION: Summaries
// ============================================================================

/// Builds the check summary for a completed reputation lookup.
#[must_use]
pub fn summarize_reputation(record: Option<ReputationRecord>) -> ReputationCheckSummary {
    match record {
        Some(record) => ReputationCheckSummary {
            checked: true,
            found: true,
            status: record.status,
            description: record.description,
            last_updated: record.last_updated,
        },
        None => ReputationCheckSummary {
            checked: true,
            found: false,
            status: ReputationStatus::Unknown,
            description: None,
            last_updated: None,
        },
    }
}

/// Builds the check summary for a skipped reputation lookup.
#[must_use]
pub const fn skipped_reputation() -> ReputationCheckSummary {
    ReputationCheckSummary {
        checked: false,
        found: false,
        status: ReputationStatus::Unknown,
        description: None,
        last_updated: None,
    }
}
