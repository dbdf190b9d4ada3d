// urlwarden-core/src/core/mod.rs
// ============================================================================
// Module: Urlwarden Core Types
// Description: Canonical record, URL, and verdict structures.
// Purpose: Provide stable, serializable types for the inspection pipeline.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Core types define the reference-data records, URL decomposition, and
//! verdict structures used throughout Urlwarden. These types are the
//! canonical source of truth for any derived API surfaces (HTTP or CLI).

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod records;
pub mod url;
pub mod verdict;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use records::PatternType;
pub use records::ReputationRecord;
pub use records::ReputationStatus;
pub use records::SignatureRecord;
pub use records::ThreatType;
pub use url::RawRequest;
pub use url::UrlParts;
pub use verdict::CheckReport;
pub use verdict::Decision;
pub use verdict::DetectedThreat;
pub use verdict::ReputationCheckSummary;
pub use verdict::SecurityChecks;
pub use verdict::Severity;
pub use verdict::SignatureCheckSummary;
pub use verdict::ThreatCategory;
