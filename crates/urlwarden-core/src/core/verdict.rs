// urlwarden-core/src/core/verdict.rs
// ============================================================================
// Module: Urlwarden Verdict Types
// Description: ALLOW/DENY verdicts with supporting check evidence.
// Purpose: Provide the canonical check report returned for every request.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A [`CheckReport`] is produced exactly once per request and is immutable
//! after creation. It always carries both check summaries, independent of
//! which check triggered the decision, so callers have full audit context.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::records::ReputationStatus;
use crate::core::records::ThreatType;

// ============================================================================
// SECTION: Decision and Severity
// ============================================================================

/// Final pipeline decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    /// Request target is allowed.
    Allow,
    /// Request target is denied.
    Deny,
}

/// Severity attached to a detected threat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Serious threat.
    High,
    /// Most severe threat class.
    Critical,
}

// ============================================================================
// SECTION: Threat Category
// ============================================================================

/// Unified threat label spanning signature and reputation findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreatCategory {
    /// SQL injection signature hit.
    SqlInjection,
    /// Cross-site scripting signature hit.
    Xss,
    /// Path traversal sequence.
    PathTraversal,
    /// Shell command injection signature hit.
    CommandInjection,
    /// Open-redirect signature hit.
    OpenRedirect,
    /// Hostname classified malicious.
    Malicious,
    /// Hostname classified phishing.
    Phishing,
    /// Hostname administratively blacklisted.
    Blacklisted,
    /// Threat outside the known classes.
    #[serde(other)]
    Other,
}

impl ThreatCategory {
    /// Maps a denying reputation status to its threat category.
    ///
    /// Returns `None` for statuses that never deny (`safe`, `unknown`).
    #[must_use]
    pub const fn from_reputation(status: ReputationStatus) -> Option<Self> {
        match status {
            ReputationStatus::Malicious => Some(Self::Malicious),
            ReputationStatus::Phishing => Some(Self::Phishing),
            ReputationStatus::Blacklisted => Some(Self::Blacklisted),
            ReputationStatus::Safe | ReputationStatus::Unknown => None,
        }
    }
}

impl From<ThreatType> for ThreatCategory {
    fn from(threat_type: ThreatType) -> Self {
        match threat_type {
            ThreatType::SqlInjection => Self::SqlInjection,
            ThreatType::Xss => Self::Xss,
            ThreatType::PathTraversal => Self::PathTraversal,
            ThreatType::CommandInjection => Self::CommandInjection,
            ThreatType::OpenRedirect => Self::OpenRedirect,
            ThreatType::Other => Self::Other,
        }
    }
}

// ============================================================================
// SECTION: Check Summaries
// ============================================================================

/// Outcome summary for the signature-matching check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureCheckSummary {
    /// Whether the check ran for this request.
    pub checked: bool,
    /// Whether any signature matched.
    pub found: bool,
    /// Matched pattern, when found.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Threat class of the matched signature, when found.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threat_type: Option<ThreatType>,
    /// Description of the matched signature, when found.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Outcome summary for the domain-reputation check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReputationCheckSummary {
    /// Whether the check ran for this request.
    pub checked: bool,
    /// Whether a reputation record exists for the hostname.
    pub found: bool,
    /// Reputation status (`unknown` when no record exists).
    pub status: ReputationStatus,
    /// Description from the reputation record, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Last update time from the reputation record, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

/// Container for both per-request check summaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityChecks {
    /// Signature-matching summary.
    pub malicious_patterns: SignatureCheckSummary,
    /// Domain-reputation summary.
    pub domain_reputation: ReputationCheckSummary,
}

// ============================================================================
// SECTION: Check Report
// ============================================================================

/// Threat evidence attached to a DENY verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectedThreat {
    /// Unified threat label.
    #[serde(rename = "type")]
    pub threat_type: ThreatCategory,
    /// Severity of the threat.
    pub severity: Severity,
    /// Human-readable description.
    pub description: String,
}

/// Verdict plus supporting evidence for one inspected URL.
///
/// # Invariants
/// - Produced exactly once per request; immutable after creation.
/// - Both check summaries are always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckReport {
    /// Whether the URL passed format validation.
    pub valid: bool,
    /// Final decision.
    pub decision: Decision,
    /// Sanitized URL the verdict applies to.
    pub url: String,
    /// Reason for a DENY decision.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Threat evidence for a DENY decision.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threat_detected: Option<DetectedThreat>,
    /// Summaries for both security checks.
    pub security_checks: SecurityChecks,
}
