// urlwarden-core/src/core/records.rs
// ============================================================================
// Module: Urlwarden Reference Records
// Description: Signature and reputation reference-data records.
// Purpose: Provide immutable, serializable store record types.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! This module defines the read-only reference data consumed by the
//! pipeline: known-malicious signature patterns and hostname reputation
//! classifications. Records are immutable at request time; stores expose
//! them through the interfaces in [`crate::interfaces`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Signature Records
// ============================================================================

/// Location class a signature pattern targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternType {
    /// Pattern targets the URL path.
    Path,
    /// Pattern targets the query string.
    Query,
    /// Pattern targets header content.
    Header,
    /// Pattern with no specific location class.
    #[serde(other)]
    Other,
}

impl PatternType {
    /// Returns the stable label used in store rows.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Path => "path",
            Self::Query => "query",
            Self::Header => "header",
            Self::Other => "other",
        }
    }

    /// Parses a store label, mapping unrecognized labels to [`Self::Other`].
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label {
            "path" => Self::Path,
            "query" => Self::Query,
            "header" => Self::Header,
            _ => Self::Other,
        }
    }
}

/// Threat class carried by a signature record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreatType {
    /// SQL injection payloads.
    SqlInjection,
    /// Cross-site scripting payloads.
    Xss,
    /// Path traversal sequences.
    PathTraversal,
    /// Shell command injection payloads.
    CommandInjection,
    /// Open-redirect targets.
    OpenRedirect,
    /// Threat class outside the known set.
    #[serde(other)]
    Other,
}

impl ThreatType {
    /// Returns the stable label used in store rows.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SqlInjection => "sql_injection",
            Self::Xss => "xss",
            Self::PathTraversal => "path_traversal",
            Self::CommandInjection => "command_injection",
            Self::OpenRedirect => "open_redirect",
            Self::Other => "other",
        }
    }

    /// Parses a store label, mapping unrecognized labels to [`Self::Other`].
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label {
            "sql_injection" => Self::SqlInjection,
            "xss" => Self::Xss,
            "path_traversal" => Self::PathTraversal,
            "command_injection" => Self::CommandInjection,
            "open_redirect" => Self::OpenRedirect,
            _ => Self::Other,
        }
    }
}

impl fmt::Display for ThreatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Known-malicious signature pattern from the signature store.
///
/// # Invariants
/// - Records are immutable reference data; the pipeline never mutates them.
/// - Store order is meaningful: the first matching record wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureRecord {
    /// Substring matched case-insensitively against path+query.
    pub pattern: String,
    /// Location class the pattern targets.
    pub pattern_type: PatternType,
    /// Threat class reported on a hit.
    pub threat_type: ThreatType,
    /// Human-readable description of the signature.
    pub description: String,
}

// ============================================================================
// SECTION: Reputation Records
// ============================================================================

/// Trust classification for a hostname.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReputationStatus {
    /// Hostname is verified safe.
    Safe,
    /// Hostname serves malware or attack content.
    Malicious,
    /// Hostname impersonates another party.
    Phishing,
    /// Hostname is administratively blocked.
    Blacklisted,
    /// Hostname has no reputation record.
    #[serde(other)]
    Unknown,
}

impl ReputationStatus {
    /// Returns the stable label used in store rows.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Safe => "safe",
            Self::Malicious => "malicious",
            Self::Phishing => "phishing",
            Self::Blacklisted => "blacklisted",
            Self::Unknown => "unknown",
        }
    }

    /// Parses a store label, mapping unrecognized labels to [`Self::Unknown`].
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label {
            "safe" => Self::Safe,
            "malicious" => Self::Malicious,
            "phishing" => Self::Phishing,
            "blacklisted" => Self::Blacklisted,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for ReputationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hostname reputation record from the reputation store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReputationRecord {
    /// Exact hostname key (no port).
    pub hostname: String,
    /// Trust classification.
    pub status: ReputationStatus,
    /// Optional human-readable description.
    pub description: Option<String>,
    /// Last update time as an RFC 3339 string, when recorded.
    pub last_updated: Option<String>,
}
