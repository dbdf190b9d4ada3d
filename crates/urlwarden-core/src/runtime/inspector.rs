// urlwarden-core/src/runtime/inspector.rs
// ============================================================================
// Module: Urlwarden Inspection Engine
// Description: Ordered pipeline execution and verdict synthesis.
// Purpose: Run reconstruction through decision synthesis as one linear sequence.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! The inspection engine is the single canonical execution path for
//! Urlwarden. All API surfaces (HTTP, CLI) must call into [`UrlInspector`]
//! to preserve the fixed step ordering the evasion defenses depend on.
//! Both ALLOW and DENY are normal, successful outcomes; only a malformed
//! request or an unreachable store is an error.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::records::ReputationStatus;
use crate::core::records::SignatureRecord;
use crate::core::records::ThreatType;
use crate::core::url::RawRequest;
use crate::core::url::UrlParts;
use crate::core::verdict::CheckReport;
use crate::core::verdict::Decision;
use crate::core::verdict::DetectedThreat;
use crate::core::verdict::ReputationCheckSummary;
use crate::core::verdict::SecurityChecks;
use crate::core::verdict::Severity;
use crate::core::verdict::SignatureCheckSummary;
use crate::core::verdict::ThreatCategory;
use crate::interfaces::ReputationStore;
use crate::interfaces::SignatureStore;
use crate::interfaces::StoreError;
use crate::runtime::decode::decode_url;
use crate::runtime::precheck::find_traversal;
use crate::runtime::reconstruct::ReconstructError;
use crate::runtime::reconstruct::reconstruct_url;
use crate::runtime::reputation::skipped_reputation;
use crate::runtime::reputation::summarize_reputation;
use crate::runtime::sanitize::sanitize_url;
use crate::runtime::signature::first_match;
use crate::runtime::signature::skipped_signatures;
use crate::runtime::signature::summarize_match;
use crate::runtime::validate::FormatViolation;
use crate::runtime::validate::validate_url;

// ============================================================================
// SECTION: Pipeline Configuration
// ============================================================================

/// Default maximum accepted URL length in bytes.
pub const DEFAULT_MAX_URL_LENGTH: usize = 2048;

/// Immutable configuration for the inspection pipeline.
///
/// Passed in at construction so inspectors with different configurations
/// can run in parallel without ambient state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Schemes accepted by the format validator.
    pub allowed_schemes: Vec<String>,
    /// Lowest accepted port (inclusive).
    pub min_port: u16,
    /// Highest accepted port (inclusive).
    pub max_port: u16,
    /// Maximum accepted URL length in bytes.
    pub max_url_length: usize,
    /// Whether signature matching runs.
    pub check_signatures: bool,
    /// Whether reputation lookups run.
    pub check_reputation: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            allowed_schemes: vec!["http".to_string(), "https".to_string()],
            min_port: 1,
            max_port: 65535,
            max_url_length: DEFAULT_MAX_URL_LENGTH,
            check_signatures: true,
            check_reputation: true,
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Inspection errors that prevent a verdict from being produced.
#[derive(Debug, Error)]
pub enum InspectError {
    /// The request fragment could not be reconstructed into a URL.
    #[error("malformed request: {0}")]
    MalformedRequest(#[from] ReconstructError),
    /// A reference store could not be queried.
    #[error(transparent)]
    Store(#[from] StoreError),
}

// ============================================================================
// SECTION: Inspection Engine
// ============================================================================

/// Inspection engine owning the reference stores and pipeline configuration.
pub struct UrlInspector<S, R> {
    /// Signature store implementation.
    signatures: S,
    /// Reputation store implementation.
    reputation: R,
    /// Immutable pipeline configuration.
    config: PipelineConfig,
}

impl<S, R> UrlInspector<S, R>
where
    S: SignatureStore,
    R: ReputationStore,
{
    /// Creates a new inspection engine.
    #[must_use]
    pub const fn new(signatures: S, reputation: R, config: PipelineConfig) -> Self {
        Self {
            signatures,
            reputation,
            config,
        }
    }

    /// Returns the pipeline configuration.
    #[must_use]
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Inspects one request and produces a verdict with evidence.
    ///
    /// Steps run as one uninterrupted sequence: reconstruction, raw evasion
    /// pre-check, decoding, decoded evasion re-check, format validation,
    /// signature matching, sanitization, reputation lookup, and decision
    /// synthesis. The two store reads are the only failure points after
    /// reconstruction.
    ///
    /// # Errors
    ///
    /// Returns [`InspectError::MalformedRequest`] for an empty fragment and
    /// [`InspectError::Store`] when a reference store cannot be queried.
    pub fn check(&self, request: &RawRequest) -> Result<CheckReport, InspectError> {
        let raw = reconstruct_url(&request.path_fragment, request.query_string.as_deref())?;
        if let Some(sequence) = find_traversal(&raw) {
            return Ok(traversal_report(sanitize_url(&raw), sequence));
        }

        let decoded = decode_url(&raw);
        if let Some(sequence) = find_traversal(&decoded) {
            return Ok(traversal_report(sanitize_url(&decoded), sequence));
        }

        if let Err(violation) = validate_url(&decoded, &self.config) {
            return Ok(invalid_format_report(sanitize_url(&decoded), violation));
        }
        let Some(parts) = UrlParts::split(&decoded) else {
            return Ok(invalid_format_report(sanitize_url(&decoded), FormatViolation::Unparseable));
        };

        let (signature_summary, signature_hit) = if self.config.check_signatures {
            let records = self.signatures.records()?;
            let hit = first_match(&records, &parts.path_and_query());
            (summarize_match(hit.as_ref()), hit)
        } else {
            (skipped_signatures(), None)
        };

        let sanitized = sanitize_url(&decoded);

        let reputation_summary = if self.config.check_reputation {
            let hostname = UrlParts::split(&sanitized).map_or_else(
                || parts.hostname().to_string(),
                |sanitized_parts| sanitized_parts.hostname().to_string(),
            );
            summarize_reputation(self.reputation.lookup(&hostname)?)
        } else {
            skipped_reputation()
        };

        Ok(synthesize(sanitized, signature_summary, signature_hit, reputation_summary))
    }
}

// ============================================================================
// SECTION: Verdict Synthesis
// ============================================================================

/// Synthesizes the final verdict from both check outcomes.
///
/// Priority order: signature match, then denying reputation status, then
/// ALLOW. Unknown hostnames are allowed by design.
fn synthesize(
    url: String,
    signature_summary: SignatureCheckSummary,
    signature_hit: Option<SignatureRecord>,
    reputation_summary: ReputationCheckSummary,
) -> CheckReport {
    if let Some(hit) = signature_hit {
        let severity = if hit.threat_type == ThreatType::SqlInjection {
            Severity::Critical
        } else {
            Severity::High
        };
        return CheckReport {
            valid: true,
            decision: Decision::Deny,
            url,
            reason: Some(format!("Malicious pattern detected: {}", hit.threat_type)),
            threat_detected: Some(DetectedThreat {
                threat_type: hit.threat_type.into(),
                severity,
                description: hit.description,
            }),
            security_checks: SecurityChecks {
                malicious_patterns: signature_summary,
                domain_reputation: reputation_summary,
            },
        };
    }

    if let Some(category) = ThreatCategory::from_reputation(reputation_summary.status) {
        let severity = if reputation_summary.status == ReputationStatus::Blacklisted {
            Severity::High
        } else {
            Severity::Critical
        };
        let description = reputation_summary.description.clone().unwrap_or_else(|| {
            format!("Domain is flagged as {}", reputation_summary.status)
        });
        return CheckReport {
            valid: true,
            decision: Decision::Deny,
            url,
            reason: Some(format!("Domain is {}", reputation_summary.status)),
            threat_detected: Some(DetectedThreat {
                threat_type: category,
                severity,
                description,
            }),
            security_checks: SecurityChecks {
                malicious_patterns: signature_summary,
                domain_reputation: reputation_summary,
            },
        };
    }

    CheckReport {
        valid: true,
        decision: Decision::Allow,
        url,
        reason: None,
        threat_detected: None,
        security_checks: SecurityChecks {
            malicious_patterns: signature_summary,
            domain_reputation: reputation_summary,
        },
    }
}

/// Builds the short-circuit verdict for a traversal pre-check hit.
fn traversal_report(url: String, sequence: &str) -> CheckReport {
    CheckReport {
        valid: true,
        decision: Decision::Deny,
        url,
        reason: Some("Malicious pattern detected: path_traversal".to_string()),
        threat_detected: Some(DetectedThreat {
            threat_type: ThreatCategory::PathTraversal,
            severity: Severity::High,
            description: format!("Traversal sequence `{sequence}` detected"),
        }),
        security_checks: SecurityChecks {
            malicious_patterns: SignatureCheckSummary {
                checked: true,
                found: true,
                pattern: Some(sequence.to_string()),
                threat_type: Some(ThreatType::PathTraversal),
                description: Some("Path traversal attempt".to_string()),
            },
            domain_reputation: skipped_reputation(),
        },
    }
}

/// Builds the DENY verdict for a format violation.
fn invalid_format_report(url: String, violation: FormatViolation) -> CheckReport {
    CheckReport {
        valid: false,
        decision: Decision::Deny,
        url,
        reason: Some(format!("Invalid URL format: {violation}")),
        threat_detected: None,
        security_checks: SecurityChecks {
            malicious_patterns: skipped_signatures(),
            domain_reputation: skipped_reputation(),
        },
    }
}
