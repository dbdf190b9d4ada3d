// urlwarden-core/src/runtime/validate.rs
// ============================================================================
// Module: Format Validator
// Description: Scheme, hostname, port, and length grammar checks.
// Purpose: Reject decoded URLs outside the accepted grammar as values, not errors.
// Dependencies: thiserror, crate::{core, runtime}
// ============================================================================

//! ## Overview
//! Validation runs on the decoded URL. A violation is an expected outcome,
//! not a failure: it is returned as a value and the caller folds it into a
//! DENY verdict. Hostname labels follow DNS conventions: alphanumeric with
//! interior hyphens, at most 63 characters, separated by dots.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::url::UrlParts;
use crate::runtime::inspector::PipelineConfig;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum length of a single hostname label.
const MAX_LABEL_LENGTH: usize = 63;

// ============================================================================
// SECTION: Violations
// ============================================================================

/// Format grammar violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormatViolation {
    /// URL exceeds the configured maximum length.
    #[error("URL exceeds maximum length")]
    TooLong,
    /// URL has no `scheme://` structure.
    #[error("URL structure is unparseable")]
    Unparseable,
    /// Scheme is outside the configured allow-list.
    #[error("scheme is not allowed")]
    UnsupportedScheme,
    /// Hostname is empty.
    #[error("hostname is empty")]
    EmptyHostname,
    /// Hostname contains an invalid label.
    #[error("hostname label is invalid")]
    InvalidHostname,
    /// Port is empty or non-numeric.
    #[error("port is not numeric")]
    InvalidPort,
    /// Port lies outside the configured range.
    #[error("port is out of range")]
    PortOutOfRange,
}

// ============================================================================
// SECTION: Validation
// ============================================================================

/// Validates a decoded URL against the configured grammar.
///
/// # Errors
///
/// Returns the first [`FormatViolation`] encountered; the caller decides
/// whether this becomes a DENY verdict or a client error.
pub fn validate_url(url: &str, config: &PipelineConfig) -> Result<(), FormatViolation> {
    if url.len() > config.max_url_length {
        return Err(FormatViolation::TooLong);
    }
    let Some(parts) = UrlParts::split(url) else {
        return Err(FormatViolation::Unparseable);
    };
    if !config.allowed_schemes.iter().any(|scheme| scheme == &parts.scheme) {
        return Err(FormatViolation::UnsupportedScheme);
    }
    validate_hostname(parts.hostname())?;
    if let Some(port) = parts.port() {
        validate_port(port, config)?;
    }
    Ok(())
}

/// Validates hostname labels against DNS conventions.
fn validate_hostname(hostname: &str) -> Result<(), FormatViolation> {
    if hostname.is_empty() {
        return Err(FormatViolation::EmptyHostname);
    }
    for label in hostname.split('.') {
        if label.is_empty() || label.len() > MAX_LABEL_LENGTH {
            return Err(FormatViolation::InvalidHostname);
        }
        if label.starts_with('-') || label.ends_with('-') {
            return Err(FormatViolation::InvalidHostname);
        }
        if !label.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '-') {
            return Err(FormatViolation::InvalidHostname);
        }
    }
    Ok(())
}

/// Validates the port substring against the configured inclusive range.
fn validate_port(port: &str, config: &PipelineConfig) -> Result<(), FormatViolation> {
    if port.is_empty() || !port.chars().all(|ch| ch.is_ascii_digit()) {
        return Err(FormatViolation::InvalidPort);
    }
    let value: u32 = port.parse().map_err(|_| FormatViolation::PortOutOfRange)?;
    if value < u32::from(config.min_port) || value > u32::from(config.max_port) {
        return Err(FormatViolation::PortOutOfRange);
    }
    Ok(())
}
