// urlwarden-server/src/response.rs
// ============================================================================
// Module: Urlwarden Response Bodies
// Description: Non-verdict JSON bodies returned by the HTTP surface.
// Purpose: Keep error responses structurally distinct from verdicts.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A DENY verdict and a server malfunction must never be confusable by a
//! caller: verdicts serialize the full check report, while client and
//! internal errors serialize the [`ErrorBody`] envelope defined here with
//! no decision field and no internal diagnostic text.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;

// ============================================================================
// SECTION: Bodies
// ============================================================================

/// Error envelope for non-verdict responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    /// Stable machine-readable error class.
    pub error: &'static str,
    /// Human-readable message, free of internal detail.
    pub message: String,
}

/// Builds the client-error body for an unreconstructable request.
#[must_use]
pub fn malformed_request_body() -> ErrorBody {
    ErrorBody {
        error: "invalid_request",
        message: "expected /urlinfo/1/{hostname_and_port}/{original_path_and_query}".to_string(),
    }
}

/// Builds the generic internal-failure body.
#[must_use]
pub fn processing_error_body() -> ErrorBody {
    ErrorBody {
        error: "processing_error",
        message: "the request could not be processed".to_string(),
    }
}

/// Health endpoint body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthBody {
    /// Service liveness indicator.
    pub status: &'static str,
    /// Seconds since process start.
    pub uptime_seconds: i64,
    /// Process start time as an RFC 3339 string.
    pub start_time: String,
}
