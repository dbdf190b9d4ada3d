// urlwarden-core/src/runtime/precheck.rs
// ============================================================================
// Module: Evasion Pre-Check
// Description: Raw-string scan for path traversal sequences.
// Purpose: Catch traversal payloads before decoding can normalize them away.
// Dependencies: none
// ============================================================================

//! ## Overview
//! Standard path normalization collapses `../` segments before signature
//! matching ever sees them. This scan therefore runs on the raw
//! reconstructed URL, and runs again on the decoded URL so traversal
//! surfaced by one decoding pass (`..%2F` becoming `../`) is caught at
//! every encoding depth.

// ============================================================================
// SECTION: Traversal Scan
// ============================================================================

/// Returns the first traversal sequence found in the given URL string.
///
/// Scans literally for `../` and `..\`, and case-insensitively for the
/// percent-encoded form `%2e%2e`.
#[must_use]
pub fn find_traversal(url: &str) -> Option<&'static str> {
    if url.contains("../") {
        return Some("../");
    }
    if url.contains("..\\") {
        return Some("..\\");
    }
    if url.to_ascii_lowercase().contains("%2e%2e") {
        return Some("%2e%2e");
    }
    None
}
