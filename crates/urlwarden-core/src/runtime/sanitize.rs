// urlwarden-core/src/runtime/sanitize.rs
// ============================================================================
// Module: Sanitizer
// Description: Control-character stripping for display and storage.
// Purpose: Clean the decoded URL after all security checks have run.
// Dependencies: none
// ============================================================================

//! ## Overview
//! Sanitization is cosmetic cleanup, not a security control. It runs after
//! decoding and signature matching and must never be relied upon to
//! neutralize an attack payload.

// ============================================================================
// SECTION: Sanitization
// ============================================================================

/// Strips control characters (0x00–0x1F, 0x7F) and trims whitespace.
#[must_use]
pub fn sanitize_url(url: &str) -> String {
    let stripped: String = url.chars().filter(|ch| !ch.is_ascii_control()).collect();
    stripped.trim().to_string()
}
