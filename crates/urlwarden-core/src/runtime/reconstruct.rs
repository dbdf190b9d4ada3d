// urlwarden-core/src/runtime/reconstruct.rs
// ============================================================================
// Module: URL Reconstructor
// Description: Rebuilds the target URL from a path-embedded fragment.
// Purpose: Produce one canonical URL string from fragment plus query string.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! The transport layer delivers the target as a path fragment
//! (`hostname[:port]/path`, optionally with an embedded scheme) and a
//! separately supplied query string. Reconstruction joins them into one URL
//! string, defaulting the scheme to `http` when the fragment carries none.
//! No decoding happens here; the result feeds the raw evasion pre-check.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Reconstruction failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReconstructError {
    /// The path fragment was empty before splitting.
    #[error("empty URL fragment")]
    EmptyFragment,
}

// ============================================================================
// SECTION: Reconstruction
// ============================================================================

/// Reconstructs the target URL from a path fragment and query string.
///
/// Fragments beginning with `http://` or `https://` are used verbatim;
/// otherwise the fragment is split on the first `/` into authority and
/// remainder and prefixed with `http://`. A non-empty query string is
/// appended with `?`.
///
/// # Errors
///
/// Returns [`ReconstructError::EmptyFragment`] when the fragment is empty.
pub fn reconstruct_url(
    fragment: &str,
    query_string: Option<&str>,
) -> Result<String, ReconstructError> {
    if fragment.is_empty() {
        return Err(ReconstructError::EmptyFragment);
    }

    let base = if fragment.starts_with("http://") || fragment.starts_with("https://") {
        fragment.to_string()
    } else {
        match fragment.split_once('/') {
            Some((authority, remainder)) if !remainder.is_empty() => {
                format!("http://{authority}/{remainder}")
            }
            Some((authority, _)) => format!("http://{authority}"),
            None => format!("http://{fragment}"),
        }
    };

    Ok(match query_string {
        Some(query) if !query.is_empty() => format!("{base}?{query}"),
        _ => base,
    })
}
