// urlwarden-core/src/runtime/decode.rs
// ============================================================================
// Module: Percent-Decoder
// Description: Best-effort percent-decoding of URL components.
// Purpose: Reveal encoded payloads to signature matching without failing requests.
// Dependencies: percent-encoding, crate::core
// ============================================================================

//! ## Overview
//! Authority and path decode under rule A (`%XX` maps to the corresponding
//! byte, nothing else). The query decodes under rule B (rule A plus a
//! literal `+` becoming a space). Decoding is best-effort: a component
//! whose unescaped bytes are not valid UTF-8 is returned unchanged, and
//! malformed escapes pass through literally. Decoding a string with no
//! escapes returns it unchanged.

// ============================================================================
// SECTION: Imports
// ============================================================================

use percent_encoding::percent_decode_str;

use crate::core::url::UrlParts;

// ============================================================================
// SECTION: Component Decoding
// ============================================================================

/// Decodes an authority or path component under rule A.
#[must_use]
pub fn decode_component(input: &str) -> String {
    match percent_decode_str(input).decode_utf8() {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => input.to_string(),
    }
}

/// Decodes a query component under rule B (plus-as-space, then rule A).
///
/// The plus substitution runs first, so an encoded `%2B` still decodes to a
/// literal `+`.
#[must_use]
pub fn decode_query(input: &str) -> String {
    let unplussed = input.replace('+', " ");
    match percent_decode_str(&unplussed).decode_utf8() {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => input.to_string(),
    }
}

// ============================================================================
// SECTION: URL Decoding
// ============================================================================

/// Decodes a reconstructed URL component-wise and reassembles it.
///
/// A URL that cannot be structurally split is returned unchanged.
#[must_use]
pub fn decode_url(url: &str) -> String {
    let Some(parts) = UrlParts::split(url) else {
        return url.to_string();
    };
    let authority = decode_component(&parts.authority);
    let path = decode_component(&parts.path);
    let query = parts.query.as_deref().map(decode_query);
    UrlParts {
        scheme: parts.scheme,
        authority,
        path,
        query,
    }
    .assemble()
}
