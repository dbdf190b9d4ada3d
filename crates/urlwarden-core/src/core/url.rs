// urlwarden-core/src/core/url.rs
// ============================================================================
// Module: Urlwarden URL Decomposition
// Description: Raw request payload and structural URL splitting.
// Purpose: Decompose URLs without normalization so evasion checks see raw bytes.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! The pipeline deliberately avoids a general-purpose URL parser: parsers
//! normalize paths, and normalization before the evasion pre-check is
//! exactly the bypass the pipeline exists to prevent. [`UrlParts`] performs
//! purely structural splitting on `://`, `/`, and `?` and leaves every byte
//! of each component untouched.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Raw Request
// ============================================================================

/// Inbound check request as supplied by the transport layer.
///
/// # Invariants
/// - Owned solely by the handling call; discarded after the verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRequest {
    /// Path fragment following the route prefix, undecoded.
    pub path_fragment: String,
    /// Separately supplied query string, undecoded.
    pub query_string: Option<String>,
}

// ============================================================================
// SECTION: URL Parts
// ============================================================================

/// Structural decomposition of a URL string.
///
/// # Invariants
/// - `path` is empty or begins with `/`.
/// - Components are stored exactly as found; no decoding or normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlParts {
    /// URL scheme preceding `://`.
    pub scheme: String,
    /// Authority component (`hostname` or `hostname:port`).
    pub authority: String,
    /// Path component including the leading `/`, possibly empty.
    pub path: String,
    /// Query component following the first `?`, when present.
    pub query: Option<String>,
}

impl UrlParts {
    /// Splits a URL on `://`, the first `/`, and the first `?`.
    ///
    /// Returns `None` when the string carries no `scheme://` prefix.
    #[must_use]
    pub fn split(url: &str) -> Option<Self> {
        let (scheme, rest) = url.split_once("://")?;
        if scheme.is_empty() {
            return None;
        }
        let (before_query, query) = match rest.split_once('?') {
            Some((before, after)) => (before, Some(after.to_string())),
            None => (rest, None),
        };
        let (authority, path) = match before_query.find('/') {
            Some(index) => (&before_query[..index], &before_query[index..]),
            None => (before_query, ""),
        };
        Some(Self {
            scheme: scheme.to_string(),
            authority: authority.to_string(),
            path: path.to_string(),
            query,
        })
    }

    /// Returns the authority without any `:port` suffix.
    #[must_use]
    pub fn hostname(&self) -> &str {
        self.authority.split_once(':').map_or(self.authority.as_str(), |(host, _)| host)
    }

    /// Returns the raw port substring following `:`, when present.
    #[must_use]
    pub fn port(&self) -> Option<&str> {
        self.authority.split_once(':').map(|(_, port)| port)
    }

    /// Returns path plus query joined with `?` when the query is non-empty.
    #[must_use]
    pub fn path_and_query(&self) -> String {
        match &self.query {
            Some(query) if !query.is_empty() => format!("{}?{query}", self.path),
            _ => self.path.clone(),
        }
    }

    /// Reassembles `scheme://authority+path[?query]`, dropping an empty query.
    #[must_use]
    pub fn assemble(&self) -> String {
        match &self.query {
            Some(query) if !query.is_empty() => {
                format!("{}://{}{}?{query}", self.scheme, self.authority, self.path)
            }
            _ => format!("{}://{}{}", self.scheme, self.authority, self.path),
        }
    }
}
