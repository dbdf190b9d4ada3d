// urlwarden-core/tests/decode.rs
// ============================================================================
// Module: Percent-Decoder Tests
// Description: Tests for rule A / rule B decoding and best-effort fallback.
// ============================================================================
//! ## Overview
//! Validates component decoding rules, plus-as-space scoping, and the
//! unchanged-on-failure contract.

use urlwarden_core::runtime::decode::decode_component;
use urlwarden_core::runtime::decode::decode_query;
use urlwarden_core::runtime::decode::decode_url;

// ============================================================================
// SECTION: Rule A (Authority and Path)
// ============================================================================

#[test]
fn test_decodes_percent_escapes_in_path() {
    assert_eq!(decode_component("/path%20with%20spaces"), "/path with spaces");
}

#[test]
fn test_plus_is_literal_in_path() {
    assert_eq!(decode_component("/a+b"), "/a+b");
}

#[test]
fn test_decodes_encoded_hostname() {
    assert_eq!(decode_component("example%2Ecom"), "example.com");
}

#[test]
fn test_no_escapes_returns_input_unchanged() {
    assert_eq!(decode_component("/plain/path"), "/plain/path");
}

#[test]
fn test_malformed_escape_passes_through() {
    assert_eq!(decode_component("/bad%zzescape"), "/bad%zzescape");
}

#[test]
fn test_invalid_utf8_falls_back_to_input() {
    assert_eq!(decode_component("/raw%FFbyte"), "/raw%FFbyte");
}

// ============================================================================
// SECTION: Rule B (Query)
// ============================================================================

#[test]
fn test_plus_decodes_to_space_in_query() {
    assert_eq!(decode_query("q=hello+world"), "q=hello world");
}

#[test]
fn test_encoded_plus_stays_literal_in_query() {
    assert_eq!(decode_query("q=a%2Bb"), "q=a+b");
}

#[test]
fn test_percent_escapes_decode_in_query() {
    assert_eq!(decode_query("q=SELECT%20*%20FROM%20users"), "q=SELECT * FROM users");
}

// ============================================================================
// SECTION: Whole-URL Decoding
// ============================================================================

#[test]
fn test_decode_url_applies_rules_per_component() {
    let decoded = decode_url("http://example%2Ecom/path%20a?q=x+y");
    assert_eq!(decoded, "http://example.com/path a?q=x y");
}

#[test]
fn test_decode_url_drops_query_that_decodes_empty() {
    assert_eq!(decode_url("http://example.com/path?"), "http://example.com/path");
}

#[test]
fn test_decode_url_without_scheme_is_unchanged() {
    assert_eq!(decode_url("not a url"), "not a url");
}

#[test]
fn test_decoding_already_decoded_url_is_identity() {
    let url = "http://example.com/path a?q=x y";
    assert_eq!(decode_url(url), url);
}
