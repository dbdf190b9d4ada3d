// urlwarden-core/tests/decoder_properties.rs
// ============================================================================
// Module: Decoder Property Tests
// Description: Property-based checks for decoding and sanitization.
// ============================================================================
//! ## Overview
//! Property coverage for the idempotent-decoding and sanitizer contracts
//! over generated inputs.

use proptest::prelude::ProptestConfig;
use proptest::prop_assert;
use proptest::prop_assert_eq;
use proptest::proptest;
use urlwarden_core::runtime::decode::decode_component;
use urlwarden_core::runtime::decode::decode_query;
use urlwarden_core::runtime::sanitize::sanitize_url;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    // ========================================================================
    // SECTION: Idempotent Decoding
    // ========================================================================

    #[test]
    fn prop_component_decode_is_identity_without_escapes(
        input in "[A-Za-z0-9/_.~:-]{0,64}",
    ) {
        prop_assert_eq!(decode_component(&input), input);
    }

    #[test]
    fn prop_query_decode_is_identity_without_escapes_or_plus(
        input in "[A-Za-z0-9/_.~:&=-]{0,64}",
    ) {
        prop_assert_eq!(decode_query(&input), input);
    }

    #[test]
    fn prop_decoding_a_decoded_component_is_stable(
        input in "[A-Za-z0-9 /_.~:-]{0,64}",
    ) {
        let once = decode_component(&input);
        prop_assert_eq!(decode_component(&once), once.clone());
    }

    // ========================================================================
    // SECTION: Sanitizer Contract
    // ========================================================================

    #[test]
    fn prop_sanitized_output_has_no_control_characters(input in ".{0,64}") {
        let sanitized = sanitize_url(&input);
        prop_assert!(!sanitized.chars().any(|ch| ch.is_ascii_control()));
    }

    #[test]
    fn prop_sanitizing_twice_is_identity(input in ".{0,64}") {
        let once = sanitize_url(&input);
        prop_assert_eq!(sanitize_url(&once), once.clone());
    }
}
