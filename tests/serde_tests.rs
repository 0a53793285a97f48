//! Serialization tests for the unwrap diagnostics.
//!
//! These tests are only compiled when the `serde` feature is enabled.

#![cfg(feature = "serde")]

use resultant::result::{ResultExt, UnwrapConfig, UnwrapError, Variant, err};
use rstest::rstest;
use std::panic::catch_unwind;

// =============================================================================
// UnwrapConfig
// =============================================================================

#[rstest]
fn test_unwrap_config_uses_camel_case_key() {
    let json = serde_json::to_value(UnwrapConfig::with_stack_trace()).unwrap();
    assert_eq!(json, serde_json::json!({ "withStackTrace": true }));
}

#[rstest]
fn test_unwrap_config_roundtrip() {
    let config: UnwrapConfig = serde_json::from_str(r#"{"withStackTrace":false}"#).unwrap();
    assert_eq!(config, UnwrapConfig::default());
}

// =============================================================================
// UnwrapError
// =============================================================================

#[rstest]
#[case(Variant::Ok, "\"Ok\"")]
#[case(Variant::Err, "\"Err\"")]
fn test_variant_serializes_as_name(#[case] variant: Variant, #[case] expected: &str) {
    assert_eq!(serde_json::to_string(&variant).unwrap(), expected);
}

#[rstest]
fn test_unwrap_error_names_variant_as_type() {
    let payload = catch_unwind(|| err::<i32, &str>("nope").unsafe_unwrap()).unwrap_err();
    let error = UnwrapError::from_panic(payload).unwrap();

    let json = serde_json::to_value(&error).unwrap();

    assert_eq!(json["data"]["type"], "Err");
    assert_eq!(json["data"]["value"], "\"nope\"");
    assert_eq!(json["message"], "called `unsafe_unwrap` on an `Err` value");
    assert!(json.get("stack").is_none());
}

#[rstest]
fn test_unwrap_error_roundtrip_with_stack() {
    let error = UnwrapError::new(
        Variant::Ok,
        &vec![1, 2],
        "called `unsafe_unwrap_err` on an `Ok` value",
        UnwrapConfig::with_stack_trace(),
    );

    let json = serde_json::to_string(&error).unwrap();
    let decoded: UnwrapError = serde_json::from_str(&json).unwrap();

    assert_eq!(decoded, error);
    assert!(decoded.stack.is_some());
}
