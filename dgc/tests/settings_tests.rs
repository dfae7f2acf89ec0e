// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

mod common;

use common::*;
use dgc::{DecodeLimits, DecodeLimitsOverrides};

#[test]
fn overrides_apply_only_present_fields() {
    let overrides: DecodeLimitsOverrides = serde_json::from_str(r#"{ "max_inflated_len": 4096 }"#).unwrap();
    let limits = DecodeLimits::default().apply(overrides);
    assert_eq!(limits.max_inflated_len, 4096);
    assert_eq!(limits.max_nesting_depth, DecodeLimits::default().max_nesting_depth);
}

#[test]
fn empty_overrides_keep_defaults() {
    let overrides: DecodeLimitsOverrides = serde_json::from_str("{}").unwrap();
    assert_eq!(DecodeLimits::default().apply(overrides), DecodeLimits::default());
}

#[test]
fn unknown_override_fields_are_rejected() {
    let res = serde_json::from_str::<DecodeLimitsOverrides>(r#"{ "max_inflate_len": 1 }"#);
    assert!(res.is_err());
}

#[test]
fn unbounded_inflate_limit_still_decodes() {
    let json = format!(r#"{{ "max_inflated_len": {} }}"#, usize::MAX);
    let overrides: DecodeLimitsOverrides = serde_json::from_str(&json).unwrap();
    let limits = DecodeLimits::default().apply(overrides);
    assert_eq!(limits.max_inflated_len, usize::MAX);

    let text = sample_certificate_text();
    let cose = dgc::decode_certificate_with_limits(text.as_bytes(), limits).unwrap();
    assert_eq!(cose, sample_cose());
}
