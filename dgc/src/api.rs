// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::{certificate_text, cose_sign1, inflate, DecodeLimits, DgcError, SignedStructure};

/// Strip the `HC<version>:` prefix, base45-decode and inflate a certificate string.
///
/// Returns the CBOR-encoded COSE_Sign1 bytes.
pub fn decode_certificate(text: &[u8]) -> Result<Vec<u8>, DgcError> {
    decode_certificate_with_limits(text, DecodeLimits::default())
}

pub fn decode_certificate_with_limits(text: &[u8], limits: DecodeLimits) -> Result<Vec<u8>, DgcError> {
    let compressed = certificate_text::decode_text(text)?;
    Ok(inflate::inflate_with_limit(&compressed, limits.max_inflated_len)?)
}

/// Decode a certificate string all the way to its COSE_Sign1 structure.
pub fn decode_and_parse(text: &[u8]) -> Result<SignedStructure, DgcError> {
    decode_and_parse_with_limits(text, DecodeLimits::default())
}

pub fn decode_and_parse_with_limits(text: &[u8], limits: DecodeLimits) -> Result<SignedStructure, DgcError> {
    let cose = decode_certificate_with_limits(text, limits)?;
    Ok(cose_sign1::parse_structure_with_limits(&cose, limits)?)
}
