// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use minicbor::data::{Tag, Type};
use minicbor::encode::{Error as EncodeError, Write};
use minicbor::{Decoder, Encoder};

use crate::cbor_value::{decode_value, CborValue};
use crate::claims::{self, Claims, Header, HEADER_LABEL_KID};
use crate::error::FormatError;
use crate::settings::DecodeLimits;

pub const COSE_SIGN1_TAG: u64 = 18;
pub const SIG_STRUCTURE_CONTEXT_SIGNATURE1: &str = "Signature1";

/// A decoded COSE_Sign1 message.
///
/// `protected` and `payload` are kept exactly as they appeared on the wire; the
/// signature covers those bytes, not any re-encoding of them.
#[derive(Debug, Clone, PartialEq)]
pub struct SignedStructure {
    pub protected: Vec<u8>,
    pub unprotected: CborValue,
    pub payload: Vec<u8>,
    pub signature: Vec<u8>,
    limits: DecodeLimits,
}

impl SignedStructure {
    pub fn new(protected: Vec<u8>, unprotected: CborValue, payload: Vec<u8>, signature: Vec<u8>) -> Self {
        Self {
            protected,
            unprotected,
            payload,
            signature,
            limits: DecodeLimits::default(),
        }
    }

    /// Decode the protected header bytes.
    ///
    /// An empty protected bstr is read as an empty map (RFC 9052 §3) and yields
    /// `Header::default()` rather than a decode error.
    pub fn header(&self) -> Result<Header, FormatError> {
        claims::unmarshal_header(&self.protected, self.limits.max_nesting_depth)
    }

    /// Decode the payload bytes as CWT claims.
    pub fn claims(&self) -> Result<Claims, FormatError> {
        claims::unmarshal_claims(&self.payload, self.limits.max_nesting_depth)
    }

    /// The signing key id: protected `kid` if present, otherwise the unprotected one.
    pub fn key_id(&self) -> Result<Option<Vec<u8>>, FormatError> {
        let header = self.header()?;
        if !header.key_id.is_empty() {
            return Ok(Some(header.key_id));
        }
        Ok(self
            .unprotected
            .get_int(HEADER_LABEL_KID)
            .and_then(CborValue::as_bytes)
            .map(<[u8]>::to_vec))
    }

    /// The canonical CBOR encoding of `["Signature1", protected, external_aad, payload]`.
    ///
    /// This is the exact byte string the signer hashed.
    pub fn to_be_signed(&self, external_aad: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(
            32 + self.protected.len() + external_aad.len() + self.payload.len(),
        );
        // Writing into a Vec is infallible.
        let _ = encode_sig_structure(&mut Encoder::new(&mut out), &self.protected, external_aad, &self.payload);
        out
    }
}

fn encode_sig_structure<W: Write>(
    enc: &mut Encoder<W>,
    protected: &[u8],
    external_aad: &[u8],
    payload: &[u8],
) -> Result<(), EncodeError<W::Error>> {
    enc.array(4)?;
    enc.str(SIG_STRUCTURE_CONTEXT_SIGNATURE1)?;
    enc.bytes(protected)?;
    enc.bytes(external_aad)?;
    enc.bytes(payload)?;
    Ok(())
}

pub fn parse_structure(input: &[u8]) -> Result<SignedStructure, FormatError> {
    parse_structure_with_limits(input, DecodeLimits::default())
}

pub fn parse_structure_with_limits(input: &[u8], limits: DecodeLimits) -> Result<SignedStructure, FormatError> {
    if input.is_empty() {
        return Err(FormatError::MalformedCose("empty input".to_string()));
    }

    let mut dec = Decoder::new(input);

    // Optional COSE_Sign1 tag (18)
    if matches!(dec.datatype().map_err(FormatError::cbor)?, Type::Tag) {
        let tag = dec.tag().map_err(FormatError::cbor)?;
        if tag != Tag::new(COSE_SIGN1_TAG) {
            return Err(FormatError::MalformedCose(
                "unexpected CBOR tag (expected COSE_Sign1 tag 18 or no tag)".to_string(),
            ));
        }
    }

    if !matches!(dec.datatype().map_err(FormatError::cbor)?, Type::Array) {
        return Err(FormatError::MalformedCose("top-level item is not an array".to_string()));
    }
    let len = dec
        .array()
        .map_err(FormatError::cbor)?
        .ok_or_else(|| FormatError::MalformedCose("indefinite-length arrays are not supported".to_string()))?;
    if len != 4 {
        return Err(FormatError::MalformedCose(format!("array length was {len}, not 4")));
    }

    let protected = read_bstr(&mut dec, "protected header")?;

    if !matches!(dec.datatype().map_err(FormatError::cbor)?, Type::Map) {
        return Err(FormatError::MalformedCose("unprotected header is not a map".to_string()));
    }
    let unprotected = decode_value(&mut dec, limits.max_nesting_depth)?;

    let payload = read_bstr(&mut dec, "payload")?;
    let signature = read_bstr(&mut dec, "signature")?;

    if dec.position() != input.len() {
        return Err(FormatError::MalformedCose("trailing bytes after COSE_Sign1".to_string()));
    }

    tracing::debug!(
        protected_len = protected.len(),
        payload_len = payload.len(),
        signature_len = signature.len(),
        "parsed COSE_Sign1"
    );

    Ok(SignedStructure {
        protected,
        unprotected,
        payload,
        signature,
        limits,
    })
}

fn read_bstr(dec: &mut Decoder<'_>, what: &str) -> Result<Vec<u8>, FormatError> {
    if !matches!(dec.datatype().map_err(FormatError::cbor)?, Type::Bytes) {
        return Err(FormatError::MalformedCose(format!("{what} is not a bstr")));
    }
    let bytes = dec
        .bytes()
        .map_err(|e| FormatError::Cbor(format!("failed to read {what}: {e}")))?;
    Ok(bytes.to_vec())
}
