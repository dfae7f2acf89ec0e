// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Typed views of the protected header and the CWT payload.
//!
//! Only the labels below are interpreted. Unknown labels are ignored and absent
//! labels default to zero/empty; a recognised label with the wrong type is an error.

use std::collections::BTreeMap;

use crate::algorithms::CoseAlgorithm;
use crate::cbor_value::{decode_value_from_cbor, CborValue};
use crate::error::FormatError;

pub const HEADER_LABEL_ALG: i128 = 1;
pub const HEADER_LABEL_KID: i128 = 4;

pub const CLAIM_ISSUER: i128 = 1;
pub const CLAIM_EXPIRING_DATE: i128 = 4;
pub const CLAIM_ISSUED_AT: i128 = 6;
pub const CLAIM_HEALTH_CERTIFICATE: i128 = -260;

/// Key of the certificate body inside the health-certificate claim.
pub const HEALTH_CERTIFICATE_BODY: i64 = 1;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    pub algorithm: i64,
    pub key_id: Vec<u8>,
}

impl Header {
    /// The declared algorithm, if it is one this crate knows.
    pub fn cose_algorithm(&self) -> Option<CoseAlgorithm> {
        CoseAlgorithm::from_id(self.algorithm)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Claims {
    pub issuer: String,
    /// Seconds since the Unix epoch.
    pub issued_at: u64,
    /// Seconds since the Unix epoch.
    pub expiring_date: u64,
    pub health_certificate: BTreeMap<i64, CborValue>,
}

impl Claims {
    /// The certificate body (key 1 of the health-certificate claim), when it is a map.
    pub fn certificate(&self) -> Option<&[(CborValue, CborValue)]> {
        self.health_certificate.get(&HEALTH_CERTIFICATE_BODY)?.as_map()
    }

    pub fn is_expired_at(&self, unix_secs: u64) -> bool {
        self.expiring_date != 0 && unix_secs >= self.expiring_date
    }
}

pub(crate) fn unmarshal_header(protected: &[u8], max_depth: usize) -> Result<Header, FormatError> {
    // An empty protected bstr stands for an empty map.
    if protected.is_empty() {
        return Ok(Header::default());
    }

    let value = decode_value_from_cbor(protected, max_depth)?;
    let map = value.as_map().ok_or(FormatError::FieldType {
        field: "protected header",
        expected: "map",
    })?;

    let mut header = Header::default();
    if let Some(v) = lookup(map, HEADER_LABEL_ALG) {
        header.algorithm = v
            .as_integer()
            .and_then(|i| i64::try_from(i).ok())
            .ok_or(FormatError::FieldType {
                field: "alg",
                expected: "int",
            })?;
    }
    if let Some(v) = lookup(map, HEADER_LABEL_KID) {
        header.key_id = v
            .as_bytes()
            .ok_or(FormatError::FieldType {
                field: "kid",
                expected: "bstr",
            })?
            .to_vec();
    }
    Ok(header)
}

pub(crate) fn unmarshal_claims(payload: &[u8], max_depth: usize) -> Result<Claims, FormatError> {
    let value = decode_value_from_cbor(payload, max_depth)?;
    let map = value.as_map().ok_or(FormatError::FieldType {
        field: "payload",
        expected: "map",
    })?;

    let mut claims = Claims::default();
    if let Some(v) = lookup(map, CLAIM_ISSUER) {
        claims.issuer = v
            .as_text()
            .ok_or(FormatError::FieldType {
                field: "iss",
                expected: "tstr",
            })?
            .to_string();
    }
    if let Some(v) = lookup(map, CLAIM_ISSUED_AT) {
        claims.issued_at = timestamp(v, "iat")?;
    }
    if let Some(v) = lookup(map, CLAIM_EXPIRING_DATE) {
        claims.expiring_date = timestamp(v, "exp")?;
    }
    if let Some(v) = lookup(map, CLAIM_HEALTH_CERTIFICATE) {
        claims.health_certificate = health_certificate(v)?;
    }
    Ok(claims)
}

fn lookup(map: &[(CborValue, CborValue)], label: i128) -> Option<&CborValue> {
    map.iter()
        .find(|(k, _)| k.as_integer() == Some(label))
        .map(|(_, v)| v)
}

fn timestamp(value: &CborValue, field: &'static str) -> Result<u64, FormatError> {
    value
        .as_integer()
        .and_then(|i| u64::try_from(i).ok())
        .ok_or(FormatError::FieldType { field, expected: "uint" })
}

fn health_certificate(value: &CborValue) -> Result<BTreeMap<i64, CborValue>, FormatError> {
    let mismatch = FormatError::FieldType {
        field: "hcert",
        expected: "map with int keys",
    };
    let entries = value.as_map().ok_or_else(|| mismatch.clone())?;

    let mut out = BTreeMap::new();
    for (k, v) in entries {
        let key = k
            .as_integer()
            .and_then(|i| i64::try_from(i).ok())
            .ok_or_else(|| mismatch.clone())?;
        out.insert(key, v.clone());
    }
    Ok(out)
}
