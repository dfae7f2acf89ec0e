// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! An owned, untyped CBOR value.
//!
//! Used for the parts of a certificate whose schema this crate does not own
//! (unprotected headers, the health-certificate claim). Map entries keep their
//! encoded order and keys may be any value, so nothing is lost in decoding.

use minicbor::data::Type;
use minicbor::Decoder;

use crate::error::FormatError;

#[derive(Debug, Clone, PartialEq)]
pub enum CborValue {
    /// Covers the full CBOR integer range, -2^64 ..= 2^64 - 1.
    Integer(i128),
    Float(f64),
    Bytes(Vec<u8>),
    Text(String),
    Bool(bool),
    Null,
    Undefined,
    Simple(u8),
    Tag(u64, Box<CborValue>),
    Array(Vec<CborValue>),
    Map(Vec<(CborValue, CborValue)>),
}

impl CborValue {
    pub fn as_integer(&self) -> Option<i128> {
        match self {
            CborValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CborValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            CborValue::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[CborValue]> {
        match self {
            CborValue::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&[(CborValue, CborValue)]> {
        match self {
            CborValue::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Look up a map entry by integer key. `None` if this is not a map or the key is absent.
    pub fn get_int(&self, key: i128) -> Option<&CborValue> {
        self.as_map()?
            .iter()
            .find(|(k, _)| k.as_integer() == Some(key))
            .map(|(_, v)| v)
    }

    /// Look up a map entry by text key.
    pub fn get_text(&self, key: &str) -> Option<&CborValue> {
        self.as_map()?
            .iter()
            .find(|(k, _)| k.as_text() == Some(key))
            .map(|(_, v)| v)
    }
}

/// Decode exactly one CBOR item from `bytes`; trailing bytes are an error.
pub(crate) fn decode_value_from_cbor(bytes: &[u8], max_depth: usize) -> Result<CborValue, FormatError> {
    let mut dec = Decoder::new(bytes);
    let value = decode_value(&mut dec, max_depth)?;
    if dec.position() != bytes.len() {
        return Err(FormatError::Cbor("trailing bytes after CBOR item".to_string()));
    }
    Ok(value)
}

pub(crate) fn decode_value(dec: &mut Decoder<'_>, depth_left: usize) -> Result<CborValue, FormatError> {
    match dec.datatype().map_err(FormatError::cbor)? {
        Type::U8 | Type::U16 | Type::U32 | Type::U64 => {
            let u = dec.u64().map_err(FormatError::cbor)?;
            Ok(CborValue::Integer(i128::from(u)))
        }
        Type::I8 | Type::I16 | Type::I32 | Type::I64 | Type::Int => {
            let i = dec.int().map_err(FormatError::cbor)?;
            Ok(CborValue::Integer(i128::from(i)))
        }
        Type::F16 | Type::F32 | Type::F64 => {
            let f = dec.f64().map_err(FormatError::cbor)?;
            Ok(CborValue::Float(f))
        }
        Type::Bytes => {
            let b = dec.bytes().map_err(FormatError::cbor)?;
            Ok(CborValue::Bytes(b.to_vec()))
        }
        Type::String => {
            let s = dec.str().map_err(FormatError::cbor)?;
            Ok(CborValue::Text(s.to_string()))
        }
        Type::Bool => {
            let b = dec.bool().map_err(FormatError::cbor)?;
            Ok(CborValue::Bool(b))
        }
        Type::Null => {
            dec.null().map_err(FormatError::cbor)?;
            Ok(CborValue::Null)
        }
        Type::Undefined => {
            dec.undefined().map_err(FormatError::cbor)?;
            Ok(CborValue::Undefined)
        }
        Type::Simple => {
            let s = dec.simple().map_err(FormatError::cbor)?;
            Ok(CborValue::Simple(s))
        }
        Type::Tag => {
            let depth_left = nested(depth_left)?;
            let tag = dec.tag().map_err(FormatError::cbor)?;
            let inner = decode_value(dec, depth_left)?;
            Ok(CborValue::Tag(tag.as_u64(), Box::new(inner)))
        }
        Type::Array => {
            let depth_left = nested(depth_left)?;
            let len = definite(dec.array().map_err(FormatError::cbor)?, "arrays")?;
            let mut out = Vec::new();
            for _ in 0..len {
                out.push(decode_value(dec, depth_left)?);
            }
            Ok(CborValue::Array(out))
        }
        Type::Map => {
            let depth_left = nested(depth_left)?;
            let len = definite(dec.map().map_err(FormatError::cbor)?, "maps")?;
            let mut out = Vec::new();
            for _ in 0..len {
                let k = decode_value(dec, depth_left)?;
                let v = decode_value(dec, depth_left)?;
                out.push((k, v));
            }
            Ok(CborValue::Map(out))
        }
        Type::BytesIndef | Type::StringIndef | Type::ArrayIndef | Type::MapIndef => Err(FormatError::Cbor(
            "indefinite-length items are not supported".to_string(),
        )),
        other => Err(FormatError::Cbor(format!("unsupported CBOR item type: {other:?}"))),
    }
}

fn nested(depth_left: usize) -> Result<usize, FormatError> {
    depth_left
        .checked_sub(1)
        .ok_or_else(|| FormatError::Cbor("nesting depth limit exceeded".to_string()))
}

fn definite(len: Option<u64>, what: &str) -> Result<u64, FormatError> {
    len.ok_or_else(|| FormatError::Cbor(format!("indefinite-length {what} are not supported")))
}
