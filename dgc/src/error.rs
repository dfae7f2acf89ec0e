// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Error types for the certificate decode pipeline.
//!
//! Decode failures are errors. Signature verification failures are not; see
//! [`crate::VerificationFailure`].

/// The caller supplied nothing to decode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("no certificate was provided")]
    Empty,
}

/// Invalid base45 text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Base45Error {
    #[error("invalid base45 symbol 0x{symbol:02x} at position {position}")]
    InvalidSymbol { position: usize, symbol: u8 },

    #[error("base45 input ends with a single dangling symbol")]
    DanglingSymbol,

    #[error("base45 group at position {position} does not fit its output width")]
    ValueOverflow { position: usize },
}

/// The input was understood as far as some stage and then did not match the format.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("certificate does not start with the HC magic")]
    BadMagic,

    #[error("certificate has no ':' after its version tag")]
    MissingSeparator,

    #[error("base45 decode failed: {0}")]
    Base45(#[from] Base45Error),

    #[error("malformed COSE_Sign1: {0}")]
    MalformedCose(String),

    #[error("CBOR decode failed: {0}")]
    Cbor(String),

    #[error("field `{field}` has the wrong type (expected {expected})")]
    FieldType {
        field: &'static str,
        expected: &'static str,
    },
}

impl FormatError {
    /// Normalize a CBOR library error so its type does not cross the crate boundary.
    pub(crate) fn cbor<E: std::fmt::Display>(e: E) -> Self {
        Self::Cbor(e.to_string())
    }
}

/// The zlib stream could not be inflated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecompressionError {
    #[error("corrupt zlib stream: {0}")]
    Corrupt(String),

    #[error("zlib stream ended before its end-of-stream marker")]
    Truncated,

    #[error("inflated output exceeded limit of {limit} bytes")]
    LimitExceeded { limit: usize },
}

/// Any failure of the text-to-structure pipeline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DgcError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Decompression(#[from] DecompressionError),
}

impl From<Base45Error> for DgcError {
    fn from(e: Base45Error) -> Self {
        Self::Format(FormatError::Base45(e))
    }
}
