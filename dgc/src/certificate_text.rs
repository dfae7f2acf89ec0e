// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The textual envelope: `"HC" <version> ":" <base45 body>`.

use crate::base45;
use crate::error::{DgcError, FormatError, InputError};

const MAGIC: &[u8; 2] = b"HC";
const VERSION_SEPARATOR: u8 = b':';

/// Offset at which the separator scan starts. Byte 2 always belongs to the version tag.
const SEPARATOR_SCAN_START: usize = 3;

/// A certificate string split into its version tag and base45 body, not yet decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CertificateText<'a> {
    pub version: &'a [u8],
    pub body: &'a [u8],
}

impl<'a> CertificateText<'a> {
    pub fn parse(input: &'a [u8]) -> Result<Self, DgcError> {
        if input.is_empty() {
            return Err(InputError::Empty.into());
        }

        if !input.starts_with(MAGIC) {
            return Err(FormatError::BadMagic.into());
        }

        let separator = input
            .iter()
            .skip(SEPARATOR_SCAN_START)
            .position(|&b| b == VERSION_SEPARATOR)
            .map(|i| i + SEPARATOR_SCAN_START)
            .ok_or(FormatError::MissingSeparator)?;

        Ok(Self {
            version: &input[MAGIC.len()..separator],
            body: &input[separator + 1..],
        })
    }

    pub fn decode_body(&self) -> Result<Vec<u8>, DgcError> {
        Ok(base45::decode(self.body)?)
    }
}

/// Strip the magic and version tag and base45-decode the remainder.
pub fn decode_text(input: &[u8]) -> Result<Vec<u8>, DgcError> {
    let text = CertificateText::parse(input)?;
    let bytes = text.decode_body()?;
    tracing::trace!(
        version = %String::from_utf8_lossy(text.version),
        encoded_len = text.body.len(),
        decoded_len = bytes.len(),
        "decoded certificate text"
    );
    Ok(bytes)
}
