// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Decoding and signature verification of EU Digital Green Certificates.
//!
//! A certificate travels as `HC1:` followed by base45 text. Underneath is a
//! zlib-compressed COSE_Sign1 message whose payload is a CWT claims map.
//!
//! ```no_run
//! # fn run(text: &[u8], key: dgc::PublicKey) -> Result<(), dgc::DgcError> {
//! let cose = dgc::decode_certificate(text)?;
//! let structure = dgc::parse_structure(&cose)?;
//! let header = structure.header()?;
//! let hash = header
//!     .cose_algorithm()
//!     .map_or(dgc::HashAlgorithm::Sha256, |alg| alg.hash_algorithm());
//! let valid = structure.verify(&key, hash);
//! # let _ = valid;
//! # Ok(())
//! # }
//! ```

// Internal implementation modules.
mod cbor_value;
mod certificate_text;
mod claims;
mod cose_sign1;
mod error;
mod inflate;
mod verifier;

// Public API organization (lib.rs is a publisher).
mod algorithms;
mod api;
pub mod base45;
mod public_key;
mod settings;

pub use algorithms::{CoseAlgorithm, HashAlgorithm};
pub use cbor_value::CborValue;
pub use certificate_text::{decode_text, CertificateText};
pub use claims::{Claims, Header};
pub use cose_sign1::{parse_structure, parse_structure_with_limits, SignedStructure, COSE_SIGN1_TAG};
pub use error::{Base45Error, DecompressionError, DgcError, FormatError, InputError};
pub use inflate::{inflate, inflate_with_limit};
pub use public_key::{EcdsaPublicKey, PublicKey};
pub use settings::{DecodeLimits, DecodeLimitsOverrides};
pub use verifier::{VerificationFailure, EXPECTED_CURVE_BITS};

pub use api::{decode_and_parse, decode_and_parse_with_limits, decode_certificate, decode_certificate_with_limits};
