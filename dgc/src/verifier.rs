// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! COSE_Sign1 signature verification.
//!
//! Verification is a predicate, not a decode step: every outcome other than a
//! valid signature is `false`. [`SignedStructure::verify_detailed`] tells the
//! outcomes apart, and each failure is also reported as a `tracing` event.

use signature::hazmat::PrehashVerifier as _;

use crate::algorithms::HashAlgorithm;
use crate::cose_sign1::SignedStructure;
use crate::public_key::{EcdsaPublicKey, PublicKey};

/// Certificates are signed over P-256.
pub const EXPECTED_CURVE_BITS: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerificationFailure {
    #[error("public key algorithm {algorithm} is not supported")]
    UnsupportedKey { algorithm: &'static str },

    #[error("public key curve has {actual_bits} bits, expected {expected_bits}")]
    CurveMismatch { expected_bits: usize, actual_bits: usize },

    #[error("signature is {actual_len} bytes, expected {expected_len}")]
    MalformedSignature { expected_len: usize, actual_len: usize },

    #[error("signature verification failed")]
    BadSignature,
}

impl VerificationFailure {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            VerificationFailure::UnsupportedKey { .. } => "UNSUPPORTED_KEY",
            VerificationFailure::CurveMismatch { .. } => "CURVE_MISMATCH",
            VerificationFailure::MalformedSignature { .. } => "MALFORMED_SIGNATURE",
            VerificationFailure::BadSignature => "BAD_SIGNATURE",
        }
    }
}

impl SignedStructure {
    /// Verify the signature over this message's ToBeSigned bytes.
    pub fn verify(&self, public_key: &PublicKey, hash: HashAlgorithm) -> bool {
        self.verify_detailed(public_key, hash).is_ok()
    }

    pub fn verify_detailed(&self, public_key: &PublicKey, hash: HashAlgorithm) -> Result<(), VerificationFailure> {
        let result = match public_key {
            PublicKey::Ecdsa(key) => verify_ecdsa(key, hash, &self.to_be_signed(&[]), &self.signature),
            PublicKey::Rsa(_) => Err(VerificationFailure::UnsupportedKey {
                algorithm: public_key.algorithm_name(),
            }),
        };

        match &result {
            Ok(()) => tracing::debug!(key = public_key.algorithm_name(), ?hash, "signature valid"),
            Err(VerificationFailure::BadSignature) => {
                tracing::debug!(key = public_key.algorithm_name(), ?hash, "signature invalid")
            }
            Err(failure) => tracing::warn!(
                code = failure.code(),
                key = public_key.algorithm_name(),
                %failure,
                "cannot verify certificate signature"
            ),
        }
        result
    }
}

fn verify_ecdsa(
    key: &EcdsaPublicKey,
    hash: HashAlgorithm,
    to_be_signed: &[u8],
    signature: &[u8],
) -> Result<(), VerificationFailure> {
    let actual_bits = key.field_bits();
    if actual_bits != EXPECTED_CURVE_BITS {
        return Err(VerificationFailure::CurveMismatch {
            expected_bits: EXPECTED_CURVE_BITS,
            actual_bits,
        });
    }
    let EcdsaPublicKey::P256(vk) = key else {
        return Err(VerificationFailure::CurveMismatch {
            expected_bits: EXPECTED_CURVE_BITS,
            actual_bits,
        });
    };

    // COSE carries ECDSA signatures as raw r || s, each the width of the field.
    let scalar_len = actual_bits / 8;
    if signature.len() != 2 * scalar_len {
        return Err(VerificationFailure::MalformedSignature {
            expected_len: 2 * scalar_len,
            actual_len: signature.len(),
        });
    }
    let (r, s) = signature.split_at(scalar_len);

    let signature = p256::ecdsa::Signature::from_scalars(
        p256::FieldBytes::clone_from_slice(r),
        p256::FieldBytes::clone_from_slice(s),
    )
    .map_err(|_| VerificationFailure::BadSignature)?;

    let digest = hash.digest(to_be_signed);
    vk.verify_prehash(&digest, &signature)
        .map_err(|_| VerificationFailure::BadSignature)
}
