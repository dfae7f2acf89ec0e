// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Verifier public keys.
//!
//! Loading keys from PEM/X.509 is left to the caller; this module only wraps
//! already-decoded keys from the curve crates.

/// An issuer public key. Variants this crate cannot verify with are still
/// representable so the verifier can reject them explicitly.
#[derive(Debug, Clone)]
pub enum PublicKey {
    Ecdsa(EcdsaPublicKey),
    Rsa(rsa::RsaPublicKey),
}

impl PublicKey {
    pub fn algorithm_name(&self) -> &'static str {
        match self {
            PublicKey::Ecdsa(key) => key.curve_name(),
            PublicKey::Rsa(_) => "RSA",
        }
    }
}

#[derive(Debug, Clone)]
pub enum EcdsaPublicKey {
    P256(p256::ecdsa::VerifyingKey),
    P384(p384::ecdsa::VerifyingKey),
}

impl EcdsaPublicKey {
    /// Bit size of the curve's base field.
    pub fn field_bits(&self) -> usize {
        match self {
            EcdsaPublicKey::P256(_) => 256,
            EcdsaPublicKey::P384(_) => 384,
        }
    }

    pub fn curve_name(&self) -> &'static str {
        match self {
            EcdsaPublicKey::P256(_) => "P-256",
            EcdsaPublicKey::P384(_) => "P-384",
        }
    }
}

impl From<p256::ecdsa::VerifyingKey> for PublicKey {
    fn from(key: p256::ecdsa::VerifyingKey) -> Self {
        PublicKey::Ecdsa(EcdsaPublicKey::P256(key))
    }
}

impl From<p384::ecdsa::VerifyingKey> for PublicKey {
    fn from(key: p384::ecdsa::VerifyingKey) -> Self {
        PublicKey::Ecdsa(EcdsaPublicKey::P384(key))
    }
}

impl From<rsa::RsaPublicKey> for PublicKey {
    fn from(key: rsa::RsaPublicKey) -> Self {
        PublicKey::Rsa(key)
    }
}
