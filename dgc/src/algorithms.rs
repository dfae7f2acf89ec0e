// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use sha2::{Digest as _, Sha256, Sha384, Sha512};

/// COSE signature algorithms a certificate header may declare (IANA COSE Algorithms registry).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(i64)]
pub enum CoseAlgorithm {
    /// ECDSA w/ SHA-256 over P-256.
    ES256 = -7,
    /// ECDSA w/ SHA-384 over P-384.
    ES384 = -35,
    /// ECDSA w/ SHA-512 over P-521.
    ES512 = -36,
    /// RSASSA-PSS w/ SHA-256.
    PS256 = -37,
    /// RSASSA-PKCS1v1.5 w/ SHA-256.
    RS256 = -257,
}

impl CoseAlgorithm {
    pub fn from_id(id: i64) -> Option<Self> {
        match id {
            -7 => Some(Self::ES256),
            -35 => Some(Self::ES384),
            -36 => Some(Self::ES512),
            -37 => Some(Self::PS256),
            -257 => Some(Self::RS256),
            _ => None,
        }
    }

    pub fn id(self) -> i64 {
        self as i64
    }

    /// The digest the algorithm signs over. Callers pass this to `verify`.
    pub fn hash_algorithm(self) -> HashAlgorithm {
        match self {
            Self::ES256 | Self::PS256 | Self::RS256 => HashAlgorithm::Sha256,
            Self::ES384 => HashAlgorithm::Sha384,
            Self::ES512 => HashAlgorithm::Sha512,
        }
    }
}

/// Hash functions usable for the ToBeSigned digest.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum HashAlgorithm {
    Sha256,
    Sha384,
    Sha512,
}

impl HashAlgorithm {
    pub fn digest(self, data: &[u8]) -> Vec<u8> {
        match self {
            Self::Sha256 => Sha256::digest(data).to_vec(),
            Self::Sha384 => Sha384::digest(data).to_vec(),
            Self::Sha512 => Sha512::digest(data).to_vec(),
        }
    }

    pub fn output_len(self) -> usize {
        match self {
            Self::Sha256 => 32,
            Self::Sha384 => 48,
            Self::Sha512 => 64,
        }
    }
}
