// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use serde::Deserialize;

/// Resource limits applied while decoding untrusted certificates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeLimits {
    /// Upper bound on the inflated COSE_Sign1 size. Guards against zlib bombs.
    pub max_inflated_len: usize,
    /// Upper bound on array/map/tag nesting inside decoded CBOR values.
    pub max_nesting_depth: usize,
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self {
            max_inflated_len: 1024 * 1024, // 1 MiB; real certificates are a few KiB
            max_nesting_depth: 64,
        }
    }
}

/// Partial overrides for [`DecodeLimits`], e.g. loaded from a host's config file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DecodeLimitsOverrides {
    pub max_inflated_len: Option<usize>,
    pub max_nesting_depth: Option<usize>,
}

impl DecodeLimits {
    /// Apply overrides onto these limits. Only `Some` values override.
    pub fn apply(self, overrides: DecodeLimitsOverrides) -> Self {
        Self {
            max_inflated_len: overrides.max_inflated_len.unwrap_or(self.max_inflated_len),
            max_nesting_depth: overrides.max_nesting_depth.unwrap_or(self.max_nesting_depth),
        }
    }
}
