// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Bounded zlib inflation.

use flate2::{Decompress, FlushDecompress, Status};

use crate::error::DecompressionError;
use crate::settings::DecodeLimits;

const GROW_STEP: usize = 16 * 1024;

pub fn inflate(compressed: &[u8]) -> Result<Vec<u8>, DecompressionError> {
    inflate_with_limit(compressed, DecodeLimits::default().max_inflated_len)
}

/// Inflate a zlib stream, failing once the output would exceed `max_len` bytes.
///
/// The stream must reach its end-of-stream marker; bytes after it are ignored.
pub fn inflate_with_limit(compressed: &[u8], max_len: usize) -> Result<Vec<u8>, DecompressionError> {
    let mut z = Decompress::new(true);
    let mut out = Vec::new();

    loop {
        if out.len() == out.capacity() {
            // max_len + 1 so an exactly-max_len stream can still report StreamEnd.
            let room = max_len.saturating_add(1).saturating_sub(out.len());
            if room == 0 {
                return Err(DecompressionError::LimitExceeded { limit: max_len });
            }
            out.reserve_exact(room.min(GROW_STEP.max(out.capacity())));
        }

        let before_in = z.total_in();
        let before_out = z.total_out();
        let input = &compressed[before_in as usize..];

        let status = z
            .decompress_vec(input, &mut out, FlushDecompress::None)
            .map_err(|e| DecompressionError::Corrupt(e.to_string()))?;

        if out.len() > max_len {
            return Err(DecompressionError::LimitExceeded { limit: max_len });
        }

        match status {
            Status::StreamEnd => {
                tracing::trace!(compressed_len = z.total_in(), inflated_len = out.len(), "inflated certificate");
                return Ok(out);
            }
            Status::Ok | Status::BufError => {
                let stalled = z.total_in() == before_in && z.total_out() == before_out;
                if stalled && out.len() < out.capacity() {
                    return Err(DecompressionError::Truncated);
                }
            }
        }
    }
}
