// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Deflate-compressed TypeObject payloads.
//!
//! Large complete TypeObjects are exchanged compressed: the canonical
//! XCDR2 encoding is deflated as a whole, and the receiver inflates then
//! decodes it.

use super::TypeObject;
use crate::cdr2::{from_bytes, to_bytes, Encoding};
use crate::error::{CdrError, Result};
use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use flate2::Compression;
use std::io::{Read, Write};

/// Largest inflated TypeObject accepted by [`decompress_type_object`]
pub const MAX_TYPEOBJECT_SIZE: u32 = 1 << 20;

/// Encode `object` canonically and deflate the result.
pub fn compress_type_object(object: &TypeObject) -> Result<Vec<u8>> {
    let encoded = to_bytes(object, Encoding::typeobject())?;

    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(&encoded)
        .map_err(|e| CdrError::InvalidData {
            reason: format!("deflate failed: {}", e),
        })?;
    let compressed = encoder.finish().map_err(|e| CdrError::InvalidData {
        reason: format!("deflate failed: {}", e),
    })?;

    log::debug!(
        "[TYPE-OBJECT] Compressed TypeObject: {} bytes -> {} bytes",
        encoded.len(),
        compressed.len()
    );
    Ok(compressed)
}

/// Inflate `data` and decode the TypeObject it holds.
///
/// Inflation stops one byte past [`MAX_TYPEOBJECT_SIZE`]; larger payloads
/// are rejected with `BoundExceeded`.
pub fn decompress_type_object(data: &[u8]) -> Result<TypeObject> {
    let mut decoder = DeflateDecoder::new(data).take(u64::from(MAX_TYPEOBJECT_SIZE) + 1);
    let mut inflated = Vec::new();
    decoder
        .read_to_end(&mut inflated)
        .map_err(|e| CdrError::InvalidData {
            reason: format!("inflate failed: {}", e),
        })?;
    if inflated.len() > MAX_TYPEOBJECT_SIZE as usize {
        log::warn!(
            "[TYPE-OBJECT] Compressed TypeObject of {} bytes inflates past {} bytes",
            data.len(),
            MAX_TYPEOBJECT_SIZE
        );
        return Err(CdrError::BoundExceeded {
            offset: 0,
            bound: MAX_TYPEOBJECT_SIZE,
            length: u32::try_from(inflated.len()).unwrap_or(u32::MAX),
        });
    }

    log::debug!(
        "[TYPE-OBJECT] Decompressed TypeObject: {} bytes -> {} bytes",
        data.len(),
        inflated.len()
    );
    from_bytes(&inflated, Encoding::typeobject())
}
