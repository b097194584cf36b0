// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Codec error type shared by every XCDR2 encode/decode routine.

use std::fmt;

/// Error raised while encoding or decoding XCDR2 data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CdrError {
    /// Fewer bytes remain (in the buffer or the enclosing DHEADER) than required.
    UnexpectedEof { offset: usize, needed: usize },
    /// A DHEADER or member length that contradicts the surrounding data.
    InvalidDelimiter { offset: usize, value: u32 },
    /// A bounded string or sequence exceeds its declared bound.
    BoundExceeded {
        offset: usize,
        bound: u32,
        length: u32,
    },
    /// Malformed string payload (missing terminator, bad UTF-8/UTF-16).
    InvalidString { offset: usize, reason: String },
    /// Unknown member flagged must-understand in a mutable aggregate.
    MustUnderstand { member_id: u32 },
    /// Value that cannot be represented on the wire or in the model.
    InvalidData { reason: String },
}

impl fmt::Display for CdrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CdrError::UnexpectedEof { offset, needed } => {
                write!(f, "unexpected end of data at offset {}: {} byte(s) needed", offset, needed)
            }
            CdrError::InvalidDelimiter { offset, value } => {
                write!(f, "invalid delimiter {} at offset {}", value, offset)
            }
            CdrError::BoundExceeded {
                offset,
                bound,
                length,
            } => write!(
                f,
                "length {} exceeds bound {} at offset {}",
                length, bound, offset
            ),
            CdrError::InvalidString { offset, reason } => {
                write!(f, "invalid string at offset {}: {}", offset, reason)
            }
            CdrError::MustUnderstand { member_id } => {
                write!(f, "unknown must-understand member id {}", member_id)
            }
            CdrError::InvalidData { reason } => write!(f, "invalid data: {}", reason),
        }
    }
}

impl std::error::Error for CdrError {}

pub type Result<T> = core::result::Result<T, CdrError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cdr_error_display_variants() {
        let err = CdrError::UnexpectedEof {
            offset: 12,
            needed: 4,
        };
        assert_eq!(
            err.to_string(),
            "unexpected end of data at offset 12: 4 byte(s) needed"
        );

        let err = CdrError::InvalidDelimiter {
            offset: 0,
            value: 2,
        };
        assert_eq!(err.to_string(), "invalid delimiter 2 at offset 0");

        let err = CdrError::BoundExceeded {
            offset: 8,
            bound: 32,
            length: 40,
        };
        assert_eq!(err.to_string(), "length 40 exceeds bound 32 at offset 8");

        let err = CdrError::MustUnderstand { member_id: 7 };
        assert_eq!(err.to_string(), "unknown must-understand member id 7");
    }
}
