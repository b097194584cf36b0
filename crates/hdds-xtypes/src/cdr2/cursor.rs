// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! XCDR2 write/read cursors.
//!
//! Alignment is computed from the start of the stream and never exceeds
//! 4 bytes (XCDR2 caps 8-byte primitives at 4-byte alignment). Padding
//! bytes are written as zero.

use super::{Encoding, Endianness};
use crate::error::{CdrError, Result};

/// Maximum alignment for any XCDR2 primitive
pub const XCDR2_MAX_ALIGN: usize = 4;

/// Deepest nesting of recursively decoded values (collection identifiers
/// inside collection identifiers)
pub const MAX_NESTING_DEPTH: u32 = 64;

/// Generate aligned write methods for fixed-size primitives
///
/// Each generated method aligns to `min(size, 4)` then emits the value in
/// the writer's byte order.
macro_rules! impl_write {
    ($name:ident, $type:ty, $size:expr) => {
        pub fn $name(&mut self, value: $type) {
            self.align($size);
            match self.encoding.endianness {
                Endianness::Little => self.buffer.extend_from_slice(&value.to_le_bytes()),
                Endianness::Big => self.buffer.extend_from_slice(&value.to_be_bytes()),
            }
        }
    };
}

/// Generate aligned read methods for fixed-size primitives
macro_rules! impl_read {
    ($name:ident, $type:ty, $size:expr) => {
        pub fn $name(&mut self) -> Result<$type> {
            self.align($size)?;
            let mut bytes = [0u8; $size];
            bytes.copy_from_slice(self.read_bytes($size)?);
            Ok(match self.encoding.endianness {
                Endianness::Little => <$type>::from_le_bytes(bytes),
                Endianness::Big => <$type>::from_be_bytes(bytes),
            })
        }
    };
}

/// Growable XCDR2 writer
pub struct Cdr2Writer {
    buffer: Vec<u8>,
    encoding: Encoding,
}

impl Cdr2Writer {
    pub fn new(encoding: Encoding) -> Self {
        Self {
            buffer: Vec::with_capacity(256),
            encoding,
        }
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    pub fn offset(&self) -> usize {
        self.buffer.len()
    }

    /// Pad with zeros up to `min(alignment, 4)`.
    pub fn align(&mut self, alignment: usize) {
        let alignment = alignment.min(XCDR2_MAX_ALIGN);
        if alignment <= 1 {
            return;
        }
        let padding = (alignment - self.buffer.len() % alignment) % alignment;
        self.buffer.resize(self.buffer.len() + padding, 0);
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buffer.push(value);
    }

    pub fn write_i8(&mut self, value: i8) {
        self.buffer.push(value as u8);
    }

    pub fn write_bool(&mut self, value: bool) {
        self.buffer.push(u8::from(value));
    }

    impl_write!(write_u16, u16, 2);
    impl_write!(write_i16, i16, 2);
    impl_write!(write_u32, u32, 4);
    impl_write!(write_i32, i32, 4);
    impl_write!(write_u64, u64, 8);
    impl_write!(write_i64, i64, 8);
    impl_write!(write_u128, u128, 16);

    pub fn write_f32(&mut self, value: f32) {
        self.write_u32(value.to_bits());
    }

    pub fn write_f64(&mut self, value: f64) {
        self.write_u64(value.to_bits());
    }

    /// Raw bytes, no alignment
    pub fn write_bytes(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    /// Overwrite a previously written u32 (DHEADER back-patching).
    pub(crate) fn patch_u32(&mut self, at: usize, value: u32) -> Result<()> {
        let bytes = match self.encoding.endianness {
            Endianness::Little => value.to_le_bytes(),
            Endianness::Big => value.to_be_bytes(),
        };
        let slot = self
            .buffer
            .get_mut(at..at + 4)
            .ok_or(CdrError::InvalidDelimiter { offset: at, value })?;
        slot.copy_from_slice(&bytes);
        Ok(())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }
}

/// Bounds-checked XCDR2 reader
///
/// `limit` narrows the readable window while a delimited object is being
/// decoded, so a body can never read past its DHEADER. `depth` counts the
/// recursive values currently being decoded.
pub struct Cdr2Reader<'a> {
    buffer: &'a [u8],
    offset: usize,
    limit: usize,
    depth: u32,
    encoding: Encoding,
}

impl<'a> Cdr2Reader<'a> {
    pub fn new(buffer: &'a [u8], encoding: Encoding) -> Self {
        Self {
            buffer,
            offset: 0,
            limit: buffer.len(),
            depth: 0,
            encoding,
        }
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// End of the current readable window
    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn remaining(&self) -> usize {
        self.limit.saturating_sub(self.offset)
    }

    pub fn is_eof(&self) -> bool {
        self.offset >= self.limit
    }

    /// Narrow the window to `end`, returning the previous limit.
    pub(crate) fn push_limit(&mut self, end: usize) -> Result<usize> {
        if end > self.limit {
            return Err(CdrError::UnexpectedEof {
                offset: self.offset,
                needed: end - self.offset,
            });
        }
        Ok(std::mem::replace(&mut self.limit, end))
    }

    pub(crate) fn pop_limit(&mut self, previous: usize) {
        self.limit = previous;
    }

    /// Enter one level of recursive decoding; fails past
    /// [`MAX_NESTING_DEPTH`]. Pair with [`Cdr2Reader::leave`].
    pub(crate) fn enter(&mut self) -> Result<()> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(CdrError::InvalidData {
                reason: format!("nesting deeper than {} at offset {}", MAX_NESTING_DEPTH, self.offset),
            });
        }
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub fn align(&mut self, alignment: usize) -> Result<()> {
        let alignment = alignment.min(XCDR2_MAX_ALIGN);
        if alignment <= 1 {
            return Ok(());
        }
        let padding = (alignment - self.offset % alignment) % alignment;
        self.skip(padding)
    }

    pub fn skip(&mut self, len: usize) -> Result<()> {
        if len > self.remaining() {
            return Err(CdrError::UnexpectedEof {
                offset: self.offset,
                needed: len,
            });
        }
        self.offset += len;
        Ok(())
    }

    /// Move forward to an absolute offset; moving backward is an error.
    pub fn skip_to(&mut self, end: usize) -> Result<()> {
        if end < self.offset {
            return Err(CdrError::InvalidDelimiter {
                offset: self.offset,
                value: u32::try_from(end).unwrap_or(u32::MAX),
            });
        }
        self.skip(end - self.offset)
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        if len > self.remaining() {
            return Err(CdrError::UnexpectedEof {
                offset: self.offset,
                needed: len,
            });
        }
        let slice = &self.buffer[self.offset..self.offset + len];
        self.offset += len;
        Ok(slice)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_bytes(1)?[0])
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_u8()? as i8)
    }

    pub fn read_bool(&mut self) -> Result<bool> {
        let offset = self.offset;
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(CdrError::InvalidData {
                reason: format!("boolean octet {} at offset {}", other, offset),
            }),
        }
    }

    impl_read!(read_u16, u16, 2);
    impl_read!(read_i16, i16, 2);
    impl_read!(read_u32, u32, 4);
    impl_read!(read_i32, i32, 4);
    impl_read!(read_u64, u64, 8);
    impl_read!(read_i64, i64, 8);
    impl_read!(read_u128, u128, 16);

    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(f32::from_bits(self.read_u32()?))
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        Ok(f64::from_bits(self.read_u64()?))
    }

    /// Read an aligned u32 without consuming it.
    pub(crate) fn peek_u32(&mut self) -> Result<u32> {
        self.align(4)?;
        let start = self.offset;
        let value = self.read_u32()?;
        self.offset = start;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_U16: u16 = 0xABCD;
    const TEST_U32: u32 = 0x1234_5678;
    const TEST_U64: u64 = 0x1122_3344_5566_7788;

    #[test]
    fn test_writer_alignment_caps_at_four() {
        let mut writer = Cdr2Writer::new(Encoding::xcdr2_le());
        writer.write_u8(0xAA);
        writer.write_u64(TEST_U64);
        // 1 byte + 3 padding + 8 bytes (no 8-byte alignment in XCDR2)
        assert_eq!(writer.offset(), 12);
        assert_eq!(&writer.as_bytes()[1..4], &[0, 0, 0]);
        assert_eq!(&writer.as_bytes()[4..], &TEST_U64.to_le_bytes());
    }

    #[test]
    fn test_writer_big_endian() {
        let mut writer = Cdr2Writer::new(Encoding::xcdr2_be());
        writer.write_u16(TEST_U16);
        writer.write_u32(TEST_U32);
        assert_eq!(writer.into_bytes(), vec![0xAB, 0xCD, 0, 0, 0x12, 0x34, 0x56, 0x78]);
    }

    #[test]
    fn test_reader_roundtrip_le() {
        let mut writer = Cdr2Writer::new(Encoding::xcdr2_le());
        writer.write_bool(true);
        writer.write_i16(-2);
        writer.write_i32(-70_000);
        writer.write_f64(1.5);
        let bytes = writer.into_bytes();

        let mut reader = Cdr2Reader::new(&bytes, Encoding::xcdr2_le());
        assert!(reader.read_bool().expect("bool"));
        assert_eq!(reader.read_i16().expect("i16"), -2);
        assert_eq!(reader.read_i32().expect("i32"), -70_000);
        assert_eq!(reader.read_f64().expect("f64"), 1.5);
        assert!(reader.is_eof());
    }

    #[test]
    fn test_reader_eof_reports_offset() {
        let bytes = [1u8, 2];
        let mut reader = Cdr2Reader::new(&bytes, Encoding::xcdr2_le());
        let err = reader.read_u32().expect_err("short buffer");
        assert_eq!(err, CdrError::UnexpectedEof { offset: 0, needed: 4 });
    }

    #[test]
    fn test_reader_limit_window() {
        let bytes = [0u8; 8];
        let mut reader = Cdr2Reader::new(&bytes, Encoding::xcdr2_le());
        let previous = reader.push_limit(4).expect("push");
        assert!(reader.read_u32().is_ok());
        assert!(reader.read_u8().is_err());
        reader.pop_limit(previous);
        assert!(reader.read_u32().is_ok());
    }

    #[test]
    fn test_reader_rejects_bad_bool() {
        let bytes = [2u8];
        let mut reader = Cdr2Reader::new(&bytes, Encoding::xcdr2_le());
        assert!(matches!(
            reader.read_bool(),
            Err(CdrError::InvalidData { .. })
        ));
    }

    #[test]
    fn test_peek_does_not_consume() {
        let bytes = TEST_U32.to_le_bytes();
        let mut reader = Cdr2Reader::new(&bytes, Encoding::xcdr2_le());
        assert_eq!(reader.peek_u32().expect("peek"), TEST_U32);
        assert_eq!(reader.offset(), 0);
        assert_eq!(reader.read_u32().expect("read"), TEST_U32);
    }
}
