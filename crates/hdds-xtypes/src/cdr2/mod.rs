// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! XCDR2 codec for the XTypes type representation.
//!
//!
//! Extensible CDR version 2 (DDS-XTypes v1.3 Section 7.4.3):
//! - primitives aligned to `min(size, 4)` from the stream start
//! - FINAL aggregates: plain concatenation of members
//! - APPENDABLE aggregates: DHEADER (u32 body length) + members
//! - MUTABLE aggregates: DHEADER + one EMHEADER per member
//!
//! Every TypeObject-family type implements [`Cdr2Encode`] and
//! [`Cdr2Decode`]; [`to_bytes`], [`from_bytes`] and [`serialized_size`] are
//! the entry points.

mod cursor;
mod helpers;

mod annotations;
mod objects;
mod type_identifier;

pub use cursor::{Cdr2Reader, Cdr2Writer, MAX_NESTING_DEPTH, XCDR2_MAX_ALIGN};
pub use helpers::{
    read_delimited, read_member_header, read_mutable, read_option, read_sequence, read_string,
    read_wstring, write_delimited, write_empty_delimited, write_member, write_option,
    write_sequence, write_string, write_wstring, MemberHeader, NAME_BOUND, VERBATIM_TAG_BOUND,
};

use crate::error::Result;

/// Byte order of an XCDR2 stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Endianness {
    #[default]
    Little,
    Big,
}

/// Encoding parameters shared by a writer and the reader of its output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Encoding {
    pub endianness: Endianness,
    /// Omit the DHEADER in front of sequences of non-primitive elements
    /// (legacy peers that predate the sequence delimiter).
    pub skip_sequence_dheader: bool,
}

impl Encoding {
    /// Little-endian XCDR2
    pub const fn xcdr2_le() -> Self {
        Self {
            endianness: Endianness::Little,
            skip_sequence_dheader: false,
        }
    }

    /// Big-endian XCDR2
    pub const fn xcdr2_be() -> Self {
        Self {
            endianness: Endianness::Big,
            skip_sequence_dheader: false,
        }
    }

    /// Canonical encoding used to hash TypeObjects
    pub const fn typeobject() -> Self {
        Self::xcdr2_le()
    }

    pub const fn with_skip_sequence_dheader(mut self, skip: bool) -> Self {
        self.skip_sequence_dheader = skip;
        self
    }
}

impl Default for Encoding {
    fn default() -> Self {
        Self::xcdr2_le()
    }
}

/// Types that can be written as XCDR2
pub trait Cdr2Encode {
    fn encode_cdr2(&self, writer: &mut Cdr2Writer) -> Result<()>;
}

/// Types that can be read from XCDR2
pub trait Cdr2Decode: Sized {
    fn decode_cdr2(reader: &mut Cdr2Reader<'_>) -> Result<Self>;
}

/// Encode `value` into a fresh buffer.
pub fn to_bytes<T: Cdr2Encode + ?Sized>(value: &T, encoding: Encoding) -> Result<Vec<u8>> {
    let mut writer = Cdr2Writer::new(encoding);
    value.encode_cdr2(&mut writer)?;
    Ok(writer.into_bytes())
}

/// Decode one value from the start of `data`. Trailing bytes are ignored.
pub fn from_bytes<T: Cdr2Decode>(data: &[u8], encoding: Encoding) -> Result<T> {
    let mut reader = Cdr2Reader::new(data, encoding);
    T::decode_cdr2(&mut reader)
}

/// Number of bytes `value` occupies when encoded at offset 0.
pub fn serialized_size<T: Cdr2Encode + ?Sized>(value: &T, encoding: Encoding) -> Result<usize> {
    let mut writer = Cdr2Writer::new(encoding);
    value.encode_cdr2(&mut writer)?;
    Ok(writer.offset())
}

macro_rules! impl_cdr2_primitive {
    ($type:ty, $write:ident, $read:ident) => {
        impl Cdr2Encode for $type {
            fn encode_cdr2(&self, writer: &mut Cdr2Writer) -> Result<()> {
                writer.$write(*self);
                Ok(())
            }
        }

        impl Cdr2Decode for $type {
            fn decode_cdr2(reader: &mut Cdr2Reader<'_>) -> Result<Self> {
                reader.$read()
            }
        }
    };
}

impl_cdr2_primitive!(bool, write_bool, read_bool);
impl_cdr2_primitive!(u8, write_u8, read_u8);
impl_cdr2_primitive!(i16, write_i16, read_i16);
impl_cdr2_primitive!(u16, write_u16, read_u16);
impl_cdr2_primitive!(i32, write_i32, read_i32);
impl_cdr2_primitive!(u32, write_u32, read_u32);
impl_cdr2_primitive!(i64, write_i64, read_i64);
impl_cdr2_primitive!(u64, write_u64, read_u64);

impl Cdr2Encode for String {
    fn encode_cdr2(&self, writer: &mut Cdr2Writer) -> Result<()> {
        write_string(writer, self, None)
    }
}

impl Cdr2Decode for String {
    fn decode_cdr2(reader: &mut Cdr2Reader<'_>) -> Result<Self> {
        read_string(reader, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoding_presets() {
        assert_eq!(Encoding::typeobject(), Encoding::xcdr2_le());
        assert_eq!(Encoding::default().endianness, Endianness::Little);
        assert_eq!(Encoding::xcdr2_be().endianness, Endianness::Big);
        assert!(
            Encoding::xcdr2_le()
                .with_skip_sequence_dheader(true)
                .skip_sequence_dheader
        );
    }

    #[test]
    fn test_primitive_helpers() {
        let bytes = to_bytes(&0x0102_0304u32, Encoding::xcdr2_be()).expect("encode");
        assert_eq!(bytes, vec![1, 2, 3, 4]);
        let value: u32 = from_bytes(&bytes, Encoding::xcdr2_be()).expect("decode");
        assert_eq!(value, 0x0102_0304);
        assert_eq!(serialized_size(&7u64, Encoding::xcdr2_le()).expect("size"), 8);
    }

    #[test]
    fn test_string_encoding() {
        let bytes = to_bytes(&String::from("ab"), Encoding::xcdr2_le()).expect("encode");
        assert_eq!(bytes, vec![3, 0, 0, 0, b'a', b'b', 0]);
        let value: String = from_bytes(&bytes, Encoding::xcdr2_le()).expect("decode");
        assert_eq!(value, "ab");
    }
}
