// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! TypeKind and TypeIdentifier discriminators per OMG DDS-XTypes v1.3
//!
//! Section 7.3.4.1: TypeKind octets shared by `TypeIdentifier`,
//! `CompleteTypeObject` and `MinimalTypeObject` union discriminators.

/// TypeKind identifies primitive and constructed types
///
/// The numeric values are the wire discriminators. A `TypeIdentifier`
/// uses the primitive/string values directly; `TypeObject` unions use the
/// constructed values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
#[allow(non_camel_case_types)]
pub enum TypeKind {
    /// No type (used as "no base type" and as the invalid identifier)
    TK_NONE = 0x00,
    /// Boolean (1 byte)
    TK_BOOLEAN = 0x01,
    /// Octet
    TK_BYTE = 0x02,
    /// Signed 16-bit integer
    TK_INT16 = 0x03,
    /// Signed 32-bit integer
    TK_INT32 = 0x04,
    /// Signed 64-bit integer
    TK_INT64 = 0x05,
    /// Unsigned 16-bit integer
    TK_UINT16 = 0x06,
    /// Unsigned 32-bit integer
    TK_UINT32 = 0x07,
    /// Unsigned 64-bit integer
    TK_UINT64 = 0x08,
    /// 32-bit IEEE floating point
    TK_FLOAT32 = 0x09,
    /// 64-bit IEEE floating point
    TK_FLOAT64 = 0x0A,
    /// 128-bit IEEE floating point
    TK_FLOAT128 = 0x0B,
    /// Signed 8-bit integer
    TK_INT8 = 0x0C,
    /// Unsigned 8-bit integer
    TK_UINT8 = 0x0D,
    /// 8-bit character
    TK_CHAR8 = 0x10,
    /// 16-bit character
    TK_CHAR16 = 0x11,

    /// 8-bit string
    TK_STRING8 = 0x20,
    /// 16-bit string
    TK_STRING16 = 0x21,

    /// Type alias (typedef)
    TK_ALIAS = 0x30,

    /// Enumeration
    TK_ENUM = 0x40,
    /// Bitmask
    TK_BITMASK = 0x41,

    /// Annotation
    TK_ANNOTATION = 0x50,
    /// Structure
    TK_STRUCTURE = 0x51,
    /// Discriminated union
    TK_UNION = 0x52,
    /// Bitset
    TK_BITSET = 0x53,

    /// Sequence
    TK_SEQUENCE = 0x60,
    /// Array
    TK_ARRAY = 0x61,
    /// Map
    TK_MAP = 0x62,
}

// TypeIdentifier discriminators that are not TypeKinds.
pub const TI_STRING8_SMALL: u8 = 0x70;
pub const TI_STRING8_LARGE: u8 = 0x71;
pub const TI_STRING16_SMALL: u8 = 0x72;
pub const TI_STRING16_LARGE: u8 = 0x73;

pub const TI_PLAIN_SEQUENCE_SMALL: u8 = 0x80;
pub const TI_PLAIN_SEQUENCE_LARGE: u8 = 0x81;

pub const TI_PLAIN_ARRAY_SMALL: u8 = 0x90;
pub const TI_PLAIN_ARRAY_LARGE: u8 = 0x91;

pub const TI_PLAIN_MAP_SMALL: u8 = 0xA0;
pub const TI_PLAIN_MAP_LARGE: u8 = 0xA1;

pub const TI_STRONGLY_CONNECTED_COMPONENT: u8 = 0xB0;

impl TypeKind {
    /// Returns true for the fixed-size primitive kinds
    pub const fn is_primitive(self) -> bool {
        matches!(
            self,
            TypeKind::TK_BOOLEAN
                | TypeKind::TK_BYTE
                | TypeKind::TK_INT16
                | TypeKind::TK_INT32
                | TypeKind::TK_INT64
                | TypeKind::TK_UINT16
                | TypeKind::TK_UINT32
                | TypeKind::TK_UINT64
                | TypeKind::TK_FLOAT32
                | TypeKind::TK_FLOAT64
                | TypeKind::TK_FLOAT128
                | TypeKind::TK_INT8
                | TypeKind::TK_UINT8
                | TypeKind::TK_CHAR8
                | TypeKind::TK_CHAR16
        )
    }

    /// Returns true if this is a string type
    pub const fn is_string(self) -> bool {
        matches!(self, TypeKind::TK_STRING8 | TypeKind::TK_STRING16)
    }

    /// Returns true if this is a collection type (sequence, array, map)
    pub const fn is_collection(self) -> bool {
        matches!(
            self,
            TypeKind::TK_SEQUENCE | TypeKind::TK_ARRAY | TypeKind::TK_MAP
        )
    }

    /// Returns true if this is a constructed type (struct, union, enum, etc.)
    pub const fn is_constructed(self) -> bool {
        matches!(
            self,
            TypeKind::TK_ALIAS
                | TypeKind::TK_ENUM
                | TypeKind::TK_BITMASK
                | TypeKind::TK_ANNOTATION
                | TypeKind::TK_STRUCTURE
                | TypeKind::TK_UNION
                | TypeKind::TK_BITSET
        )
    }

    /// Returns true for the unsigned integer kinds a bitmask may map onto
    pub const fn is_unsigned_integer(self) -> bool {
        matches!(
            self,
            TypeKind::TK_UINT8 | TypeKind::TK_UINT16 | TypeKind::TK_UINT32 | TypeKind::TK_UINT64
        )
    }

    /// Returns the size in bytes for primitive types, None for others
    pub const fn primitive_size(self) -> Option<usize> {
        match self {
            TypeKind::TK_BOOLEAN
            | TypeKind::TK_BYTE
            | TypeKind::TK_INT8
            | TypeKind::TK_UINT8
            | TypeKind::TK_CHAR8 => Some(1),
            TypeKind::TK_INT16 | TypeKind::TK_UINT16 | TypeKind::TK_CHAR16 => Some(2),
            TypeKind::TK_INT32 | TypeKind::TK_UINT32 | TypeKind::TK_FLOAT32 => Some(4),
            TypeKind::TK_INT64 | TypeKind::TK_UINT64 | TypeKind::TK_FLOAT64 => Some(8),
            TypeKind::TK_FLOAT128 => Some(16),
            _ => None,
        }
    }

    /// Wire value of this kind
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Convert from a wire discriminator, None if the octet is not a TypeKind
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x00 => Some(TypeKind::TK_NONE),
            0x01 => Some(TypeKind::TK_BOOLEAN),
            0x02 => Some(TypeKind::TK_BYTE),
            0x03 => Some(TypeKind::TK_INT16),
            0x04 => Some(TypeKind::TK_INT32),
            0x05 => Some(TypeKind::TK_INT64),
            0x06 => Some(TypeKind::TK_UINT16),
            0x07 => Some(TypeKind::TK_UINT32),
            0x08 => Some(TypeKind::TK_UINT64),
            0x09 => Some(TypeKind::TK_FLOAT32),
            0x0A => Some(TypeKind::TK_FLOAT64),
            0x0B => Some(TypeKind::TK_FLOAT128),
            0x0C => Some(TypeKind::TK_INT8),
            0x0D => Some(TypeKind::TK_UINT8),
            0x10 => Some(TypeKind::TK_CHAR8),
            0x11 => Some(TypeKind::TK_CHAR16),
            0x20 => Some(TypeKind::TK_STRING8),
            0x21 => Some(TypeKind::TK_STRING16),
            0x30 => Some(TypeKind::TK_ALIAS),
            0x40 => Some(TypeKind::TK_ENUM),
            0x41 => Some(TypeKind::TK_BITMASK),
            0x50 => Some(TypeKind::TK_ANNOTATION),
            0x51 => Some(TypeKind::TK_STRUCTURE),
            0x52 => Some(TypeKind::TK_UNION),
            0x53 => Some(TypeKind::TK_BITSET),
            0x60 => Some(TypeKind::TK_SEQUENCE),
            0x61 => Some(TypeKind::TK_ARRAY),
            0x62 => Some(TypeKind::TK_MAP),
            _ => None,
        }
    }
}
