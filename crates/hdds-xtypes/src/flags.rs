// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type and member flags per OMG DDS-XTypes v1.3.
//!
//!
//! Section 7.3.4.2: every `*TypeFlag` is the same 16-bit set (extensibility
//! plus nested/autoid), every `*MemberFlag` the same 16-bit member set.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};

/// TypeFlag - extensibility and type-level properties
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(transparent)]
pub struct TypeFlag(pub u16);

impl TypeFlag {
    /// @final - no members may be added or removed
    pub const IS_FINAL: Self = Self(1 << 0);

    /// @appendable - members may only be added at the end
    pub const IS_APPENDABLE: Self = Self(1 << 1);

    /// @mutable - members identified by id, may be added/removed anywhere
    pub const IS_MUTABLE: Self = Self(1 << 2);

    /// @nested - not used as a topic type
    pub const IS_NESTED: Self = Self(1 << 3);

    /// @autoid(HASH)
    pub const IS_AUTOID_HASH: Self = Self(1 << 4);

    /// Bits retained by the minimal representation and compared by assignability.
    pub const MINIMAL_MASK: Self = Self(0x0007);

    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn bits(self) -> u16 {
        self.0
    }

    /// True if every bit of `other` is set in `self`
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// True if any bit of `other` is set in `self`
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Extensibility bits only (FINAL/APPENDABLE/MUTABLE)
    pub const fn extensibility(self) -> Self {
        Self(self.0 & Self::MINIMAL_MASK.0)
    }

    pub const fn is_final(self) -> bool {
        self.intersects(Self::IS_FINAL)
    }

    pub const fn is_appendable(self) -> bool {
        self.intersects(Self::IS_APPENDABLE)
    }

    pub const fn is_mutable(self) -> bool {
        self.intersects(Self::IS_MUTABLE)
    }
}

/// MemberFlag - member-level properties
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(transparent)]
pub struct MemberFlag(pub u16);

impl MemberFlag {
    /// Try-construct bit 1 (T1)
    pub const TRY_CONSTRUCT1: Self = Self(1 << 0);

    /// Try-construct bit 2 (T2)
    pub const TRY_CONSTRUCT2: Self = Self(1 << 1);

    /// @external
    pub const IS_EXTERNAL: Self = Self(1 << 2);

    /// @optional
    pub const IS_OPTIONAL: Self = Self(1 << 3);

    /// @must_understand
    pub const IS_MUST_UNDERSTAND: Self = Self(1 << 4);

    /// @key
    pub const IS_KEY: Self = Self(1 << 5);

    /// @default (union default case, enum default literal)
    pub const IS_DEFAULT: Self = Self(1 << 6);

    /// Bits retained by the minimal representation.
    pub const MINIMAL_MASK: Self = Self(0x003f);

    /// TRY_CONSTRUCT DISCARD (T1 only), the default try-construct policy.
    pub const DISCARD: Self = Self::TRY_CONSTRUCT1;

    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn bits(self) -> u16 {
        self.0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    pub const fn insert(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn remove(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    pub const fn is_key(self) -> bool {
        self.intersects(Self::IS_KEY)
    }

    pub const fn is_optional(self) -> bool {
        self.intersects(Self::IS_OPTIONAL)
    }

    pub const fn is_must_understand(self) -> bool {
        self.intersects(Self::IS_MUST_UNDERSTAND)
    }

    pub const fn is_default(self) -> bool {
        self.intersects(Self::IS_DEFAULT)
    }
}

macro_rules! impl_flag_ops {
    ($flag:ident, $prefix:expr) => {
        impl BitOr for $flag {
            type Output = Self;
            fn bitor(self, rhs: Self) -> Self {
                Self(self.0 | rhs.0)
            }
        }

        impl BitOrAssign for $flag {
            fn bitor_assign(&mut self, rhs: Self) {
                self.0 |= rhs.0;
            }
        }

        impl BitAnd for $flag {
            type Output = Self;
            fn bitand(self, rhs: Self) -> Self {
                Self(self.0 & rhs.0)
            }
        }

        impl fmt::Debug for $flag {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "({:#06x})"), self.0)
            }
        }
    };
}

impl_flag_ops!(TypeFlag, "TypeFlag");
impl_flag_ops!(MemberFlag, "MemberFlag");

pub type StructTypeFlag = TypeFlag;
pub type UnionTypeFlag = TypeFlag;
pub type CollectionTypeFlag = TypeFlag;
pub type AnnotationTypeFlag = TypeFlag;
pub type AliasTypeFlag = TypeFlag;
pub type EnumTypeFlag = TypeFlag;
pub type BitmaskTypeFlag = TypeFlag;
pub type BitsetTypeFlag = TypeFlag;

pub type StructMemberFlag = MemberFlag;
pub type UnionMemberFlag = MemberFlag;
pub type UnionDiscriminatorFlag = MemberFlag;
pub type CollectionElementFlag = MemberFlag;
pub type AnnotationParameterFlag = MemberFlag;
pub type AliasMemberFlag = MemberFlag;
pub type EnumeratedLiteralFlag = MemberFlag;
pub type BitflagFlag = MemberFlag;
pub type BitsetMemberFlag = MemberFlag;
