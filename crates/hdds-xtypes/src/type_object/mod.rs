// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! TypeObject per OMG DDS-XTypes v1.3 specification
//!
//! Section 7.3.4: TypeObject
//!
//! A TypeObject is the full definition of a type, in one of two forms:
//! - **Complete**: names, annotations and every detail (documentation,
//!   code generation)
//! - **Minimal**: only what type matching needs (member ids, hashed names,
//!   flags, member types)
//!
//! Each form is a union over the type kind. Kinds this implementation does
//! not know decode into `Extended` and carry only their discriminator.

pub mod alias;
pub mod annotation;
pub mod bitsets;
pub mod collections;
pub mod compression;
pub mod details;
pub mod enums;
pub mod information;
pub mod structs;
pub mod unions;

pub use alias::*;
pub use annotation::*;
pub use bitsets::*;
pub use collections::*;
pub use compression::{compress_type_object, decompress_type_object, MAX_TYPEOBJECT_SIZE};
pub use details::*;
pub use enums::*;
pub use information::*;
pub use structs::*;
pub use unions::*;

use crate::flags::TypeFlag;
use crate::type_id::{EquivalenceKind, EK_COMPLETE, EK_MINIMAL};
use crate::type_kind::TypeKind;

/// CompleteTypeObject - union over TypeKind
#[derive(Debug, Clone, PartialEq)]
pub enum CompleteTypeObject {
    Alias(CompleteAliasType),
    Annotation(CompleteAnnotationType),
    Struct(CompleteStructType),
    Union(CompleteUnionType),
    Bitset(CompleteBitsetType),
    Sequence(CompleteSequenceType),
    Array(CompleteArrayType),
    Map(CompleteMapType),
    Enumerated(CompleteEnumeratedType),
    Bitmask(CompleteBitmaskType),
    /// Unknown kind octet
    Extended(u8),
}

/// MinimalTypeObject - union over TypeKind
#[derive(Debug, Clone, PartialEq)]
pub enum MinimalTypeObject {
    Alias(MinimalAliasType),
    Annotation(MinimalAnnotationType),
    Struct(MinimalStructType),
    Union(MinimalUnionType),
    Bitset(MinimalBitsetType),
    Sequence(MinimalSequenceType),
    Array(MinimalArrayType),
    Map(MinimalMapType),
    Enumerated(MinimalEnumeratedType),
    Bitmask(MinimalBitmaskType),
    /// Unknown kind octet
    Extended(u8),
}

/// TypeObject - union over EquivalenceKind
#[derive(Debug, Clone, PartialEq)]
pub enum TypeObject {
    Complete(CompleteTypeObject),
    Minimal(MinimalTypeObject),
    /// Equivalence kind octet this implementation does not know
    Extended(u8),
}

macro_rules! impl_kind_accessors {
    ($object:ident) => {
        impl $object {
            /// Discriminator octet (TypeKind of the defined type)
            pub fn kind(&self) -> u8 {
                match self {
                    $object::Alias(_) => TypeKind::TK_ALIAS.to_u8(),
                    $object::Annotation(_) => TypeKind::TK_ANNOTATION.to_u8(),
                    $object::Struct(_) => TypeKind::TK_STRUCTURE.to_u8(),
                    $object::Union(_) => TypeKind::TK_UNION.to_u8(),
                    $object::Bitset(_) => TypeKind::TK_BITSET.to_u8(),
                    $object::Sequence(_) => TypeKind::TK_SEQUENCE.to_u8(),
                    $object::Array(_) => TypeKind::TK_ARRAY.to_u8(),
                    $object::Map(_) => TypeKind::TK_MAP.to_u8(),
                    $object::Enumerated(_) => TypeKind::TK_ENUM.to_u8(),
                    $object::Bitmask(_) => TypeKind::TK_BITMASK.to_u8(),
                    $object::Extended(kind) => *kind,
                }
            }

            /// Type-level flags of the definition
            pub fn type_flags(&self) -> TypeFlag {
                match self {
                    $object::Alias(t) => t.alias_flags,
                    $object::Annotation(t) => t.annotation_flag,
                    $object::Struct(t) => t.struct_flags,
                    $object::Union(t) => t.union_flags,
                    $object::Bitset(t) => t.bitset_flags,
                    $object::Sequence(t) => t.collection_flag,
                    $object::Array(t) => t.collection_flag,
                    $object::Map(t) => t.collection_flag,
                    $object::Enumerated(t) => t.enum_flags,
                    $object::Bitmask(t) => t.bitmask_flags,
                    $object::Extended(_) => TypeFlag::empty(),
                }
            }
        }
    };
}

impl_kind_accessors!(CompleteTypeObject);
impl_kind_accessors!(MinimalTypeObject);

impl TypeObject {
    /// `None` for an extended object.
    pub fn equivalence_kind(&self) -> Option<EquivalenceKind> {
        match self {
            TypeObject::Complete(_) => Some(EquivalenceKind::Complete),
            TypeObject::Minimal(_) => Some(EquivalenceKind::Minimal),
            TypeObject::Extended(_) => None,
        }
    }

    /// Discriminator octet written on the wire
    pub fn equivalence_octet(&self) -> u8 {
        match self {
            TypeObject::Complete(_) => EK_COMPLETE,
            TypeObject::Minimal(_) => EK_MINIMAL,
            TypeObject::Extended(octet) => *octet,
        }
    }

    /// TypeKind octet of the defined type, TK_NONE when unknown
    pub fn kind(&self) -> u8 {
        match self {
            TypeObject::Complete(c) => c.kind(),
            TypeObject::Minimal(m) => m.kind(),
            TypeObject::Extended(_) => TypeKind::TK_NONE.to_u8(),
        }
    }

    pub fn as_minimal(&self) -> Option<&MinimalTypeObject> {
        match self {
            TypeObject::Minimal(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_complete(&self) -> Option<&CompleteTypeObject> {
        match self {
            TypeObject::Complete(c) => Some(c),
            _ => None,
        }
    }
}

impl From<MinimalTypeObject> for TypeObject {
    fn from(value: MinimalTypeObject) -> Self {
        TypeObject::Minimal(value)
    }
}

impl From<CompleteTypeObject> for TypeObject {
    fn from(value: CompleteTypeObject) -> Self {
        TypeObject::Complete(value)
    }
}
