// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Applied annotations and type/member details.
//!
//! Complete forms carry names and annotations; minimal forms keep only the
//! 4-byte name hash needed to match members.

use crate::equivalence::{hash_member_name, NameHash};
use crate::type_id::TypeIdentifier;

/// Literal value of an annotation parameter
///
/// The variant tag is the TypeKind octet written on the wire.
#[derive(Debug, Clone, PartialEq)]
pub enum AnnotationParameterValue {
    Boolean(bool),
    Byte(u8),
    Int16(i16),
    UInt16(u16),
    Int32(i32),
    UInt32(u32),
    Int64(i64),
    UInt64(u64),
    Float32(f32),
    Float64(f64),
    /// IEEE binary128, raw bits
    Float128(u128),
    Char8(u8),
    Char16(u16),
    /// Enumerated literal value
    Enumerated(i32),
    String8(String),
    String16(String),
    /// Kind octet with no known representation; the value is dropped.
    Extended(u8),
}

impl Default for AnnotationParameterValue {
    fn default() -> Self {
        AnnotationParameterValue::Boolean(false)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppliedAnnotationParameter {
    pub paramname_hash: NameHash,
    pub value: AnnotationParameterValue,
}

impl AppliedAnnotationParameter {
    pub fn new(name: &str, value: AnnotationParameterValue) -> Self {
        Self {
            paramname_hash: hash_member_name(name),
            value,
        }
    }
}

/// User annotation applied to a type or member
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppliedAnnotation {
    pub annotation_typeid: TypeIdentifier,
    pub param_seq: Option<Vec<AppliedAnnotationParameter>>,
}

/// `@verbatim(placement, language, text)`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppliedVerbatimAnnotation {
    /// At most 32 characters
    pub placement: String,
    /// At most 32 characters
    pub language: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppliedBuiltinTypeAnnotations {
    pub verbatim: Option<AppliedVerbatimAnnotation>,
}

/// `@unit`, `@min`, `@max`, `@hashid`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppliedBuiltinMemberAnnotations {
    pub unit: Option<String>,
    pub min: Option<AnnotationParameterValue>,
    pub max: Option<AnnotationParameterValue>,
    pub hash_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompleteTypeDetail {
    pub ann_builtin: Option<AppliedBuiltinTypeAnnotations>,
    pub ann_custom: Option<Vec<AppliedAnnotation>>,
    /// Fully qualified name, at most 256 characters
    pub type_name: String,
}

impl CompleteTypeDetail {
    pub fn named(type_name: impl Into<String>) -> Self {
        Self {
            ann_builtin: None,
            ann_custom: None,
            type_name: type_name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompleteMemberDetail {
    /// At most 256 characters
    pub name: String,
    pub ann_builtin: Option<AppliedBuiltinMemberAnnotations>,
    pub ann_custom: Option<Vec<AppliedAnnotation>>,
}

impl CompleteMemberDetail {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ann_builtin: None,
            ann_custom: None,
        }
    }

    /// Minimal detail (name hash) of this member
    pub fn to_minimal(&self) -> MinimalMemberDetail {
        MinimalMemberDetail::named(&self.name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MinimalMemberDetail {
    pub name_hash: NameHash,
}

impl MinimalMemberDetail {
    pub fn named(name: &str) -> Self {
        Self {
            name_hash: hash_member_name(name),
        }
    }
}

/// Annotations of a collection element or alias target
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompleteElementDetail {
    pub ann_builtin: Option<AppliedBuiltinMemberAnnotations>,
    pub ann_custom: Option<Vec<AppliedAnnotation>>,
}
