// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Identifier pairs and TypeInformation
//!
//! TypeInformation is what endpoints advertise during discovery: the
//! top-level identifiers in both forms plus the identifiers they depend on.

use super::TypeObject;
use crate::type_id::TypeIdentifier;

/// Member ids of the two TypeInformation members
pub const TYPE_INFORMATION_MINIMAL_MEMBER_ID: u32 = 0x1001;
pub const TYPE_INFORMATION_COMPLETE_MEMBER_ID: u32 = 0x1002;

#[derive(Debug, Clone, PartialEq)]
pub struct TypeIdentifierTypeObjectPair {
    pub type_identifier: TypeIdentifier,
    pub type_object: TypeObject,
}

/// Complete identifier (1) mapped to its minimal counterpart (2)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeIdentifierPair {
    pub type_identifier1: TypeIdentifier,
    pub type_identifier2: TypeIdentifier,
}

/// Identifier plus the size of its canonically encoded TypeObject
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TypeIdentifierWithSize {
    pub type_id: TypeIdentifier,
    pub typeobject_serialized_size: u32,
}

/// `dependent_typeid_count` is -1 when unknown; `dependent_typeids` may hold
/// only a prefix of the dependencies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct TypeIdentifierWithDependencies {
    pub typeid_with_size: TypeIdentifierWithSize,
    pub dependent_typeid_count: i32,
    pub dependent_typeids: Vec<TypeIdentifierWithSize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct TypeInformation {
    pub minimal: TypeIdentifierWithDependencies,
    pub complete: TypeIdentifierWithDependencies,
}
