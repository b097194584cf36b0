// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Structure type definitions
//!
//! OMG DDS-XTypes v1.3 Section 7.3.4.5

use super::details::{CompleteMemberDetail, CompleteTypeDetail, MinimalMemberDetail};
use crate::flags::{StructMemberFlag, StructTypeFlag};
use crate::type_id::TypeIdentifier;

/// Member fields shared by both representations
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommonStructMember {
    pub member_id: u32,
    pub member_flags: StructMemberFlag,
    pub member_type_id: TypeIdentifier,
}

impl CommonStructMember {
    pub fn new(member_id: u32, member_flags: StructMemberFlag, member_type_id: TypeIdentifier) -> Self {
        Self {
            member_id,
            member_flags,
            member_type_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompleteStructMember {
    pub common: CommonStructMember,
    pub detail: CompleteMemberDetail,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MinimalStructMember {
    pub common: CommonStructMember,
    pub detail: MinimalMemberDetail,
}

/// `base_type` is `TypeIdentifier::None` when the struct has no base.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompleteStructHeader {
    pub base_type: TypeIdentifier,
    pub detail: CompleteTypeDetail,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct MinimalStructHeader {
    pub base_type: TypeIdentifier,
}

/// Complete structure: names and annotations retained
#[derive(Debug, Clone, PartialEq)]
pub struct CompleteStructType {
    pub struct_flags: StructTypeFlag,
    pub header: CompleteStructHeader,
    pub member_seq: Vec<CompleteStructMember>,
}

/// Minimal structure: what assignability needs, nothing more
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MinimalStructType {
    pub struct_flags: StructTypeFlag,
    pub header: MinimalStructHeader,
    pub member_seq: Vec<MinimalStructMember>,
}

impl MinimalStructType {
    pub fn member_by_id(&self, member_id: u32) -> Option<&MinimalStructMember> {
        self.member_seq
            .iter()
            .find(|m| m.common.member_id == member_id)
    }

    pub fn has_base(&self) -> bool {
        !self.header.base_type.is_none()
    }
}
