// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Discriminated union type definitions
//!
//! OMG DDS-XTypes v1.3 Section 7.3.4.6

use super::details::{
    AppliedAnnotation, AppliedBuiltinTypeAnnotations, CompleteMemberDetail, CompleteTypeDetail,
    MinimalMemberDetail,
};
use crate::flags::{UnionDiscriminatorFlag, UnionMemberFlag, UnionTypeFlag};
use crate::type_id::TypeIdentifier;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommonUnionMember {
    pub member_id: u32,
    pub member_flags: UnionMemberFlag,
    pub type_id: TypeIdentifier,
    /// Case labels selecting this member
    pub label_seq: Vec<i32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompleteUnionMember {
    pub common: CommonUnionMember,
    pub detail: CompleteMemberDetail,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MinimalUnionMember {
    pub common: CommonUnionMember,
    pub detail: MinimalMemberDetail,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommonDiscriminatorMember {
    pub member_flags: UnionDiscriminatorFlag,
    pub type_id: TypeIdentifier,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompleteDiscriminatorMember {
    pub common: CommonDiscriminatorMember,
    pub ann_builtin: Option<AppliedBuiltinTypeAnnotations>,
    pub ann_custom: Option<Vec<AppliedAnnotation>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MinimalDiscriminatorMember {
    pub common: CommonDiscriminatorMember,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompleteUnionHeader {
    pub detail: CompleteTypeDetail,
}

/// Empty on the wire apart from its DHEADER
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MinimalUnionHeader;

#[derive(Debug, Clone, PartialEq)]
pub struct CompleteUnionType {
    pub union_flags: UnionTypeFlag,
    pub header: CompleteUnionHeader,
    pub discriminator: CompleteDiscriminatorMember,
    pub member_seq: Vec<CompleteUnionMember>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MinimalUnionType {
    pub union_flags: UnionTypeFlag,
    pub header: MinimalUnionHeader,
    pub discriminator: MinimalDiscriminatorMember,
    pub member_seq: Vec<MinimalUnionMember>,
}

impl MinimalUnionType {
    /// Member selected by `label`, or the default member
    pub fn member_for_label(&self, label: i32) -> Option<&MinimalUnionMember> {
        self.member_seq
            .iter()
            .find(|m| m.common.label_seq.contains(&label))
            .or_else(|| self.default_member())
    }

    pub fn default_member(&self) -> Option<&MinimalUnionMember> {
        self.member_seq
            .iter()
            .find(|m| m.common.member_flags.is_default())
    }
}
