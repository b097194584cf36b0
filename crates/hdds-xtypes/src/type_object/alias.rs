// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Alias (typedef) definitions

use super::details::{
    AppliedAnnotation, AppliedBuiltinMemberAnnotations, CompleteTypeDetail,
};
use crate::flags::{AliasMemberFlag, AliasTypeFlag};
use crate::type_id::TypeIdentifier;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommonAliasBody {
    pub related_flags: AliasMemberFlag,
    pub related_type: TypeIdentifier,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompleteAliasBody {
    pub common: CommonAliasBody,
    pub ann_builtin: Option<AppliedBuiltinMemberAnnotations>,
    pub ann_custom: Option<Vec<AppliedAnnotation>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MinimalAliasBody {
    pub common: CommonAliasBody,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompleteAliasHeader {
    pub detail: CompleteTypeDetail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MinimalAliasHeader;

#[derive(Debug, Clone, PartialEq)]
pub struct CompleteAliasType {
    pub alias_flags: AliasTypeFlag,
    pub header: CompleteAliasHeader,
    pub body: CompleteAliasBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MinimalAliasType {
    pub alias_flags: AliasTypeFlag,
    pub header: MinimalAliasHeader,
    pub body: MinimalAliasBody,
}

impl MinimalAliasType {
    pub fn new(related_type: TypeIdentifier) -> Self {
        Self {
            alias_flags: AliasTypeFlag::empty(),
            header: MinimalAliasHeader,
            body: MinimalAliasBody {
                common: CommonAliasBody {
                    related_flags: AliasMemberFlag::empty(),
                    related_type,
                },
            },
        }
    }

    pub fn related_type(&self) -> &TypeIdentifier {
        &self.body.common.related_type
    }
}
