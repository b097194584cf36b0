// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use super::details::{CompleteMemberDetail, CompleteTypeDetail};
use crate::equivalence::NameHash;
use crate::flags::{BitsetMemberFlag, BitsetTypeFlag};
use crate::type_kind::TypeKind;

/// One bitfield: `bitcount` bits starting at `position`, exposed as
/// `holder_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommonBitfield {
    pub position: u16,
    pub flags: BitsetMemberFlag,
    pub bitcount: u8,
    pub holder_type: TypeKind,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompleteBitfield {
    pub common: CommonBitfield,
    pub detail: CompleteMemberDetail,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MinimalBitfield {
    pub common: CommonBitfield,
    pub name_hash: NameHash,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompleteBitsetHeader {
    pub detail: CompleteTypeDetail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MinimalBitsetHeader;

#[derive(Debug, Clone, PartialEq)]
pub struct CompleteBitsetType {
    pub bitset_flags: BitsetTypeFlag,
    pub header: CompleteBitsetHeader,
    pub field_seq: Vec<CompleteBitfield>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MinimalBitsetType {
    pub bitset_flags: BitsetTypeFlag,
    pub header: MinimalBitsetHeader,
    pub field_seq: Vec<MinimalBitfield>,
}
