// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Enumerated and bitmask definitions
//!
//! Both share the enumerated header (`bit_bound`). Enum literals carry an
//! i32 value, bitmask flags a bit position.

use super::details::{CompleteMemberDetail, CompleteTypeDetail, MinimalMemberDetail};
use crate::flags::{BitflagFlag, BitmaskTypeFlag, EnumTypeFlag, EnumeratedLiteralFlag};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommonEnumeratedLiteral {
    pub value: i32,
    pub flags: EnumeratedLiteralFlag,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompleteEnumeratedLiteral {
    pub common: CommonEnumeratedLiteral,
    pub detail: CompleteMemberDetail,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MinimalEnumeratedLiteral {
    pub common: CommonEnumeratedLiteral,
    pub detail: MinimalMemberDetail,
}

/// Number of bits needed to hold the values (enum: <= 32, bitmask: <= 64)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CommonEnumeratedHeader {
    pub bit_bound: u16,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompleteEnumeratedHeader {
    pub common: CommonEnumeratedHeader,
    pub detail: CompleteTypeDetail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MinimalEnumeratedHeader {
    pub common: CommonEnumeratedHeader,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompleteEnumeratedType {
    pub enum_flags: EnumTypeFlag,
    pub header: CompleteEnumeratedHeader,
    pub literal_seq: Vec<CompleteEnumeratedLiteral>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MinimalEnumeratedType {
    pub enum_flags: EnumTypeFlag,
    pub header: MinimalEnumeratedHeader,
    pub literal_seq: Vec<MinimalEnumeratedLiteral>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommonBitflag {
    pub position: u16,
    pub flags: BitflagFlag,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompleteBitflag {
    pub common: CommonBitflag,
    pub detail: CompleteMemberDetail,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MinimalBitflag {
    pub common: CommonBitflag,
    pub detail: MinimalMemberDetail,
}

pub type CompleteBitmaskHeader = CompleteEnumeratedHeader;
pub type MinimalBitmaskHeader = MinimalEnumeratedHeader;

#[derive(Debug, Clone, PartialEq)]
pub struct CompleteBitmaskType {
    pub bitmask_flags: BitmaskTypeFlag,
    pub header: CompleteBitmaskHeader,
    pub flag_seq: Vec<CompleteBitflag>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MinimalBitmaskType {
    pub bitmask_flags: BitmaskTypeFlag,
    pub header: MinimalBitmaskHeader,
    pub flag_seq: Vec<MinimalBitflag>,
}
