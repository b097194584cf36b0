// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Sequence, array and map definitions
//!
//! OMG DDS-XTypes v1.3 Section 7.3.4.7. Only collections whose element is
//! not fully describable by a plain TypeIdentifier need these objects.

use super::details::{CompleteElementDetail, CompleteTypeDetail};
use crate::flags::{CollectionElementFlag, CollectionTypeFlag};
use crate::type_id::TypeIdentifier;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommonCollectionElement {
    pub element_flags: CollectionElementFlag,
    pub type_id: TypeIdentifier,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompleteCollectionElement {
    pub common: CommonCollectionElement,
    pub detail: CompleteElementDetail,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MinimalCollectionElement {
    pub common: CommonCollectionElement,
}

impl MinimalCollectionElement {
    pub fn new(type_id: TypeIdentifier) -> Self {
        Self {
            common: CommonCollectionElement {
                element_flags: CollectionElementFlag::empty(),
                type_id,
            },
        }
    }
}

/// `bound` of 0 means unbounded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CommonCollectionHeader {
    pub bound: u32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompleteCollectionHeader {
    pub common: CommonCollectionHeader,
    pub detail: Option<CompleteTypeDetail>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MinimalCollectionHeader {
    pub common: CommonCollectionHeader,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompleteSequenceType {
    pub collection_flag: CollectionTypeFlag,
    pub header: CompleteCollectionHeader,
    pub element: CompleteCollectionElement,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MinimalSequenceType {
    pub collection_flag: CollectionTypeFlag,
    pub header: MinimalCollectionHeader,
    pub element: MinimalCollectionElement,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct CommonArrayHeader {
    pub bound_seq: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompleteArrayHeader {
    pub common: CommonArrayHeader,
    pub detail: CompleteTypeDetail,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct MinimalArrayHeader {
    pub common: CommonArrayHeader,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompleteArrayType {
    pub collection_flag: CollectionTypeFlag,
    pub header: CompleteArrayHeader,
    pub element: CompleteCollectionElement,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MinimalArrayType {
    pub collection_flag: CollectionTypeFlag,
    pub header: MinimalArrayHeader,
    pub element: MinimalCollectionElement,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompleteMapType {
    pub collection_flag: CollectionTypeFlag,
    pub header: CompleteCollectionHeader,
    pub key: CompleteCollectionElement,
    pub element: CompleteCollectionElement,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MinimalMapType {
    pub collection_flag: CollectionTypeFlag,
    pub header: MinimalCollectionHeader,
    pub key: MinimalCollectionElement,
    pub element: MinimalCollectionElement,
}
