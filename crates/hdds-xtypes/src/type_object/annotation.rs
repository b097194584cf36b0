// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Annotation type definitions

use super::details::AnnotationParameterValue;
use crate::equivalence::NameHash;
use crate::flags::{AnnotationParameterFlag, AnnotationTypeFlag};
use crate::type_id::TypeIdentifier;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommonAnnotationParameter {
    pub member_flags: AnnotationParameterFlag,
    pub member_type_id: TypeIdentifier,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompleteAnnotationParameter {
    pub common: CommonAnnotationParameter,
    pub name: String,
    pub default_value: AnnotationParameterValue,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MinimalAnnotationParameter {
    pub common: CommonAnnotationParameter,
    pub name_hash: NameHash,
    pub default_value: AnnotationParameterValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompleteAnnotationHeader {
    pub annotation_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MinimalAnnotationHeader;

#[derive(Debug, Clone, PartialEq)]
pub struct CompleteAnnotationType {
    pub annotation_flag: AnnotationTypeFlag,
    pub header: CompleteAnnotationHeader,
    pub member_seq: Vec<CompleteAnnotationParameter>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MinimalAnnotationType {
    pub annotation_flag: AnnotationTypeFlag,
    pub header: MinimalAnnotationHeader,
    pub member_seq: Vec<MinimalAnnotationParameter>,
}
