// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Sequence, array and map rules.
//!
//! Plain collection identifiers and collection TypeObjects are compared
//! through one view so that `sequence<T>` given either way matches.

use super::{Resolved, TypeAssignability};
use crate::type_id::TypeIdentifier;
use crate::type_object::MinimalTypeObject;
use std::borrow::Cow;

/// Shape of a collection type, independent of how it was described
pub(super) enum CollectionView<'t> {
    Sequence {
        element: &'t TypeIdentifier,
    },
    Array {
        bounds: Cow<'t, [u32]>,
        element: &'t TypeIdentifier,
    },
    Map {
        key: &'t TypeIdentifier,
        element: &'t TypeIdentifier,
    },
}

pub(super) fn view<'t>(ty: Resolved<'t>) -> Option<CollectionView<'t>> {
    match ty {
        Resolved::Id(id) => {
            let element = id.plain_element()?;
            if id.is_plain_sequence() {
                Some(CollectionView::Sequence { element })
            } else if id.is_plain_array() {
                Some(CollectionView::Array {
                    bounds: Cow::Owned(id.plain_array_bounds()?),
                    element,
                })
            } else {
                Some(CollectionView::Map {
                    key: id.plain_key()?,
                    element,
                })
            }
        }
        Resolved::Object(MinimalTypeObject::Sequence(t)) => Some(CollectionView::Sequence {
            element: &t.element.common.type_id,
        }),
        Resolved::Object(MinimalTypeObject::Array(t)) => Some(CollectionView::Array {
            bounds: Cow::Borrowed(t.header.common.bound_seq.as_slice()),
            element: &t.element.common.type_id,
        }),
        Resolved::Object(MinimalTypeObject::Map(t)) => Some(CollectionView::Map {
            key: &t.key.common.type_id,
            element: &t.element.common.type_id,
        }),
        Resolved::Object(_) => None,
    }
}

impl TypeAssignability<'_> {
    /// Sequence bounds are not compared; array dimensions must be equal.
    pub(super) fn assignable_collection(&self, ta: &CollectionView<'_>, tb: &CollectionView<'_>) -> bool {
        match (ta, tb) {
            (CollectionView::Sequence { element: ea }, CollectionView::Sequence { element: eb }) => {
                self.strongly_assignable(ea, eb)
            }
            (
                CollectionView::Array {
                    bounds: ba,
                    element: ea,
                },
                CollectionView::Array {
                    bounds: bb,
                    element: eb,
                },
            ) => {
                if ba != bb {
                    log::debug!("[ASSIGNABILITY] Array bounds differ: {:?} vs {:?}", ba, bb);
                    return false;
                }
                self.strongly_assignable(ea, eb)
            }
            (
                CollectionView::Map {
                    key: ka,
                    element: ea,
                },
                CollectionView::Map {
                    key: kb,
                    element: eb,
                },
            ) => self.strongly_assignable(ka, kb) && self.strongly_assignable(ea, eb),
            _ => false,
        }
    }
}

/// Bound of a sequence (plain or object), 0 meaning unbounded
pub(super) fn sequence_bound(ty: Resolved<'_>) -> Option<u32> {
    match ty {
        Resolved::Id(id) if id.is_plain_sequence() => id.plain_bound(),
        Resolved::Object(MinimalTypeObject::Sequence(t)) => Some(t.header.common.bound),
        _ => None,
    }
}

/// Bound of a map (plain or object), 0 meaning unbounded
pub(super) fn map_bound(ty: Resolved<'_>) -> Option<u32> {
    match ty {
        Resolved::Id(id) if id.is_plain_map() => id.plain_bound(),
        Resolved::Object(MinimalTypeObject::Map(t)) => Some(t.header.common.bound),
        _ => None,
    }
}
