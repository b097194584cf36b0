// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! XTypes v1.3 type assignability (Section 7.2.4).
//!
//! Decides whether data written as type B can be read as type A. Both sides
//! may be given as a `TypeIdentifier` or a `MinimalTypeObject`; hashed
//! identifiers are resolved through a [`TypeMap`] and aliases are followed
//! to their base type before the per-kind rules run.
//!
//! Only the MINIMAL equivalence relation is evaluated. Complete objects,
//! objects of unknown equivalence kind and EK_COMPLETE identifiers are never
//! assignable, and a hash missing from the map makes the verdict `false`:
//! resolve it through type lookup first and ask again.
//!
//! Identical identifiers are assignable without lookup. Objects always go
//! through the per-kind rules, so two equal bitsets are still rejected.
//!
//! # Example
//!
//! ```
//! use hdds_xtypes::{TypeAssignability, TypeIdentifier, TypeMap};
//!
//! let map = TypeMap::new();
//! let engine = TypeAssignability::new(&map);
//! assert!(engine.assignable(&TypeIdentifier::TK_INT32, &TypeIdentifier::TK_INT32));
//! assert!(!engine.assignable(&TypeIdentifier::TK_INT32, &TypeIdentifier::TK_INT64));
//! ```

mod collections;
mod enums;
mod keys;
mod structs;
mod unions;

#[cfg(test)]
mod tests;

pub use enums::bitmask_fits;
pub use keys::{erase_key, hold_key};

use crate::config::TypeConsistencyEnforcement;
use crate::type_id::TypeIdentifier;
use crate::type_map::TypeMap;
use crate::type_object::{MinimalAliasType, MinimalTypeObject, TypeObject};
use std::cell::Cell;

/// Alias chains longer than this are treated as unresolvable
const MAX_ALIAS_CHAIN: usize = 64;

/// Nesting limit for recursive evaluation
const MAX_DEPTH: u32 = 128;

/// One side of an assignability question
#[derive(Debug, Clone, Copy)]
pub enum TypeRef<'t> {
    Id(&'t TypeIdentifier),
    Object(&'t MinimalTypeObject),
    /// A complete TypeObject or one of unknown equivalence kind, never
    /// assignable
    Unsupported,
}

impl<'t> From<&'t TypeIdentifier> for TypeRef<'t> {
    fn from(id: &'t TypeIdentifier) -> Self {
        TypeRef::Id(id)
    }
}

impl<'t> From<&'t MinimalTypeObject> for TypeRef<'t> {
    fn from(object: &'t MinimalTypeObject) -> Self {
        TypeRef::Object(object)
    }
}

impl<'t> From<&'t TypeObject> for TypeRef<'t> {
    fn from(object: &'t TypeObject) -> Self {
        match object {
            TypeObject::Minimal(m) => TypeRef::Object(m),
            TypeObject::Complete(_) | TypeObject::Extended(_) => TypeRef::Unsupported,
        }
    }
}

/// A type with aliases stripped and hashes resolved
#[derive(Debug, Clone, Copy)]
enum Resolved<'t> {
    /// Primitive, string, plain collection, SCC, TK_NONE or extended id
    Id(&'t TypeIdentifier),
    /// Any minimal object except an alias
    Object(&'t MinimalTypeObject),
}

/// Assignability engine over a read-only [`TypeMap`]
pub struct TypeAssignability<'a> {
    type_map: &'a TypeMap,
    consistency: TypeConsistencyEnforcement,
    depth: Cell<u32>,
}

impl<'a> TypeAssignability<'a> {
    pub fn new(type_map: &'a TypeMap) -> Self {
        Self::with_consistency(type_map, TypeConsistencyEnforcement::default())
    }

    pub fn with_consistency(type_map: &'a TypeMap, consistency: TypeConsistencyEnforcement) -> Self {
        Self {
            type_map,
            consistency,
            depth: Cell::new(0),
        }
    }

    pub fn consistency(&self) -> TypeConsistencyEnforcement {
        self.consistency
    }

    /// True if a reader of type `ta` can read data written as `tb`.
    pub fn assignable<'x, 'y>(&self, ta: impl Into<TypeRef<'x>>, tb: impl Into<TypeRef<'y>>) -> bool {
        self.assignable_ref(ta.into(), tb.into())
    }

    fn assignable_ref(&self, ta: TypeRef<'_>, tb: TypeRef<'_>) -> bool {
        if let (TypeRef::Id(a), TypeRef::Id(b)) = (ta, tb) {
            if a == b {
                return true;
            }
        }

        let depth = self.depth.get();
        if depth >= MAX_DEPTH {
            log::debug!("[ASSIGNABILITY] Nesting limit reached, rejecting");
            return false;
        }
        self.depth.set(depth + 1);
        let verdict = match (self.resolve(ta), self.resolve(tb)) {
            (Some(a), Some(b)) => self.assignable_resolved(a, b),
            _ => false,
        };
        self.depth.set(depth);
        verdict
    }

    fn assignable_resolved(&self, ta: Resolved<'_>, tb: Resolved<'_>) -> bool {
        use MinimalTypeObject as M;
        use Resolved::{Id, Object};

        match (ta, tb) {
            (Id(TypeIdentifier::Primitive(a)), Id(TypeIdentifier::Primitive(b))) => a == b,
            (Id(TypeIdentifier::Primitive(kind)), Object(M::Bitmask(b))) => {
                bitmask_fits(*kind, b.header.common.bit_bound)
            }
            (Object(M::Bitmask(a)), Id(TypeIdentifier::Primitive(kind))) => {
                bitmask_fits(*kind, a.header.common.bit_bound)
            }
            (Object(M::Bitmask(a)), Object(M::Bitmask(b))) => {
                a.header.common.bit_bound == b.header.common.bit_bound
            }

            (Id(a), Id(b)) if a.is_string() => {
                (a.is_narrow_string() && b.is_narrow_string())
                    || (a.is_wide_string() && b.is_wide_string())
            }

            (Object(M::Struct(a)), Object(M::Struct(b))) => self.assignable_struct(a, b),
            (Object(M::Union(a)), Object(M::Union(b))) => self.assignable_union(a, b),
            (Object(M::Enumerated(a)), Object(M::Enumerated(b))) => enums::assignable_enum(a, b),

            (a, b) => match (collections::view(a), collections::view(b)) {
                (Some(a), Some(b)) => self.assignable_collection(&a, &b),
                // annotations, bitsets, SCC ids and extensions have no rule
                _ => false,
            },
        }
    }

    /// Minimal object behind a hashed identifier
    fn lookup(&self, id: &TypeIdentifier) -> Option<&'a MinimalTypeObject> {
        match id {
            TypeIdentifier::Minimal(_) => {
                let object = self.type_map.get(id).and_then(TypeObject::as_minimal);
                if object.is_none() {
                    log::debug!("[ASSIGNABILITY] {:?} not in type map", id);
                }
                object
            }
            _ => None,
        }
    }

    /// Strip aliases and resolve hashes; `None` when the type is unknown
    /// or only available in complete form.
    fn resolve<'t>(&'t self, ty: TypeRef<'t>) -> Option<Resolved<'t>> {
        let mut current = ty;
        for _ in 0..MAX_ALIAS_CHAIN {
            current = match current {
                TypeRef::Unsupported => return None,
                TypeRef::Object(MinimalTypeObject::Alias(alias)) => TypeRef::Id(alias.related_type()),
                TypeRef::Object(object) => return Some(Resolved::Object(object)),
                TypeRef::Id(id @ TypeIdentifier::Minimal(_)) => TypeRef::Object(self.lookup(id)?),
                TypeRef::Id(TypeIdentifier::Complete(_)) => return None,
                TypeRef::Id(id) => return Some(Resolved::Id(id)),
            };
        }
        log::debug!("[ASSIGNABILITY] Alias chain too long");
        None
    }

    /// Resolve an identifier to a minimal object, following aliases
    fn resolve_object(&self, id: &TypeIdentifier) -> Option<&'a MinimalTypeObject> {
        let mut object = self.lookup(id)?;
        for _ in 0..MAX_ALIAS_CHAIN {
            match object {
                MinimalTypeObject::Alias(alias) => object = self.lookup(alias.related_type())?,
                other => return Some(other),
            }
        }
        None
    }

    /// First non-alias type an alias refers to.
    ///
    /// Follows alias chains through the type map; stops at the first
    /// identifier that is not a resolvable alias.
    pub fn get_base_type<'t>(&'t self, alias: &'t MinimalAliasType) -> &'t TypeIdentifier {
        let mut base = alias.related_type();
        for _ in 0..MAX_ALIAS_CHAIN {
            match self.lookup(base) {
                Some(MinimalTypeObject::Alias(next)) => base = next.related_type(),
                _ => break,
            }
        }
        base
    }

    /// Equal ids or `ta` assignable from a delimited `tb`
    pub fn strongly_assignable(&self, ta: &TypeIdentifier, tb: &TypeIdentifier) -> bool {
        equal_type_id(ta, tb) || (self.assignable(ta, tb) && self.is_delimited(tb))
    }

    /// True if the type's serialized form carries its own length
    /// (Section 7.2.4.2).
    pub fn is_delimited(&self, id: &TypeIdentifier) -> bool {
        match id {
            TypeIdentifier::Primitive(_) => true,
            _ if id.is_string() => true,
            _ if id.is_plain_collection() => {
                id.plain_element().is_some_and(|e| self.is_delimited(e))
                    && id.plain_key().map_or(true, |k| self.is_delimited(k))
            }
            TypeIdentifier::Minimal(_) => self
                .lookup(id)
                .is_some_and(|object| self.is_delimited_object(object)),
            _ => false,
        }
    }

    pub fn is_delimited_object(&self, object: &MinimalTypeObject) -> bool {
        match object {
            MinimalTypeObject::Alias(alias) => self.is_delimited(self.get_base_type(alias)),
            MinimalTypeObject::Annotation(_) => is_delimited_flags(object),
            MinimalTypeObject::Struct(_) => is_delimited_flags(object),
            MinimalTypeObject::Union(_) => is_delimited_flags(object),
            MinimalTypeObject::Bitset(_) => is_delimited_flags(object),
            MinimalTypeObject::Sequence(t) => self.is_delimited(&t.element.common.type_id),
            MinimalTypeObject::Array(t) => self.is_delimited(&t.element.common.type_id),
            MinimalTypeObject::Map(t) => {
                self.is_delimited(&t.key.common.type_id)
                    && self.is_delimited(&t.element.common.type_id)
            }
            MinimalTypeObject::Enumerated(_) | MinimalTypeObject::Bitmask(_) => true,
            MinimalTypeObject::Extended(_) => false,
        }
    }
}

/// Appendable (the default) and mutable aggregates carry a DHEADER in XCDR2
fn is_delimited_flags(object: &MinimalTypeObject) -> bool {
    !object.type_flags().is_final()
}

/// Structural identity of two identifiers.
///
/// Small and large encodings of the same bound compare equal and plain
/// collection header flags are ignored.
pub fn equal_type_id(ta: &TypeIdentifier, tb: &TypeIdentifier) -> bool {
    use TypeIdentifier as T;

    match (ta, tb) {
        (T::Primitive(a), T::Primitive(b)) => a == b,
        (a, b) if a.is_narrow_string() && b.is_narrow_string() => a.string_bound() == b.string_bound(),
        (a, b) if a.is_wide_string() && b.is_wide_string() => a.string_bound() == b.string_bound(),
        (a, b) if a.is_plain_sequence() && b.is_plain_sequence() => {
            a.plain_bound() == b.plain_bound() && equal_elements(a, b)
        }
        (a, b) if a.is_plain_array() && b.is_plain_array() => {
            a.plain_array_bounds() == b.plain_array_bounds() && equal_elements(a, b)
        }
        (a, b) if a.is_plain_map() && b.is_plain_map() => {
            a.plain_bound() == b.plain_bound()
                && equal_elements(a, b)
                && match (a.plain_key(), b.plain_key()) {
                    (Some(ka), Some(kb)) => equal_type_id(ka, kb),
                    _ => false,
                }
        }
        (T::StronglyConnected(a), T::StronglyConnected(b)) => {
            a.sc_component_id == b.sc_component_id && a.scc_length == b.scc_length
        }
        (T::Minimal(a), T::Minimal(b)) | (T::Complete(a), T::Complete(b)) => a == b,
        _ => false,
    }
}

fn equal_elements(ta: &TypeIdentifier, tb: &TypeIdentifier) -> bool {
    match (ta.plain_element(), tb.plain_element()) {
        (Some(a), Some(b)) => equal_type_id(a, b),
        _ => false,
    }
}
