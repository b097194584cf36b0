// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! TypeMap and transitive dependency closure.
//!
//! A `TypeMap` resolves hashed TypeIdentifiers to their TypeObjects. The
//! dependency closure of an identifier is every identifier reachable from
//! it: plain collection elements and keys, member/base/discriminator types,
//! alias targets, and the annotation types applied anywhere in a complete
//! definition.

use crate::type_id::TypeIdentifier;
use crate::type_object::*;
use std::collections::{BTreeSet, HashMap};

/// Hashed identifier -> TypeObject
pub type TypeMap = HashMap<TypeIdentifier, TypeObject>;

/// Primitives, strings and EK_BOTH plain collections
pub fn is_fully_descriptive(id: &TypeIdentifier) -> bool {
    id.is_fully_descriptive()
}

pub fn is_plain_collection(id: &TypeIdentifier) -> bool {
    id.is_plain_collection()
}

/// True if `id` names a type that needs a TypeObject to be understood
pub fn has_type_object(id: &TypeIdentifier) -> bool {
    id.has_type_object()
}

/// Add `id` and everything reachable from it to `dependencies`.
///
/// Identifiers already present are not revisited, so recursive types
/// terminate. Hashed identifiers missing from `type_map` are recorded but
/// not expanded.
pub fn compute_dependencies(
    type_map: &TypeMap,
    id: &TypeIdentifier,
    dependencies: &mut BTreeSet<TypeIdentifier>,
) {
    if !dependencies.insert(id.clone()) {
        return;
    }

    if let Some(element) = id.plain_element() {
        compute_dependencies(type_map, element, dependencies);
    }
    if let Some(key) = id.plain_key() {
        compute_dependencies(type_map, key, dependencies);
    }
    if id.equivalence_hash().is_some() {
        if let Some(object) = type_map.get(id) {
            object.collect(type_map, dependencies);
        }
    }
}

/// Dependencies of a TypeObject itself (the object's own identifier is not
/// added).
pub fn compute_type_object_dependencies(
    type_map: &TypeMap,
    object: &TypeObject,
    dependencies: &mut BTreeSet<TypeIdentifier>,
) {
    object.collect(type_map, dependencies);
}

/// One step of the dependency walk for a piece of a TypeObject
trait CollectDependencies {
    fn collect(&self, map: &TypeMap, deps: &mut BTreeSet<TypeIdentifier>);
}

impl CollectDependencies for TypeIdentifier {
    fn collect(&self, map: &TypeMap, deps: &mut BTreeSet<TypeIdentifier>) {
        compute_dependencies(map, self, deps);
    }
}

impl<T: CollectDependencies> CollectDependencies for Vec<T> {
    fn collect(&self, map: &TypeMap, deps: &mut BTreeSet<TypeIdentifier>) {
        for item in self {
            item.collect(map, deps);
        }
    }
}

impl<T: CollectDependencies> CollectDependencies for Option<T> {
    fn collect(&self, map: &TypeMap, deps: &mut BTreeSet<TypeIdentifier>) {
        if let Some(value) = self {
            value.collect(map, deps);
        }
    }
}

/// Implement the walk by visiting the listed fields in order
macro_rules! collect_fields {
    ($ty:ty => $($field:ident),*) => {
        impl CollectDependencies for $ty {
            #[allow(unused_variables)]
            fn collect(&self, map: &TypeMap, deps: &mut BTreeSet<TypeIdentifier>) {
                $( self.$field.collect(map, deps); )*
            }
        }
    };
}

collect_fields!(AppliedAnnotation => annotation_typeid);
collect_fields!(CompleteTypeDetail => ann_custom);
collect_fields!(CompleteMemberDetail => ann_custom);
collect_fields!(CompleteElementDetail => ann_custom);

collect_fields!(CommonAliasBody => related_type);
collect_fields!(MinimalAliasBody => common);
collect_fields!(MinimalAliasType => body);
collect_fields!(CompleteAliasHeader => detail);
collect_fields!(CompleteAliasBody => common, ann_custom);
collect_fields!(CompleteAliasType => header, body);

collect_fields!(CommonAnnotationParameter => member_type_id);
collect_fields!(MinimalAnnotationParameter => common);
collect_fields!(MinimalAnnotationType => member_seq);
collect_fields!(CompleteAnnotationParameter => common);
collect_fields!(CompleteAnnotationType => member_seq);

collect_fields!(CommonStructMember => member_type_id);
collect_fields!(MinimalStructHeader => base_type);
collect_fields!(MinimalStructMember => common);
collect_fields!(MinimalStructType => header, member_seq);
collect_fields!(CompleteStructHeader => base_type, detail);
collect_fields!(CompleteStructMember => common, detail);
collect_fields!(CompleteStructType => header, member_seq);

collect_fields!(CommonDiscriminatorMember => type_id);
collect_fields!(CommonUnionMember => type_id);
collect_fields!(MinimalDiscriminatorMember => common);
collect_fields!(MinimalUnionMember => common);
collect_fields!(MinimalUnionType => discriminator, member_seq);
collect_fields!(CompleteUnionHeader => detail);
collect_fields!(CompleteDiscriminatorMember => common, ann_custom);
collect_fields!(CompleteUnionMember => common, detail);
collect_fields!(CompleteUnionType => header, discriminator, member_seq);

collect_fields!(MinimalBitsetType =>);
collect_fields!(CompleteBitsetHeader => detail);
collect_fields!(CompleteBitfield => detail);
collect_fields!(CompleteBitsetType => header, field_seq);

collect_fields!(CommonCollectionElement => type_id);
collect_fields!(MinimalCollectionElement => common);
collect_fields!(CompleteCollectionElement => common, detail);
collect_fields!(CompleteCollectionHeader => detail);
collect_fields!(CompleteArrayHeader => detail);
collect_fields!(MinimalSequenceType => element);
collect_fields!(CompleteSequenceType => header, element);
collect_fields!(MinimalArrayType => element);
collect_fields!(CompleteArrayType => header, element);
collect_fields!(MinimalMapType => key, element);
collect_fields!(CompleteMapType => header, key, element);

collect_fields!(MinimalEnumeratedType =>);
collect_fields!(CompleteEnumeratedHeader => detail);
collect_fields!(CompleteEnumeratedLiteral => detail);
collect_fields!(CompleteEnumeratedType => header, literal_seq);
collect_fields!(MinimalBitmaskType =>);
collect_fields!(CompleteBitflag => detail);
collect_fields!(CompleteBitmaskType => header, flag_seq);

macro_rules! collect_type_object {
    ($object:ident) => {
        impl CollectDependencies for $object {
            fn collect(&self, map: &TypeMap, deps: &mut BTreeSet<TypeIdentifier>) {
                match self {
                    $object::Alias(t) => t.collect(map, deps),
                    $object::Annotation(t) => t.collect(map, deps),
                    $object::Struct(t) => t.collect(map, deps),
                    $object::Union(t) => t.collect(map, deps),
                    $object::Bitset(t) => t.collect(map, deps),
                    $object::Sequence(t) => t.collect(map, deps),
                    $object::Array(t) => t.collect(map, deps),
                    $object::Map(t) => t.collect(map, deps),
                    $object::Enumerated(t) => t.collect(map, deps),
                    $object::Bitmask(t) => t.collect(map, deps),
                    $object::Extended(_) => {}
                }
            }
        }
    };
}

collect_type_object!(MinimalTypeObject);
collect_type_object!(CompleteTypeObject);

impl CollectDependencies for TypeObject {
    fn collect(&self, map: &TypeMap, deps: &mut BTreeSet<TypeIdentifier>) {
        match self {
            TypeObject::Complete(c) => c.collect(map, deps),
            TypeObject::Minimal(m) => m.collect(map, deps),
            TypeObject::Extended(_) => {}
        }
    }
}
