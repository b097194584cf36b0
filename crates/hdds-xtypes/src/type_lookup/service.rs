// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Thread-safe TypeObject registry answering TypeLookup requests.
//!
//! Entries are never overwritten: the first TypeObject registered for an
//! identifier (and the first dependency list, and the first
//! complete->minimal mapping) wins.

use super::minimal::complete_to_minimal;
use super::rpc::{
    CallResult, ContinuationPoint, RemoteExceptionCode, ReplyHeader, TypeLookupCall,
    TypeLookupGetTypeDependenciesIn, TypeLookupGetTypeDependenciesOut, TypeLookupGetTypesIn,
    TypeLookupGetTypesOut, TypeLookupReply, TypeLookupRequest, TypeLookupReturn,
};
use crate::cdr2::{serialized_size, Encoding};
use crate::error::{CdrError, Result};
use crate::flags::TypeFlag;
use crate::hashing::make_type_identifier;
use crate::type_id::TypeIdentifier;
use crate::type_map::{compute_dependencies, TypeMap};
use crate::type_object::{
    CompleteTypeObject, MinimalTypeObject, TypeIdentifierPair, TypeIdentifierTypeObjectPair,
    TypeIdentifierWithDependencies, TypeIdentifierWithSize, TypeInformation, TypeObject,
};
use parking_lot::RwLock;
use std::collections::{BTreeSet, HashMap};

/// Dependencies returned per `getTypeDependencies` reply
pub const DEFAULT_PAGE_SIZE: usize = 64;

/// DDS `RETCODE_BAD_PARAMETER`, returned for an unusable continuation point
pub const RETCODE_BAD_PARAMETER: i32 = 3;

#[derive(Default)]
struct Registry {
    type_map: TypeMap,
    complete_to_minimal: HashMap<TypeIdentifier, TypeIdentifier>,
    dependencies: HashMap<TypeIdentifier, Vec<TypeIdentifierWithSize>>,
}

impl Registry {
    fn minimal_type_identifier(&self, id: &TypeIdentifier) -> Option<TypeIdentifier> {
        if id.is_none() || id.is_fully_descriptive() {
            return Some(id.clone());
        }

        match id {
            TypeIdentifier::PlainSequenceSmall(d) => Some(TypeIdentifier::sequence(
                self.minimal_type_identifier(&d.element_identifier)?,
                u32::from(d.bound),
                d.header.element_flags,
            )),
            TypeIdentifier::PlainSequenceLarge(d) => Some(TypeIdentifier::sequence(
                self.minimal_type_identifier(&d.element_identifier)?,
                d.bound,
                d.header.element_flags,
            )),
            TypeIdentifier::PlainArraySmall(_) | TypeIdentifier::PlainArrayLarge(_) => {
                let element = self.minimal_type_identifier(id.plain_element()?)?;
                let header = id.plain_collection_header()?;
                Some(TypeIdentifier::array(
                    element,
                    &id.plain_array_bounds()?,
                    header.element_flags,
                ))
            }
            TypeIdentifier::PlainMapSmall(d) => Some(TypeIdentifier::map(
                self.minimal_type_identifier(&d.key_identifier)?,
                self.minimal_type_identifier(&d.element_identifier)?,
                u32::from(d.bound),
                d.key_flags,
                d.header.element_flags,
            )),
            TypeIdentifier::PlainMapLarge(d) => Some(TypeIdentifier::map(
                self.minimal_type_identifier(&d.key_identifier)?,
                self.minimal_type_identifier(&d.element_identifier)?,
                d.bound,
                d.key_flags,
                d.header.element_flags,
            )),
            _ => {
                let minimal = self.complete_to_minimal.get(id).cloned();
                if minimal.is_none() {
                    log::debug!("[TYPE-LOOKUP] No minimal identifier known for {:?}", id);
                }
                minimal
            }
        }
    }

    /// Union of the stored dependencies of `ids`, sorted, sized from the
    /// cached objects. Identifiers without a cached object are left out.
    fn dependencies_of(&self, ids: &[TypeIdentifier]) -> Vec<TypeIdentifierWithSize> {
        let unique: BTreeSet<&TypeIdentifier> = ids
            .iter()
            .filter_map(|id| self.dependencies.get(id))
            .flatten()
            .map(|dep| &dep.type_id)
            .collect();

        unique
            .into_iter()
            .filter_map(|id| {
                let object = self.type_map.get(id)?;
                match typeobject_size(object) {
                    Ok(size) => Some(TypeIdentifierWithSize {
                        type_id: id.clone(),
                        typeobject_serialized_size: size,
                    }),
                    Err(e) => {
                        log::warn!("[TYPE-LOOKUP] Cannot size cached TypeObject {:?}: {}", id, e);
                        None
                    }
                }
            })
            .collect()
    }

    fn with_dependencies(&self, id: &TypeIdentifier) -> Option<TypeIdentifierWithDependencies> {
        let object = self.type_map.get(id)?;
        let size = typeobject_size(object).ok()?;
        let dependent_typeids = self.dependencies_of(std::slice::from_ref(id));
        Some(TypeIdentifierWithDependencies {
            typeid_with_size: TypeIdentifierWithSize {
                type_id: id.clone(),
                typeobject_serialized_size: size,
            },
            dependent_typeid_count: i32::try_from(dependent_typeids.len()).ok()?,
            dependent_typeids,
        })
    }
}

/// Canonical serialized size of `object`, as carried in
/// `TypeIdentifierWithSize`
fn typeobject_size(object: &TypeObject) -> Result<u32> {
    let size = serialized_size(object, Encoding::typeobject())?;
    u32::try_from(size).map_err(|_| CdrError::InvalidData {
        reason: format!("TypeObject size {} does not fit in u32", size),
    })
}

/// Struct/union type flags of a cached object; other kinds carry none that
/// matter for extensibility queries.
fn aggregate_flags(object: &TypeObject) -> Option<TypeFlag> {
    match object {
        TypeObject::Minimal(MinimalTypeObject::Struct(t)) => Some(t.struct_flags),
        TypeObject::Minimal(MinimalTypeObject::Union(t)) => Some(t.union_flags),
        TypeObject::Complete(CompleteTypeObject::Struct(t)) => Some(t.struct_flags),
        TypeObject::Complete(CompleteTypeObject::Union(t)) => Some(t.union_flags),
        _ => None,
    }
}

/// TypeObject cache shared between the local type registry and the
/// TypeLookup request handler.
///
/// Reads (lookups, request handling) take a shared lock; registration takes
/// the exclusive lock only for the final insertions.
pub struct TypeLookupService {
    inner: RwLock<Registry>,
    page_size: usize,
}

impl Default for TypeLookupService {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeLookupService {
    pub fn new() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }

    /// Service returning at most `page_size` dependencies per reply.
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            inner: RwLock::new(Registry::default()),
            page_size: page_size.max(1),
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Cached pairs for the requested identifiers; unknown ids are skipped.
    #[must_use]
    pub fn get_type_objects(&self, type_ids: &[TypeIdentifier]) -> Vec<TypeIdentifierTypeObjectPair> {
        let registry = self.inner.read();
        type_ids
            .iter()
            .filter_map(|id| {
                registry
                    .type_map
                    .get(id)
                    .map(|object| TypeIdentifierTypeObjectPair {
                        type_identifier: id.clone(),
                        type_object: object.clone(),
                    })
            })
            .collect()
    }

    #[must_use]
    pub fn get_type_object(&self, type_id: &TypeIdentifier) -> Option<TypeObject> {
        self.inner.read().type_map.get(type_id).cloned()
    }

    pub fn add_type_objects_to_cache<I>(&self, types: I)
    where
        I: IntoIterator<Item = TypeIdentifierTypeObjectPair>,
    {
        let mut registry = self.inner.write();
        for pair in types {
            registry
                .type_map
                .entry(pair.type_identifier)
                .or_insert(pair.type_object);
        }
    }

    /// Cache `object` under `type_id`. Returns false if the id was already
    /// cached (the existing entry is kept).
    pub fn add_type_object(&self, type_id: TypeIdentifier, object: TypeObject) -> bool {
        let mut registry = self.inner.write();
        if registry.type_map.contains_key(&type_id) {
            return false;
        }
        log::debug!("[TYPE-LOOKUP] Cached TypeObject {:?}", type_id);
        registry.type_map.insert(type_id, object);
        true
    }

    /// Record the dependency list of `type_id` unless one is already known.
    pub fn add_type_dependencies(&self, type_id: TypeIdentifier, dependencies: Vec<TypeIdentifierWithSize>) {
        self.inner
            .write()
            .dependencies
            .entry(type_id)
            .or_insert(dependencies);
    }

    /// Sorted union of the dependencies of `type_ids`.
    #[must_use]
    pub fn get_type_dependencies(&self, type_ids: &[TypeIdentifier]) -> Vec<TypeIdentifierWithSize> {
        self.inner.read().dependencies_of(type_ids)
    }

    /// Dependency list recorded for a single identifier, as stored.
    #[must_use]
    pub fn get_type_dependencies_of(&self, type_id: &TypeIdentifier) -> Option<Vec<TypeIdentifierWithSize>> {
        self.inner.read().dependencies.get(type_id).cloned()
    }

    /// Record complete->minimal identifier pairs announced by a peer.
    pub fn update_type_identifier_map(&self, pairs: &[TypeIdentifierPair]) {
        let mut registry = self.inner.write();
        for pair in pairs {
            registry
                .complete_to_minimal
                .entry(pair.type_identifier1.clone())
                .or_insert_with(|| pair.type_identifier2.clone());
        }
    }

    /// Minimal identifier equivalent to `complete`.
    ///
    /// Fully descriptive identifiers map to themselves and plain collections
    /// are rebuilt from their minimal element/key identifiers; anything else
    /// needs a recorded pair.
    #[must_use]
    pub fn get_minimal_type_identifier(&self, complete: &TypeIdentifier) -> Option<TypeIdentifier> {
        self.inner.read().minimal_type_identifier(complete)
    }

    #[must_use]
    pub fn complete_to_minimal_type_object(&self, complete: &CompleteTypeObject) -> Option<MinimalTypeObject> {
        let registry = self.inner.read();
        complete_to_minimal(complete, |id| registry.minimal_type_identifier(id))
    }

    pub fn type_object_in_cache(&self, type_id: &TypeIdentifier) -> bool {
        self.inner.read().type_map.contains_key(type_id)
    }

    /// True if `type_id` or any of its recorded dependencies is a struct or
    /// union whose type flags intersect `mask`.
    pub fn extensibility(&self, mask: TypeFlag, type_id: &TypeIdentifier) -> bool {
        let registry = self.inner.read();
        let matches = |id: &TypeIdentifier| {
            registry
                .type_map
                .get(id)
                .and_then(aggregate_flags)
                .is_some_and(|flags| flags.intersects(mask))
        };

        matches(type_id)
            || registry
                .dependencies_of(std::slice::from_ref(type_id))
                .iter()
                .any(|dep| matches(&dep.type_id))
    }

    /// Hash and cache `object`, and record its dependency closure.
    ///
    /// A complete object also registers its minimal form and the pair
    /// linking both, provided the types it references were registered
    /// first.
    pub fn register_type(&self, object: TypeObject) -> Result<TypeIdentifier> {
        let size = typeobject_size(&object)?;
        let type_id = make_type_identifier(&object);
        if type_id.is_none() {
            return Err(CdrError::InvalidData {
                reason: format!(
                    "TypeObject with equivalence kind {:#04x} has no identifier",
                    object.equivalence_octet()
                ),
            });
        }

        if let TypeObject::Complete(complete) = &object {
            match self.complete_to_minimal_type_object(complete) {
                Some(minimal) => {
                    let minimal_id = self.register_type(TypeObject::Minimal(minimal))?;
                    self.update_type_identifier_map(&[TypeIdentifierPair {
                        type_identifier1: type_id.clone(),
                        type_identifier2: minimal_id,
                    }]);
                }
                None => log::warn!(
                    "[TYPE-LOOKUP] No minimal form derivable for {:?}; registering complete form only",
                    type_id
                ),
            }
        }

        let mut registry = self.inner.write();
        registry.type_map.entry(type_id.clone()).or_insert(object);

        let mut closure = BTreeSet::new();
        compute_dependencies(&registry.type_map, &type_id, &mut closure);
        closure.remove(&type_id);
        let dependencies: Vec<TypeIdentifierWithSize> = closure
            .into_iter()
            .filter(|id| id.equivalence_hash().is_some())
            .map(|id| {
                let size = registry
                    .type_map
                    .get(&id)
                    .and_then(|o| typeobject_size(o).ok())
                    .unwrap_or(0);
                TypeIdentifierWithSize {
                    type_id: id,
                    typeobject_serialized_size: size,
                }
            })
            .collect();

        log::debug!(
            "[TYPE-LOOKUP] Registered {:?} ({} bytes, {} dependencies)",
            type_id,
            size,
            dependencies.len()
        );
        registry.dependencies.entry(type_id.clone()).or_insert(dependencies);
        Ok(type_id)
    }

    /// TypeInformation advertised for a registered type.
    ///
    /// `type_id` may be the complete or the minimal identifier; the complete
    /// half stays empty for minimal-only registrations.
    #[must_use]
    pub fn type_information(&self, type_id: &TypeIdentifier) -> Option<TypeInformation> {
        let registry = self.inner.read();
        if type_id.is_complete_hash() {
            let complete = registry.with_dependencies(type_id)?;
            let minimal = registry
                .minimal_type_identifier(type_id)
                .and_then(|id| registry.with_dependencies(&id))
                .unwrap_or_default();
            Some(TypeInformation { minimal, complete })
        } else {
            Some(TypeInformation {
                minimal: registry.with_dependencies(type_id)?,
                complete: TypeIdentifierWithDependencies::default(),
            })
        }
    }

    /// Copy of the cache, for use with the assignability engine.
    #[must_use]
    pub fn snapshot(&self) -> TypeMap {
        self.inner.read().type_map.clone()
    }

    /// Answer a TypeLookup request from the cache.
    pub fn handle_request(&self, request: &TypeLookupRequest) -> TypeLookupReply {
        let mut header = ReplyHeader {
            related_request_id: request.header.request_id,
            remote_ex: RemoteExceptionCode::Ok,
        };

        let return_value = match &request.data {
            TypeLookupCall::GetTypes(input) => TypeLookupReturn::GetTypes(self.handle_get_types(input)),
            TypeLookupCall::GetTypeDependencies(input) => {
                let result = self.handle_get_type_dependencies(input);
                if matches!(result, CallResult::Err(_)) {
                    header.remote_ex = RemoteExceptionCode::InvalidArgument;
                }
                TypeLookupReturn::GetTypeDependencies(result)
            }
            TypeLookupCall::Unknown(kind) => {
                log::debug!("[TYPE-LOOKUP] Unknown call kind {:#x}", kind);
                header.remote_ex = RemoteExceptionCode::UnknownOperation;
                TypeLookupReturn::Unknown(*kind)
            }
        };

        TypeLookupReply { header, return_value }
    }

    fn handle_get_types(&self, input: &TypeLookupGetTypesIn) -> CallResult<TypeLookupGetTypesOut> {
        let types = self.get_type_objects(&input.type_ids);
        let registry = self.inner.read();
        let complete_to_minimal = input
            .type_ids
            .iter()
            .filter(|id| id.is_complete_hash())
            .filter_map(|id| {
                registry
                    .complete_to_minimal
                    .get(id)
                    .map(|minimal| TypeIdentifierPair {
                        type_identifier1: id.clone(),
                        type_identifier2: minimal.clone(),
                    })
            })
            .collect();
        log::debug!(
            "[TYPE-LOOKUP] getTypes: {} requested, {} found",
            input.type_ids.len(),
            types.len()
        );
        CallResult::Ok(TypeLookupGetTypesOut {
            types,
            complete_to_minimal,
        })
    }

    fn handle_get_type_dependencies(
        &self,
        input: &TypeLookupGetTypeDependenciesIn,
    ) -> CallResult<TypeLookupGetTypeDependenciesOut> {
        let page = if input.continuation_point.is_empty() {
            0
        } else {
            match input.continuation_point.page() {
                Some(page) => page,
                None => {
                    log::debug!("[TYPE-LOOKUP] Rejecting foreign continuation point");
                    return CallResult::Err(RETCODE_BAD_PARAMETER);
                }
            }
        };

        let all = self.get_type_dependencies(&input.type_ids);
        let start = match (page as usize).checked_mul(self.page_size) {
            Some(start) if start <= all.len() => start,
            _ => {
                log::debug!("[TYPE-LOOKUP] Continuation page {} out of range", page);
                return CallResult::Err(RETCODE_BAD_PARAMETER);
            }
        };
        let end = start.saturating_add(self.page_size).min(all.len());
        let continuation_point = if end < all.len() {
            ContinuationPoint::from_page(page + 1)
        } else {
            ContinuationPoint::new()
        };

        CallResult::Ok(TypeLookupGetTypeDependenciesOut {
            dependent_typeids: all[start..end].to_vec(),
            continuation_point,
        })
    }
}
