// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # hdds-xtypes - DDS-XTypes v1.3 type system
//!
//! Type representation and type matching for DDS topics whose definitions
//! evolve independently on each side of the wire.
//!
//! # Overview
//!
//! - **TypeIdentifier**: compact reference to a type. Primitives, strings
//!   and plain collections describe themselves; everything else is an
//!   MD5-derived hash of its TypeObject.
//! - **TypeObject**: full definition, in Complete (names, annotations) and
//!   Minimal (hashed names, matching data only) form.
//! - **XCDR2 codec**: the canonical encoding TypeObjects are hashed from and
//!   exchanged in.
//! - **Assignability**: can a reader of type A accept samples of type B?
//! - **TypeLookup**: registry and request/reply handling for discovering
//!   remote types.
//!
//! ```ignore
//! use hdds_xtypes::{make_type_identifier, TypeAssignability, TypeMap, TypeObject};
//!
//! let mut map = TypeMap::new();
//! let id = make_type_identifier(&object);
//! map.insert(id.clone(), object);
//!
//! let engine = TypeAssignability::new(&map);
//! assert!(engine.assignable(&id, &remote_id));
//! ```
//!
//! # Feature Flags
//!
//! - `config-loaders` (default): YAML loading of [`TypeConsistencyEnforcement`]
//!
//! # Specification References
//!
//! - **OMG DDS-XTypes v1.3**: <https://www.omg.org/spec/DDS-XTypes/1.3/>

pub mod assignability;
pub mod cdr2;
pub mod config;
pub mod equivalence;
pub mod error;
pub mod flags;
pub mod hashing;
pub mod type_id;
pub mod type_kind;
pub mod type_lookup;
pub mod type_map;
pub mod type_object;

pub use assignability::{equal_type_id, TypeAssignability, TypeRef};
pub use cdr2::{from_bytes, serialized_size, to_bytes, Cdr2Decode, Cdr2Encode, Encoding, Endianness};
pub use config::TypeConsistencyEnforcement;
pub use equivalence::{hash_member_name, hash_member_name_to_id, EquivalenceHash, NameHash};
pub use error::{CdrError, Result};
pub use flags::{MemberFlag, TypeFlag};
pub use hashing::make_type_identifier;
pub use type_id::{EquivalenceKind, TypeIdentifier};
pub use type_kind::TypeKind;
pub use type_lookup::{TypeLookupReply, TypeLookupRequest, TypeLookupService};
pub use type_map::{compute_dependencies, TypeMap};
pub use type_object::{
    CompleteTypeObject, MinimalTypeObject, TypeIdentifierPair, TypeIdentifierTypeObjectPair,
    TypeIdentifierWithDependencies, TypeIdentifierWithSize, TypeInformation, TypeObject,
};

/// XTypes specification version implemented
pub const XTYPES_VERSION: &str = "1.3";
