// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Canonical TypeObject hashing
//!
//! OMG DDS-XTypes v1.3 Section 7.3.4.8: the identifier of a type defined by
//! a TypeObject is the first 14 bytes of the MD5 digest of the TypeObject
//! serialized as little-endian XCDR2.

use crate::cdr2::{to_bytes, Encoding};
use crate::equivalence::EquivalenceHash;
use crate::type_id::TypeIdentifier;
use crate::type_object::TypeObject;

/// Hash a TypeObject into its EK_MINIMAL or EK_COMPLETE identifier.
///
/// Returns `TypeIdentifier::None` for an extended object and for one that
/// cannot be encoded (for example a name longer than its bound).
pub fn make_type_identifier(type_object: &TypeObject) -> TypeIdentifier {
    make_type_identifier_with(type_object, Encoding::typeobject())
}

/// Like [`make_type_identifier`] with an explicit encoding.
///
/// Peers that omit sequence DHEADERs hash differently; this lets callers
/// reproduce their identifiers.
pub fn make_type_identifier_with(type_object: &TypeObject, encoding: Encoding) -> TypeIdentifier {
    let Some(kind) = type_object.equivalence_kind() else {
        log::debug!(
            "[TYPE-HASH] No identifier for equivalence kind {:#04x}",
            type_object.equivalence_octet()
        );
        return TypeIdentifier::None;
    };
    let bytes = match to_bytes(type_object, encoding) {
        Ok(bytes) => bytes,
        Err(e) => {
            log::warn!("[TYPE-HASH] Cannot encode TypeObject for hashing: {}", e);
            return TypeIdentifier::None;
        }
    };
    let hash = EquivalenceHash::compute(&bytes);
    log::trace!(
        "[TYPE-HASH] {} bytes -> {} ({:?})",
        bytes.len(),
        hash,
        kind
    );
    TypeIdentifier::hashed(kind, hash).unwrap_or(TypeIdentifier::None)
}
