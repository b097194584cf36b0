// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! TypeIdentifier per OMG DDS-XTypes v1.3 specification
//!
//!
//! Section 7.3.4.2: TypeIdentifier
//!
//! A TypeIdentifier is a compact reference to a type. It is either fully
//! descriptive (primitives, strings, plain collections of fully descriptive
//! elements) or a 14-byte hash of the TypeObject that defines the type.

use crate::equivalence::EquivalenceHash;
use crate::flags::CollectionElementFlag;
use crate::type_kind::{
    TypeKind, TI_PLAIN_ARRAY_LARGE, TI_PLAIN_ARRAY_SMALL, TI_PLAIN_MAP_LARGE, TI_PLAIN_MAP_SMALL,
    TI_PLAIN_SEQUENCE_LARGE, TI_PLAIN_SEQUENCE_SMALL, TI_STRING16_LARGE, TI_STRING16_SMALL,
    TI_STRING8_LARGE, TI_STRING8_SMALL, TI_STRONGLY_CONNECTED_COMPONENT,
};
use std::fmt;
use std::sync::Arc;

/// Equivalence kind carried by hashed identifiers and plain collection headers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum EquivalenceKind {
    /// EK_MINIMAL - hash of the MinimalTypeObject
    Minimal = 0xF1,
    /// EK_COMPLETE - hash of the CompleteTypeObject
    Complete = 0xF2,
    /// EK_BOTH - element fully descriptive, same identifier in both forms
    Both = 0xF3,
}

pub const EK_MINIMAL: u8 = EquivalenceKind::Minimal as u8;
pub const EK_COMPLETE: u8 = EquivalenceKind::Complete as u8;
pub const EK_BOTH: u8 = EquivalenceKind::Both as u8;

impl EquivalenceKind {
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            EK_MINIMAL => Some(EquivalenceKind::Minimal),
            EK_COMPLETE => Some(EquivalenceKind::Complete),
            EK_BOTH => Some(EquivalenceKind::Both),
            _ => None,
        }
    }
}

/// Header shared by all plain collection identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlainCollectionHeader {
    pub equiv_kind: EquivalenceKind,
    pub element_flags: CollectionElementFlag,
}

impl PlainCollectionHeader {
    pub const fn new(equiv_kind: EquivalenceKind, element_flags: CollectionElementFlag) -> Self {
        Self {
            equiv_kind,
            element_flags,
        }
    }
}

/// Plain sequence with a bound that fits in one octet
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlainSequenceSElemDefn {
    pub header: PlainCollectionHeader,
    pub bound: u8,
    pub element_identifier: Arc<TypeIdentifier>,
}

/// Plain sequence with a 32-bit bound
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlainSequenceLElemDefn {
    pub header: PlainCollectionHeader,
    pub bound: u32,
    pub element_identifier: Arc<TypeIdentifier>,
}

/// Plain array whose every dimension fits in one octet
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlainArraySElemDefn {
    pub header: PlainCollectionHeader,
    pub array_bound_seq: Vec<u8>,
    pub element_identifier: Arc<TypeIdentifier>,
}

/// Plain array with 32-bit dimensions
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlainArrayLElemDefn {
    pub header: PlainCollectionHeader,
    pub array_bound_seq: Vec<u32>,
    pub element_identifier: Arc<TypeIdentifier>,
}

/// Plain map with a bound that fits in one octet
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlainMapSTypeDefn {
    pub header: PlainCollectionHeader,
    pub bound: u8,
    pub element_identifier: Arc<TypeIdentifier>,
    pub key_flags: CollectionElementFlag,
    pub key_identifier: Arc<TypeIdentifier>,
}

/// Plain map with a 32-bit bound
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlainMapLTypeDefn {
    pub header: PlainCollectionHeader,
    pub bound: u32,
    pub element_identifier: Arc<TypeIdentifier>,
    pub key_flags: CollectionElementFlag,
    pub key_identifier: Arc<TypeIdentifier>,
}

/// Hash of a TypeObject together with its equivalence kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeObjectHashId {
    pub kind: EquivalenceKind,
    pub hash: EquivalenceHash,
}

/// Identifier of a member of a strongly connected component (recursive types)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StronglyConnectedComponentId {
    pub sc_component_id: TypeObjectHashId,
    pub scc_length: i32,
    pub scc_index: i32,
}

/// TypeIdentifier - tagged reference to a type
///
/// The discriminator octet (see [`TypeIdentifier::kind`]) selects the
/// representation. Unknown discriminators decode into `Extended` so that
/// streams written by newer peers stay readable.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum TypeIdentifier {
    /// TK_NONE: no type
    #[default]
    None,

    /// Primitive type (TK_BOOLEAN through TK_CHAR16)
    Primitive(TypeKind),

    /// string<N> with N <= 255 (0 = unbounded)
    StringSmall { bound: u8 },
    /// string<N> with N > 255
    StringLarge { bound: u32 },
    /// wstring<N> with N <= 255 (0 = unbounded)
    WStringSmall { bound: u8 },
    /// wstring<N> with N > 255
    WStringLarge { bound: u32 },

    PlainSequenceSmall(PlainSequenceSElemDefn),
    PlainSequenceLarge(PlainSequenceLElemDefn),
    PlainArraySmall(PlainArraySElemDefn),
    PlainArrayLarge(PlainArrayLElemDefn),
    PlainMapSmall(PlainMapSTypeDefn),
    PlainMapLarge(PlainMapLTypeDefn),

    /// Member of a strongly connected component
    StronglyConnected(StronglyConnectedComponentId),

    /// EK_MINIMAL hash
    Minimal(EquivalenceHash),
    /// EK_COMPLETE hash
    Complete(EquivalenceHash),

    /// Discriminator this implementation does not know (kept for round-trip)
    Extended(u8),
}

impl TypeIdentifier {
    pub const TK_BOOLEAN: Self = Self::Primitive(TypeKind::TK_BOOLEAN);
    pub const TK_BYTE: Self = Self::Primitive(TypeKind::TK_BYTE);
    pub const TK_INT8: Self = Self::Primitive(TypeKind::TK_INT8);
    pub const TK_UINT8: Self = Self::Primitive(TypeKind::TK_UINT8);
    pub const TK_INT16: Self = Self::Primitive(TypeKind::TK_INT16);
    pub const TK_UINT16: Self = Self::Primitive(TypeKind::TK_UINT16);
    pub const TK_INT32: Self = Self::Primitive(TypeKind::TK_INT32);
    pub const TK_UINT32: Self = Self::Primitive(TypeKind::TK_UINT32);
    pub const TK_INT64: Self = Self::Primitive(TypeKind::TK_INT64);
    pub const TK_UINT64: Self = Self::Primitive(TypeKind::TK_UINT64);
    pub const TK_FLOAT32: Self = Self::Primitive(TypeKind::TK_FLOAT32);
    pub const TK_FLOAT64: Self = Self::Primitive(TypeKind::TK_FLOAT64);
    pub const TK_FLOAT128: Self = Self::Primitive(TypeKind::TK_FLOAT128);
    pub const TK_CHAR8: Self = Self::Primitive(TypeKind::TK_CHAR8);
    pub const TK_CHAR16: Self = Self::Primitive(TypeKind::TK_CHAR16);

    /// Wire discriminator of this identifier
    pub fn kind(&self) -> u8 {
        match self {
            TypeIdentifier::None => TypeKind::TK_NONE.to_u8(),
            TypeIdentifier::Primitive(kind) => kind.to_u8(),
            TypeIdentifier::StringSmall { .. } => TI_STRING8_SMALL,
            TypeIdentifier::StringLarge { .. } => TI_STRING8_LARGE,
            TypeIdentifier::WStringSmall { .. } => TI_STRING16_SMALL,
            TypeIdentifier::WStringLarge { .. } => TI_STRING16_LARGE,
            TypeIdentifier::PlainSequenceSmall(_) => TI_PLAIN_SEQUENCE_SMALL,
            TypeIdentifier::PlainSequenceLarge(_) => TI_PLAIN_SEQUENCE_LARGE,
            TypeIdentifier::PlainArraySmall(_) => TI_PLAIN_ARRAY_SMALL,
            TypeIdentifier::PlainArrayLarge(_) => TI_PLAIN_ARRAY_LARGE,
            TypeIdentifier::PlainMapSmall(_) => TI_PLAIN_MAP_SMALL,
            TypeIdentifier::PlainMapLarge(_) => TI_PLAIN_MAP_LARGE,
            TypeIdentifier::StronglyConnected(_) => TI_STRONGLY_CONNECTED_COMPONENT,
            TypeIdentifier::Minimal(_) => EK_MINIMAL,
            TypeIdentifier::Complete(_) => EK_COMPLETE,
            TypeIdentifier::Extended(kind) => *kind,
        }
    }

    /// Primitive identifier; non-primitive kinds map to `None`.
    pub fn primitive(kind: TypeKind) -> Self {
        if kind.is_primitive() {
            TypeIdentifier::Primitive(kind)
        } else {
            TypeIdentifier::None
        }
    }

    /// Hashed identifier of the given equivalence kind.
    ///
    /// `None` for EK_BOTH, which never names a hash.
    pub fn hashed(kind: EquivalenceKind, hash: EquivalenceHash) -> Option<Self> {
        match kind {
            EquivalenceKind::Minimal => Some(TypeIdentifier::Minimal(hash)),
            EquivalenceKind::Complete => Some(TypeIdentifier::Complete(hash)),
            EquivalenceKind::Both => None,
        }
    }

    /// `string<bound>`, choosing the small form when the bound fits an octet.
    pub fn string(bound: u32) -> Self {
        match u8::try_from(bound) {
            Ok(bound) => TypeIdentifier::StringSmall { bound },
            Err(_) => TypeIdentifier::StringLarge { bound },
        }
    }

    /// `wstring<bound>`, choosing the small form when the bound fits an octet.
    pub fn wstring(bound: u32) -> Self {
        match u8::try_from(bound) {
            Ok(bound) => TypeIdentifier::WStringSmall { bound },
            Err(_) => TypeIdentifier::WStringLarge { bound },
        }
    }

    /// Plain `sequence<element, bound>`.
    ///
    /// The header's equivalence kind is derived from the element: EK_BOTH
    /// for fully descriptive elements, otherwise the element's hash kind.
    pub fn sequence(
        element: TypeIdentifier,
        bound: u32,
        element_flags: CollectionElementFlag,
    ) -> Self {
        let header = PlainCollectionHeader::new(element.collection_equiv_kind(), element_flags);
        Self::sequence_with_header(header, element, bound)
    }

    /// Plain `sequence<element, bound>` carrying `header` as given.
    pub fn sequence_with_header(header: PlainCollectionHeader, element: TypeIdentifier, bound: u32) -> Self {
        let element_identifier = Arc::new(element);
        match u8::try_from(bound) {
            Ok(bound) => TypeIdentifier::PlainSequenceSmall(PlainSequenceSElemDefn {
                header,
                bound,
                element_identifier,
            }),
            Err(_) => TypeIdentifier::PlainSequenceLarge(PlainSequenceLElemDefn {
                header,
                bound,
                element_identifier,
            }),
        }
    }

    /// Plain array with the given dimensions.
    pub fn array(
        element: TypeIdentifier,
        dimensions: &[u32],
        element_flags: CollectionElementFlag,
    ) -> Self {
        let header = PlainCollectionHeader::new(element.collection_equiv_kind(), element_flags);
        Self::array_with_header(header, element, dimensions)
    }

    /// Plain array with the given dimensions, carrying `header` as given.
    pub fn array_with_header(header: PlainCollectionHeader, element: TypeIdentifier, dimensions: &[u32]) -> Self {
        let element_identifier = Arc::new(element);
        let small: Option<Vec<u8>> = dimensions
            .iter()
            .map(|dim| u8::try_from(*dim).ok())
            .collect();
        match small {
            Some(array_bound_seq) => TypeIdentifier::PlainArraySmall(PlainArraySElemDefn {
                header,
                array_bound_seq,
                element_identifier,
            }),
            None => TypeIdentifier::PlainArrayLarge(PlainArrayLElemDefn {
                header,
                array_bound_seq: dimensions.to_vec(),
                element_identifier,
            }),
        }
    }

    /// Plain `map<key, element, bound>`.
    ///
    /// The header takes the element's equivalence kind, or the key's when
    /// the element is fully descriptive. A key and element hashed under
    /// different kinds cannot be described by one header; build such maps
    /// with [`TypeIdentifier::map_with_header`].
    pub fn map(
        key: TypeIdentifier,
        element: TypeIdentifier,
        bound: u32,
        key_flags: CollectionElementFlag,
        element_flags: CollectionElementFlag,
    ) -> Self {
        let equiv_kind = match (key.collection_equiv_kind(), element.collection_equiv_kind()) {
            (key_kind, EquivalenceKind::Both) => key_kind,
            (EquivalenceKind::Both, element_kind) => element_kind,
            (key_kind, element_kind) => {
                if key_kind != element_kind {
                    log::warn!(
                        "[TYPE-ID] Map key is {:?} but element is {:?}; header follows the element",
                        key_kind,
                        element_kind
                    );
                }
                element_kind
            }
        };
        let header = PlainCollectionHeader::new(equiv_kind, element_flags);
        Self::map_with_header(header, key, key_flags, element, bound)
    }

    /// Plain `map<key, element, bound>` carrying `header` as given.
    pub fn map_with_header(
        header: PlainCollectionHeader,
        key: TypeIdentifier,
        key_flags: CollectionElementFlag,
        element: TypeIdentifier,
        bound: u32,
    ) -> Self {
        let element_identifier = Arc::new(element);
        let key_identifier = Arc::new(key);
        match u8::try_from(bound) {
            Ok(bound) => TypeIdentifier::PlainMapSmall(PlainMapSTypeDefn {
                header,
                bound,
                element_identifier,
                key_flags,
                key_identifier,
            }),
            Err(_) => TypeIdentifier::PlainMapLarge(PlainMapLTypeDefn {
                header,
                bound,
                element_identifier,
                key_flags,
                key_identifier,
            }),
        }
    }

    fn collection_equiv_kind(&self) -> EquivalenceKind {
        match self {
            TypeIdentifier::Minimal(_) => EquivalenceKind::Minimal,
            TypeIdentifier::Complete(_) => EquivalenceKind::Complete,
            TypeIdentifier::PlainSequenceSmall(d) => d.header.equiv_kind,
            TypeIdentifier::PlainSequenceLarge(d) => d.header.equiv_kind,
            TypeIdentifier::PlainArraySmall(d) => d.header.equiv_kind,
            TypeIdentifier::PlainArrayLarge(d) => d.header.equiv_kind,
            TypeIdentifier::PlainMapSmall(d) => d.header.equiv_kind,
            TypeIdentifier::PlainMapLarge(d) => d.header.equiv_kind,
            TypeIdentifier::StronglyConnected(scc) => scc.sc_component_id.kind,
            _ => EquivalenceKind::Both,
        }
    }

    /// Header of a plain collection identifier
    pub fn plain_collection_header(&self) -> Option<&PlainCollectionHeader> {
        match self {
            TypeIdentifier::PlainSequenceSmall(d) => Some(&d.header),
            TypeIdentifier::PlainSequenceLarge(d) => Some(&d.header),
            TypeIdentifier::PlainArraySmall(d) => Some(&d.header),
            TypeIdentifier::PlainArrayLarge(d) => Some(&d.header),
            TypeIdentifier::PlainMapSmall(d) => Some(&d.header),
            TypeIdentifier::PlainMapLarge(d) => Some(&d.header),
            _ => None,
        }
    }

    /// Element identifier of a plain collection
    pub fn plain_element(&self) -> Option<&TypeIdentifier> {
        match self {
            TypeIdentifier::PlainSequenceSmall(d) => Some(&d.element_identifier),
            TypeIdentifier::PlainSequenceLarge(d) => Some(&d.element_identifier),
            TypeIdentifier::PlainArraySmall(d) => Some(&d.element_identifier),
            TypeIdentifier::PlainArrayLarge(d) => Some(&d.element_identifier),
            TypeIdentifier::PlainMapSmall(d) => Some(&d.element_identifier),
            TypeIdentifier::PlainMapLarge(d) => Some(&d.element_identifier),
            _ => None,
        }
    }

    /// Key identifier of a plain map
    pub fn plain_key(&self) -> Option<&TypeIdentifier> {
        match self {
            TypeIdentifier::PlainMapSmall(d) => Some(&d.key_identifier),
            TypeIdentifier::PlainMapLarge(d) => Some(&d.key_identifier),
            _ => None,
        }
    }

    /// Equivalence hash of an EK_MINIMAL/EK_COMPLETE identifier
    pub fn equivalence_hash(&self) -> Option<&EquivalenceHash> {
        match self {
            TypeIdentifier::Minimal(hash) | TypeIdentifier::Complete(hash) => Some(hash),
            _ => None,
        }
    }

    /// Bound of a string identifier (0 = unbounded)
    pub fn string_bound(&self) -> Option<u32> {
        match self {
            TypeIdentifier::StringSmall { bound } | TypeIdentifier::WStringSmall { bound } => {
                Some(u32::from(*bound))
            }
            TypeIdentifier::StringLarge { bound } | TypeIdentifier::WStringLarge { bound } => {
                Some(*bound)
            }
            _ => None,
        }
    }

    /// Bound of a plain sequence or plain map, small or large
    pub fn plain_bound(&self) -> Option<u32> {
        match self {
            TypeIdentifier::PlainSequenceSmall(d) => Some(u32::from(d.bound)),
            TypeIdentifier::PlainSequenceLarge(d) => Some(d.bound),
            TypeIdentifier::PlainMapSmall(d) => Some(u32::from(d.bound)),
            TypeIdentifier::PlainMapLarge(d) => Some(d.bound),
            _ => None,
        }
    }

    /// Dimensions of a plain array widened to 32 bits
    pub fn plain_array_bounds(&self) -> Option<Vec<u32>> {
        match self {
            TypeIdentifier::PlainArraySmall(d) => {
                Some(d.array_bound_seq.iter().map(|b| u32::from(*b)).collect())
            }
            TypeIdentifier::PlainArrayLarge(d) => Some(d.array_bound_seq.clone()),
            _ => None,
        }
    }

    pub fn is_narrow_string(&self) -> bool {
        matches!(
            self,
            TypeIdentifier::StringSmall { .. } | TypeIdentifier::StringLarge { .. }
        )
    }

    pub fn is_wide_string(&self) -> bool {
        matches!(
            self,
            TypeIdentifier::WStringSmall { .. } | TypeIdentifier::WStringLarge { .. }
        )
    }

    pub fn is_plain_sequence(&self) -> bool {
        matches!(
            self,
            TypeIdentifier::PlainSequenceSmall(_) | TypeIdentifier::PlainSequenceLarge(_)
        )
    }

    pub fn is_plain_array(&self) -> bool {
        matches!(
            self,
            TypeIdentifier::PlainArraySmall(_) | TypeIdentifier::PlainArrayLarge(_)
        )
    }

    pub fn is_plain_map(&self) -> bool {
        matches!(
            self,
            TypeIdentifier::PlainMapSmall(_) | TypeIdentifier::PlainMapLarge(_)
        )
    }

    pub fn is_none(&self) -> bool {
        matches!(self, TypeIdentifier::None)
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, TypeIdentifier::Primitive(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(
            self,
            TypeIdentifier::StringSmall { .. }
                | TypeIdentifier::StringLarge { .. }
                | TypeIdentifier::WStringSmall { .. }
                | TypeIdentifier::WStringLarge { .. }
        )
    }

    pub fn is_plain_collection(&self) -> bool {
        self.plain_collection_header().is_some()
    }

    pub fn is_minimal_hash(&self) -> bool {
        matches!(self, TypeIdentifier::Minimal(_))
    }

    pub fn is_complete_hash(&self) -> bool {
        matches!(self, TypeIdentifier::Complete(_))
    }

    /// Primitives, strings and EK_BOTH plain collections
    ///
    /// A fully descriptive identifier is the same in minimal and complete
    /// form and needs no TypeObject.
    pub fn is_fully_descriptive(&self) -> bool {
        if self.is_primitive() || self.is_string() {
            return true;
        }
        match self.plain_collection_header() {
            Some(header) => header.equiv_kind == EquivalenceKind::Both,
            None => false,
        }
    }

    /// True if the identifier refers to a type defined by a TypeObject
    pub fn has_type_object(&self) -> bool {
        !self.is_fully_descriptive() && !self.is_plain_collection() && !self.is_none()
    }
}

impl fmt::Debug for TypeIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeIdentifier::None => write!(f, "TypeId::None"),
            TypeIdentifier::Primitive(kind) => write!(f, "TypeId::{:?}", kind),
            TypeIdentifier::StringSmall { bound } => write!(f, "TypeId::String8<{}>", bound),
            TypeIdentifier::StringLarge { bound } => write!(f, "TypeId::String8<{}>", bound),
            TypeIdentifier::WStringSmall { bound } => write!(f, "TypeId::String16<{}>", bound),
            TypeIdentifier::WStringLarge { bound } => write!(f, "TypeId::String16<{}>", bound),
            TypeIdentifier::PlainSequenceSmall(d) => {
                write!(f, "TypeId::Sequence<{:?}, {}>", d.element_identifier, d.bound)
            }
            TypeIdentifier::PlainSequenceLarge(d) => {
                write!(f, "TypeId::Sequence<{:?}, {}>", d.element_identifier, d.bound)
            }
            TypeIdentifier::PlainArraySmall(d) => {
                write!(f, "TypeId::Array<{:?}, {:?}>", d.element_identifier, d.array_bound_seq)
            }
            TypeIdentifier::PlainArrayLarge(d) => {
                write!(f, "TypeId::Array<{:?}, {:?}>", d.element_identifier, d.array_bound_seq)
            }
            TypeIdentifier::PlainMapSmall(d) => write!(
                f,
                "TypeId::Map<{:?}, {:?}, {}>",
                d.key_identifier, d.element_identifier, d.bound
            ),
            TypeIdentifier::PlainMapLarge(d) => write!(
                f,
                "TypeId::Map<{:?}, {:?}, {}>",
                d.key_identifier, d.element_identifier, d.bound
            ),
            TypeIdentifier::StronglyConnected(scc) => write!(
                f,
                "TypeId::Scc({}, {}/{})",
                scc.sc_component_id.hash, scc.scc_index, scc.scc_length
            ),
            TypeIdentifier::Minimal(hash) => write!(f, "TypeId::Minimal({})", hash),
            TypeIdentifier::Complete(hash) => write!(f, "TypeId::Complete({})", hash),
            TypeIdentifier::Extended(kind) => write!(f, "TypeId::Extended({:#04x})", kind),
        }
    }
}

impl fmt::Display for TypeIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::MemberFlag;

    #[test]
    fn test_type_identifier_kinds() {
        assert_eq!(TypeIdentifier::None.kind(), 0x00);
        assert_eq!(TypeIdentifier::TK_INT32.kind(), 0x04);
        assert_eq!(TypeIdentifier::string(0).kind(), TI_STRING8_SMALL);
        assert_eq!(TypeIdentifier::string(1000).kind(), TI_STRING8_LARGE);
        assert_eq!(TypeIdentifier::wstring(255).kind(), TI_STRING16_SMALL);
        assert_eq!(TypeIdentifier::wstring(256).kind(), TI_STRING16_LARGE);
        assert_eq!(
            TypeIdentifier::Minimal(EquivalenceHash::zero()).kind(),
            EK_MINIMAL
        );
        assert_eq!(TypeIdentifier::Extended(0xEE).kind(), 0xEE);
    }

    #[test]
    fn test_type_identifier_primitive_rejects_constructed() {
        assert_eq!(
            TypeIdentifier::primitive(TypeKind::TK_UINT16),
            TypeIdentifier::TK_UINT16
        );
        assert_eq!(
            TypeIdentifier::primitive(TypeKind::TK_STRUCTURE),
            TypeIdentifier::None
        );
    }

    #[test]
    fn test_plain_sequence_equiv_kind() {
        let seq = TypeIdentifier::sequence(TypeIdentifier::TK_INT32, 10, MemberFlag::empty());
        assert_eq!(seq.kind(), TI_PLAIN_SEQUENCE_SMALL);
        assert!(seq.is_fully_descriptive());
        assert!(!seq.has_type_object());

        let hashed = TypeIdentifier::Minimal(EquivalenceHash::from_bytes([7; 14]));
        let seq = TypeIdentifier::sequence(hashed.clone(), 300, MemberFlag::empty());
        assert_eq!(seq.kind(), TI_PLAIN_SEQUENCE_LARGE);
        assert_eq!(
            seq.plain_collection_header().map(|h| h.equiv_kind),
            Some(EquivalenceKind::Minimal)
        );
        assert!(!seq.is_fully_descriptive());
        assert!(!seq.has_type_object());
        assert_eq!(seq.plain_element(), Some(&hashed));
    }

    #[test]
    fn test_plain_array_small_and_large() {
        let small = TypeIdentifier::array(TypeIdentifier::TK_BYTE, &[4, 8], MemberFlag::empty());
        assert_eq!(small.kind(), TI_PLAIN_ARRAY_SMALL);
        let large = TypeIdentifier::array(TypeIdentifier::TK_BYTE, &[4, 1024], MemberFlag::empty());
        assert_eq!(large.kind(), TI_PLAIN_ARRAY_LARGE);
        match large {
            TypeIdentifier::PlainArrayLarge(defn) => assert_eq!(defn.array_bound_seq, vec![4, 1024]),
            other => panic!("unexpected identifier {:?}", other),
        }
    }

    #[test]
    fn test_plain_map_key_access() {
        let map = TypeIdentifier::map(
            TypeIdentifier::string(0),
            TypeIdentifier::TK_FLOAT64,
            0,
            MemberFlag::empty(),
            MemberFlag::empty(),
        );
        assert_eq!(map.kind(), TI_PLAIN_MAP_SMALL);
        assert_eq!(map.plain_key(), Some(&TypeIdentifier::string(0)));
        assert_eq!(map.plain_element(), Some(&TypeIdentifier::TK_FLOAT64));
        assert!(map.is_fully_descriptive());
    }

    #[test]
    fn test_hashed_rejects_both() {
        let hash = EquivalenceHash::from_bytes([4; 14]);
        assert_eq!(
            TypeIdentifier::hashed(EquivalenceKind::Minimal, hash),
            Some(TypeIdentifier::Minimal(hash))
        );
        assert_eq!(
            TypeIdentifier::hashed(EquivalenceKind::Complete, hash),
            Some(TypeIdentifier::Complete(hash))
        );
        assert_eq!(TypeIdentifier::hashed(EquivalenceKind::Both, hash), None);
    }

    #[test]
    fn test_explicit_header_is_kept() {
        let header = PlainCollectionHeader::new(EquivalenceKind::Complete, MemberFlag::TRY_CONSTRUCT1);
        let seq = TypeIdentifier::sequence_with_header(header, TypeIdentifier::TK_INT32, 8);
        assert_eq!(seq.plain_collection_header(), Some(&header));
        assert_eq!(seq.plain_bound(), Some(8));

        let arr = TypeIdentifier::array_with_header(header, TypeIdentifier::TK_INT32, &[2, 500]);
        assert_eq!(arr.kind(), TI_PLAIN_ARRAY_LARGE);
        assert_eq!(arr.plain_collection_header(), Some(&header));

        let map = TypeIdentifier::map_with_header(
            header,
            TypeIdentifier::TK_INT16,
            MemberFlag::empty(),
            TypeIdentifier::TK_INT32,
            400,
        );
        assert_eq!(map.kind(), TI_PLAIN_MAP_LARGE);
        assert_eq!(map.plain_collection_header(), Some(&header));
        assert_eq!(map.plain_key(), Some(&TypeIdentifier::TK_INT16));
    }

    #[test]
    fn test_map_header_follows_element_kind() {
        let minimal = TypeIdentifier::Minimal(EquivalenceHash::from_bytes([1; 14]));
        let complete = TypeIdentifier::Complete(EquivalenceHash::from_bytes([2; 14]));
        let kind_of = |key: &TypeIdentifier, element: &TypeIdentifier| {
            TypeIdentifier::map(key.clone(), element.clone(), 0, MemberFlag::empty(), MemberFlag::empty())
                .plain_collection_header()
                .map(|h| h.equiv_kind)
        };

        assert_eq!(kind_of(&minimal, &complete), Some(EquivalenceKind::Complete));
        assert_eq!(kind_of(&complete, &minimal), Some(EquivalenceKind::Minimal));
        assert_eq!(kind_of(&complete, &TypeIdentifier::TK_INT32), Some(EquivalenceKind::Complete));
        assert_eq!(kind_of(&TypeIdentifier::TK_INT32, &minimal), Some(EquivalenceKind::Minimal));
        assert_eq!(
            kind_of(&TypeIdentifier::TK_INT32, &TypeIdentifier::string(0)),
            Some(EquivalenceKind::Both)
        );
    }

    #[test]
    fn test_bounds_widen_small_forms() {
        assert_eq!(TypeIdentifier::string(10).string_bound(), Some(10));
        assert_eq!(TypeIdentifier::wstring(1000).string_bound(), Some(1000));
        assert!(TypeIdentifier::wstring(3).is_wide_string());
        assert!(!TypeIdentifier::wstring(3).is_narrow_string());

        let seq = TypeIdentifier::sequence(TypeIdentifier::TK_INT8, 12, MemberFlag::empty());
        assert!(seq.is_plain_sequence());
        assert_eq!(seq.plain_bound(), Some(12));

        let small = TypeIdentifier::array(TypeIdentifier::TK_INT8, &[2, 3], MemberFlag::empty());
        let large = TypeIdentifier::array(TypeIdentifier::TK_INT8, &[2, 300], MemberFlag::empty());
        assert!(small.is_plain_array() && large.is_plain_array());
        assert_eq!(small.plain_array_bounds(), Some(vec![2, 3]));
        assert_eq!(large.plain_array_bounds(), Some(vec![2, 300]));
        assert_eq!(TypeIdentifier::TK_INT8.plain_array_bounds(), None);
    }

    #[test]
    fn test_has_type_object() {
        assert!(!TypeIdentifier::None.has_type_object());
        assert!(!TypeIdentifier::TK_CHAR8.has_type_object());
        assert!(TypeIdentifier::Minimal(EquivalenceHash::zero()).has_type_object());
        assert!(TypeIdentifier::Complete(EquivalenceHash::zero()).has_type_object());
    }

    #[test]
    fn test_type_identifier_debug() {
        assert_eq!(format!("{:?}", TypeIdentifier::TK_INT32), "TypeId::TK_INT32");
        assert_eq!(format!("{:?}", TypeIdentifier::string(64)), "TypeId::String8<64>");
        assert_eq!(format!("{}", TypeIdentifier::None), "TypeId::None");
    }
}
