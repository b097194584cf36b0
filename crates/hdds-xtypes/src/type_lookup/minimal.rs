// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Derivation of a MinimalTypeObject from its complete counterpart.
//!
//! Names become 4-byte name hashes, annotations and documentation are
//! dropped, and every referenced TypeIdentifier is replaced by its minimal
//! equivalent through the supplied resolver.

use crate::equivalence::hash_member_name;
use crate::type_id::TypeIdentifier;
use crate::type_object::*;

/// Convert `complete`, resolving referenced identifiers with `minimal_id`.
///
/// Returns `None` when a referenced identifier has no known minimal form or
/// the kind is not one this implementation understands.
pub(super) fn complete_to_minimal<F>(
    complete: &CompleteTypeObject,
    minimal_id: F,
) -> Option<MinimalTypeObject>
where
    F: Fn(&TypeIdentifier) -> Option<TypeIdentifier>,
{
    let element = |e: &CompleteCollectionElement| -> Option<MinimalCollectionElement> {
        Some(MinimalCollectionElement {
            common: CommonCollectionElement {
                element_flags: e.common.element_flags,
                type_id: minimal_id(&e.common.type_id)?,
            },
        })
    };
    let collection_header = |h: &CompleteCollectionHeader| MinimalCollectionHeader { common: h.common };

    let minimal = match complete {
        CompleteTypeObject::Alias(t) => MinimalTypeObject::Alias(MinimalAliasType {
            alias_flags: t.alias_flags,
            header: MinimalAliasHeader,
            body: MinimalAliasBody {
                common: CommonAliasBody {
                    related_flags: t.body.common.related_flags,
                    related_type: minimal_id(&t.body.common.related_type)?,
                },
            },
        }),
        CompleteTypeObject::Annotation(t) => {
            let member_seq = t
                .member_seq
                .iter()
                .map(|p| {
                    Some(MinimalAnnotationParameter {
                        common: CommonAnnotationParameter {
                            member_flags: p.common.member_flags,
                            member_type_id: minimal_id(&p.common.member_type_id)?,
                        },
                        name_hash: hash_member_name(&p.name),
                        default_value: p.default_value.clone(),
                    })
                })
                .collect::<Option<Vec<_>>>()?;
            MinimalTypeObject::Annotation(MinimalAnnotationType {
                annotation_flag: t.annotation_flag,
                header: MinimalAnnotationHeader,
                member_seq,
            })
        }
        CompleteTypeObject::Struct(t) => {
            let member_seq = t
                .member_seq
                .iter()
                .map(|m| {
                    Some(MinimalStructMember {
                        common: CommonStructMember {
                            member_id: m.common.member_id,
                            member_flags: m.common.member_flags,
                            member_type_id: minimal_id(&m.common.member_type_id)?,
                        },
                        detail: m.detail.to_minimal(),
                    })
                })
                .collect::<Option<Vec<_>>>()?;
            MinimalTypeObject::Struct(MinimalStructType {
                struct_flags: t.struct_flags,
                header: MinimalStructHeader {
                    base_type: minimal_id(&t.header.base_type)?,
                },
                member_seq,
            })
        }
        CompleteTypeObject::Union(t) => {
            let member_seq = t
                .member_seq
                .iter()
                .map(|m| {
                    Some(MinimalUnionMember {
                        common: CommonUnionMember {
                            member_id: m.common.member_id,
                            member_flags: m.common.member_flags,
                            type_id: minimal_id(&m.common.type_id)?,
                            label_seq: m.common.label_seq.clone(),
                        },
                        detail: m.detail.to_minimal(),
                    })
                })
                .collect::<Option<Vec<_>>>()?;
            MinimalTypeObject::Union(MinimalUnionType {
                union_flags: t.union_flags,
                header: MinimalUnionHeader,
                discriminator: MinimalDiscriminatorMember {
                    common: CommonDiscriminatorMember {
                        member_flags: t.discriminator.common.member_flags,
                        type_id: minimal_id(&t.discriminator.common.type_id)?,
                    },
                },
                member_seq,
            })
        }
        CompleteTypeObject::Bitset(t) => MinimalTypeObject::Bitset(MinimalBitsetType {
            bitset_flags: t.bitset_flags,
            header: MinimalBitsetHeader,
            field_seq: t
                .field_seq
                .iter()
                .map(|f| MinimalBitfield {
                    common: f.common,
                    name_hash: hash_member_name(&f.detail.name),
                })
                .collect(),
        }),
        CompleteTypeObject::Sequence(t) => MinimalTypeObject::Sequence(MinimalSequenceType {
            collection_flag: t.collection_flag,
            header: collection_header(&t.header),
            element: element(&t.element)?,
        }),
        CompleteTypeObject::Array(t) => MinimalTypeObject::Array(MinimalArrayType {
            collection_flag: t.collection_flag,
            header: MinimalArrayHeader {
                common: t.header.common.clone(),
            },
            element: element(&t.element)?,
        }),
        CompleteTypeObject::Map(t) => MinimalTypeObject::Map(MinimalMapType {
            collection_flag: t.collection_flag,
            header: collection_header(&t.header),
            key: element(&t.key)?,
            element: element(&t.element)?,
        }),
        CompleteTypeObject::Enumerated(t) => MinimalTypeObject::Enumerated(MinimalEnumeratedType {
            enum_flags: t.enum_flags,
            header: MinimalEnumeratedHeader {
                common: t.header.common,
            },
            literal_seq: t
                .literal_seq
                .iter()
                .map(|l| MinimalEnumeratedLiteral {
                    common: l.common,
                    detail: l.detail.to_minimal(),
                })
                .collect(),
        }),
        CompleteTypeObject::Bitmask(t) => MinimalTypeObject::Bitmask(MinimalBitmaskType {
            bitmask_flags: t.bitmask_flags,
            header: MinimalBitmaskHeader {
                common: t.header.common,
            },
            flag_seq: t
                .flag_seq
                .iter()
                .map(|f| MinimalBitflag {
                    common: f.common,
                    detail: f.detail.to_minimal(),
                })
                .collect(),
        }),
        CompleteTypeObject::Extended(_) => return None,
    };
    Some(minimal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::{MemberFlag, TypeFlag};

    fn identity(id: &TypeIdentifier) -> Option<TypeIdentifier> {
        Some(id.clone())
    }

    #[test]
    fn test_struct_names_become_hashes() {
        let complete = CompleteTypeObject::Struct(CompleteStructType {
            struct_flags: TypeFlag::IS_APPENDABLE,
            header: CompleteStructHeader {
                base_type: TypeIdentifier::None,
                detail: CompleteTypeDetail::named("Sensor"),
            },
            member_seq: vec![CompleteStructMember {
                common: CommonStructMember::new(0, MemberFlag::IS_KEY, TypeIdentifier::TK_INT32),
                detail: CompleteMemberDetail::named("id"),
            }],
        });

        let minimal = complete_to_minimal(&complete, identity).expect("convertible");
        let MinimalTypeObject::Struct(s) = minimal else {
            panic!("expected struct");
        };
        assert_eq!(s.struct_flags, TypeFlag::IS_APPENDABLE);
        assert_eq!(s.member_seq[0].detail, MinimalMemberDetail::named("id"));
        assert!(s.member_seq[0].common.member_flags.is_key());
    }

    #[test]
    fn test_unresolved_reference_fails() {
        let complete = CompleteTypeObject::Alias(CompleteAliasType {
            alias_flags: TypeFlag::empty(),
            header: CompleteAliasHeader::default(),
            body: CompleteAliasBody {
                common: CommonAliasBody {
                    related_flags: MemberFlag::empty(),
                    related_type: TypeIdentifier::Complete(crate::equivalence::EquivalenceHash::zero()),
                },
                ann_builtin: None,
                ann_custom: None,
            },
        });
        assert!(complete_to_minimal(&complete, |_| None).is_none());
        assert!(complete_to_minimal(&CompleteTypeObject::Extended(0x7E), identity).is_none());
    }

    #[test]
    fn test_bitset_fields_keep_layout() {
        let complete = CompleteTypeObject::Bitset(CompleteBitsetType {
            bitset_flags: TypeFlag::empty(),
            header: CompleteBitsetHeader::default(),
            field_seq: vec![CompleteBitfield {
                common: CommonBitfield {
                    position: 3,
                    flags: MemberFlag::empty(),
                    bitcount: 4,
                    holder_type: crate::type_kind::TypeKind::TK_UINT8,
                },
                detail: CompleteMemberDetail::named("nibble"),
            }],
        });
        let Some(MinimalTypeObject::Bitset(b)) = complete_to_minimal(&complete, identity) else {
            panic!("expected bitset");
        };
        assert_eq!(b.field_seq[0].common.position, 3);
        assert_eq!(b.field_seq[0].name_hash, hash_member_name("nibble"));
    }
}
