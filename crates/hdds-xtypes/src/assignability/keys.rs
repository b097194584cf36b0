// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! KeyErased and KeyHolder views of aggregated types (Sections 7.2.2.4.6
//! and 7.2.2.4.7).

use super::TypeAssignability;
use crate::flags::MemberFlag;
use crate::type_id::TypeIdentifier;
use crate::type_object::MinimalTypeObject;

/// Drop the key designation from every struct member or from a union
/// discriminator. Other kinds are returned unchanged.
pub fn erase_key(mut object: MinimalTypeObject) -> MinimalTypeObject {
    match &mut object {
        MinimalTypeObject::Struct(t) => {
            for member in &mut t.member_seq {
                member.common.member_flags = member.common.member_flags.remove(MemberFlag::IS_KEY);
            }
        }
        MinimalTypeObject::Union(t) => {
            let flags = &mut t.discriminator.common.member_flags;
            *flags = flags.remove(MemberFlag::IS_KEY);
        }
        _ => {}
    }
    object
}

/// Reduce an aggregated type to its key.
///
/// A struct with key members keeps only those; a struct without any key
/// makes every member a key. A union with a key discriminator loses all
/// its members. Other kinds are returned unchanged.
pub fn hold_key(mut object: MinimalTypeObject) -> MinimalTypeObject {
    match &mut object {
        MinimalTypeObject::Struct(t) => {
            if t.member_seq.iter().any(|m| m.common.member_flags.is_key()) {
                t.member_seq.retain(|m| m.common.member_flags.is_key());
            } else {
                for member in &mut t.member_seq {
                    member.common.member_flags = member.common.member_flags.insert(MemberFlag::IS_KEY);
                }
            }
        }
        MinimalTypeObject::Union(t) => {
            if t.discriminator.common.member_flags.is_key() {
                t.member_seq.clear();
            }
        }
        _ => {}
    }
    object
}

impl TypeAssignability<'_> {
    /// KeyHolder of the type named by `id`, or `None` when the identifier
    /// has no TypeObject (the identifier itself is then compared).
    pub(super) fn hold_key_of(&self, id: &TypeIdentifier) -> Option<MinimalTypeObject> {
        self.resolve_object(id).map(|object| hold_key(object.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::TypeFlag;
    use crate::type_object::{
        CommonDiscriminatorMember, CommonStructMember, CommonUnionMember,
        MinimalDiscriminatorMember, MinimalMemberDetail, MinimalStructHeader,
        MinimalStructMember, MinimalStructType, MinimalUnionHeader, MinimalUnionMember,
        MinimalUnionType,
    };

    fn member(id: u32, flags: MemberFlag) -> MinimalStructMember {
        MinimalStructMember {
            common: CommonStructMember::new(id, flags, TypeIdentifier::TK_INT32),
            detail: MinimalMemberDetail::named(&format!("m{}", id)),
        }
    }

    fn structure(members: Vec<MinimalStructMember>) -> MinimalTypeObject {
        MinimalTypeObject::Struct(MinimalStructType {
            struct_flags: TypeFlag::IS_APPENDABLE,
            header: MinimalStructHeader::default(),
            member_seq: members,
        })
    }

    fn keys(object: &MinimalTypeObject) -> Vec<(u32, bool)> {
        match object {
            MinimalTypeObject::Struct(t) => t
                .member_seq
                .iter()
                .map(|m| (m.common.member_id, m.common.member_flags.is_key()))
                .collect(),
            _ => Vec::new(),
        }
    }

    #[test]
    fn test_erase_key_clears_struct_keys() {
        let object = structure(vec![member(0, MemberFlag::IS_KEY), member(1, MemberFlag::empty())]);
        assert_eq!(keys(&erase_key(object)), vec![(0, false), (1, false)]);
    }

    #[test]
    fn test_hold_key_keeps_only_keys() {
        let object = structure(vec![member(0, MemberFlag::empty()), member(1, MemberFlag::IS_KEY)]);
        assert_eq!(keys(&hold_key(object)), vec![(1, true)]);
    }

    #[test]
    fn test_hold_key_without_keys_keys_everything() {
        let object = structure(vec![member(0, MemberFlag::empty()), member(1, MemberFlag::empty())]);
        assert_eq!(keys(&hold_key(object)), vec![(0, true), (1, true)]);
    }

    #[test]
    fn test_union_key_discriminator() {
        let union = MinimalTypeObject::Union(MinimalUnionType {
            union_flags: TypeFlag::IS_FINAL,
            header: MinimalUnionHeader,
            discriminator: MinimalDiscriminatorMember {
                common: CommonDiscriminatorMember {
                    member_flags: MemberFlag::IS_KEY,
                    type_id: TypeIdentifier::TK_INT32,
                },
            },
            member_seq: vec![MinimalUnionMember {
                common: CommonUnionMember {
                    member_id: 1,
                    member_flags: MemberFlag::empty(),
                    type_id: TypeIdentifier::TK_INT16,
                    label_seq: vec![1],
                },
                detail: MinimalMemberDetail::named("a"),
            }],
        });

        match hold_key(union.clone()) {
            MinimalTypeObject::Union(t) => assert!(t.member_seq.is_empty()),
            other => panic!("unexpected {:?}", other),
        }
        match erase_key(union) {
            MinimalTypeObject::Union(t) => {
                assert!(!t.discriminator.common.member_flags.is_key());
                assert_eq!(t.member_seq.len(), 1);
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
