// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use super::*;
use crate::flags::{MemberFlag, TypeFlag};
use crate::hashing::make_type_identifier;
use crate::type_object::*;


/// Test-scoped type map filled with hashed minimal objects
struct Registry {
    map: TypeMap,
}

impl Registry {
    fn new() -> Self {
        Self { map: TypeMap::new() }
    }

    fn add(&mut self, object: MinimalTypeObject) -> TypeIdentifier {
        let object = TypeObject::Minimal(object);
        let id = make_type_identifier(&object);
        assert!(id.is_minimal_hash(), "fixture must hash");
        self.map.insert(id.clone(), object);
        id
    }

    fn engine(&self) -> TypeAssignability<'_> {
        TypeAssignability::new(&self.map)
    }
}

fn member(id: u32, name: &str, type_id: TypeIdentifier) -> MinimalStructMember {
    MinimalStructMember {
        common: CommonStructMember::new(id, MemberFlag::empty(), type_id),
        detail: MinimalMemberDetail::named(name),
    }
}

fn key(id: u32, name: &str, type_id: TypeIdentifier) -> MinimalStructMember {
    flagged(member(id, name, type_id), MemberFlag::IS_KEY)
}

fn flagged(mut m: MinimalStructMember, flags: MemberFlag) -> MinimalStructMember {
    m.common.member_flags = m.common.member_flags | flags;
    m
}

fn structure(flags: TypeFlag, members: Vec<MinimalStructMember>) -> MinimalTypeObject {
    MinimalTypeObject::Struct(MinimalStructType {
        struct_flags: flags,
        header: MinimalStructHeader::default(),
        member_seq: members,
    })
}

fn derived(flags: TypeFlag, base: TypeIdentifier, members: Vec<MinimalStructMember>) -> MinimalTypeObject {
    MinimalTypeObject::Struct(MinimalStructType {
        struct_flags: flags,
        header: MinimalStructHeader { base_type: base },
        member_seq: members,
    })
}

fn enumeration(flags: TypeFlag, literals: &[(&str, i32)]) -> MinimalTypeObject {
    MinimalTypeObject::Enumerated(MinimalEnumeratedType {
        enum_flags: flags,
        header: MinimalEnumeratedHeader {
            common: CommonEnumeratedHeader { bit_bound: 32 },
        },
        literal_seq: literals
            .iter()
            .map(|(name, value)| MinimalEnumeratedLiteral {
                common: CommonEnumeratedLiteral {
                    value: *value,
                    flags: MemberFlag::empty(),
                },
                detail: MinimalMemberDetail::named(name),
            })
            .collect(),
    })
}

fn bitmask(bit_bound: u16) -> MinimalTypeObject {
    MinimalTypeObject::Bitmask(MinimalBitmaskType {
        bitmask_flags: TypeFlag::IS_APPENDABLE,
        header: MinimalBitmaskHeader {
            common: CommonEnumeratedHeader { bit_bound },
        },
        flag_seq: vec![MinimalBitflag {
            common: CommonBitflag {
                position: 0,
                flags: MemberFlag::empty(),
            },
            detail: MinimalMemberDetail::named("FLAG0"),
        }],
    })
}

fn case(id: u32, name: &str, type_id: TypeIdentifier, labels: &[i32]) -> MinimalUnionMember {
    MinimalUnionMember {
        common: CommonUnionMember {
            member_id: id,
            member_flags: MemberFlag::empty(),
            type_id,
            label_seq: labels.to_vec(),
        },
        detail: MinimalMemberDetail::named(name),
    }
}

fn default_case(id: u32, name: &str, type_id: TypeIdentifier) -> MinimalUnionMember {
    let mut m = case(id, name, type_id, &[]);
    m.common.member_flags = MemberFlag::IS_DEFAULT;
    m
}

fn union(flags: TypeFlag, discriminator: TypeIdentifier, members: Vec<MinimalUnionMember>) -> MinimalTypeObject {
    MinimalTypeObject::Union(MinimalUnionType {
        union_flags: flags,
        header: MinimalUnionHeader,
        discriminator: MinimalDiscriminatorMember {
            common: CommonDiscriminatorMember {
                member_flags: MemberFlag::empty(),
                type_id: discriminator,
            },
        },
        member_seq: members,
    })
}

fn sequence(element: TypeIdentifier, bound: u32) -> MinimalTypeObject {
    MinimalTypeObject::Sequence(MinimalSequenceType {
        collection_flag: TypeFlag::empty(),
        header: MinimalCollectionHeader {
            common: CommonCollectionHeader { bound },
        },
        element: MinimalCollectionElement::new(element),
    })
}

fn array(element: TypeIdentifier, bounds: &[u32]) -> MinimalTypeObject {
    MinimalTypeObject::Array(MinimalArrayType {
        collection_flag: TypeFlag::empty(),
        header: MinimalArrayHeader {
            common: CommonArrayHeader {
                bound_seq: bounds.to_vec(),
            },
        },
        element: MinimalCollectionElement::new(element),
    })
}

fn map(key: TypeIdentifier, element: TypeIdentifier, bound: u32) -> MinimalTypeObject {
    MinimalTypeObject::Map(MinimalMapType {
        collection_flag: TypeFlag::empty(),
        header: MinimalCollectionHeader {
            common: CommonCollectionHeader { bound },
        },
        key: MinimalCollectionElement::new(key),
        element: MinimalCollectionElement::new(element),
    })
}

fn alias(related: TypeIdentifier) -> MinimalTypeObject {
    MinimalTypeObject::Alias(MinimalAliasType::new(related))
}
