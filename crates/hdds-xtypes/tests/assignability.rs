// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Reader/writer type matching scenarios through the public API.

use hdds_xtypes::type_object::*;
use hdds_xtypes::{
    make_type_identifier, MemberFlag, TypeAssignability, TypeConsistencyEnforcement, TypeFlag, TypeIdentifier,
    TypeKind, TypeMap,
};

fn register(map: &mut TypeMap, object: MinimalTypeObject) -> TypeIdentifier {
    let object = TypeObject::Minimal(object);
    let id = make_type_identifier(&object);
    map.insert(id.clone(), object);
    id
}

fn enumeration(flags: TypeFlag, literals: &[&str]) -> MinimalTypeObject {
    MinimalTypeObject::Enumerated(MinimalEnumeratedType {
        enum_flags: flags,
        header: MinimalEnumeratedHeader {
            common: CommonEnumeratedHeader { bit_bound: 32 },
        },
        literal_seq: literals
            .iter()
            .enumerate()
            .map(|(value, name)| MinimalEnumeratedLiteral {
                common: CommonEnumeratedLiteral {
                    value: value as i32,
                    flags: MemberFlag::empty(),
                },
                detail: MinimalMemberDetail::named(name),
            })
            .collect(),
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

fn bitmask(bit_bound: u16) -> MinimalTypeObject {
    MinimalTypeObject::Bitmask(MinimalBitmaskType {
        bitmask_flags: TypeFlag::IS_APPENDABLE,
        header: MinimalEnumeratedHeader {
            common: CommonEnumeratedHeader { bit_bound },
        },
        flag_seq: vec![MinimalBitflag {
            common: CommonBitflag {
                position: 0,
                flags: MemberFlag::empty(),
            },
            detail: MinimalMemberDetail::named("READY"),
        }],
    })
}

fn sensor(flags: TypeFlag, members: &[(u32, &str, TypeIdentifier)]) -> MinimalTypeObject {
    MinimalTypeObject::Struct(MinimalStructType {
        struct_flags: flags,
        header: MinimalStructHeader {
            base_type: TypeIdentifier::None,
        },
        member_seq: members
            .iter()
            .map(|(id, name, type_id)| MinimalStructMember {
                common: CommonStructMember::new(*id, MemberFlag::empty(), type_id.clone()),
                detail: MinimalMemberDetail::named(name),
            })
            .collect(),
    })
}

#[test]
fn test_primitive_reflexivity() {
    let map = TypeMap::new();
    let engine = TypeAssignability::new(&map);
    let kinds = [
        TypeKind::TK_BOOLEAN,
        TypeKind::TK_BYTE,
        TypeKind::TK_INT8,
        TypeKind::TK_UINT8,
        TypeKind::TK_INT16,
        TypeKind::TK_UINT16,
        TypeKind::TK_INT32,
        TypeKind::TK_UINT32,
        TypeKind::TK_INT64,
        TypeKind::TK_UINT64,
        TypeKind::TK_FLOAT32,
        TypeKind::TK_FLOAT64,
        TypeKind::TK_FLOAT128,
        TypeKind::TK_CHAR8,
        TypeKind::TK_CHAR16,
    ];
    for kind in kinds {
        let id = TypeIdentifier::primitive(kind);
        assert!(engine.assignable(&id, &id), "{:?}", kind);
    }
}

#[test]
fn test_boolean_scenario() {
    let map = TypeMap::new();
    let engine = TypeAssignability::new(&map);
    assert!(engine.assignable(&TypeIdentifier::TK_BOOLEAN, &TypeIdentifier::TK_BOOLEAN));
    assert!(!engine.assignable(&TypeIdentifier::TK_BOOLEAN, &TypeIdentifier::TK_BYTE));
}

#[test]
fn test_enum_scenario() {
    let mut map = TypeMap::new();
    let final_a = register(&mut map, enumeration(TypeFlag::IS_FINAL, &["A", "B", "C"]));
    let final_b = register(&mut map, enumeration(TypeFlag::IS_FINAL, &["A", "B"]));
    let appendable_a = register(&mut map, enumeration(TypeFlag::IS_APPENDABLE, &["A", "B", "C"]));
    let appendable_b = register(&mut map, enumeration(TypeFlag::IS_APPENDABLE, &["A", "B"]));
    let engine = TypeAssignability::new(&map);

    assert!(!engine.assignable(&final_a, &final_b));
    assert!(engine.assignable(&appendable_a, &appendable_b));
}

#[test]
fn test_collection_bounds_scenario() {
    let mut map = TypeMap::new();
    let seq10 = register(&mut map, sequence(TypeIdentifier::TK_INT32, 10));
    let seq20 = register(&mut map, sequence(TypeIdentifier::TK_INT32, 20));
    let arr10 = register(&mut map, array(TypeIdentifier::TK_INT32, &[10]));
    let arr20 = register(&mut map, array(TypeIdentifier::TK_INT32, &[20]));
    let engine = TypeAssignability::new(&map);

    assert!(engine.assignable(&seq10, &seq20));
    assert!(!engine.assignable(&arr10, &arr20));
}

#[test]
fn test_bitmask_brackets() {
    let mut map = TypeMap::new();
    let cases = [
        (TypeIdentifier::TK_UINT8, 8, 9),
        (TypeIdentifier::TK_UINT16, 16, 17),
        (TypeIdentifier::TK_UINT32, 32, 33),
    ];
    let registered: Vec<_> = cases
        .iter()
        .map(|(holder, fits, overflows)| {
            (
                holder.clone(),
                register(&mut map, bitmask(*fits)),
                register(&mut map, bitmask(*overflows)),
            )
        })
        .collect();
    let wide = register(&mut map, bitmask(64));
    let engine = TypeAssignability::new(&map);

    for (holder, fits, overflows) in &registered {
        assert!(engine.assignable(holder, fits));
        assert!(!engine.assignable(holder, overflows));
    }
    assert!(engine.assignable(&TypeIdentifier::TK_UINT64, &wide));
}

#[test]
fn test_struct_evolution() {
    let mut map = TypeMap::new();
    let v1 = register(
        &mut map,
        sensor(TypeFlag::IS_APPENDABLE, &[(0, "id", TypeIdentifier::TK_INT32)]),
    );
    let v2 = register(
        &mut map,
        sensor(
            TypeFlag::IS_APPENDABLE,
            &[(0, "id", TypeIdentifier::TK_INT32), (1, "celsius", TypeIdentifier::TK_FLOAT32)],
        ),
    );
    let v2_final = register(
        &mut map,
        sensor(
            TypeFlag::IS_FINAL,
            &[(0, "id", TypeIdentifier::TK_INT32), (1, "celsius", TypeIdentifier::TK_FLOAT32)],
        ),
    );
    let engine = TypeAssignability::new(&map);

    assert!(engine.assignable(&v1, &v2));
    assert!(engine.assignable(&v2, &v1));
    assert!(!engine.assignable(&v2, &v2_final));
}

#[test]
fn test_mutable_member_rename_needs_relaxation() {
    let mut map = TypeMap::new();
    let a = register(
        &mut map,
        sensor(
            TypeFlag::IS_MUTABLE,
            &[(0, "id", TypeIdentifier::TK_INT32), (1, "speed", TypeIdentifier::TK_FLOAT64)],
        ),
    );
    let b = register(
        &mut map,
        sensor(
            TypeFlag::IS_MUTABLE,
            &[(0, "id", TypeIdentifier::TK_INT32), (1, "velocity", TypeIdentifier::TK_FLOAT64)],
        ),
    );

    assert!(!TypeAssignability::new(&map).assignable(&a, &b));

    let relaxed = TypeConsistencyEnforcement::from_yaml_str("type_consistency:\n  ignore_member_names: true\n")
        .expect("valid yaml");
    assert!(TypeAssignability::with_consistency(&map, relaxed).assignable(&a, &b));
}
