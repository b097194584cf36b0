// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Canonical TypeObject hashes that independent implementations must agree on.

use hdds_xtypes::type_object::*;
use hdds_xtypes::{
    hash_member_name, hash_member_name_to_id, make_type_identifier, to_bytes, Encoding, EquivalenceHash,
    MemberFlag, TypeFlag, TypeIdentifier,
};

fn minimal_struct(flags: TypeFlag, members: &[(u32, MemberFlag, TypeIdentifier, &str)]) -> TypeObject {
    TypeObject::Minimal(MinimalTypeObject::Struct(MinimalStructType {
        struct_flags: flags,
        header: MinimalStructHeader {
            base_type: TypeIdentifier::None,
        },
        member_seq: members
            .iter()
            .map(|(id, member_flags, type_id, name)| MinimalStructMember {
                common: CommonStructMember::new(*id, *member_flags, type_id.clone()),
                detail: MinimalMemberDetail::named(name),
            })
            .collect(),
    }))
}

fn decode_hex(hex: &str) -> Vec<u8> {
    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).expect("hex digit"))
        .collect()
}

#[test]
fn test_appendable_keyed_struct_fixture() {
    let object = minimal_struct(
        TypeFlag::IS_APPENDABLE,
        &[(
            0,
            MemberFlag::TRY_CONSTRUCT1 | MemberFlag::IS_KEY,
            TypeIdentifier::TK_INT32,
            "key",
        )],
    );
    assert_eq!(
        make_type_identifier(&object),
        TypeIdentifier::Minimal(EquivalenceHash::from_bytes([
            47, 43, 14, 5, 138, 206, 143, 33, 189, 131, 116, 89, 176, 60
        ]))
    );
}

#[test]
fn test_final_two_member_fixture() {
    let object = minimal_struct(
        TypeFlag::IS_FINAL,
        &[
            (0, MemberFlag::empty(), TypeIdentifier::TK_INT32, "x"),
            (1, MemberFlag::empty(), TypeIdentifier::TK_FLOAT64, "y"),
        ],
    );

    let bytes = to_bytes(&object, Encoding::typeobject()).expect("encode");
    assert_eq!(
        bytes,
        decode_hex(concat!(
            "33000000f1510100010000000000000023000000020000000b000000000000000000",
            "049dd4e461000b0000000100000000000a41529076"
        ))
    );
    assert_eq!(
        make_type_identifier(&object),
        TypeIdentifier::Minimal(EquivalenceHash::from_bytes([
            145, 178, 104, 220, 194, 240, 45, 115, 88, 178, 20, 130, 144, 49
        ]))
    );
}

#[test]
fn test_mutable_key_struct_fixture() {
    let object = minimal_struct(
        TypeFlag::IS_MUTABLE,
        &[(0, MemberFlag::IS_KEY, TypeIdentifier::TK_INT32, "id")],
    );
    assert_eq!(
        make_type_identifier(&object),
        TypeIdentifier::Minimal(EquivalenceHash::from_bytes([
            1, 193, 159, 153, 163, 237, 56, 76, 97, 63, 107, 235, 199, 181
        ]))
    );
}

#[test]
fn test_hash_ignores_requested_wire_order() {
    let object = minimal_struct(
        TypeFlag::IS_FINAL,
        &[(0, MemberFlag::empty(), TypeIdentifier::TK_INT32, "x")],
    );
    let le = to_bytes(&object, Encoding::xcdr2_le()).expect("encode");
    let be = to_bytes(&object, Encoding::xcdr2_be()).expect("encode");
    assert_ne!(le, be);
    assert_eq!(
        make_type_identifier(&object),
        TypeIdentifier::Minimal(EquivalenceHash::compute(&le))
    );
}

#[test]
fn test_hash_sensitivity() {
    let base = [(0, MemberFlag::empty(), TypeIdentifier::TK_INT32, "x")];
    let reference = make_type_identifier(&minimal_struct(TypeFlag::IS_FINAL, &base));

    let variants = [
        minimal_struct(TypeFlag::IS_APPENDABLE, &base),
        minimal_struct(
            TypeFlag::IS_FINAL,
            &[(1, MemberFlag::empty(), TypeIdentifier::TK_INT32, "x")],
        ),
        minimal_struct(
            TypeFlag::IS_FINAL,
            &[(0, MemberFlag::IS_KEY, TypeIdentifier::TK_INT32, "x")],
        ),
        minimal_struct(
            TypeFlag::IS_FINAL,
            &[(0, MemberFlag::empty(), TypeIdentifier::TK_INT64, "x")],
        ),
        minimal_struct(
            TypeFlag::IS_FINAL,
            &[(0, MemberFlag::empty(), TypeIdentifier::TK_INT32, "z")],
        ),
    ];
    for variant in &variants {
        assert_ne!(make_type_identifier(variant), reference, "{:?}", variant);
    }
    assert_eq!(
        make_type_identifier(&minimal_struct(TypeFlag::IS_FINAL, &base)),
        reference
    );
}

#[test]
fn test_member_name_hashes() {
    assert_eq!(hash_member_name("key").0, [60, 110, 11, 138]);
    assert_eq!(hash_member_name("speed").0, [206, 78, 243, 236]);
    assert_eq!(hash_member_name_to_id("key"), 0x0a0b_6e3c);
    assert_eq!(hash_member_name_to_id("x"), 0x01e4_d49d);
}
