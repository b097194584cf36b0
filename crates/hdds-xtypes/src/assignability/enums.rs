// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Enumerated and bitmask rules.

use crate::equivalence::NameHash;
use crate::type_kind::TypeKind;
use crate::type_object::{MinimalEnumeratedLiteral, MinimalEnumeratedType};
use std::collections::HashMap;

/// True if an unsigned integer of `kind` holds a bitmask of `bit_bound` bits.
///
/// UINT8 takes 1..=8 bits, UINT16 9..=16, UINT32 17..=32, UINT64 33..=64.
/// Any other kind never matches a bitmask.
pub fn bitmask_fits(kind: TypeKind, bit_bound: u16) -> bool {
    match kind {
        TypeKind::TK_UINT8 => (1..=8).contains(&bit_bound),
        TypeKind::TK_UINT16 => (9..=16).contains(&bit_bound),
        TypeKind::TK_UINT32 => (17..=32).contains(&bit_bound),
        TypeKind::TK_UINT64 => (33..=64).contains(&bit_bound),
        _ => false,
    }
}

pub(super) fn assignable_enum(ta: &MinimalEnumeratedType, tb: &MinimalEnumeratedType) -> bool {
    let extensibility = ta.enum_flags.extensibility();
    if extensibility != tb.enum_flags.extensibility() {
        log::debug!(
            "[ASSIGNABILITY] Enum extensibility differs: {:?} vs {:?}",
            ta.enum_flags,
            tb.enum_flags
        );
        return false;
    }
    if ta.header.common.bit_bound != tb.header.common.bit_bound {
        return false;
    }

    let a_values = name_to_value(&ta.literal_seq);

    if extensibility.is_final() {
        // same literal set
        return ta.literal_seq.len() == tb.literal_seq.len()
            && tb
                .literal_seq
                .iter()
                .all(|lit| a_values.get(&lit.detail.name_hash) == Some(&lit.common.value));
    }

    // same name implies same value, and the other way round
    let a_names: HashMap<i32, NameHash> = ta
        .literal_seq
        .iter()
        .map(|lit| (lit.common.value, lit.detail.name_hash))
        .collect();
    tb.literal_seq.iter().all(|lit| {
        let value_ok = a_values
            .get(&lit.detail.name_hash)
            .map_or(true, |value| *value == lit.common.value);
        let name_ok = a_names
            .get(&lit.common.value)
            .map_or(true, |name| *name == lit.detail.name_hash);
        value_ok && name_ok
    })
}

fn name_to_value(literals: &[MinimalEnumeratedLiteral]) -> HashMap<NameHash, i32> {
    literals
        .iter()
        .map(|lit| (lit.detail.name_hash, lit.common.value))
        .collect()
}

/// Every literal name of `tb` also names a literal of `ta`
pub(super) fn literals_superset(ta: &MinimalEnumeratedType, tb: &MinimalEnumeratedType) -> bool {
    let a_values = name_to_value(&ta.literal_seq);
    tb.literal_seq
        .iter()
        .all(|lit| a_values.contains_key(&lit.detail.name_hash))
}
