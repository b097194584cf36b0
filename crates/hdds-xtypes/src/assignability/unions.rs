// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Union rule (Section 7.2.4.4.4.4.7).
//!
//! The `default` label has no numeric value: a default member is marked
//! with IS_DEFAULT and its `label_seq` only lists its explicit labels.

use super::TypeAssignability;
use crate::equivalence::NameHash;
use crate::type_object::{MinimalUnionMember, MinimalUnionType};
use std::collections::{BTreeSet, HashMap};

impl TypeAssignability<'_> {
    pub(super) fn assignable_union(&self, ta: &MinimalUnionType, tb: &MinimalUnionType) -> bool {
        let extensibility = ta.union_flags.extensibility();
        if extensibility != tb.union_flags.extensibility() {
            log::debug!(
                "[ASSIGNABILITY] Union extensibility differs: {:?} vs {:?}",
                ta.union_flags,
                tb.union_flags
            );
            return false;
        }

        if !labels_compatible(ta, tb, extensibility.is_final()) {
            log::debug!("[ASSIGNABILITY] Union labels incompatible");
            return false;
        }

        let disc_a = &ta.discriminator.common;
        let disc_b = &tb.discriminator.common;
        if !self.strongly_assignable(&disc_a.type_id, &disc_b.type_id) {
            log::debug!("[ASSIGNABILITY] Union discriminators not strongly assignable");
            return false;
        }
        if disc_a.member_flags.is_key() != disc_b.member_flags.is_key() {
            return false;
        }

        if !self.consistency.ignore_member_names && !names_agree(ta, tb) {
            log::debug!("[ASSIGNABILITY] Union member id/name mismatch");
            return false;
        }

        // every label of B that also selects a member of A
        for mb in &tb.member_seq {
            for ma in &ta.member_seq {
                if shares_label(ma, mb) && !self.assignable(&ma.common.type_id, &mb.common.type_id) {
                    return false;
                }
            }
        }

        let default_a = ta.default_member();
        let default_b = tb.default_member();

        // labels of A that B routes to its default member
        if let Some(default_b) = default_b {
            let explicit_b: BTreeSet<i32> = tb
                .member_seq
                .iter()
                .flat_map(|m| m.common.label_seq.iter().copied())
                .collect();
            for ma in &ta.member_seq {
                let reaches_default = ma
                    .common
                    .label_seq
                    .iter()
                    .any(|label| !explicit_b.contains(label));
                if reaches_default && !self.assignable(&ma.common.type_id, &default_b.common.type_id)
                {
                    return false;
                }
            }
        }

        match (default_a, default_b) {
            (Some(da), Some(db)) => self.assignable(&da.common.type_id, &db.common.type_id),
            _ => true,
        }
    }
}

/// FINAL unions need identical label sets, others at least one shared label
fn labels_compatible(ta: &MinimalUnionType, tb: &MinimalUnionType, is_final: bool) -> bool {
    let mut labels_a: BTreeSet<i32> = ta
        .member_seq
        .iter()
        .flat_map(|m| m.common.label_seq.iter().copied())
        .collect();
    let mut labels_b = tb.member_seq.iter().flat_map(|m| m.common.label_seq.iter());

    if is_final {
        // a label listed twice in B finds nothing the second time
        let all_found = labels_b.all(|label| labels_a.remove(label));
        all_found && labels_a.is_empty()
    } else {
        labels_b.any(|label| labels_a.contains(label))
    }
}

/// Members with the same id have the same name, and vice versa
fn names_agree(ta: &MinimalUnionType, tb: &MinimalUnionType) -> bool {
    let id_to_name: HashMap<u32, NameHash> = ta
        .member_seq
        .iter()
        .map(|m| (m.common.member_id, m.detail.name_hash))
        .collect();
    let name_to_id: HashMap<NameHash, u32> = ta
        .member_seq
        .iter()
        .map(|m| (m.detail.name_hash, m.common.member_id))
        .collect();

    tb.member_seq.iter().all(|m| {
        id_to_name
            .get(&m.common.member_id)
            .map_or(true, |name| *name == m.detail.name_hash)
            && name_to_id
                .get(&m.detail.name_hash)
                .map_or(true, |id| *id == m.common.member_id)
    })
}

fn shares_label(ma: &MinimalUnionMember, mb: &MinimalUnionMember) -> bool {
    mb.common
        .label_seq
        .iter()
        .any(|label| ma.common.label_seq.contains(label))
}
