// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Structure rule (Section 7.2.4.4.4.4.6).

use super::collections::{map_bound, sequence_bound};
use super::enums::literals_superset;
use super::keys::{erase_key, hold_key};
use super::{Resolved, TypeAssignability, TypeRef, MAX_ALIAS_CHAIN};
use crate::type_id::TypeIdentifier;
use crate::type_object::{MinimalStructMember, MinimalStructType, MinimalTypeObject};
use std::borrow::Cow;
use std::mem;

type MemberPair<'m> = (&'m MinimalStructMember, &'m MinimalStructMember);

impl<'a> TypeAssignability<'a> {
    pub(super) fn assignable_struct(&self, ta: &MinimalStructType, tb: &MinimalStructType) -> bool {
        let extensibility = ta.struct_flags.extensibility();
        if extensibility != tb.struct_flags.extensibility() {
            log::debug!(
                "[ASSIGNABILITY] Struct extensibility differs: {:?} vs {:?}",
                ta.struct_flags,
                tb.struct_flags
            );
            return false;
        }

        let (Some(members_a), Some(members_b)) = (self.struct_members(ta), self.struct_members(tb))
        else {
            return false;
        };

        if extensibility.is_final() && members_a.len() != members_b.len() {
            log::debug!(
                "[ASSIGNABILITY] Final struct member count differs: {} vs {}",
                members_a.len(),
                members_b.len()
            );
            return false;
        }

        // final and appendable: positional prefix must line up
        if extensibility.is_final() || extensibility.is_appendable() {
            for (ma, mb) in members_a.iter().zip(members_b.iter()) {
                if ma.common.member_id != mb.common.member_id
                    || ma.common.member_flags.is_optional() != mb.common.member_flags.is_optional()
                    || !self.strongly_assignable(&ma.common.member_type_id, &mb.common.member_type_id)
                {
                    log::debug!(
                        "[ASSIGNABILITY] Member {} does not line up with member {}",
                        ma.common.member_id,
                        mb.common.member_id
                    );
                    return false;
                }
            }
        }

        let Some(matched) = self.match_members(&members_a, &members_b) else {
            return false;
        };
        if matched.is_empty() {
            log::debug!("[ASSIGNABILITY] Structs share no member");
            return false;
        }

        if !matched.iter().all(|(ma, mb)| self.assignable_member_type(ma, mb)) {
            return false;
        }

        let required = |m: &&MinimalStructMember| {
            let flags = m.common.member_flags;
            (flags.is_must_understand() && !flags.is_optional()) || flags.is_key()
        };
        let a_ok = members_a
            .iter()
            .filter(required)
            .all(|m| matched.iter().any(|(ma, _)| ma.common.member_id == m.common.member_id));
        let b_ok = members_b
            .iter()
            .filter(required)
            .all(|m| matched.iter().any(|(_, mb)| mb.common.member_id == m.common.member_id));
        if !(a_ok && b_ok) {
            log::debug!("[ASSIGNABILITY] A key or must-understand member is unmatched");
            return false;
        }

        matched
            .iter()
            .filter(|(_, mb)| mb.common.member_flags.is_key())
            .all(|(ma, mb)| self.assignable_key_member(ma, mb))
    }

    /// Members including those inherited from base types, base first
    fn struct_members<'s>(&self, ty: &'s MinimalStructType) -> Option<Cow<'s, [MinimalStructMember]>> {
        if !ty.has_base() {
            return Some(Cow::Borrowed(ty.member_seq.as_slice()));
        }

        let mut chain = vec![ty];
        let mut base = &ty.header.base_type;
        while !base.is_none() {
            if chain.len() > MAX_ALIAS_CHAIN {
                return None;
            }
            match self.resolve_object(base) {
                Some(MinimalTypeObject::Struct(parent)) => {
                    chain.push(parent);
                    base = &parent.header.base_type;
                }
                _ => {
                    log::debug!("[ASSIGNABILITY] Cannot resolve base type {:?}", base);
                    return None;
                }
            }
        }

        let members = chain
            .iter()
            .rev()
            .flat_map(|t| t.member_seq.iter().cloned())
            .collect::<Vec<_>>();
        Some(Cow::Owned(members))
    }

    /// Pair members of A with members of B by id (and name unless names
    /// are ignored). `None` if a name and id disagree.
    fn match_members<'m>(
        &self,
        members_a: &'m [MinimalStructMember],
        members_b: &'m [MinimalStructMember],
    ) -> Option<Vec<MemberPair<'m>>> {
        let ignore_names = self.consistency.ignore_member_names;
        let mut matched = Vec::new();
        for ma in members_a {
            for mb in members_b {
                let same_id = ma.common.member_id == mb.common.member_id;
                if ignore_names {
                    if same_id {
                        matched.push((ma, mb));
                        break;
                    }
                    continue;
                }
                let same_name = ma.detail.name_hash == mb.detail.name_hash;
                if same_id != same_name {
                    log::debug!(
                        "[ASSIGNABILITY] Member id/name mismatch: {} {:?} vs {} {:?}",
                        ma.common.member_id,
                        ma.detail.name_hash,
                        mb.common.member_id,
                        mb.detail.name_hash
                    );
                    return None;
                }
                if same_id {
                    matched.push((ma, mb));
                    break;
                }
            }
        }
        Some(matched)
    }

    /// Aggregated member types compare as KeyErased, others directly
    fn assignable_member_type(&self, ma: &MinimalStructMember, mb: &MinimalStructMember) -> bool {
        let type_a = &ma.common.member_type_id;
        let type_b = &mb.common.member_type_id;
        match self.aggregate(type_b) {
            Some(object_b) => match self.aggregate(type_a) {
                Some(object_a) if same_kind(object_a, object_b) => self.assignable(
                    &erase_key(object_a.clone()),
                    &erase_key(object_b.clone()),
                ),
                _ => false,
            },
            None => self.assignable(type_a, type_b),
        }
    }

    /// Rules that only apply to key members of B and their match in A
    fn assignable_key_member(&self, ma: &MinimalStructMember, mb: &MinimalStructMember) -> bool {
        let type_a = &ma.common.member_type_id;
        let type_b = &mb.common.member_type_id;
        let Some(resolved_b) = self.resolve(TypeRef::Id(type_b)) else {
            return true;
        };
        let resolved_a = self.resolve(TypeRef::Id(type_a));

        if let Resolved::Id(id_b) = resolved_b {
            if let Some(bound_b) = id_b.string_bound() {
                if self.consistency.ignore_string_bounds {
                    return true;
                }
                let bound_a = match resolved_a {
                    Some(Resolved::Id(id_a)) => id_a.string_bound(),
                    _ => None,
                };
                return bound_a.is_some_and(|bound_a| bound_covers(bound_a, bound_b));
            }
        }

        if let Resolved::Object(MinimalTypeObject::Enumerated(enum_b)) = resolved_b {
            return match resolved_a {
                Some(Resolved::Object(MinimalTypeObject::Enumerated(enum_a))) => {
                    literals_superset(enum_a, enum_b)
                }
                _ => false,
            };
        }

        for bound_of in [sequence_bound, map_bound] {
            if let Some(bound_b) = bound_of(resolved_b) {
                if self.consistency.ignore_sequence_bounds {
                    return true;
                }
                return resolved_a
                    .and_then(bound_of)
                    .is_some_and(|bound_a| bound_covers(bound_a, bound_b));
            }
        }

        match (resolved_a, resolved_b) {
            (Some(Resolved::Object(object_a)), Resolved::Object(object_b))
                if is_aggregate(object_b) =>
            {
                same_kind(object_a, object_b)
                    && self.assignable(&hold_key(object_a.clone()), &hold_key(object_b.clone()))
                    && self.union_key_cases(object_a, object_b)
            }
            (_, Resolved::Object(object_b)) if is_aggregate(object_b) => false,
            _ => true,
        }
    }

    /// For union keys, every label shared by both sides must select members
    /// whose KeyHolder types are assignable.
    fn union_key_cases(&self, object_a: &MinimalTypeObject, object_b: &MinimalTypeObject) -> bool {
        let (MinimalTypeObject::Union(ua), MinimalTypeObject::Union(ub)) = (object_a, object_b) else {
            return true;
        };
        for mb in &ub.member_seq {
            for ma in &ua.member_seq {
                let shares_label = mb
                    .common
                    .label_seq
                    .iter()
                    .any(|label| ma.common.label_seq.contains(label));
                if !shares_label {
                    continue;
                }
                let holder_a = self.hold_key_of(&ma.common.type_id);
                let holder_b = self.hold_key_of(&mb.common.type_id);
                let ref_a = holder_a
                    .as_ref()
                    .map_or(TypeRef::Id(&ma.common.type_id), TypeRef::Object);
                let ref_b = holder_b
                    .as_ref()
                    .map_or(TypeRef::Id(&mb.common.type_id), TypeRef::Object);
                if !self.assignable(ref_a, ref_b) {
                    return false;
                }
            }
        }
        true
    }

    /// Struct or union behind an identifier, aliases followed
    fn aggregate(&self, id: &TypeIdentifier) -> Option<&'a MinimalTypeObject> {
        self.resolve_object(id).filter(|object| is_aggregate(object))
    }
}

fn is_aggregate(object: &MinimalTypeObject) -> bool {
    matches!(object, MinimalTypeObject::Struct(_) | MinimalTypeObject::Union(_))
}

fn same_kind(a: &MinimalTypeObject, b: &MinimalTypeObject) -> bool {
    mem::discriminant(a) == mem::discriminant(b)
}

/// `bound_a` can hold everything `bound_b` can; 0 is unbounded
fn bound_covers(bound_a: u32, bound_b: u32) -> bool {
    bound_a == 0 || (bound_b != 0 && bound_a >= bound_b)
}
