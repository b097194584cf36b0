// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! XCDR2 codec for TypeObject, its member/header types and TypeInformation.
//!
//! Aggregates are either FINAL (members concatenated) or APPENDABLE
//! (DHEADER + members). TypeInformation is the only MUTABLE one.

use super::helpers::{
    read_delimited, read_mutable, read_option, read_option_seq, read_primitive_seq,
    read_sequence, read_string, write_delimited, write_empty_delimited, write_member,
    write_option, write_option_seq, write_primitive_seq, write_sequence, write_string,
    NAME_BOUND,
};
use super::{Cdr2Decode, Cdr2Encode, Cdr2Reader, Cdr2Writer};
use crate::error::{CdrError, Result};
use crate::type_id::{EK_COMPLETE, EK_MINIMAL};
use crate::type_kind::TypeKind;
use crate::type_object::*;

macro_rules! encode_field {
    (val, $w:expr, $v:expr) => {
        $v.encode_cdr2($w)?
    };
    (seq, $w:expr, $v:expr) => {
        write_sequence($w, &$v)?
    };
    (prims, $w:expr, $v:expr) => {
        write_primitive_seq($w, &$v)?
    };
    (opt, $w:expr, $v:expr) => {
        write_option($w, &$v)?
    };
    (optseq, $w:expr, $v:expr) => {
        write_option_seq($w, &$v)?
    };
    (name, $w:expr, $v:expr) => {
        write_string($w, &$v, Some(NAME_BOUND))?
    };
}

macro_rules! decode_field {
    (val, $r:expr) => {
        Cdr2Decode::decode_cdr2($r)?
    };
    (seq, $r:expr) => {
        read_sequence($r)?
    };
    (prims, $r:expr) => {
        read_primitive_seq($r)?
    };
    (opt, $r:expr) => {
        read_option($r)?
    };
    (optseq, $r:expr) => {
        read_option_seq($r)?
    };
    (name, $r:expr) => {
        read_string($r, Some(NAME_BOUND))?
    };
}

/// Implement the codec for a struct from its field list.
///
/// `final` concatenates the fields, `delimited` wraps them in a DHEADER.
/// Each field is tagged with how it is encoded (`val`, `seq`, `prims`,
/// `opt`, `optseq`, `name`).
macro_rules! impl_cdr2_struct {
    (final $ty:ident { $($kind:ident $field:ident),+ $(,)? }) => {
        impl Cdr2Encode for $ty {
            fn encode_cdr2(&self, writer: &mut Cdr2Writer) -> Result<()> {
                $( encode_field!($kind, writer, self.$field); )+
                Ok(())
            }
        }

        impl Cdr2Decode for $ty {
            fn decode_cdr2(reader: &mut Cdr2Reader<'_>) -> Result<Self> {
                Ok($ty {
                    $( $field: decode_field!($kind, reader), )+
                })
            }
        }
    };
    (delimited $ty:ident { $($kind:ident $field:ident),+ $(,)? }) => {
        impl Cdr2Encode for $ty {
            fn encode_cdr2(&self, writer: &mut Cdr2Writer) -> Result<()> {
                write_delimited(writer, |w| {
                    $( encode_field!($kind, w, self.$field); )+
                    Ok(())
                })
            }
        }

        impl Cdr2Decode for $ty {
            fn decode_cdr2(reader: &mut Cdr2Reader<'_>) -> Result<Self> {
                read_delimited(reader, |r| {
                    Ok($ty {
                        $( $field: decode_field!($kind, r), )+
                    })
                })
            }
        }
    };
}

/// Header types with no members: a zero DHEADER.
macro_rules! impl_cdr2_empty {
    ($ty:ident) => {
        impl Cdr2Encode for $ty {
            fn encode_cdr2(&self, writer: &mut Cdr2Writer) -> Result<()> {
                write_empty_delimited(writer);
                Ok(())
            }
        }

        impl Cdr2Decode for $ty {
            fn decode_cdr2(reader: &mut Cdr2Reader<'_>) -> Result<Self> {
                read_delimited(reader, |_| Ok($ty))
            }
        }
    };
}

// Structures
impl_cdr2_struct!(final CommonStructMember { val member_id, val member_flags, val member_type_id });
impl_cdr2_struct!(delimited CompleteStructMember { val common, val detail });
impl_cdr2_struct!(delimited MinimalStructMember { val common, val detail });
impl_cdr2_struct!(delimited CompleteStructHeader { val base_type, val detail });
impl_cdr2_struct!(delimited MinimalStructHeader { val base_type });
impl_cdr2_struct!(final CompleteStructType { val struct_flags, val header, seq member_seq });
impl_cdr2_struct!(final MinimalStructType { val struct_flags, val header, seq member_seq });

// Unions
impl_cdr2_struct!(final CommonUnionMember {
    val member_id,
    val member_flags,
    val type_id,
    prims label_seq,
});
impl_cdr2_struct!(delimited CompleteUnionMember { val common, val detail });
impl_cdr2_struct!(delimited MinimalUnionMember { val common, val detail });
impl_cdr2_struct!(final CommonDiscriminatorMember { val member_flags, val type_id });
impl_cdr2_struct!(delimited CompleteDiscriminatorMember {
    val common,
    opt ann_builtin,
    optseq ann_custom,
});
impl_cdr2_struct!(delimited MinimalDiscriminatorMember { val common });
impl_cdr2_struct!(delimited CompleteUnionHeader { val detail });
impl_cdr2_empty!(MinimalUnionHeader);
impl_cdr2_struct!(final CompleteUnionType {
    val union_flags,
    val header,
    val discriminator,
    seq member_seq,
});
impl_cdr2_struct!(final MinimalUnionType {
    val union_flags,
    val header,
    val discriminator,
    seq member_seq,
});

// Annotations
impl_cdr2_struct!(final CommonAnnotationParameter { val member_flags, val member_type_id });
impl_cdr2_struct!(delimited CompleteAnnotationParameter {
    val common,
    name name,
    val default_value,
});
impl_cdr2_struct!(delimited MinimalAnnotationParameter {
    val common,
    val name_hash,
    val default_value,
});
impl_cdr2_struct!(delimited CompleteAnnotationHeader { name annotation_name });
impl_cdr2_empty!(MinimalAnnotationHeader);
impl_cdr2_struct!(final CompleteAnnotationType { val annotation_flag, val header, seq member_seq });
impl_cdr2_struct!(final MinimalAnnotationType { val annotation_flag, val header, seq member_seq });

// Aliases
impl_cdr2_struct!(final CommonAliasBody { val related_flags, val related_type });
impl_cdr2_struct!(delimited CompleteAliasBody { val common, opt ann_builtin, optseq ann_custom });
impl_cdr2_struct!(delimited MinimalAliasBody { val common });
impl_cdr2_struct!(delimited CompleteAliasHeader { val detail });
impl_cdr2_empty!(MinimalAliasHeader);
impl_cdr2_struct!(final CompleteAliasType { val alias_flags, val header, val body });
impl_cdr2_struct!(final MinimalAliasType { val alias_flags, val header, val body });

// Collections
impl_cdr2_struct!(final CommonCollectionElement { val element_flags, val type_id });
impl_cdr2_struct!(delimited CompleteCollectionElement { val common, val detail });
impl_cdr2_struct!(delimited MinimalCollectionElement { val common });
impl_cdr2_struct!(final CommonCollectionHeader { val bound });
impl_cdr2_struct!(delimited CompleteCollectionHeader { val common, opt detail });
impl_cdr2_struct!(delimited MinimalCollectionHeader { val common });
impl_cdr2_struct!(final CompleteSequenceType { val collection_flag, val header, val element });
impl_cdr2_struct!(final MinimalSequenceType { val collection_flag, val header, val element });
impl_cdr2_struct!(final CommonArrayHeader { prims bound_seq });
impl_cdr2_struct!(delimited CompleteArrayHeader { val common, val detail });
impl_cdr2_struct!(delimited MinimalArrayHeader { val common });
impl_cdr2_struct!(delimited CompleteArrayType { val collection_flag, val header, val element });
impl_cdr2_struct!(final MinimalArrayType { val collection_flag, val header, val element });
impl_cdr2_struct!(final CompleteMapType {
    val collection_flag,
    val header,
    val key,
    val element,
});
impl_cdr2_struct!(final MinimalMapType {
    val collection_flag,
    val header,
    val key,
    val element,
});

// Enumerations and bitmasks
impl_cdr2_struct!(delimited CommonEnumeratedLiteral { val value, val flags });
impl_cdr2_struct!(delimited CompleteEnumeratedLiteral { val common, val detail });
impl_cdr2_struct!(delimited MinimalEnumeratedLiteral { val common, val detail });
impl_cdr2_struct!(final CommonEnumeratedHeader { val bit_bound });
impl_cdr2_struct!(delimited CompleteEnumeratedHeader { val common, val detail });
impl_cdr2_struct!(delimited MinimalEnumeratedHeader { val common });
impl_cdr2_struct!(final CompleteEnumeratedType { val enum_flags, val header, seq literal_seq });
impl_cdr2_struct!(final MinimalEnumeratedType { val enum_flags, val header, seq literal_seq });
impl_cdr2_struct!(final CommonBitflag { val position, val flags });
impl_cdr2_struct!(delimited CompleteBitflag { val common, val detail });
impl_cdr2_struct!(delimited MinimalBitflag { val common, val detail });
impl_cdr2_struct!(delimited CompleteBitmaskType { val bitmask_flags, val header, seq flag_seq });
impl_cdr2_struct!(delimited MinimalBitmaskType { val bitmask_flags, val header, seq flag_seq });

// Bitsets
impl Cdr2Encode for CommonBitfield {
    fn encode_cdr2(&self, writer: &mut Cdr2Writer) -> Result<()> {
        writer.write_u16(self.position);
        self.flags.encode_cdr2(writer)?;
        writer.write_u8(self.bitcount);
        writer.write_u8(self.holder_type.to_u8());
        Ok(())
    }
}

impl Cdr2Decode for CommonBitfield {
    fn decode_cdr2(reader: &mut Cdr2Reader<'_>) -> Result<Self> {
        let position = reader.read_u16()?;
        let flags = Cdr2Decode::decode_cdr2(reader)?;
        let bitcount = reader.read_u8()?;
        let offset = reader.offset();
        let holder = reader.read_u8()?;
        let holder_type = TypeKind::from_u8(holder).ok_or_else(|| CdrError::InvalidData {
            reason: format!("bitfield holder kind {:#04x} at offset {}", holder, offset),
        })?;
        Ok(CommonBitfield {
            position,
            flags,
            bitcount,
            holder_type,
        })
    }
}

impl_cdr2_struct!(delimited CompleteBitfield { val common, val detail });
impl_cdr2_struct!(delimited MinimalBitfield { val common, val name_hash });
impl_cdr2_struct!(delimited CompleteBitsetHeader { val detail });
impl_cdr2_empty!(MinimalBitsetHeader);
impl_cdr2_struct!(delimited CompleteBitsetType { val bitset_flags, val header, seq field_seq });
impl_cdr2_struct!(delimited MinimalBitsetType { val bitset_flags, val header, seq field_seq });

/// Generate the TypeKind-discriminated union codec for one TypeObject form
macro_rules! impl_cdr2_type_object_union {
    ($object:ident) => {
        impl Cdr2Encode for $object {
            fn encode_cdr2(&self, writer: &mut Cdr2Writer) -> Result<()> {
                writer.write_u8(self.kind());
                match self {
                    $object::Alias(t) => t.encode_cdr2(writer),
                    $object::Annotation(t) => t.encode_cdr2(writer),
                    $object::Struct(t) => t.encode_cdr2(writer),
                    $object::Union(t) => t.encode_cdr2(writer),
                    $object::Bitset(t) => t.encode_cdr2(writer),
                    $object::Sequence(t) => t.encode_cdr2(writer),
                    $object::Array(t) => t.encode_cdr2(writer),
                    $object::Map(t) => t.encode_cdr2(writer),
                    $object::Enumerated(t) => t.encode_cdr2(writer),
                    $object::Bitmask(t) => t.encode_cdr2(writer),
                    $object::Extended(_) => {
                        write_empty_delimited(writer);
                        Ok(())
                    }
                }
            }
        }

        impl Cdr2Decode for $object {
            fn decode_cdr2(reader: &mut Cdr2Reader<'_>) -> Result<Self> {
                let kind = reader.read_u8()?;
                Ok(match TypeKind::from_u8(kind) {
                    Some(TypeKind::TK_ALIAS) => $object::Alias(Cdr2Decode::decode_cdr2(reader)?),
                    Some(TypeKind::TK_ANNOTATION) => {
                        $object::Annotation(Cdr2Decode::decode_cdr2(reader)?)
                    }
                    Some(TypeKind::TK_STRUCTURE) => {
                        $object::Struct(Cdr2Decode::decode_cdr2(reader)?)
                    }
                    Some(TypeKind::TK_UNION) => $object::Union(Cdr2Decode::decode_cdr2(reader)?),
                    Some(TypeKind::TK_BITSET) => {
                        $object::Bitset(Cdr2Decode::decode_cdr2(reader)?)
                    }
                    Some(TypeKind::TK_SEQUENCE) => {
                        $object::Sequence(Cdr2Decode::decode_cdr2(reader)?)
                    }
                    Some(TypeKind::TK_ARRAY) => $object::Array(Cdr2Decode::decode_cdr2(reader)?),
                    Some(TypeKind::TK_MAP) => $object::Map(Cdr2Decode::decode_cdr2(reader)?),
                    Some(TypeKind::TK_ENUM) => {
                        $object::Enumerated(Cdr2Decode::decode_cdr2(reader)?)
                    }
                    Some(TypeKind::TK_BITMASK) => {
                        $object::Bitmask(Cdr2Decode::decode_cdr2(reader)?)
                    }
                    _ => {
                        read_delimited(reader, |_| Ok(()))?;
                        $object::Extended(kind)
                    }
                })
            }
        }
    };
}

impl_cdr2_type_object_union!(CompleteTypeObject);
impl_cdr2_type_object_union!(MinimalTypeObject);

/// DHEADER, equivalence kind octet, then the form-specific union
impl Cdr2Encode for TypeObject {
    fn encode_cdr2(&self, writer: &mut Cdr2Writer) -> Result<()> {
        write_delimited(writer, |w| {
            w.write_u8(self.equivalence_octet());
            match self {
                TypeObject::Complete(c) => c.encode_cdr2(w),
                TypeObject::Minimal(m) => m.encode_cdr2(w),
                TypeObject::Extended(_) => Ok(()),
            }
        })
    }
}

impl Cdr2Decode for TypeObject {
    fn decode_cdr2(reader: &mut Cdr2Reader<'_>) -> Result<Self> {
        // unknown kinds keep their octet; the body is skipped with the DHEADER
        read_delimited(reader, |r| match r.read_u8()? {
            EK_COMPLETE => Ok(TypeObject::Complete(Cdr2Decode::decode_cdr2(r)?)),
            EK_MINIMAL => Ok(TypeObject::Minimal(Cdr2Decode::decode_cdr2(r)?)),
            other => Ok(TypeObject::Extended(other)),
        })
    }
}

impl_cdr2_struct!(final TypeIdentifierTypeObjectPair { val type_identifier, val type_object });
impl_cdr2_struct!(final TypeIdentifierPair { val type_identifier1, val type_identifier2 });
impl_cdr2_struct!(delimited TypeIdentifierWithSize { val type_id, val typeobject_serialized_size });
impl_cdr2_struct!(delimited TypeIdentifierWithDependencies {
    val typeid_with_size,
    val dependent_typeid_count,
    seq dependent_typeids,
});

/// MUTABLE: each member behind an EMHEADER
impl Cdr2Encode for TypeInformation {
    fn encode_cdr2(&self, writer: &mut Cdr2Writer) -> Result<()> {
        write_delimited(writer, |w| {
            write_member(w, TYPE_INFORMATION_MINIMAL_MEMBER_ID, false, |w| {
                self.minimal.encode_cdr2(w)
            })?;
            write_member(w, TYPE_INFORMATION_COMPLETE_MEMBER_ID, false, |w| {
                self.complete.encode_cdr2(w)
            })
        })
    }
}

impl Cdr2Decode for TypeInformation {
    fn decode_cdr2(reader: &mut Cdr2Reader<'_>) -> Result<Self> {
        let mut info = TypeInformation::default();
        read_mutable(reader, |r, member| match member.member_id {
            TYPE_INFORMATION_MINIMAL_MEMBER_ID => {
                info.minimal = Cdr2Decode::decode_cdr2(r)?;
                Ok(true)
            }
            TYPE_INFORMATION_COMPLETE_MEMBER_ID => {
                info.complete = Cdr2Decode::decode_cdr2(r)?;
                Ok(true)
            }
            _ => Ok(false),
        })?;
        Ok(info)
    }
}
