// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! XCDR2 codec for TypeIdentifier and its building blocks.
//!
//! TypeIdentifier is a FINAL union: discriminator octet, then the branch.
//! Only the strongly-connected-component branch is delimited.

use super::helpers::{read_delimited, read_primitive_seq, write_delimited, write_primitive_seq};
use super::{Cdr2Decode, Cdr2Encode, Cdr2Reader, Cdr2Writer};
use crate::equivalence::{EquivalenceHash, NameHash};
use crate::error::{CdrError, Result};
use crate::flags::MemberFlag;
use crate::type_id::{
    EquivalenceKind, PlainArrayLElemDefn, PlainArraySElemDefn, PlainCollectionHeader,
    PlainMapLTypeDefn, PlainMapSTypeDefn, PlainSequenceLElemDefn, PlainSequenceSElemDefn,
    StronglyConnectedComponentId, TypeIdentifier, TypeObjectHashId, EK_COMPLETE, EK_MINIMAL,
};
use crate::type_kind::{
    TypeKind, TI_PLAIN_ARRAY_LARGE, TI_PLAIN_ARRAY_SMALL, TI_PLAIN_MAP_LARGE, TI_PLAIN_MAP_SMALL,
    TI_PLAIN_SEQUENCE_LARGE, TI_PLAIN_SEQUENCE_SMALL, TI_STRING16_LARGE, TI_STRING16_SMALL,
    TI_STRING8_LARGE, TI_STRING8_SMALL, TI_STRONGLY_CONNECTED_COMPONENT,
};
use std::sync::Arc;

impl Cdr2Encode for EquivalenceHash {
    fn encode_cdr2(&self, writer: &mut Cdr2Writer) -> Result<()> {
        writer.write_bytes(self.as_bytes());
        Ok(())
    }
}

impl Cdr2Decode for EquivalenceHash {
    fn decode_cdr2(reader: &mut Cdr2Reader<'_>) -> Result<Self> {
        let mut bytes = [0u8; 14];
        bytes.copy_from_slice(reader.read_bytes(14)?);
        Ok(EquivalenceHash::from_bytes(bytes))
    }
}

impl Cdr2Encode for NameHash {
    fn encode_cdr2(&self, writer: &mut Cdr2Writer) -> Result<()> {
        writer.write_bytes(self.as_bytes());
        Ok(())
    }
}

impl Cdr2Decode for NameHash {
    fn decode_cdr2(reader: &mut Cdr2Reader<'_>) -> Result<Self> {
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(reader.read_bytes(4)?);
        Ok(NameHash(bytes))
    }
}

impl Cdr2Encode for MemberFlag {
    fn encode_cdr2(&self, writer: &mut Cdr2Writer) -> Result<()> {
        writer.write_u16(self.0);
        Ok(())
    }
}

impl Cdr2Decode for MemberFlag {
    fn decode_cdr2(reader: &mut Cdr2Reader<'_>) -> Result<Self> {
        Ok(MemberFlag(reader.read_u16()?))
    }
}

impl Cdr2Encode for crate::flags::TypeFlag {
    fn encode_cdr2(&self, writer: &mut Cdr2Writer) -> Result<()> {
        writer.write_u16(self.0);
        Ok(())
    }
}

impl Cdr2Decode for crate::flags::TypeFlag {
    fn decode_cdr2(reader: &mut Cdr2Reader<'_>) -> Result<Self> {
        Ok(crate::flags::TypeFlag(reader.read_u16()?))
    }
}

impl Cdr2Encode for EquivalenceKind {
    fn encode_cdr2(&self, writer: &mut Cdr2Writer) -> Result<()> {
        writer.write_u8(self.to_u8());
        Ok(())
    }
}

impl Cdr2Decode for EquivalenceKind {
    fn decode_cdr2(reader: &mut Cdr2Reader<'_>) -> Result<Self> {
        let offset = reader.offset();
        let value = reader.read_u8()?;
        EquivalenceKind::from_u8(value).ok_or_else(|| CdrError::InvalidData {
            reason: format!("equivalence kind {:#04x} at offset {}", value, offset),
        })
    }
}

impl Cdr2Encode for PlainCollectionHeader {
    fn encode_cdr2(&self, writer: &mut Cdr2Writer) -> Result<()> {
        self.equiv_kind.encode_cdr2(writer)?;
        self.element_flags.encode_cdr2(writer)
    }
}

impl Cdr2Decode for PlainCollectionHeader {
    fn decode_cdr2(reader: &mut Cdr2Reader<'_>) -> Result<Self> {
        Ok(PlainCollectionHeader {
            equiv_kind: EquivalenceKind::decode_cdr2(reader)?,
            element_flags: MemberFlag::decode_cdr2(reader)?,
        })
    }
}

/// Kind octet, then the hash for EK_MINIMAL/EK_COMPLETE
impl Cdr2Encode for TypeObjectHashId {
    fn encode_cdr2(&self, writer: &mut Cdr2Writer) -> Result<()> {
        self.kind.encode_cdr2(writer)?;
        match self.kind {
            EquivalenceKind::Minimal | EquivalenceKind::Complete => self.hash.encode_cdr2(writer),
            EquivalenceKind::Both => Ok(()),
        }
    }
}

impl Cdr2Decode for TypeObjectHashId {
    fn decode_cdr2(reader: &mut Cdr2Reader<'_>) -> Result<Self> {
        let kind = EquivalenceKind::decode_cdr2(reader)?;
        let hash = match kind {
            EquivalenceKind::Minimal | EquivalenceKind::Complete => {
                EquivalenceHash::decode_cdr2(reader)?
            }
            EquivalenceKind::Both => EquivalenceHash::zero(),
        };
        Ok(TypeObjectHashId { kind, hash })
    }
}

impl Cdr2Encode for StronglyConnectedComponentId {
    fn encode_cdr2(&self, writer: &mut Cdr2Writer) -> Result<()> {
        write_delimited(writer, |w| {
            self.sc_component_id.encode_cdr2(w)?;
            w.write_i32(self.scc_length);
            w.write_i32(self.scc_index);
            Ok(())
        })
    }
}

impl Cdr2Decode for StronglyConnectedComponentId {
    fn decode_cdr2(reader: &mut Cdr2Reader<'_>) -> Result<Self> {
        read_delimited(reader, |r| {
            Ok(StronglyConnectedComponentId {
                sc_component_id: TypeObjectHashId::decode_cdr2(r)?,
                scc_length: r.read_i32()?,
                scc_index: r.read_i32()?,
            })
        })
    }
}

impl Cdr2Encode for TypeIdentifier {
    fn encode_cdr2(&self, writer: &mut Cdr2Writer) -> Result<()> {
        writer.write_u8(self.kind());
        match self {
            TypeIdentifier::None | TypeIdentifier::Primitive(_) => Ok(()),
            TypeIdentifier::StringSmall { bound } | TypeIdentifier::WStringSmall { bound } => {
                writer.write_u8(*bound);
                Ok(())
            }
            TypeIdentifier::StringLarge { bound } | TypeIdentifier::WStringLarge { bound } => {
                writer.write_u32(*bound);
                Ok(())
            }
            TypeIdentifier::PlainSequenceSmall(defn) => {
                defn.header.encode_cdr2(writer)?;
                writer.write_u8(defn.bound);
                defn.element_identifier.encode_cdr2(writer)
            }
            TypeIdentifier::PlainSequenceLarge(defn) => {
                defn.header.encode_cdr2(writer)?;
                writer.write_u32(defn.bound);
                defn.element_identifier.encode_cdr2(writer)
            }
            TypeIdentifier::PlainArraySmall(defn) => {
                defn.header.encode_cdr2(writer)?;
                write_primitive_seq(writer, &defn.array_bound_seq)?;
                defn.element_identifier.encode_cdr2(writer)
            }
            TypeIdentifier::PlainArrayLarge(defn) => {
                defn.header.encode_cdr2(writer)?;
                write_primitive_seq(writer, &defn.array_bound_seq)?;
                defn.element_identifier.encode_cdr2(writer)
            }
            TypeIdentifier::PlainMapSmall(defn) => {
                defn.header.encode_cdr2(writer)?;
                writer.write_u8(defn.bound);
                defn.element_identifier.encode_cdr2(writer)?;
                defn.key_flags.encode_cdr2(writer)?;
                defn.key_identifier.encode_cdr2(writer)
            }
            TypeIdentifier::PlainMapLarge(defn) => {
                defn.header.encode_cdr2(writer)?;
                writer.write_u32(defn.bound);
                defn.element_identifier.encode_cdr2(writer)?;
                defn.key_flags.encode_cdr2(writer)?;
                defn.key_identifier.encode_cdr2(writer)
            }
            TypeIdentifier::StronglyConnected(scc) => scc.encode_cdr2(writer),
            TypeIdentifier::Minimal(hash) | TypeIdentifier::Complete(hash) => {
                hash.encode_cdr2(writer)
            }
            // Extended branch: an empty appendable placeholder
            TypeIdentifier::Extended(_) => {
                write_delimited(writer, |_| Ok(()))
            }
        }
    }
}

fn read_element(reader: &mut Cdr2Reader<'_>) -> Result<Arc<TypeIdentifier>> {
    reader.enter()?;
    let element = TypeIdentifier::decode_cdr2(reader);
    reader.leave();
    Ok(Arc::new(element?))
}

impl Cdr2Decode for TypeIdentifier {
    fn decode_cdr2(reader: &mut Cdr2Reader<'_>) -> Result<Self> {
        let kind = reader.read_u8()?;
        let id = match kind {
            TI_STRING8_SMALL => TypeIdentifier::StringSmall {
                bound: reader.read_u8()?,
            },
            TI_STRING8_LARGE => TypeIdentifier::StringLarge {
                bound: reader.read_u32()?,
            },
            TI_STRING16_SMALL => TypeIdentifier::WStringSmall {
                bound: reader.read_u8()?,
            },
            TI_STRING16_LARGE => TypeIdentifier::WStringLarge {
                bound: reader.read_u32()?,
            },
            TI_PLAIN_SEQUENCE_SMALL => {
                TypeIdentifier::PlainSequenceSmall(PlainSequenceSElemDefn {
                    header: PlainCollectionHeader::decode_cdr2(reader)?,
                    bound: reader.read_u8()?,
                    element_identifier: read_element(reader)?,
                })
            }
            TI_PLAIN_SEQUENCE_LARGE => {
                TypeIdentifier::PlainSequenceLarge(PlainSequenceLElemDefn {
                    header: PlainCollectionHeader::decode_cdr2(reader)?,
                    bound: reader.read_u32()?,
                    element_identifier: read_element(reader)?,
                })
            }
            TI_PLAIN_ARRAY_SMALL => TypeIdentifier::PlainArraySmall(PlainArraySElemDefn {
                header: PlainCollectionHeader::decode_cdr2(reader)?,
                array_bound_seq: read_primitive_seq(reader)?,
                element_identifier: read_element(reader)?,
            }),
            TI_PLAIN_ARRAY_LARGE => TypeIdentifier::PlainArrayLarge(PlainArrayLElemDefn {
                header: PlainCollectionHeader::decode_cdr2(reader)?,
                array_bound_seq: read_primitive_seq(reader)?,
                element_identifier: read_element(reader)?,
            }),
            TI_PLAIN_MAP_SMALL => TypeIdentifier::PlainMapSmall(PlainMapSTypeDefn {
                header: PlainCollectionHeader::decode_cdr2(reader)?,
                bound: reader.read_u8()?,
                element_identifier: read_element(reader)?,
                key_flags: MemberFlag::decode_cdr2(reader)?,
                key_identifier: read_element(reader)?,
            }),
            TI_PLAIN_MAP_LARGE => TypeIdentifier::PlainMapLarge(PlainMapLTypeDefn {
                header: PlainCollectionHeader::decode_cdr2(reader)?,
                bound: reader.read_u32()?,
                element_identifier: read_element(reader)?,
                key_flags: MemberFlag::decode_cdr2(reader)?,
                key_identifier: read_element(reader)?,
            }),
            TI_STRONGLY_CONNECTED_COMPONENT => TypeIdentifier::StronglyConnected(
                StronglyConnectedComponentId::decode_cdr2(reader)?,
            ),
            EK_MINIMAL => TypeIdentifier::Minimal(EquivalenceHash::decode_cdr2(reader)?),
            EK_COMPLETE => TypeIdentifier::Complete(EquivalenceHash::decode_cdr2(reader)?),
            other => match TypeKind::from_u8(other) {
                Some(TypeKind::TK_NONE) => TypeIdentifier::None,
                Some(primitive) if primitive.is_primitive() => TypeIdentifier::Primitive(primitive),
                _ => {
                    read_delimited(reader, |_| Ok(()))?;
                    TypeIdentifier::Extended(other)
                }
            },
        };
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::super::{from_bytes, to_bytes, Encoding};
    use super::*;

    fn roundtrip(id: &TypeIdentifier, encoding: Encoding) -> TypeIdentifier {
        let bytes = to_bytes(id, encoding).expect("encode");
        from_bytes(&bytes, encoding).expect("decode")
    }

    #[test]
    fn test_primitive_identifier_is_one_octet() {
        let bytes = to_bytes(&TypeIdentifier::TK_INT32, Encoding::xcdr2_le()).expect("encode");
        assert_eq!(bytes, vec![0x04]);
        let bytes = to_bytes(&TypeIdentifier::None, Encoding::xcdr2_le()).expect("encode");
        assert_eq!(bytes, vec![0x00]);
    }

    #[test]
    fn test_string_identifier_layout() {
        let bytes = to_bytes(&TypeIdentifier::string(64), Encoding::xcdr2_le()).expect("encode");
        assert_eq!(bytes, vec![TI_STRING8_SMALL, 64]);
        let bytes = to_bytes(&TypeIdentifier::string(1024), Encoding::xcdr2_be()).expect("encode");
        assert_eq!(bytes, vec![TI_STRING8_LARGE, 0, 0, 0, 0, 0, 4, 0]);
    }

    #[test]
    fn test_plain_sequence_layout() {
        let id = TypeIdentifier::sequence(TypeIdentifier::TK_UINT16, 5, MemberFlag::empty());
        let bytes = to_bytes(&id, Encoding::xcdr2_le()).expect("encode");
        // kind, equiv_kind, element_flags(2), bound, element kind
        assert_eq!(
            bytes,
            vec![TI_PLAIN_SEQUENCE_SMALL, 0xF3, 0, 0, 5, 0x06]
        );
        assert_eq!(roundtrip(&id, Encoding::xcdr2_le()), id);
    }

    #[test]
    fn test_explicit_header_equiv_kind_is_encoded() {
        let header = PlainCollectionHeader::new(EquivalenceKind::Minimal, MemberFlag::empty());
        let id = TypeIdentifier::sequence_with_header(header, TypeIdentifier::TK_UINT16, 5);
        let bytes = to_bytes(&id, Encoding::xcdr2_le()).expect("encode");
        assert_eq!(bytes[1], EquivalenceKind::Minimal.to_u8());
        assert_eq!(roundtrip(&id, Encoding::xcdr2_le()), id);
    }

    #[test]
    fn test_plain_collections_roundtrip_both_endians() {
        let hashed = TypeIdentifier::Minimal(EquivalenceHash::from_bytes([0x5A; 14]));
        let ids = vec![
            TypeIdentifier::sequence(hashed.clone(), 100_000, MemberFlag::IS_EXTERNAL),
            TypeIdentifier::array(TypeIdentifier::TK_FLOAT64, &[3, 3], MemberFlag::empty()),
            TypeIdentifier::array(hashed.clone(), &[70_000], MemberFlag::empty()),
            TypeIdentifier::map(
                TypeIdentifier::string(16),
                hashed.clone(),
                10,
                MemberFlag::IS_KEY,
                MemberFlag::empty(),
            ),
            TypeIdentifier::map(
                TypeIdentifier::TK_INT64,
                TypeIdentifier::wstring(0),
                1000,
                MemberFlag::empty(),
                MemberFlag::empty(),
            ),
            TypeIdentifier::Complete(EquivalenceHash::from_bytes([0xA5; 14])),
        ];
        for encoding in [Encoding::xcdr2_le(), Encoding::xcdr2_be()] {
            for id in &ids {
                assert_eq!(&roundtrip(id, encoding), id);
            }
        }
    }

    #[test]
    fn test_strongly_connected_roundtrip() {
        let id = TypeIdentifier::StronglyConnected(StronglyConnectedComponentId {
            sc_component_id: TypeObjectHashId {
                kind: EquivalenceKind::Minimal,
                hash: EquivalenceHash::from_bytes([9; 14]),
            },
            scc_length: 2,
            scc_index: 1,
        });
        let bytes = to_bytes(&id, Encoding::xcdr2_le()).expect("encode");
        // kind, 3 pad, DHEADER = 1 + 14 + 1 pad + 4 + 4
        assert_eq!(&bytes[0..8], &[TI_STRONGLY_CONNECTED_COMPONENT, 0, 0, 0, 24, 0, 0, 0]);
        assert_eq!(roundtrip(&id, Encoding::xcdr2_le()), id);
    }

    #[test]
    fn test_unknown_kind_decodes_as_extended() {
        // 0xC0 with an empty DHEADER, followed by unrelated data
        let bytes = [0xC0u8, 0, 0, 0, 0, 0, 0, 0, 0xEE];
        let mut reader = Cdr2Reader::new(&bytes, Encoding::xcdr2_le());
        let id = TypeIdentifier::decode_cdr2(&mut reader).expect("decode");
        assert_eq!(id, TypeIdentifier::Extended(0xC0));
        assert_eq!(reader.offset(), 8);
        assert_eq!(roundtrip(&id, Encoding::xcdr2_le()), id);
    }

    fn nested_sequences(depth: u32) -> TypeIdentifier {
        (0..depth).fold(TypeIdentifier::TK_INT32, |id, _| {
            TypeIdentifier::sequence(id, 1000, MemberFlag::empty())
        })
    }

    #[test]
    fn test_nesting_up_to_limit_decodes() {
        let id = nested_sequences(super::super::MAX_NESTING_DEPTH);
        assert_eq!(roundtrip(&id, Encoding::xcdr2_le()), id);
    }

    #[test]
    fn test_nesting_past_limit_is_rejected() {
        let id = nested_sequences(super::super::MAX_NESTING_DEPTH + 1);
        let bytes = to_bytes(&id, Encoding::xcdr2_be()).expect("encode");
        let err = from_bytes::<TypeIdentifier>(&bytes, Encoding::xcdr2_be()).expect_err("too deep");
        assert!(matches!(err, CdrError::InvalidData { .. }), "{:?}", err);
    }

    #[test]
    fn test_deeply_nested_buffer_fails_without_overflow() {
        // one large plain sequence level is 8 octets and keeps alignment
        let level = to_bytes(
            &TypeIdentifier::sequence(TypeIdentifier::TK_INT32, 1000, MemberFlag::empty()),
            Encoding::xcdr2_le(),
        )
        .expect("encode");
        assert_eq!(level.len(), 9);
        let mut bytes = level[..8].repeat(50_000);
        bytes.push(0x04);

        let err = from_bytes::<TypeIdentifier>(&bytes, Encoding::xcdr2_le()).expect_err("too deep");
        assert!(matches!(err, CdrError::InvalidData { .. }), "{:?}", err);
    }
}
