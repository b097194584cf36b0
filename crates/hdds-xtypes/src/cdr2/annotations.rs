// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! XCDR2 codec for annotation values, applied annotations and details.

use super::helpers::{
    read_delimited, read_option, read_option_seq, read_string, read_wstring, write_delimited,
    write_empty_delimited, write_option, write_option_seq, write_string, write_wstring,
    NAME_BOUND, VERBATIM_TAG_BOUND,
};
use super::{Cdr2Decode, Cdr2Encode, Cdr2Reader, Cdr2Writer};
use crate::equivalence::NameHash;
use crate::error::Result;
use crate::type_id::TypeIdentifier;
use crate::type_kind::TypeKind;
use crate::type_object::{
    AnnotationParameterValue, AppliedAnnotation, AppliedAnnotationParameter,
    AppliedBuiltinMemberAnnotations, AppliedBuiltinTypeAnnotations, AppliedVerbatimAnnotation,
    CompleteElementDetail, CompleteMemberDetail, CompleteTypeDetail, MinimalMemberDetail,
};

/// Bound on STRING8/STRING16 annotation parameter values
pub const ANNOTATION_STRING_BOUND: u32 = 128;

impl AnnotationParameterValue {
    /// TypeKind octet used as the union discriminator
    pub fn kind(&self) -> u8 {
        let kind = match self {
            AnnotationParameterValue::Boolean(_) => TypeKind::TK_BOOLEAN,
            AnnotationParameterValue::Byte(_) => TypeKind::TK_BYTE,
            AnnotationParameterValue::Int16(_) => TypeKind::TK_INT16,
            AnnotationParameterValue::UInt16(_) => TypeKind::TK_UINT16,
            AnnotationParameterValue::Int32(_) => TypeKind::TK_INT32,
            AnnotationParameterValue::UInt32(_) => TypeKind::TK_UINT32,
            AnnotationParameterValue::Int64(_) => TypeKind::TK_INT64,
            AnnotationParameterValue::UInt64(_) => TypeKind::TK_UINT64,
            AnnotationParameterValue::Float32(_) => TypeKind::TK_FLOAT32,
            AnnotationParameterValue::Float64(_) => TypeKind::TK_FLOAT64,
            AnnotationParameterValue::Float128(_) => TypeKind::TK_FLOAT128,
            AnnotationParameterValue::Char8(_) => TypeKind::TK_CHAR8,
            AnnotationParameterValue::Char16(_) => TypeKind::TK_CHAR16,
            AnnotationParameterValue::Enumerated(_) => TypeKind::TK_ENUM,
            AnnotationParameterValue::String8(_) => TypeKind::TK_STRING8,
            AnnotationParameterValue::String16(_) => TypeKind::TK_STRING16,
            AnnotationParameterValue::Extended(kind) => return *kind,
        };
        kind.to_u8()
    }
}

impl Cdr2Encode for AnnotationParameterValue {
    fn encode_cdr2(&self, writer: &mut Cdr2Writer) -> Result<()> {
        writer.write_u8(self.kind());
        match self {
            AnnotationParameterValue::Boolean(v) => writer.write_bool(*v),
            AnnotationParameterValue::Byte(v) => writer.write_u8(*v),
            AnnotationParameterValue::Int16(v) => writer.write_i16(*v),
            AnnotationParameterValue::UInt16(v) => writer.write_u16(*v),
            AnnotationParameterValue::Int32(v) => writer.write_i32(*v),
            AnnotationParameterValue::UInt32(v) => writer.write_u32(*v),
            AnnotationParameterValue::Int64(v) => writer.write_i64(*v),
            AnnotationParameterValue::UInt64(v) => writer.write_u64(*v),
            AnnotationParameterValue::Float32(v) => writer.write_f32(*v),
            AnnotationParameterValue::Float64(v) => writer.write_f64(*v),
            AnnotationParameterValue::Float128(v) => writer.write_u128(*v),
            AnnotationParameterValue::Char8(v) => writer.write_u8(*v),
            AnnotationParameterValue::Char16(v) => writer.write_u16(*v),
            AnnotationParameterValue::Enumerated(v) => writer.write_i32(*v),
            AnnotationParameterValue::String8(v) => {
                return write_string(writer, v, Some(ANNOTATION_STRING_BOUND))
            }
            AnnotationParameterValue::String16(v) => return write_wstring(writer, v),
            AnnotationParameterValue::Extended(_) => write_empty_delimited(writer),
        }
        Ok(())
    }
}

impl Cdr2Decode for AnnotationParameterValue {
    fn decode_cdr2(reader: &mut Cdr2Reader<'_>) -> Result<Self> {
        let kind = reader.read_u8()?;
        let value = match TypeKind::from_u8(kind) {
            Some(TypeKind::TK_BOOLEAN) => AnnotationParameterValue::Boolean(reader.read_bool()?),
            Some(TypeKind::TK_BYTE) => AnnotationParameterValue::Byte(reader.read_u8()?),
            Some(TypeKind::TK_INT16) => AnnotationParameterValue::Int16(reader.read_i16()?),
            Some(TypeKind::TK_UINT16) => AnnotationParameterValue::UInt16(reader.read_u16()?),
            Some(TypeKind::TK_INT32) => AnnotationParameterValue::Int32(reader.read_i32()?),
            Some(TypeKind::TK_UINT32) => AnnotationParameterValue::UInt32(reader.read_u32()?),
            Some(TypeKind::TK_INT64) => AnnotationParameterValue::Int64(reader.read_i64()?),
            Some(TypeKind::TK_UINT64) => AnnotationParameterValue::UInt64(reader.read_u64()?),
            Some(TypeKind::TK_FLOAT32) => AnnotationParameterValue::Float32(reader.read_f32()?),
            Some(TypeKind::TK_FLOAT64) => AnnotationParameterValue::Float64(reader.read_f64()?),
            Some(TypeKind::TK_FLOAT128) => {
                AnnotationParameterValue::Float128(reader.read_u128()?)
            }
            Some(TypeKind::TK_CHAR8) => AnnotationParameterValue::Char8(reader.read_u8()?),
            Some(TypeKind::TK_CHAR16) => AnnotationParameterValue::Char16(reader.read_u16()?),
            Some(TypeKind::TK_ENUM) => AnnotationParameterValue::Enumerated(reader.read_i32()?),
            Some(TypeKind::TK_STRING8) => AnnotationParameterValue::String8(read_string(
                reader,
                Some(ANNOTATION_STRING_BOUND),
            )?),
            Some(TypeKind::TK_STRING16) => {
                AnnotationParameterValue::String16(read_wstring(reader)?)
            }
            _ => {
                read_delimited(reader, |_| Ok(()))?;
                AnnotationParameterValue::Extended(kind)
            }
        };
        Ok(value)
    }
}

impl Cdr2Encode for AppliedAnnotationParameter {
    fn encode_cdr2(&self, writer: &mut Cdr2Writer) -> Result<()> {
        write_delimited(writer, |w| {
            self.paramname_hash.encode_cdr2(w)?;
            self.value.encode_cdr2(w)
        })
    }
}

impl Cdr2Decode for AppliedAnnotationParameter {
    fn decode_cdr2(reader: &mut Cdr2Reader<'_>) -> Result<Self> {
        read_delimited(reader, |r| {
            Ok(AppliedAnnotationParameter {
                paramname_hash: NameHash::decode_cdr2(r)?,
                value: AnnotationParameterValue::decode_cdr2(r)?,
            })
        })
    }
}

impl Cdr2Encode for AppliedAnnotation {
    fn encode_cdr2(&self, writer: &mut Cdr2Writer) -> Result<()> {
        write_delimited(writer, |w| {
            self.annotation_typeid.encode_cdr2(w)?;
            write_option_seq(w, &self.param_seq)
        })
    }
}

impl Cdr2Decode for AppliedAnnotation {
    fn decode_cdr2(reader: &mut Cdr2Reader<'_>) -> Result<Self> {
        read_delimited(reader, |r| {
            Ok(AppliedAnnotation {
                annotation_typeid: TypeIdentifier::decode_cdr2(r)?,
                param_seq: read_option_seq(r)?,
            })
        })
    }
}

impl Cdr2Encode for AppliedVerbatimAnnotation {
    fn encode_cdr2(&self, writer: &mut Cdr2Writer) -> Result<()> {
        write_string(writer, &self.placement, Some(VERBATIM_TAG_BOUND))?;
        write_string(writer, &self.language, Some(VERBATIM_TAG_BOUND))?;
        write_string(writer, &self.text, None)
    }
}

impl Cdr2Decode for AppliedVerbatimAnnotation {
    fn decode_cdr2(reader: &mut Cdr2Reader<'_>) -> Result<Self> {
        Ok(AppliedVerbatimAnnotation {
            placement: read_string(reader, Some(VERBATIM_TAG_BOUND))?,
            language: read_string(reader, Some(VERBATIM_TAG_BOUND))?,
            text: read_string(reader, None)?,
        })
    }
}

impl Cdr2Encode for AppliedBuiltinTypeAnnotations {
    fn encode_cdr2(&self, writer: &mut Cdr2Writer) -> Result<()> {
        write_delimited(writer, |w| write_option(w, &self.verbatim))
    }
}

impl Cdr2Decode for AppliedBuiltinTypeAnnotations {
    fn decode_cdr2(reader: &mut Cdr2Reader<'_>) -> Result<Self> {
        read_delimited(reader, |r| {
            Ok(AppliedBuiltinTypeAnnotations {
                verbatim: read_option(r)?,
            })
        })
    }
}

impl Cdr2Encode for AppliedBuiltinMemberAnnotations {
    fn encode_cdr2(&self, writer: &mut Cdr2Writer) -> Result<()> {
        write_delimited(writer, |w| {
            write_option(w, &self.unit)?;
            write_option(w, &self.min)?;
            write_option(w, &self.max)?;
            write_option(w, &self.hash_id)
        })
    }
}

impl Cdr2Decode for AppliedBuiltinMemberAnnotations {
    fn decode_cdr2(reader: &mut Cdr2Reader<'_>) -> Result<Self> {
        read_delimited(reader, |r| {
            Ok(AppliedBuiltinMemberAnnotations {
                unit: read_option(r)?,
                min: read_option(r)?,
                max: read_option(r)?,
                hash_id: read_option(r)?,
            })
        })
    }
}

impl Cdr2Encode for CompleteTypeDetail {
    fn encode_cdr2(&self, writer: &mut Cdr2Writer) -> Result<()> {
        write_option(writer, &self.ann_builtin)?;
        write_option_seq(writer, &self.ann_custom)?;
        write_string(writer, &self.type_name, Some(NAME_BOUND))
    }
}

impl Cdr2Decode for CompleteTypeDetail {
    fn decode_cdr2(reader: &mut Cdr2Reader<'_>) -> Result<Self> {
        Ok(CompleteTypeDetail {
            ann_builtin: read_option(reader)?,
            ann_custom: read_option_seq(reader)?,
            type_name: read_string(reader, Some(NAME_BOUND))?,
        })
    }
}

impl Cdr2Encode for CompleteMemberDetail {
    fn encode_cdr2(&self, writer: &mut Cdr2Writer) -> Result<()> {
        write_string(writer, &self.name, Some(NAME_BOUND))?;
        write_option(writer, &self.ann_builtin)?;
        write_option_seq(writer, &self.ann_custom)
    }
}

impl Cdr2Decode for CompleteMemberDetail {
    fn decode_cdr2(reader: &mut Cdr2Reader<'_>) -> Result<Self> {
        Ok(CompleteMemberDetail {
            name: read_string(reader, Some(NAME_BOUND))?,
            ann_builtin: read_option(reader)?,
            ann_custom: read_option_seq(reader)?,
        })
    }
}

impl Cdr2Encode for MinimalMemberDetail {
    fn encode_cdr2(&self, writer: &mut Cdr2Writer) -> Result<()> {
        self.name_hash.encode_cdr2(writer)
    }
}

impl Cdr2Decode for MinimalMemberDetail {
    fn decode_cdr2(reader: &mut Cdr2Reader<'_>) -> Result<Self> {
        Ok(MinimalMemberDetail {
            name_hash: NameHash::decode_cdr2(reader)?,
        })
    }
}

impl Cdr2Encode for CompleteElementDetail {
    fn encode_cdr2(&self, writer: &mut Cdr2Writer) -> Result<()> {
        write_option(writer, &self.ann_builtin)?;
        write_option_seq(writer, &self.ann_custom)
    }
}

impl Cdr2Decode for CompleteElementDetail {
    fn decode_cdr2(reader: &mut Cdr2Reader<'_>) -> Result<Self> {
        Ok(CompleteElementDetail {
            ann_builtin: read_option(reader)?,
            ann_custom: read_option_seq(reader)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::{from_bytes, to_bytes, Encoding};
    use super::*;
    use crate::equivalence::EquivalenceHash;
    use crate::error::CdrError;

    #[test]
    fn test_annotation_value_layouts() {
        let bytes =
            to_bytes(&AnnotationParameterValue::Int32(-1), Encoding::xcdr2_le()).expect("encode");
        assert_eq!(bytes, vec![0x04, 0, 0, 0, 0xFF, 0xFF, 0xFF, 0xFF]);

        let bytes = to_bytes(
            &AnnotationParameterValue::String8("m/s".into()),
            Encoding::xcdr2_be(),
        )
        .expect("encode");
        assert_eq!(bytes, vec![0x20, 0, 0, 0, 0, 0, 0, 4, b'm', b'/', b's', 0]);
    }

    #[test]
    fn test_annotation_values_roundtrip() {
        let values = vec![
            AnnotationParameterValue::Boolean(true),
            AnnotationParameterValue::Byte(0x7F),
            AnnotationParameterValue::Int16(-300),
            AnnotationParameterValue::UInt16(60_000),
            AnnotationParameterValue::UInt32(7),
            AnnotationParameterValue::Int64(-1 << 40),
            AnnotationParameterValue::UInt64(u64::MAX),
            AnnotationParameterValue::Float32(0.25),
            AnnotationParameterValue::Float64(-2.5e10),
            AnnotationParameterValue::Float128(0x3FFF_0000_0000_0000_0000_0000_0000_0000),
            AnnotationParameterValue::Char8(b'x'),
            AnnotationParameterValue::Char16(0x263A),
            AnnotationParameterValue::Enumerated(3),
            AnnotationParameterValue::String16("grüße".into()),
        ];
        for encoding in [Encoding::xcdr2_le(), Encoding::xcdr2_be()] {
            for value in &values {
                let bytes = to_bytes(value, encoding).expect("encode");
                let decoded: AnnotationParameterValue =
                    from_bytes(&bytes, encoding).expect("decode");
                assert_eq!(&decoded, value);
            }
        }
    }

    #[test]
    fn test_annotation_string_bound() {
        let long = AnnotationParameterValue::String8("x".repeat(129));
        assert!(matches!(
            to_bytes(&long, Encoding::xcdr2_le()),
            Err(CdrError::BoundExceeded { bound: 128, .. })
        ));
    }

    #[test]
    fn test_unknown_annotation_value_kind() {
        // TK_INT8 has no representation here: routed to the extended branch
        let bytes = [0x0Cu8, 0, 0, 0, 0, 0, 0, 0];
        let value: AnnotationParameterValue =
            from_bytes(&bytes, Encoding::xcdr2_le()).expect("decode");
        assert_eq!(value, AnnotationParameterValue::Extended(0x0C));
    }

    #[test]
    fn test_complete_member_detail_roundtrip() {
        let detail = CompleteMemberDetail {
            name: "speed".into(),
            ann_builtin: Some(AppliedBuiltinMemberAnnotations {
                unit: Some("m/s".into()),
                min: Some(AnnotationParameterValue::Float64(0.0)),
                max: Some(AnnotationParameterValue::Float64(340.0)),
                hash_id: None,
            }),
            ann_custom: Some(vec![AppliedAnnotation {
                annotation_typeid: TypeIdentifier::Complete(EquivalenceHash::from_bytes([3; 14])),
                param_seq: Some(vec![AppliedAnnotationParameter::new(
                    "value",
                    AnnotationParameterValue::Boolean(true),
                )]),
            }]),
        };
        for encoding in [Encoding::xcdr2_le(), Encoding::xcdr2_be()] {
            let bytes = to_bytes(&detail, encoding).expect("encode");
            let decoded: CompleteMemberDetail = from_bytes(&bytes, encoding).expect("decode");
            assert_eq!(decoded, detail);
        }
    }

    #[test]
    fn test_verbatim_placement_bound() {
        let detail = CompleteTypeDetail {
            ann_builtin: Some(AppliedBuiltinTypeAnnotations {
                verbatim: Some(AppliedVerbatimAnnotation {
                    placement: "p".repeat(33),
                    language: "c++".into(),
                    text: "// generated".into(),
                }),
            }),
            ann_custom: None,
            type_name: "Pose".into(),
        };
        assert!(matches!(
            to_bytes(&detail, Encoding::xcdr2_le()),
            Err(CdrError::BoundExceeded { bound: 32, .. })
        ));
    }
}
