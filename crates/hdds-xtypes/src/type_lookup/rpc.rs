// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! TypeLookup request/reply structures and their XCDR2 codec.
//!
//! Envelopes (`TypeLookupRequest`, `TypeLookupReply`, the RPC headers and
//! `SampleIdentity`) are FINAL. Call inputs, outputs and the discriminated
//! unions are APPENDABLE, so each carries a DHEADER.

use crate::cdr2::{
    read_delimited, read_sequence, read_string, write_delimited, write_sequence, write_string,
    Cdr2Decode, Cdr2Encode, Cdr2Reader, Cdr2Writer,
};
use crate::error::{CdrError, Result};
use crate::type_id::TypeIdentifier;
use crate::type_object::{TypeIdentifierPair, TypeIdentifierTypeObjectPair, TypeIdentifierWithSize};

/// Call kind of a `getTypes` request
pub const CK_TYPES: i32 = 0x01;
/// Call kind of a `getTypeDependencies` request
pub const CK_TYPE_DEPENDENCIES: i32 = 0x02;

/// Result discriminator of a successful call
pub const RETCODE_OK: i32 = 0;

/// Octets in a continuation point
pub const CONTINUATION_POINT_LEN: usize = 32;

/// Bound on `RequestHeader::instance_name`
pub const INSTANCE_NAME_BOUND: u32 = 255;

/// Writer GUID and sequence number of a request sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SampleIdentity {
    pub writer_guid: [u8; 16],
    pub sequence_number: i64,
}

impl Cdr2Encode for SampleIdentity {
    fn encode_cdr2(&self, writer: &mut Cdr2Writer) -> Result<()> {
        writer.write_bytes(&self.writer_guid);
        // SequenceNumber_t { high: i32, low: u32 }
        writer.write_i32((self.sequence_number >> 32) as i32);
        writer.write_u32(self.sequence_number as u32);
        Ok(())
    }
}

impl Cdr2Decode for SampleIdentity {
    fn decode_cdr2(reader: &mut Cdr2Reader<'_>) -> Result<Self> {
        let mut writer_guid = [0u8; 16];
        writer_guid.copy_from_slice(reader.read_bytes(16)?);
        let high = reader.read_i32()?;
        let low = reader.read_u32()?;
        Ok(Self {
            writer_guid,
            sequence_number: (i64::from(high) << 32) | i64::from(low),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RequestHeader {
    pub request_id: SampleIdentity,
    pub instance_name: String,
}

impl Cdr2Encode for RequestHeader {
    fn encode_cdr2(&self, writer: &mut Cdr2Writer) -> Result<()> {
        self.request_id.encode_cdr2(writer)?;
        write_string(writer, &self.instance_name, Some(INSTANCE_NAME_BOUND))
    }
}

impl Cdr2Decode for RequestHeader {
    fn decode_cdr2(reader: &mut Cdr2Reader<'_>) -> Result<Self> {
        Ok(Self {
            request_id: SampleIdentity::decode_cdr2(reader)?,
            instance_name: read_string(reader, Some(INSTANCE_NAME_BOUND))?,
        })
    }
}

/// DDS-RPC remote exception codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(i32)]
pub enum RemoteExceptionCode {
    #[default]
    Ok = 0,
    Unsupported = 1,
    InvalidArgument = 2,
    OutOfResources = 3,
    UnknownOperation = 4,
    UnknownException = 5,
}

impl RemoteExceptionCode {
    pub const fn from_i32(value: i32) -> Option<Self> {
        match value {
            0 => Some(Self::Ok),
            1 => Some(Self::Unsupported),
            2 => Some(Self::InvalidArgument),
            3 => Some(Self::OutOfResources),
            4 => Some(Self::UnknownOperation),
            5 => Some(Self::UnknownException),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReplyHeader {
    pub related_request_id: SampleIdentity,
    pub remote_ex: RemoteExceptionCode,
}

impl Cdr2Encode for ReplyHeader {
    fn encode_cdr2(&self, writer: &mut Cdr2Writer) -> Result<()> {
        self.related_request_id.encode_cdr2(writer)?;
        writer.write_i32(self.remote_ex as i32);
        Ok(())
    }
}

impl Cdr2Decode for ReplyHeader {
    fn decode_cdr2(reader: &mut Cdr2Reader<'_>) -> Result<Self> {
        let related_request_id = SampleIdentity::decode_cdr2(reader)?;
        let offset = reader.offset();
        let code = reader.read_i32()?;
        let remote_ex = RemoteExceptionCode::from_i32(code).ok_or_else(|| CdrError::InvalidData {
            reason: format!("remote exception code {} at offset {}", code, offset),
        })?;
        Ok(Self {
            related_request_id,
            remote_ex,
        })
    }
}

/// Opaque paging token of `getTypeDependencies`.
///
/// Empty in a request means "from the start"; empty in a reply means the
/// last page was returned. Tokens produced here are always 32 octets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ContinuationPoint(Vec<u8>);

impl ContinuationPoint {
    pub fn new() -> Self {
        Self::default()
    }

    /// Token resuming at `page`
    pub fn from_page(page: u32) -> Self {
        let mut bytes = vec![0u8; CONTINUATION_POINT_LEN];
        bytes[..4].copy_from_slice(&page.to_be_bytes());
        Self(bytes)
    }

    /// Raw token received from a peer.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() > CONTINUATION_POINT_LEN {
            return Err(CdrError::BoundExceeded {
                offset: 0,
                bound: CONTINUATION_POINT_LEN as u32,
                length: u32::try_from(bytes.len()).unwrap_or(u32::MAX),
            });
        }
        Ok(Self(bytes.to_vec()))
    }

    /// Page encoded by [`ContinuationPoint::from_page`]; `None` for an
    /// empty or foreign token.
    pub fn page(&self) -> Option<u32> {
        if self.0.len() != CONTINUATION_POINT_LEN {
            return None;
        }
        let mut page = [0u8; 4];
        page.copy_from_slice(&self.0[..4]);
        Some(u32::from_be_bytes(page))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// `sequence<octet, 32>`
impl Cdr2Encode for ContinuationPoint {
    fn encode_cdr2(&self, writer: &mut Cdr2Writer) -> Result<()> {
        writer.write_u32(self.0.len() as u32);
        writer.write_bytes(&self.0);
        Ok(())
    }
}

impl Cdr2Decode for ContinuationPoint {
    fn decode_cdr2(reader: &mut Cdr2Reader<'_>) -> Result<Self> {
        let offset = reader.offset();
        let len = reader.read_u32()?;
        if len as usize > CONTINUATION_POINT_LEN {
            return Err(CdrError::BoundExceeded {
                offset,
                bound: CONTINUATION_POINT_LEN as u32,
                length: len,
            });
        }
        Ok(Self(reader.read_bytes(len as usize)?.to_vec()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypeLookupGetTypesIn {
    pub type_ids: Vec<TypeIdentifier>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TypeLookupGetTypesOut {
    pub types: Vec<TypeIdentifierTypeObjectPair>,
    pub complete_to_minimal: Vec<TypeIdentifierPair>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypeLookupGetTypeDependenciesIn {
    pub type_ids: Vec<TypeIdentifier>,
    pub continuation_point: ContinuationPoint,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypeLookupGetTypeDependenciesOut {
    pub dependent_typeids: Vec<TypeIdentifierWithSize>,
    pub continuation_point: ContinuationPoint,
}

impl Cdr2Encode for TypeLookupGetTypesIn {
    fn encode_cdr2(&self, writer: &mut Cdr2Writer) -> Result<()> {
        write_delimited(writer, |w| write_sequence(w, &self.type_ids))
    }
}

impl Cdr2Decode for TypeLookupGetTypesIn {
    fn decode_cdr2(reader: &mut Cdr2Reader<'_>) -> Result<Self> {
        read_delimited(reader, |r| {
            Ok(Self {
                type_ids: read_sequence(r)?,
            })
        })
    }
}

impl Cdr2Encode for TypeLookupGetTypesOut {
    fn encode_cdr2(&self, writer: &mut Cdr2Writer) -> Result<()> {
        write_delimited(writer, |w| {
            write_sequence(w, &self.types)?;
            write_sequence(w, &self.complete_to_minimal)
        })
    }
}

impl Cdr2Decode for TypeLookupGetTypesOut {
    fn decode_cdr2(reader: &mut Cdr2Reader<'_>) -> Result<Self> {
        read_delimited(reader, |r| {
            Ok(Self {
                types: read_sequence(r)?,
                complete_to_minimal: read_sequence(r)?,
            })
        })
    }
}

impl Cdr2Encode for TypeLookupGetTypeDependenciesIn {
    fn encode_cdr2(&self, writer: &mut Cdr2Writer) -> Result<()> {
        write_delimited(writer, |w| {
            write_sequence(w, &self.type_ids)?;
            self.continuation_point.encode_cdr2(w)
        })
    }
}

impl Cdr2Decode for TypeLookupGetTypeDependenciesIn {
    fn decode_cdr2(reader: &mut Cdr2Reader<'_>) -> Result<Self> {
        read_delimited(reader, |r| {
            Ok(Self {
                type_ids: read_sequence(r)?,
                continuation_point: ContinuationPoint::decode_cdr2(r)?,
            })
        })
    }
}

impl Cdr2Encode for TypeLookupGetTypeDependenciesOut {
    fn encode_cdr2(&self, writer: &mut Cdr2Writer) -> Result<()> {
        write_delimited(writer, |w| {
            write_sequence(w, &self.dependent_typeids)?;
            self.continuation_point.encode_cdr2(w)
        })
    }
}

impl Cdr2Decode for TypeLookupGetTypeDependenciesOut {
    fn decode_cdr2(reader: &mut Cdr2Reader<'_>) -> Result<Self> {
        read_delimited(reader, |r| {
            Ok(Self {
                dependent_typeids: read_sequence(r)?,
                continuation_point: ContinuationPoint::decode_cdr2(r)?,
            })
        })
    }
}

/// Result union of one call: the output on RETCODE_OK, otherwise only the
/// return code.
#[derive(Debug, Clone, PartialEq)]
pub enum CallResult<T> {
    Ok(T),
    Err(i32),
}

impl<T: Cdr2Encode> Cdr2Encode for CallResult<T> {
    fn encode_cdr2(&self, writer: &mut Cdr2Writer) -> Result<()> {
        write_delimited(writer, |w| match self {
            CallResult::Ok(out) => {
                w.write_i32(RETCODE_OK);
                out.encode_cdr2(w)
            }
            CallResult::Err(code) => {
                w.write_i32(*code);
                Ok(())
            }
        })
    }
}

impl<T: Cdr2Decode> Cdr2Decode for CallResult<T> {
    fn decode_cdr2(reader: &mut Cdr2Reader<'_>) -> Result<Self> {
        read_delimited(reader, |r| match r.read_i32()? {
            RETCODE_OK => Ok(CallResult::Ok(T::decode_cdr2(r)?)),
            code => Ok(CallResult::Err(code)),
        })
    }
}

pub type TypeLookupGetTypesResult = CallResult<TypeLookupGetTypesOut>;
pub type TypeLookupGetTypeDependenciesResult = CallResult<TypeLookupGetTypeDependenciesOut>;

/// Request body, discriminated by call kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeLookupCall {
    GetTypes(TypeLookupGetTypesIn),
    GetTypeDependencies(TypeLookupGetTypeDependenciesIn),
    /// Call kind this implementation does not serve
    Unknown(i32),
}

impl TypeLookupCall {
    pub fn kind(&self) -> i32 {
        match self {
            TypeLookupCall::GetTypes(_) => CK_TYPES,
            TypeLookupCall::GetTypeDependencies(_) => CK_TYPE_DEPENDENCIES,
            TypeLookupCall::Unknown(kind) => *kind,
        }
    }
}

impl Cdr2Encode for TypeLookupCall {
    fn encode_cdr2(&self, writer: &mut Cdr2Writer) -> Result<()> {
        write_delimited(writer, |w| {
            w.write_i32(self.kind());
            match self {
                TypeLookupCall::GetTypes(input) => input.encode_cdr2(w),
                TypeLookupCall::GetTypeDependencies(input) => input.encode_cdr2(w),
                TypeLookupCall::Unknown(_) => Ok(()),
            }
        })
    }
}

impl Cdr2Decode for TypeLookupCall {
    fn decode_cdr2(reader: &mut Cdr2Reader<'_>) -> Result<Self> {
        read_delimited(reader, |r| {
            Ok(match r.read_i32()? {
                CK_TYPES => TypeLookupCall::GetTypes(Cdr2Decode::decode_cdr2(r)?),
                CK_TYPE_DEPENDENCIES => {
                    TypeLookupCall::GetTypeDependencies(Cdr2Decode::decode_cdr2(r)?)
                }
                kind => TypeLookupCall::Unknown(kind),
            })
        })
    }
}

/// Reply body, discriminated by the call kind it answers
#[derive(Debug, Clone, PartialEq)]
pub enum TypeLookupReturn {
    GetTypes(TypeLookupGetTypesResult),
    GetTypeDependencies(TypeLookupGetTypeDependenciesResult),
    Unknown(i32),
}

impl TypeLookupReturn {
    pub fn kind(&self) -> i32 {
        match self {
            TypeLookupReturn::GetTypes(_) => CK_TYPES,
            TypeLookupReturn::GetTypeDependencies(_) => CK_TYPE_DEPENDENCIES,
            TypeLookupReturn::Unknown(kind) => *kind,
        }
    }
}

impl Cdr2Encode for TypeLookupReturn {
    fn encode_cdr2(&self, writer: &mut Cdr2Writer) -> Result<()> {
        write_delimited(writer, |w| {
            w.write_i32(self.kind());
            match self {
                TypeLookupReturn::GetTypes(result) => result.encode_cdr2(w),
                TypeLookupReturn::GetTypeDependencies(result) => result.encode_cdr2(w),
                TypeLookupReturn::Unknown(_) => Ok(()),
            }
        })
    }
}

impl Cdr2Decode for TypeLookupReturn {
    fn decode_cdr2(reader: &mut Cdr2Reader<'_>) -> Result<Self> {
        read_delimited(reader, |r| {
            Ok(match r.read_i32()? {
                CK_TYPES => TypeLookupReturn::GetTypes(Cdr2Decode::decode_cdr2(r)?),
                CK_TYPE_DEPENDENCIES => {
                    TypeLookupReturn::GetTypeDependencies(Cdr2Decode::decode_cdr2(r)?)
                }
                kind => TypeLookupReturn::Unknown(kind),
            })
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeLookupRequest {
    pub header: RequestHeader,
    pub data: TypeLookupCall,
}

impl Cdr2Encode for TypeLookupRequest {
    fn encode_cdr2(&self, writer: &mut Cdr2Writer) -> Result<()> {
        self.header.encode_cdr2(writer)?;
        self.data.encode_cdr2(writer)
    }
}

impl Cdr2Decode for TypeLookupRequest {
    fn decode_cdr2(reader: &mut Cdr2Reader<'_>) -> Result<Self> {
        Ok(Self {
            header: RequestHeader::decode_cdr2(reader)?,
            data: TypeLookupCall::decode_cdr2(reader)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeLookupReply {
    pub header: ReplyHeader,
    pub return_value: TypeLookupReturn,
}

impl Cdr2Encode for TypeLookupReply {
    fn encode_cdr2(&self, writer: &mut Cdr2Writer) -> Result<()> {
        self.header.encode_cdr2(writer)?;
        self.return_value.encode_cdr2(writer)
    }
}

impl Cdr2Decode for TypeLookupReply {
    fn decode_cdr2(reader: &mut Cdr2Reader<'_>) -> Result<Self> {
        Ok(Self {
            header: ReplyHeader::decode_cdr2(reader)?,
            return_value: TypeLookupReturn::decode_cdr2(reader)?,
        })
    }
}
