// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Delimiters, member headers, sequences, optionals and strings.

use super::{Cdr2Decode, Cdr2Encode, Cdr2Reader, Cdr2Writer};
use crate::error::{CdrError, Result};

/// Bound on member, type and annotation names
pub const NAME_BOUND: u32 = 256;

/// Bound on `@verbatim` placement and language strings
pub const VERBATIM_TAG_BOUND: u32 = 32;

const EMHEADER_MUST_UNDERSTAND: u32 = 0x8000_0000;
const EMHEADER_LC_SHIFT: u32 = 28;
const EMHEADER_LC_MASK: u32 = 0x7;
const EMHEADER_ID_MASK: u32 = 0x0FFF_FFFF;

fn len_u32(len: usize, offset: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| CdrError::InvalidData {
        reason: format!("length {} at offset {} does not fit in u32", len, offset),
    })
}

/// Write a DHEADER followed by `body`, back-patching the body length.
pub fn write_delimited<F>(writer: &mut Cdr2Writer, body: F) -> Result<()>
where
    F: FnOnce(&mut Cdr2Writer) -> Result<()>,
{
    writer.align(4);
    let at = writer.offset();
    writer.write_u32(0);
    let start = writer.offset();
    body(writer)?;
    let len = len_u32(writer.offset() - start, start)?;
    writer.patch_u32(at, len)
}

/// DHEADER of an aggregate with no members on the wire.
pub fn write_empty_delimited(writer: &mut Cdr2Writer) {
    writer.write_u32(0);
}

/// Read a DHEADER, decode `body` within it, then skip to its end.
///
/// Members appended by a newer writer are skipped this way.
pub fn read_delimited<T, F>(reader: &mut Cdr2Reader<'_>, body: F) -> Result<T>
where
    F: FnOnce(&mut Cdr2Reader<'_>) -> Result<T>,
{
    let dheader_at = reader.offset();
    let size = reader.read_u32()?;
    let end = reader.offset() + size as usize;
    if size as usize > reader.remaining() {
        return Err(CdrError::InvalidDelimiter {
            offset: dheader_at,
            value: size,
        });
    }
    let previous = reader.push_limit(end)?;
    let value = body(reader);
    reader.pop_limit(previous);
    let value = value?;
    reader.skip_to(end)?;
    Ok(value)
}

/// Write `Sequence<T>` of non-primitive elements.
///
/// DHEADER (unless disabled by the encoding), u32 count, elements.
pub fn write_sequence<T: Cdr2Encode>(writer: &mut Cdr2Writer, items: &[T]) -> Result<()> {
    let body = |writer: &mut Cdr2Writer| -> Result<()> {
        let count = len_u32(items.len(), writer.offset())?;
        writer.write_u32(count);
        for item in items {
            item.encode_cdr2(writer)?;
        }
        Ok(())
    };
    if writer.encoding().skip_sequence_dheader {
        body(writer)
    } else {
        write_delimited(writer, body)
    }
}

/// Read `Sequence<T>` of non-primitive elements.
///
/// A zero DHEADER is accepted as an empty sequence. Any other DHEADER
/// must at least cover the element count.
pub fn read_sequence<T: Cdr2Decode>(reader: &mut Cdr2Reader<'_>) -> Result<Vec<T>> {
    if reader.encoding().skip_sequence_dheader {
        return read_sequence_body(reader);
    }

    let dheader_at = reader.offset();
    let size = reader.peek_u32()?;
    if size == 0 {
        reader.read_u32()?;
        return Ok(Vec::new());
    }
    if size < 4 {
        return Err(CdrError::InvalidDelimiter {
            offset: dheader_at,
            value: size,
        });
    }
    read_delimited(reader, read_sequence_body)
}

fn read_sequence_body<T: Cdr2Decode>(reader: &mut Cdr2Reader<'_>) -> Result<Vec<T>> {
    let count = reader.read_u32()? as usize;
    let mut items = Vec::with_capacity(count.min(reader.remaining()));
    for _ in 0..count {
        items.push(T::decode_cdr2(reader)?);
    }
    Ok(items)
}

/// Sequence of primitives: u32 count followed by the raw elements.
pub(crate) fn write_primitive_seq<T: Cdr2Encode>(
    writer: &mut Cdr2Writer,
    items: &[T],
) -> Result<()> {
    let count = len_u32(items.len(), writer.offset())?;
    writer.write_u32(count);
    for item in items {
        item.encode_cdr2(writer)?;
    }
    Ok(())
}

pub(crate) fn read_primitive_seq<T: Cdr2Decode>(reader: &mut Cdr2Reader<'_>) -> Result<Vec<T>> {
    read_sequence_body(reader)
}

/// `@optional` member: presence octet, then the value.
pub fn write_option<T: Cdr2Encode>(writer: &mut Cdr2Writer, value: &Option<T>) -> Result<()> {
    match value {
        Some(inner) => {
            writer.write_bool(true);
            inner.encode_cdr2(writer)
        }
        None => {
            writer.write_bool(false);
            Ok(())
        }
    }
}

pub fn read_option<T: Cdr2Decode>(reader: &mut Cdr2Reader<'_>) -> Result<Option<T>> {
    if reader.read_bool()? {
        Ok(Some(T::decode_cdr2(reader)?))
    } else {
        Ok(None)
    }
}

/// Optional sequence of non-primitive elements
pub(crate) fn write_option_seq<T: Cdr2Encode>(
    writer: &mut Cdr2Writer,
    value: &Option<Vec<T>>,
) -> Result<()> {
    match value {
        Some(items) => {
            writer.write_bool(true);
            write_sequence(writer, items)
        }
        None => {
            writer.write_bool(false);
            Ok(())
        }
    }
}

pub(crate) fn read_option_seq<T: Cdr2Decode>(
    reader: &mut Cdr2Reader<'_>,
) -> Result<Option<Vec<T>>> {
    if reader.read_bool()? {
        Ok(Some(read_sequence(reader)?))
    } else {
        Ok(None)
    }
}

/// Narrow string: u32 length including the terminator, bytes, NUL.
pub fn write_string(writer: &mut Cdr2Writer, value: &str, bound: Option<u32>) -> Result<()> {
    let offset = writer.offset();
    let chars = len_u32(value.len(), offset)?;
    if let Some(bound) = bound {
        if chars > bound {
            return Err(CdrError::BoundExceeded {
                offset,
                bound,
                length: chars,
            });
        }
    }
    writer.write_u32(chars + 1);
    writer.write_bytes(value.as_bytes());
    writer.write_u8(0);
    Ok(())
}

pub fn read_string(reader: &mut Cdr2Reader<'_>, bound: Option<u32>) -> Result<String> {
    let offset = reader.offset();
    let len = reader.read_u32()?;
    if len == 0 {
        return Ok(String::new());
    }
    if let Some(bound) = bound {
        if len - 1 > bound {
            return Err(CdrError::BoundExceeded {
                offset,
                bound,
                length: len - 1,
            });
        }
    }
    let bytes = reader.read_bytes(len as usize)?;
    let (text, terminator) = bytes.split_at(bytes.len() - 1);
    if terminator.first() != Some(&0) {
        return Err(CdrError::InvalidString {
            offset,
            reason: "missing NUL terminator".into(),
        });
    }
    String::from_utf8(text.to_vec()).map_err(|e| CdrError::InvalidString {
        offset,
        reason: e.to_string(),
    })
}

/// Wide string: u32 length in bytes, UTF-16 code units, no terminator.
pub fn write_wstring(writer: &mut Cdr2Writer, value: &str) -> Result<()> {
    let units: Vec<u16> = value.encode_utf16().collect();
    let byte_len = len_u32(units.len() * 2, writer.offset())?;
    writer.write_u32(byte_len);
    for unit in units {
        writer.write_u16(unit);
    }
    Ok(())
}

pub fn read_wstring(reader: &mut Cdr2Reader<'_>) -> Result<String> {
    let offset = reader.offset();
    let byte_len = reader.read_u32()? as usize;
    if byte_len % 2 != 0 {
        return Err(CdrError::InvalidString {
            offset,
            reason: format!("odd wide string length {}", byte_len),
        });
    }
    if byte_len > reader.remaining() {
        return Err(CdrError::UnexpectedEof {
            offset: reader.offset(),
            needed: byte_len,
        });
    }
    let mut units = Vec::with_capacity(byte_len / 2);
    for _ in 0..byte_len / 2 {
        units.push(reader.read_u16()?);
    }
    String::from_utf16(&units).map_err(|e| CdrError::InvalidString {
        offset,
        reason: e.to_string(),
    })
}

/// Decoded EMHEADER (plus NEXTINT when present)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberHeader {
    pub member_id: u32,
    pub must_understand: bool,
    /// Member length in bytes, counted from the current reader offset
    pub size: usize,
}

/// Write one member of a MUTABLE aggregate: EMHEADER (+ NEXTINT) + body.
pub fn write_member<F>(
    writer: &mut Cdr2Writer,
    member_id: u32,
    must_understand: bool,
    body: F,
) -> Result<()>
where
    F: FnOnce(&mut Cdr2Writer) -> Result<()>,
{
    // Member bodies always start 4-aligned, so a scratch writer sees the
    // same padding as the real stream.
    let mut scratch = Cdr2Writer::new(writer.encoding());
    body(&mut scratch)?;
    let payload = scratch.into_bytes();

    let mut header = member_id & EMHEADER_ID_MASK;
    if must_understand {
        header |= EMHEADER_MUST_UNDERSTAND;
    }
    let lc = match payload.len() {
        1 => Some(0),
        2 => Some(1),
        4 => Some(2),
        8 => Some(3),
        _ => None,
    };
    writer.align(4);
    match lc {
        Some(lc) => writer.write_u32(header | (lc << EMHEADER_LC_SHIFT)),
        None => {
            writer.write_u32(header | (4 << EMHEADER_LC_SHIFT));
            writer.write_u32(len_u32(payload.len(), writer.offset())?);
        }
    }
    writer.write_bytes(&payload);
    Ok(())
}

/// Read an EMHEADER and resolve the member length.
///
/// For LC 5..7 the NEXTINT is part of the member payload and is left
/// unconsumed.
pub fn read_member_header(reader: &mut Cdr2Reader<'_>) -> Result<MemberHeader> {
    let offset = reader.offset();
    let header = reader.read_u32()?;
    let must_understand = header & EMHEADER_MUST_UNDERSTAND != 0;
    let member_id = header & EMHEADER_ID_MASK;
    let lc = (header >> EMHEADER_LC_SHIFT) & EMHEADER_LC_MASK;
    let size = match lc {
        0 => 1,
        1 => 2,
        2 => 4,
        3 => 8,
        4 => reader.read_u32()? as usize,
        5 => 4 + reader.peek_u32()? as usize,
        6 => 4 + 4 * reader.peek_u32()? as usize,
        7 => 4 + 8 * reader.peek_u32()? as usize,
        _ => {
            return Err(CdrError::InvalidDelimiter {
                offset,
                value: header,
            })
        }
    };
    if size > reader.remaining() {
        return Err(CdrError::InvalidDelimiter {
            offset,
            value: header,
        });
    }
    Ok(MemberHeader {
        member_id,
        must_understand,
        size,
    })
}

/// Read a MUTABLE aggregate: DHEADER then members until the DHEADER ends.
///
/// `on_member` decodes a known member and returns `true`, or returns
/// `false` for an unknown id. Unknown members are skipped unless flagged
/// must-understand.
pub fn read_mutable<F>(reader: &mut Cdr2Reader<'_>, mut on_member: F) -> Result<()>
where
    F: FnMut(&mut Cdr2Reader<'_>, &MemberHeader) -> Result<bool>,
{
    read_delimited(reader, |reader| {
        loop {
            let padding = (4 - reader.offset() % 4) % 4;
            if reader.remaining() <= padding {
                break;
            }
            reader.skip(padding)?;
            let member = read_member_header(reader)?;
            let member_end = reader.offset() + member.size;
            let previous = reader.push_limit(member_end)?;
            let known = on_member(reader, &member);
            reader.pop_limit(previous);
            if !known? {
                if member.must_understand {
                    return Err(CdrError::MustUnderstand {
                        member_id: member.member_id,
                    });
                }
                log::trace!(
                    "[CDR2] skipping unknown member id={} size={}",
                    member.member_id,
                    member.size
                );
            }
            reader.skip_to(member_end)?;
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::super::{from_bytes, to_bytes, Encoding};
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Point {
        x: u32,
    }

    impl Cdr2Encode for Point {
        fn encode_cdr2(&self, writer: &mut Cdr2Writer) -> Result<()> {
            write_delimited(writer, |w| {
                w.write_u32(self.x);
                Ok(())
            })
        }
    }

    impl Cdr2Decode for Point {
        fn decode_cdr2(reader: &mut Cdr2Reader<'_>) -> Result<Self> {
            read_delimited(reader, |r| Ok(Point { x: r.read_u32()? }))
        }
    }

    #[test]
    fn test_delimited_backpatch() {
        let bytes = to_bytes(&Point { x: 9 }, Encoding::xcdr2_le()).expect("encode");
        assert_eq!(bytes, vec![4, 0, 0, 0, 9, 0, 0, 0]);
    }

    #[test]
    fn test_delimited_skips_appended_members() {
        let bytes = [8u8, 0, 0, 0, 9, 0, 0, 0, 0xEE, 0xEE, 0xEE, 0xEE, 0x55];
        let mut reader = Cdr2Reader::new(&bytes, Encoding::xcdr2_le());
        let point = Point::decode_cdr2(&mut reader).expect("decode");
        assert_eq!(point, Point { x: 9 });
        assert_eq!(reader.offset(), 12);
    }

    #[test]
    fn test_delimited_rejects_oversized_header() {
        let bytes = [64u8, 0, 0, 0, 9, 0, 0, 0];
        let err = from_bytes::<Point>(&bytes, Encoding::xcdr2_le()).expect_err("oversized");
        assert!(matches!(err, CdrError::InvalidDelimiter { value: 64, .. }));
    }

    #[test]
    fn test_sequence_rejects_short_dheader() {
        let bytes = [2u8, 0, 0, 0, 0, 0];
        let mut reader = Cdr2Reader::new(&bytes, Encoding::xcdr2_le());
        assert!(matches!(
            read_sequence::<Point>(&mut reader),
            Err(CdrError::InvalidDelimiter { value: 2, .. })
        ));
    }

    #[test]
    fn test_sequence_without_dheader() {
        let encoding = Encoding::xcdr2_le().with_skip_sequence_dheader(true);
        let mut writer = Cdr2Writer::new(encoding);
        write_sequence(&mut writer, &[Point { x: 1 }]).expect("encode");
        assert_eq!(writer.as_bytes(), &[1, 0, 0, 0, 4, 0, 0, 0, 1, 0, 0, 0]);

        let bytes = writer.into_bytes();
        let mut reader = Cdr2Reader::new(&bytes, encoding);
        let items: Vec<Point> = read_sequence(&mut reader).expect("decode");
        assert_eq!(items, vec![Point { x: 1 }]);
    }

    #[test]
    fn test_string_bound() {
        let mut writer = Cdr2Writer::new(Encoding::xcdr2_le());
        let err = write_string(&mut writer, "toolong", Some(3)).expect_err("bound");
        assert_eq!(
            err,
            CdrError::BoundExceeded {
                offset: 0,
                bound: 3,
                length: 7
            }
        );
    }

    #[test]
    fn test_string_missing_terminator() {
        let bytes = [2u8, 0, 0, 0, b'a', b'b'];
        let mut reader = Cdr2Reader::new(&bytes, Encoding::xcdr2_le());
        assert!(matches!(
            read_string(&mut reader, None),
            Err(CdrError::InvalidString { .. })
        ));
    }

    #[test]
    fn test_wstring_roundtrip() {
        let mut writer = Cdr2Writer::new(Encoding::xcdr2_be());
        write_wstring(&mut writer, "hé").expect("encode");
        assert_eq!(writer.as_bytes(), &[0, 0, 0, 4, 0, b'h', 0, 0xE9]);
        let bytes = writer.into_bytes();
        let mut reader = Cdr2Reader::new(&bytes, Encoding::xcdr2_be());
        assert_eq!(read_wstring(&mut reader).expect("decode"), "hé");
    }

    #[test]
    fn test_option_presence_octet() {
        let mut writer = Cdr2Writer::new(Encoding::xcdr2_le());
        write_option(&mut writer, &Some(5u16)).expect("some");
        write_option::<u16>(&mut writer, &None).expect("none");
        assert_eq!(writer.as_bytes(), &[1, 0, 5, 0, 0]);
    }

    #[test]
    fn test_member_header_length_codes() {
        let mut writer = Cdr2Writer::new(Encoding::xcdr2_le());
        write_member(&mut writer, 7, false, |w| {
            w.write_u32(0xAABB_CCDD);
            Ok(())
        })
        .expect("lc2");
        write_member(&mut writer, 8, true, |w| write_string(w, "hi", None)).expect("lc4");
        let bytes = writer.into_bytes();
        // LC=2 (4 bytes), id 7
        assert_eq!(&bytes[0..4], &(0x2000_0007u32).to_le_bytes());
        // M flag + LC=4, id 8, NEXTINT=7
        assert_eq!(&bytes[8..12], &(0xC000_0008u32).to_le_bytes());
        assert_eq!(&bytes[12..16], &7u32.to_le_bytes());

        let mut reader = Cdr2Reader::new(&bytes, Encoding::xcdr2_le());
        let first = read_member_header(&mut reader).expect("first");
        assert_eq!(
            first,
            MemberHeader {
                member_id: 7,
                must_understand: false,
                size: 4
            }
        );
        reader.skip(first.size).expect("skip");
        let second = read_member_header(&mut reader).expect("second");
        assert_eq!(second.member_id, 8);
        assert!(second.must_understand);
        assert_eq!(second.size, 7);
    }

    #[test]
    fn test_member_header_nextint_in_payload() {
        // LC=5: NEXTINT (2) is the first word of a 4 + 2 byte payload
        let mut bytes = (0x5000_0003u32).to_le_bytes().to_vec();
        bytes.extend_from_slice(&2u32.to_le_bytes());
        bytes.extend_from_slice(&[1, 2]);
        let mut reader = Cdr2Reader::new(&bytes, Encoding::xcdr2_le());
        let header = read_member_header(&mut reader).expect("header");
        assert_eq!(header.size, 6);
        assert_eq!(reader.offset(), 4);
    }

    #[test]
    fn test_read_mutable_unknown_must_understand() {
        let mut writer = Cdr2Writer::new(Encoding::xcdr2_le());
        write_delimited(&mut writer, |w| {
            write_member(w, 99, true, |w| {
                w.write_u32(1);
                Ok(())
            })
        })
        .expect("encode");
        let bytes = writer.into_bytes();
        let mut reader = Cdr2Reader::new(&bytes, Encoding::xcdr2_le());
        let err = read_mutable(&mut reader, |_, _| Ok(false)).expect_err("must understand");
        assert_eq!(err, CdrError::MustUnderstand { member_id: 99 });
    }

    #[test]
    fn test_read_mutable_skips_unknown() {
        let mut writer = Cdr2Writer::new(Encoding::xcdr2_le());
        write_delimited(&mut writer, |w| {
            write_member(w, 99, false, |w| write_string(w, "ignored", None))?;
            write_member(w, 1, false, |w| {
                w.write_u16(42);
                Ok(())
            })
        })
        .expect("encode");
        let bytes = writer.into_bytes();
        let mut reader = Cdr2Reader::new(&bytes, Encoding::xcdr2_le());
        let mut seen = None;
        read_mutable(&mut reader, |r, member| match member.member_id {
            1 => {
                seen = Some(r.read_u16()?);
                Ok(true)
            }
            _ => Ok(false),
        })
        .expect("decode");
        assert_eq!(seen, Some(42));
        assert!(reader.is_eof());
    }
}
