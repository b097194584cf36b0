// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Wire vectors for XCDR2 sequences.

use hdds_xtypes::cdr2::{
    read_delimited, read_sequence, write_delimited, write_sequence, Cdr2Reader, Cdr2Writer,
};
use hdds_xtypes::type_object::{CommonArrayHeader, MinimalStructMember};
use hdds_xtypes::{to_bytes, Cdr2Decode, Cdr2Encode, CdrError, Encoding, Result};

/// Appendable struct with a single u32 member
#[derive(Debug, PartialEq)]
struct Counter {
    value: u32,
}

impl Cdr2Encode for Counter {
    fn encode_cdr2(&self, writer: &mut Cdr2Writer) -> Result<()> {
        write_delimited(writer, |w| {
            w.write_u32(self.value);
            Ok(())
        })
    }
}

impl Cdr2Decode for Counter {
    fn decode_cdr2(reader: &mut Cdr2Reader<'_>) -> Result<Self> {
        read_delimited(reader, |r| Ok(Counter { value: r.read_u32()? }))
    }
}

fn encode_counters(items: &[Counter], encoding: Encoding) -> Vec<u8> {
    let mut writer = Cdr2Writer::new(encoding);
    write_sequence(&mut writer, items).expect("encode");
    writer.into_bytes()
}

#[test]
fn test_empty_primitive_sequence() {
    let header = CommonArrayHeader { bound_seq: Vec::new() };
    assert_eq!(to_bytes(&header, Encoding::xcdr2_le()).expect("encode"), vec![0, 0, 0, 0]);
    assert_eq!(to_bytes(&header, Encoding::xcdr2_be()).expect("encode"), vec![0, 0, 0, 0]);
}

#[test]
fn test_primitive_sequence_has_no_dheader() {
    let header = CommonArrayHeader { bound_seq: vec![3, 4] };
    assert_eq!(
        to_bytes(&header, Encoding::xcdr2_be()).expect("encode"),
        vec![0, 0, 0, 2, 0, 0, 0, 3, 0, 0, 0, 4]
    );
}

#[test]
fn test_empty_appendable_sequence() {
    assert_eq!(
        encode_counters(&[], Encoding::xcdr2_be()),
        vec![0, 0, 0, 4, 0, 0, 0, 0]
    );
    assert_eq!(
        encode_counters(&[], Encoding::xcdr2_le()),
        vec![4, 0, 0, 0, 0, 0, 0, 0]
    );

    let members: Vec<MinimalStructMember> = Vec::new();
    let mut writer = Cdr2Writer::new(Encoding::xcdr2_le());
    write_sequence(&mut writer, &members).expect("encode");
    assert_eq!(writer.as_bytes(), &[4, 0, 0, 0, 0, 0, 0, 0]);
}

#[test]
fn test_appendable_sequence_skips_extra_member_bytes() {
    let bytes = [0u8, 0, 0, 16, 0, 0, 0, 1, 0, 0, 0, 8, 0, 0, 0, 2, 1, 2, 3, 4];
    let mut reader = Cdr2Reader::new(&bytes, Encoding::xcdr2_be());
    let items: Vec<Counter> = read_sequence(&mut reader).expect("decode");
    assert_eq!(items, vec![Counter { value: 2 }]);
    assert_eq!(reader.offset(), 20);
}

#[test]
fn test_zero_dheader_is_empty_sequence() {
    let bytes = [0u8, 0, 0, 0];
    let mut reader = Cdr2Reader::new(&bytes, Encoding::xcdr2_be());
    let items: Vec<Counter> = read_sequence(&mut reader).expect("decode");
    assert!(items.is_empty());
    assert_eq!(reader.offset(), 4);
}

#[test]
fn test_sequence_round_trip_both_orders() {
    let items = vec![Counter { value: 7 }, Counter { value: 0xDEAD_BEEF }];
    for encoding in [Encoding::xcdr2_le(), Encoding::xcdr2_be()] {
        let bytes = encode_counters(&items, encoding);
        // DHEADER + count + 2 x (DHEADER + u32)
        assert_eq!(bytes.len(), 4 + 4 + 2 * 8);
        let mut reader = Cdr2Reader::new(&bytes, encoding);
        let decoded: Vec<Counter> = read_sequence(&mut reader).expect("decode");
        assert_eq!(decoded, items);
    }
}

#[test]
fn test_truncated_sequence_fails() {
    let bytes = [0u8, 0, 0, 16, 0, 0, 0, 1, 0, 0, 0, 8];
    let mut reader = Cdr2Reader::new(&bytes, Encoding::xcdr2_be());
    let err = read_sequence::<Counter>(&mut reader).expect_err("truncated");
    assert!(matches!(err, CdrError::InvalidDelimiter { value: 16, .. }));
}
