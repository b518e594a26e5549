use miditrack::reader::{Reader, ReaderConfig, ReaderErrorKind, SliceSource};
use pretty_assertions::assert_eq;

/// Encodes `value` the way delta-times are written: 7 bits per byte,
/// most significant group first, continuation bit on all but the last.
fn encode(mut value: u32) -> Vec<u8> {
    let mut bytes = vec![(value & 0x7F) as u8];
    value >>= 7;
    while value > 0 {
        bytes.push((value & 0x7F) as u8 | 0x80);
        value >>= 7;
    }
    bytes.reverse();
    bytes
}

fn decode(bytes: &[u8]) -> u32 {
    let mut reader = Reader::from_byte_slice(bytes);
    let value = reader.read_varlen().unwrap();
    assert!(reader.at_end(), "{bytes:02X?} left bytes unread");
    value
}

#[test]
fn round_trip_group_boundaries() {
    for bits in 0..=28u32 {
        let edge = (1u64 << bits) as u32;
        for value in [edge.saturating_sub(1), edge, edge + 1] {
            let value = value.min(0x0FFF_FFFF);
            assert_eq!(decode(&encode(value)), value);
        }
    }
}

#[test]
fn round_trip_sampled_range() {
    // a prime stride touches every byte length and most bit patterns
    let mut value = 0u32;
    while value <= 0x0FFF_FFFF {
        assert_eq!(decode(&encode(value)), value);
        value += 65_521;
    }
    assert_eq!(decode(&encode(0x0FFF_FFFF)), 0x0FFF_FFFF);
}

#[test]
fn encoded_lengths() {
    assert_eq!(encode(0x7F).len(), 1);
    assert_eq!(encode(0x80).len(), 2);
    assert_eq!(encode(0x3FFF).len(), 2);
    assert_eq!(encode(0x4000).len(), 3);
    assert_eq!(encode(0x0FFF_FFFF).len(), 4);
    assert_eq!(encode(0x1000_0000).len(), 5);
}

#[test]
fn five_byte_quantities_need_a_wider_limit() {
    let bytes = encode(0x1000_0000);

    let mut reader = Reader::from_byte_slice(&bytes);
    let err = reader.read_varlen().unwrap_err();
    assert!(matches!(
        err.error_kind(),
        ReaderErrorKind::MalformedVarint { max_bytes: 4 }
    ));

    let config = ReaderConfig::default().with_max_varint_bytes(5);
    let mut reader = Reader::new(SliceSource::new(&bytes), config);
    assert_eq!(reader.read_varlen().unwrap(), 0x1000_0000);
}

#[test]
fn quantities_wider_than_u32_are_rejected() {
    let config = ReaderConfig::default().with_max_varint_bytes(8);
    for bytes in [
        &[0xFF, 0xFF, 0xFF, 0xFF, 0x7F][..],
        &[0x90, 0x80, 0x80, 0x80, 0x00][..],
        &[0x81, 0x80, 0x80, 0x80, 0x80, 0x00][..],
    ] {
        let mut reader = Reader::new(SliceSource::new(bytes), config);
        let err = reader.read_varlen().unwrap_err();
        assert!(
            matches!(err.error_kind(), ReaderErrorKind::MalformedVarint { max_bytes: 8 }),
            "{bytes:02X?} decoded past u32"
        );
    }
}
