use miditrack::prelude::*;
use std::io::{self, Cursor, Read, Seek};

fn header(track_count: u16) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"MThd"); // Header chunk type
    bytes.extend_from_slice(&[0x00, 0x00, 0x00, 0x06]); // Header length (6 bytes)
    bytes.extend_from_slice(&[0x00, 0x01]); // Format 1
    bytes.extend_from_slice(&track_count.to_be_bytes());
    bytes.extend_from_slice(&[0x01, 0xE0]); // 480 ticks per quarter note
    bytes
}

fn track_chunk(declared_len: u32, body: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"MTrk");
    bytes.extend_from_slice(&declared_len.to_be_bytes());
    bytes.extend_from_slice(body);
    bytes
}

const END_OF_TRACK: [u8; 4] = [0x00, 0xFF, 0x2F, 0x00];

#[test]
fn track_shorter_than_declared() {
    // declares 20 bytes, supplies 10
    let body = [
        0x00, 0x90, 0x3C, 0x64, //
        0x10, 0x80, 0x3C, 0x40, //
        0x00, 0x90,
    ];
    let mut bytes = header(1);
    bytes.extend(track_chunk(20, &body));

    let err = MidiFile::parse(&bytes).unwrap_err();
    assert!(err.is_truncated(), "{err}");
}

#[test]
fn terminated_track_shorter_than_declared() {
    // the events are complete, but the chunk end lies past the input
    let mut body = vec![0x00, 0x90, 0x3C, 0x64, 0x00, 0x80, 0x3C];
    body.extend_from_slice(&END_OF_TRACK);
    assert!(body.len() < 20);

    let mut bytes = header(1);
    bytes.extend(track_chunk(20, &body));

    let err = MidiFile::parse(&bytes).unwrap_err();
    assert!(err.is_truncated(), "{err}");
}

#[test]
fn header_must_come_first() {
    let mut bytes = track_chunk(4, &END_OF_TRACK);
    bytes.extend(header(1));

    let err = MidiFile::parse(&bytes).unwrap_err();
    assert!(matches!(
        err.error_kind(),
        ReaderErrorKind::BadMagic(magic) if magic == b"MTrk"
    ));
    assert_eq!(err.position(), 4);

    let err = MidiFile::parse(b"RIFF\x00\x00\x00\x00").unwrap_err();
    assert!(matches!(err.error_kind(), ReaderErrorKind::BadMagic(_)));
}

#[test]
fn empty_input() {
    let err = MidiFile::parse(&[]).unwrap_err();
    assert!(matches!(err.error_kind(), ReaderErrorKind::MissingHeader));
}

#[test]
fn truncated_header() {
    let bytes = &header(1)[..10];
    assert!(MidiFile::parse(bytes).unwrap_err().is_truncated());
}

#[test]
fn more_tracks_than_declared() {
    let mut bytes = header(1);
    bytes.extend(track_chunk(4, &END_OF_TRACK));
    bytes.extend(track_chunk(4, &END_OF_TRACK));

    let err = MidiFile::parse(&bytes).unwrap_err();
    assert!(matches!(
        err.error_kind(),
        ReaderErrorKind::TrackCountMismatch {
            declared: 1,
            found: 2
        }
    ));
}

#[test]
fn fewer_tracks_than_declared() {
    let mut bytes = header(3);
    bytes.extend(track_chunk(4, &END_OF_TRACK));

    let err = MidiFile::parse(&bytes).unwrap_err();
    assert!(matches!(
        err.error_kind(),
        ReaderErrorKind::TrackCountMismatch {
            declared: 3,
            found: 1
        }
    ));
}

#[test]
fn duplicate_header() {
    let mut bytes = header(0);
    bytes.extend(header(0));
    let err = MidiFile::parse(&bytes).unwrap_err();
    assert!(matches!(err.error_kind(), ReaderErrorKind::DuplicateHeader));
}

#[test]
fn trailing_partial_magic() {
    let mut bytes = header(1);
    bytes.extend(track_chunk(4, &END_OF_TRACK));
    bytes.extend_from_slice(b"MT");
    assert!(MidiFile::parse(&bytes).unwrap_err().is_truncated());
}

#[test]
fn sysex_at_capacity() {
    let config = ReaderConfig::default();
    let capacity = config.sysex_capacity();

    // F0, capacity bytes of payload, F7
    let mut fits = vec![0x00, 0xF0];
    fits.extend(std::iter::repeat_n(0x11, capacity));
    fits.push(0xF7);
    fits.extend_from_slice(&END_OF_TRACK);

    let mut bytes = header(1);
    bytes.extend(track_chunk(fits.len() as u32, &fits));
    let file = MidiFile::parse_with(&bytes, config).unwrap();
    let sysex = file.tracks()[0].events()[0].sysex().unwrap();
    assert_eq!(sysex.len(), capacity);

    // one more byte and still no F7
    let mut over = vec![0x00, 0xF0];
    over.extend(std::iter::repeat_n(0x11, capacity + 1));
    over.push(0xF7);
    over.extend_from_slice(&END_OF_TRACK);

    let mut bytes = header(1);
    bytes.extend(track_chunk(over.len() as u32, &over));
    let err = MidiFile::parse_with(&bytes, config).unwrap_err();
    assert!(matches!(
        err.error_kind(),
        ReaderErrorKind::SysexOverflow { capacity: c } if *c == capacity
    ));
}

#[test]
fn overlong_delta_time() {
    let body = [0xFF, 0xFF, 0xFF, 0xFF, 0x7F, 0x90, 0x3C, 0x64];
    let mut bytes = header(1);
    bytes.extend(track_chunk(body.len() as u32, &body));

    let err = MidiFile::parse(&bytes).unwrap_err();
    assert!(matches!(
        err.error_kind(),
        ReaderErrorKind::MalformedVarint { max_bytes: 4 }
    ));
}

#[test]
fn io_errors_surface_as_truncation() {
    let mut bytes = header(1);
    bytes.extend(track_chunk(20, &END_OF_TRACK));
    let source = IoSource::new(Cursor::new(bytes)).unwrap();
    let err = MidiFile::read(source, ReaderConfig::default()).unwrap_err();
    assert!(err.is_truncated());
}

/// Seeks like the wrapped buffer but fails every read.
struct FailingRead(Cursor<Vec<u8>>);

impl Read for FailingRead {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::other("device unplugged"))
    }
}

impl Seek for FailingRead {
    fn seek(&mut self, pos: io::SeekFrom) -> io::Result<u64> {
        self.0.seek(pos)
    }
}

#[test]
fn io_failures_are_reported() {
    let source = IoSource::new(FailingRead(Cursor::new(header(0)))).unwrap();
    let err = MidiFile::read(source, ReaderConfig::default()).unwrap_err();
    assert!(!err.is_truncated());
    assert!(matches!(
        err.error_kind(),
        ReaderErrorKind::Io(e) if e.kind() == io::ErrorKind::Other
    ));
    assert_eq!(err.position(), 0);
}
