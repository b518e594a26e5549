use miditrack::prelude::*;
use pretty_assertions::assert_eq;

/// Builds a complete file from a header and raw track bodies.
fn midi_file(format: u16, division: u16, tracks: &[&[u8]]) -> Vec<u8> {
    let mut bytes = Vec::new();

    bytes.extend_from_slice(b"MThd");
    bytes.extend_from_slice(&6u32.to_be_bytes());
    bytes.extend_from_slice(&format.to_be_bytes());
    bytes.extend_from_slice(&(tracks.len() as u16).to_be_bytes());
    bytes.extend_from_slice(&division.to_be_bytes());

    for track in tracks {
        bytes.extend_from_slice(b"MTrk");
        bytes.extend_from_slice(&(track.len() as u32).to_be_bytes());
        bytes.extend_from_slice(track);
    }
    bytes
}

fn note_on(time: u64, channel: Channel, key: u8, velocity: u8) -> TrackEvent {
    TrackEvent::new(
        time,
        ChannelVoiceMessage::new(channel, VoiceEvent::NoteOn { key, velocity }),
    )
}

fn note_off(time: u64, channel: Channel, key: u8, velocity: u8) -> TrackEvent {
    TrackEvent::new(
        time,
        ChannelVoiceMessage::new(channel, VoiceEvent::NoteOff { key, velocity }),
    )
}

const CONDUCTOR: &[u8] = &[
    0x00, 0xFF, 0x03, 0x05, b'T', b'e', b'm', b'p', b'o', // track name, skipped
    0x00, 0xFF, 0x51, 0x03, 0x07, 0xA1, 0x20, // 120 bpm
    0x83, 0x00, 0xFF, 0x51, 0x03, 0x0F, 0x42, 0x40, // 60 bpm after 384 ticks
    0x00, 0xFF, 0x2F, 0x00, // end of track
];

const PIANO: &[u8] = &[
    0x00, 0x90, 0x3C, 0x64, // C4 on
    0x00, 0x40, 0x64, // E4 on, running status
    0x81, 0x40, 0x80, 0x3C, 0x40, // C4 off after 192
    0x00, 0x40, 0x40, // E4 off, running status
    0x00, 0xFF, 0x2F, 0x00, //
];

const DRUMS: &[u8] = &[
    0x60, 0x99, 0x24, 0x7F, // kick after 96
    0x00, 0xB9, 0x07, 0x50, // volume
    0x60, 0x89, 0x24, 0x00, // kick off after 96 more
    0x00, 0xFF, 0x2F, 0x00, //
];

#[test]
fn parse_format_one() {
    let bytes = midi_file(1, 96, &[CONDUCTOR, PIANO, DRUMS]);
    let file = MidiFile::parse(&bytes).unwrap();

    assert_eq!(*file.header(), Header::new(1, 3, 96));
    assert_eq!(file.header().format_type(), Some(FormatType::Simultaneous));
    assert_eq!(file.header().timing(), Some(Timing::TicksPerQuarterNote(96)));
    assert_eq!(file.tracks().len(), 3);

    let conductor = file.track(0).unwrap();
    assert_eq!(
        conductor.events(),
        &[
            TrackEvent::new(0, TrackMessage::Unknown),
            TrackEvent::new(0, MetaMessage::Tempo(Tempo::new(500_000))),
            TrackEvent::new(384, MetaMessage::Tempo(Tempo::new(1_000_000))),
            TrackEvent::new(0, MetaMessage::EndOfTrack),
        ]
    );

    let piano = file.track(1).unwrap();
    assert_eq!(piano.domain(), TimeDomain::Delta);
    assert_eq!(
        piano.events(),
        &[
            note_on(0, Channel::One, 0x3C, 0x64),
            note_on(0, Channel::One, 0x40, 0x64),
            note_off(192, Channel::One, 0x3C, 0x40),
            note_off(0, Channel::One, 0x40, 0x40),
            TrackEvent::new(0, MetaMessage::EndOfTrack),
        ]
    );

    let drums = file.track(2).unwrap();
    assert_eq!(drums.events()[1].channel(), Some(Channel::Ten));
    assert_eq!(drums.duration(), 192);
    assert!(file.track(3).is_none());
}

#[test]
fn combine_file_tracks() {
    let bytes = midi_file(1, 96, &[CONDUCTOR, PIANO, DRUMS]);
    let mut file = MidiFile::parse(&bytes).unwrap();
    file.combine();

    assert_eq!(file.tracks().len(), 1);
    let track = &file.tracks()[0];
    assert_eq!(track.domain(), TimeDomain::Absolute);

    let listing: Vec<String> = track.events().iter().map(ToString::to_string).collect();
    assert_eq!(
        listing,
        [
            "0\tunknown",
            "0\ttempo   500000",
            "0\tnoteon  chan0\t60\t100",
            "0\tnoteon  chan0\t64\t100",
            "96\tnoteon  chan9\t36\t127",
            "96\tcc      chan9\t7\t80",
            "192\tnoteoff chan0\t60\t64",
            "192\tnoteoff chan0\t64\t64",
            "192\tnoteoff chan9\t36\t0",
            "384\ttempo   1000000",
            "384\teot",
        ]
    );

    let terminators = track.events().iter().filter(|e| e.is_end_of_track()).count();
    assert_eq!(terminators, 1);
}

#[test]
fn whole_file_time_domains() {
    let bytes = midi_file(1, 96, &[PIANO, DRUMS]);
    let original = MidiFile::parse(&bytes).unwrap();

    let mut file = original.clone();
    file.to_absolute();
    assert!(file.tracks().iter().all(|t| t.domain() == TimeDomain::Absolute));
    assert_eq!(file.tracks()[1].events()[2].time(), 192);

    file.to_delta();
    assert_eq!(file, original);
}

#[test]
fn skips_unknown_chunks_and_header_extension() {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"MThd");
    bytes.extend_from_slice(&8u32.to_be_bytes());
    bytes.extend_from_slice(&[0x00, 0x00, 0x00, 0x01, 0x00, 0x60]);
    bytes.extend_from_slice(&[0xDE, 0xAD]); // header extension

    bytes.extend_from_slice(b"XFIH");
    bytes.extend_from_slice(&3u32.to_be_bytes());
    bytes.extend_from_slice(&[1, 2, 3]);

    bytes.extend_from_slice(b"MTrk");
    bytes.extend_from_slice(&(PIANO.len() as u32).to_be_bytes());
    bytes.extend_from_slice(PIANO);

    let file = MidiFile::parse(&bytes).unwrap();
    assert_eq!(file.header().track_count(), 1);
    assert_eq!(file.tracks()[0].len(), 5);
    assert_eq!(file.unknown_chunks().len(), 1);
    assert_eq!(&file.unknown_chunks()[0].magic(), b"XFIH");
}

#[test]
fn over_declared_track_keeps_next_chunk_aligned() {
    // the first track declares two bytes of padding after its end of track
    let mut padded = PIANO.to_vec();
    padded.extend_from_slice(&[0x00, 0x00]);

    let bytes = midi_file(1, 96, &[&padded, DRUMS]);
    let file = MidiFile::parse(&bytes).unwrap();
    assert_eq!(file.tracks()[0].len(), 5);
    assert_eq!(file.tracks()[1].len(), 4);
}

#[test]
fn smpte_division() {
    let bytes = midi_file(0, 0xE250, &[PIANO]);
    let file = MidiFile::parse(&bytes).unwrap();
    assert_eq!(
        file.header().timing(),
        Some(Timing::Smpte {
            fps: SmpteFps::Thirty,
            ticks_per_frame: 0x50
        })
    );
    assert_eq!(file.header().format_type(), Some(FormatType::SingleMultiChannel));
}

#[test]
fn read_through_io_source() {
    let bytes = midi_file(0, 480, &[DRUMS]);
    let mut source = IoSource::new(std::io::Cursor::new(bytes.clone())).unwrap();
    assert!(is_midi_format(&mut source));

    let file = MidiFile::read(source, ReaderConfig::default()).unwrap();
    assert_eq!(file, MidiFile::parse(&bytes).unwrap());
}

#[test]
fn zero_track_file() {
    let bytes = midi_file(1, 96, &[]);
    let mut file = MidiFile::parse(&bytes).unwrap();
    assert!(file.tracks().is_empty());

    file.combine();
    assert_eq!(file.tracks().len(), 1);
    assert!(file.tracks()[0].is_empty());
}
