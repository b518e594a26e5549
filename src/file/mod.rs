#![doc = r#"
Rusty representation of a [`MidiFile`]
"#]

/// Contains the [`MidiFileBuilder`](builder::MidiFileBuilder) and the
/// top-level chunk types.
pub mod builder;

mod combine;
pub use combine::*;

mod format;
pub use format::*;

mod header;
pub use header::*;

mod timing;
pub use timing::*;

mod track;
pub use track::*;

use crate::{
    file::builder::{Chunk, MidiFileBuilder, UnknownChunk, chunk::MTHD},
    reader::{MidiSource, ReadResult, Reader, ReaderConfig, ReaderErrorKind, SeekFrom, SliceSource},
};
use alloc::vec::Vec;

#[doc = r#"
A decoded MIDI file: the header and one track per `MTrk` chunk.

Tracks are decoded in delta time. The track set can be moved between time domains
as a whole, or [combined](MidiFile::combine) into a single track.
"#]
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MidiFile {
    header: Header,
    tracks: Vec<Track>,
    #[cfg_attr(feature = "serde", serde(skip))]
    unknown_chunks: Vec<UnknownChunk>,
}

impl MidiFile {
    /// Parse a set of bytes into a file struct
    pub fn parse(bytes: &[u8]) -> ReadResult<Self> {
        Self::parse_with(bytes, ReaderConfig::default())
    }

    /// Parse a set of bytes with custom limits
    pub fn parse_with(bytes: &[u8], config: ReaderConfig) -> ReadResult<Self> {
        Self::read(SliceSource::new(bytes), config)
    }

    /// Decode a file from any byte source, starting at its current position.
    pub fn read<R: MidiSource>(source: R, config: ReaderConfig) -> ReadResult<Self> {
        let mut reader = Reader::new(source, config);
        Self::from_reader(&mut reader)
    }

    /// Decode a file from a reader, consuming every remaining chunk.
    ///
    /// The first chunk must be `MThd`. Any error discards everything decoded so far.
    pub fn from_reader<R: MidiSource>(reader: &mut Reader<R>) -> ReadResult<Self> {
        let mut builder = MidiFileBuilder::default();

        while let Some(magic) = Chunk::read_magic(reader)? {
            if !builder.has_header() && magic != MTHD {
                return Err(reader.error(ReaderErrorKind::BadMagic(magic)));
            }
            let chunk = Chunk::read_body(magic, reader)?;
            builder
                .handle_chunk(chunk)
                .map_err(|kind| reader.error(kind))?;
        }

        builder.build().map_err(|kind| reader.error(kind))
    }

    /// The parsed header
    pub const fn header(&self) -> &Header {
        &self.header
    }

    /// All tracks, in file order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// A single track
    pub fn track(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// Chunks that were skipped because their type is not recognized
    pub fn unknown_chunks(&self) -> &[UnknownChunk] {
        &self.unknown_chunks
    }

    /// Returns the owned tracks
    pub fn into_tracks(self) -> Vec<Track> {
        self.tracks
    }

    /// Converts every track to absolute time.
    pub fn to_absolute(&mut self) {
        self.tracks.iter_mut().for_each(Track::to_absolute);
    }

    /// Converts every track to delta time.
    pub fn to_delta(&mut self) {
        self.tracks.iter_mut().for_each(Track::to_delta);
    }

    /// Replaces all tracks with a single absolute-time track holding every event.
    ///
    /// See [`combine`] for the ordering rules. There is no way back to the separate
    /// tracks. The header is left as decoded.
    pub fn combine(&mut self) {
        let tracks = core::mem::take(&mut self.tracks);
        self.tracks.push(combine(tracks));
    }
}

/// Checks that the next four bytes of `source` are the `MThd` magic, then moves the
/// cursor back to where it was.
pub fn is_midi_format<R: MidiSource>(source: &mut R) -> bool {
    let start = source.position();
    let mut magic = [0u8; 4];
    let matched = source.read_exact(&mut magic).is_ok() && magic == MTHD;
    let rewound = source.seek(SeekFrom::Start(start)).is_ok();
    matched && rewound
}

#[test]
fn detects_magic() {
    use pretty_assertions::assert_eq;
    let mut source = SliceSource::new(b"MThd\x00\x00\x00\x06");
    assert!(is_midi_format(&mut source));
    assert_eq!(source.position(), 0);

    assert!(!is_midi_format(&mut SliceSource::new(b"RIFF....")));
    assert!(!is_midi_format(&mut SliceSource::new(b"MT")));
}

#[test]
fn detects_magic_at_offset() {
    use pretty_assertions::assert_eq;
    let mut source = SliceSource::new(b"RIFFMThd\x00\x00\x00\x06");
    source.seek(SeekFrom::Start(4)).unwrap();
    assert!(is_midi_format(&mut source));
    assert_eq!(source.position(), 4);

    source.seek(SeekFrom::Start(2)).unwrap();
    assert!(!is_midi_format(&mut source));
    assert_eq!(source.position(), 2);
}
