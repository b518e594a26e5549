pub mod chunk;
pub use chunk::{Chunk, UnknownChunk};

use super::MidiFile;
use crate::prelude::*;
use alloc::vec::Vec;

/// A builder used to create a new [`MidiFile`] from decoded chunks.
///
/// The header must arrive before any track, and the number of tracks must match
/// the count it declares. The track list is sized from that count.
#[derive(Debug, Default)]
pub struct MidiFileBuilder {
    header: Option<Header>,
    tracks: Vec<Track>,
    unknown_chunks: Vec<UnknownChunk>,
}

impl MidiFileBuilder {
    /// True once the header chunk has been handled.
    pub fn has_header(&self) -> bool {
        self.header.is_some()
    }

    /// Handles a chunk of a midi file.
    pub fn handle_chunk(&mut self, chunk: Chunk) -> Result<(), ReaderErrorKind> {
        match chunk {
            Chunk::Header(header) => {
                if self.header.is_some() {
                    return Err(ReaderErrorKind::DuplicateHeader);
                }
                tracing::debug!(
                    format = header.format(),
                    tracks = header.track_count(),
                    division = header.division(),
                    "header"
                );
                self.tracks.reserve_exact(header.track_count() as usize);
                self.header = Some(header);
                Ok(())
            }
            Chunk::Track(track) => {
                let Some(header) = &self.header else {
                    return Err(ReaderErrorKind::MissingHeader);
                };
                let declared = header.track_count();
                if self.tracks.len() >= declared as usize {
                    return Err(ReaderErrorKind::TrackCountMismatch {
                        declared,
                        found: self.tracks.len() + 1,
                    });
                }
                self.tracks.push(track);
                Ok(())
            }
            Chunk::Unknown(unknown) => {
                self.unknown_chunks.push(unknown);
                Ok(())
            }
        }
    }

    /// Attempts to finish the midifile from the provided chunks.
    pub fn build(self) -> Result<MidiFile, ReaderErrorKind> {
        let Some(header) = self.header else {
            return Err(ReaderErrorKind::MissingHeader);
        };
        let declared = header.track_count();
        if self.tracks.len() != declared as usize {
            return Err(ReaderErrorKind::TrackCountMismatch {
                declared,
                found: self.tracks.len(),
            });
        }
        Ok(MidiFile {
            header,
            tracks: self.tracks,
            unknown_chunks: self.unknown_chunks,
        })
    }
}

#[test]
fn builder_enforces_header_first() {
    let mut builder = MidiFileBuilder::default();
    let err = builder.handle_chunk(Chunk::Track(Track::default())).unwrap_err();
    assert!(matches!(err, ReaderErrorKind::MissingHeader));
    assert!(matches!(
        MidiFileBuilder::default().build(),
        Err(ReaderErrorKind::MissingHeader)
    ));
}

#[test]
fn builder_counts_tracks() {
    use pretty_assertions::assert_eq;
    let mut builder = MidiFileBuilder::default();
    builder.handle_chunk(Chunk::Header(Header::new(1, 2, 96))).unwrap();
    assert!(matches!(
        builder.handle_chunk(Chunk::Header(Header::new(1, 2, 96))),
        Err(ReaderErrorKind::DuplicateHeader)
    ));
    builder.handle_chunk(Chunk::Track(Track::default())).unwrap();
    builder.handle_chunk(Chunk::Track(Track::default())).unwrap();
    assert!(matches!(
        builder.handle_chunk(Chunk::Track(Track::default())),
        Err(ReaderErrorKind::TrackCountMismatch {
            declared: 2,
            found: 3
        })
    ));
    let file = builder.build().unwrap();
    assert_eq!(file.tracks().len(), 2);
}

#[test]
fn builder_rejects_missing_tracks() {
    let mut builder = MidiFileBuilder::default();
    builder.handle_chunk(Chunk::Header(Header::new(1, 3, 96))).unwrap();
    builder.handle_chunk(Chunk::Track(Track::default())).unwrap();
    assert!(matches!(
        builder.build(),
        Err(ReaderErrorKind::TrackCountMismatch {
            declared: 3,
            found: 1
        })
    ));
}
