#![doc = r#"
Top-level chunks of a MIDI file

# Overview

MIDI files are organized into chunks, each identified by a 4-character ASCII type identifier
followed by a 32-bit big-endian length and then the chunk data.

- `MThd` holds the [`Header`]: format, track count and division. It must come first.
- `MTrk` holds one [`Track`] of delta-time/event pairs.
- Anything else is an [`UnknownChunk`]. Its length is honored so the chunks after it stay
  aligned, but its payload is never interpreted.

# Example Structure

```text
[Header Chunk: "MThd"]
[Track Chunk 1: "MTrk"]
[Track Chunk 2: "MTrk"]
...
[Track Chunk N: "MTrk"]
[Optional Unknown Chunks]
```
"#]

use crate::prelude::*;

/// Magic of the header chunk
pub const MTHD: [u8; 4] = *b"MThd";
/// Magic of a track chunk
pub const MTRK: [u8; 4] = *b"MTrk";

/// A skipped chunk of an unrecognized type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownChunk {
    magic: [u8; 4],
    length: u32,
}

impl UnknownChunk {
    /// The chunk type identifier
    pub const fn magic(&self) -> [u8; 4] {
        self.magic
    }

    /// The declared payload length
    pub const fn length(&self) -> u32 {
        self.length
    }
}

/// One decoded top-level chunk.
#[derive(Debug, Clone, PartialEq)]
pub enum Chunk {
    /// `MThd`
    Header(Header),
    /// `MTrk`
    Track(Track),
    /// Any other type
    Unknown(UnknownChunk),
}

impl Chunk {
    /// Reads the next chunk type identifier.
    ///
    /// Returns `None` if the input ends cleanly on a chunk boundary.
    pub fn read_magic<R: MidiSource>(reader: &mut Reader<R>) -> ReadResult<Option<[u8; 4]>> {
        if reader.at_end() {
            return Ok(None);
        }
        reader.read_array().map(Some)
    }

    /// Reads the body of a chunk whose type identifier has just been consumed.
    pub fn read_body<R: MidiSource>(magic: [u8; 4], reader: &mut Reader<R>) -> ReadResult<Self> {
        match magic {
            MTHD => Header::read(reader).map(Chunk::Header),
            MTRK => Track::read(reader).map(Chunk::Track),
            magic => {
                let length = reader.read_u32_be()?;
                tracing::warn!(
                    magic = ?core::str::from_utf8(&magic).unwrap_or("<binary>"),
                    length,
                    "skipping unknown chunk"
                );
                reader.skip(length as u64)?;
                Ok(Chunk::Unknown(UnknownChunk { magic, length }))
            }
        }
    }

    /// Reads a whole chunk.
    pub fn read<R: MidiSource>(reader: &mut Reader<R>) -> ReadResult<Option<Self>> {
        match Self::read_magic(reader)? {
            Some(magic) => Self::read_body(magic, reader).map(Some),
            None => Ok(None),
        }
    }
}

#[test]
fn unknown_chunk_is_skipped() {
    use pretty_assertions::assert_eq;
    let bytes = [b'X', b'F', b'I', b'H', 0, 0, 0, 2, 0xAA, 0xBB, b'M'];
    let mut reader = Reader::from_byte_slice(&bytes);
    let chunk = Chunk::read(&mut reader).unwrap().unwrap();
    let Chunk::Unknown(unknown) = chunk else {
        panic!("expected an unknown chunk, got {chunk:?}");
    };
    assert_eq!(&unknown.magic(), b"XFIH");
    assert_eq!(unknown.length(), 2);
    assert_eq!(reader.position(), 10);
}

#[test]
fn magic_at_end_of_input() {
    let mut reader = Reader::from_byte_slice(&[]);
    assert!(Chunk::read(&mut reader).unwrap().is_none());

    let mut reader = Reader::from_byte_slice(b"MT");
    assert!(Chunk::read(&mut reader).unwrap_err().is_truncated());
}
