#![doc = r#"
Standard MIDI File decoding into ordered event tracks.

`miditrack` reads the chunked SMF wire format (`MThd` + `MTrk` chunks) from any
seekable byte source and produces a [`MidiFile`](crate::file::MidiFile): the parsed
[`Header`](crate::file::Header) and one [`Track`](crate::file::Track) per track chunk.

Tracks come out of the decoder in delta-time. They can be converted to absolute time
and back, and every track of a file can be merged into a single ordered stream.

# Example
```rust
use miditrack::prelude::*;

let bytes = [
    b'M', b'T', b'h', b'd', 0, 0, 0, 6, 0, 0, 0, 1, 0, 96,
    b'M', b'T', b'r', b'k', 0, 0, 0, 11,
    0x00, 0x90, 0x3C, 0x64, // note on, middle C
    0x60, 0x3C, 0x00,       // running status: note on, velocity 0
    0x00, 0xFF, 0x2F, 0x00, // end of track
];

let mut file = MidiFile::parse(&bytes).unwrap();
assert_eq!(file.header().track_count(), 1);

file.combine();
let track = &file.tracks()[0];
assert_eq!(track.events().len(), 3);
assert_eq!(track.events()[1].time(), 96);
```
"#]
#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

pub mod events;
pub mod file;
pub mod reader;

mod micros;
pub use micros::*;

#[doc = r#"
Common re-exports
"#]
pub mod prelude {
    pub use crate::{
        UMicros,
        events::*,
        file::{
            FormatType, Header, MidiFile, SmpteFps, TimeDomain, Timing, Track,
            builder::{Chunk, MidiFileBuilder},
            is_midi_format,
        },
        reader::{MidiSource, ReadResult, Reader, ReaderConfig, ReaderError, ReaderErrorKind, SliceSource},
    };

    #[cfg(feature = "std")]
    pub use crate::reader::IoSource;
}
