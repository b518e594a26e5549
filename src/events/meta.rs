use crate::UMicros;
use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Meta event types the decoder interprets.
///
/// Every other meta type is skipped by its declared length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum MetaType {
    /// `FF 2F 00`
    EndOfTrack = 0x2F,
    /// `FF 51 03 tttttt`
    SetTempo = 0x51,
}

#[doc = r#"
Microseconds per quarter note, from a set-tempo meta event.

The value is 24 bits wide on the wire.

```rust
# use miditrack::prelude::*;
let tempo = Tempo::from_be_bytes([0x07, 0xA1, 0x20]);
assert_eq!(tempo.micros_per_quarter_note(), 500_000);
assert_eq!(tempo.beats_per_minute(), 120.);
assert_eq!(tempo.quarter_note(), UMicros::new(500_000));
```
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tempo(u32);

impl Default for Tempo {
    /// 120 beats per minute, the tempo assumed before any set-tempo event.
    fn default() -> Self {
        Self(500_000)
    }
}

impl Tempo {
    /// Create a tempo. Only the low 24 bits are kept.
    pub const fn new(micros_per_quarter_note: u32) -> Self {
        Self(micros_per_quarter_note & 0x00FF_FFFF)
    }

    /// Create a tempo from its three wire bytes.
    pub const fn from_be_bytes(bytes: [u8; 3]) -> Self {
        Self(u32::from_be_bytes([0, bytes[0], bytes[1], bytes[2]]))
    }

    /// Microseconds per quarter note
    pub const fn micros_per_quarter_note(&self) -> u32 {
        self.0
    }

    /// The length of a quarter note
    pub const fn quarter_note(&self) -> UMicros {
        UMicros::new(self.0 as u64)
    }

    /// Quarter notes per minute
    pub fn beats_per_minute(&self) -> f64 {
        60_000_000. / self.0 as f64
    }
}

/// A meta event the decoder interprets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MetaMessage {
    /// The track terminator
    EndOfTrack,
    /// A tempo change
    Tempo(Tempo),
}

impl MetaMessage {
    /// The meta type byte of this message
    pub const fn meta_type(&self) -> MetaType {
        match self {
            Self::EndOfTrack => MetaType::EndOfTrack,
            Self::Tempo(_) => MetaType::SetTempo,
        }
    }
}
