#![doc = r#"
Events decoded from a track chunk

# Hierarchy
```text
              |------------|
              | TrackEvent |   time + message
              |------------|
                    |
             |--------------|
             | TrackMessage |
             |--------------|
      /          |          \          \
 ChannelVoice  SystemExclusive  Meta   Unknown
```

A [`TrackEvent`]'s `time` is either a delta from the previous event in the same
track or an absolute tick count from the start of the track. Which one depends on
the [`TimeDomain`](crate::file::TimeDomain) of the track holding it.
"#]

mod channel;
pub use channel::*;

mod meta;
pub use meta::*;

mod sysex;
pub use sysex::*;

use core::fmt;

/// The kinds of event a track can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(missing_docs)]
pub enum EventKind {
    NoteOff,
    NoteOn,
    PolyKeyPressure,
    ControlChange,
    ProgramChange,
    ChannelPressure,
    PitchBend,
    SystemExclusive,
    Meta,
    Unknown,
}

/// What happened at some point of a track.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrackMessage {
    /// A channel voice message
    ChannelVoice(ChannelVoiceMessage),
    /// A system exclusive message
    SystemExclusive(SystemExclusiveMessage),
    /// An interpreted meta event
    Meta(MetaMessage),
    /// A message that was skipped over without being interpreted
    Unknown,
}

impl From<ChannelVoiceMessage> for TrackMessage {
    fn from(value: ChannelVoiceMessage) -> Self {
        Self::ChannelVoice(value)
    }
}

impl From<SystemExclusiveMessage> for TrackMessage {
    fn from(value: SystemExclusiveMessage) -> Self {
        Self::SystemExclusive(value)
    }
}

impl From<MetaMessage> for TrackMessage {
    fn from(value: MetaMessage) -> Self {
        Self::Meta(value)
    }
}

impl TrackMessage {
    /// The flat kind of this message
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::ChannelVoice(cv) => match cv.event {
                VoiceEvent::NoteOff { .. } => EventKind::NoteOff,
                VoiceEvent::NoteOn { .. } => EventKind::NoteOn,
                VoiceEvent::PolyKeyPressure { .. } => EventKind::PolyKeyPressure,
                VoiceEvent::ControlChange { .. } => EventKind::ControlChange,
                VoiceEvent::ProgramChange { .. } => EventKind::ProgramChange,
                VoiceEvent::ChannelPressure { .. } => EventKind::ChannelPressure,
                VoiceEvent::PitchBend(_) => EventKind::PitchBend,
            },
            Self::SystemExclusive(_) => EventKind::SystemExclusive,
            Self::Meta(_) => EventKind::Meta,
            Self::Unknown => EventKind::Unknown,
        }
    }
}

#[doc = r#"
A message and the time at which it occurs.

```rust
# use miditrack::prelude::*;
let event = TrackEvent::new(
    96,
    ChannelVoiceMessage::new(Channel::Two, VoiceEvent::NoteOn { key: 60, velocity: 100 }),
);
assert_eq!(event.kind(), EventKind::NoteOn);
assert_eq!(event.channel(), Some(Channel::Two));
assert_eq!(event.to_string(), "96\tnoteon  chan1\t60\t100");
```
"#]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackEvent {
    pub(crate) time: u64,
    pub(crate) message: TrackMessage,
}

impl TrackEvent {
    /// Create a new event
    pub fn new(time: u64, message: impl Into<TrackMessage>) -> Self {
        Self {
            time,
            message: message.into(),
        }
    }

    /// Ticks, as a delta or an absolute count depending on the owning track
    pub const fn time(&self) -> u64 {
        self.time
    }

    /// Overwrite the time of this event
    pub fn set_time(&mut self, time: u64) {
        self.time = time;
    }

    /// The message
    pub const fn message(&self) -> &TrackMessage {
        &self.message
    }

    /// Returns the owned message
    pub fn into_message(self) -> TrackMessage {
        self.message
    }

    /// The flat kind of the message
    pub const fn kind(&self) -> EventKind {
        self.message.kind()
    }

    /// The channel, if this is a channel message
    pub const fn channel(&self) -> Option<Channel> {
        match &self.message {
            TrackMessage::ChannelVoice(cv) => Some(cv.channel),
            _ => None,
        }
    }

    /// The meta event, if this is one
    pub const fn meta(&self) -> Option<&MetaMessage> {
        match &self.message {
            TrackMessage::Meta(meta) => Some(meta),
            _ => None,
        }
    }

    /// The system exclusive payload, if this is one
    pub const fn sysex(&self) -> Option<&SystemExclusiveMessage> {
        match &self.message {
            TrackMessage::SystemExclusive(sysex) => Some(sysex),
            _ => None,
        }
    }

    /// True for the end-of-track meta event
    pub const fn is_end_of_track(&self) -> bool {
        matches!(self.message, TrackMessage::Meta(MetaMessage::EndOfTrack))
    }
}

impl fmt::Display for TrackEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t", self.time)?;
        match &self.message {
            TrackMessage::ChannelVoice(cv) => {
                let label = match cv.event.status() {
                    VoiceStatus::NoteOff => "noteoff",
                    VoiceStatus::NoteOn => "noteon ",
                    VoiceStatus::PolyKeyPressure => "pkpress",
                    VoiceStatus::ControlChange => "cc     ",
                    VoiceStatus::ProgramChange => "pc     ",
                    VoiceStatus::ChannelPressure => "cpress ",
                    VoiceStatus::PitchBend => "pitch  ",
                };
                write!(f, "{label} chan{}\t{}", cv.channel.index(), cv.event.param1())?;
                if let Some(param2) = cv.event.param2() {
                    write!(f, "\t{param2}")?;
                }
                Ok(())
            }
            TrackMessage::SystemExclusive(sysex) => {
                f.write_str("sysex  ")?;
                for byte in sysex.data() {
                    write!(f, " {byte:02x}")?;
                }
                Ok(())
            }
            TrackMessage::Meta(MetaMessage::EndOfTrack) => f.write_str("eot"),
            TrackMessage::Meta(MetaMessage::Tempo(tempo)) => {
                write!(f, "tempo   {}", tempo.micros_per_quarter_note())
            }
            TrackMessage::Unknown => f.write_str("unknown"),
        }
    }
}

#[test]
fn display_matches_listing_layout() {
    use alloc::string::ToString;
    use pretty_assertions::assert_eq;

    let cases = [
        (
            TrackEvent::new(
                0,
                ChannelVoiceMessage::new(Channel::Ten, VoiceEvent::ProgramChange { program: 5 }),
            ),
            "0\tpc      chan9\t5",
        ),
        (
            TrackEvent::new(
                12,
                ChannelVoiceMessage::new(
                    Channel::One,
                    VoiceEvent::PitchBend(PitchBend::CENTER),
                ),
            ),
            "12\tpitch   chan0\t8192",
        ),
        (
            TrackEvent::new(3, SystemExclusiveMessage::new([0x43u8, 0x12])),
            "3\tsysex   43 12",
        ),
        (
            TrackEvent::new(7, MetaMessage::Tempo(Tempo::new(500_000))),
            "7\ttempo   500000",
        ),
        (TrackEvent::new(9, MetaMessage::EndOfTrack), "9\teot"),
        (TrackEvent::new(1, TrackMessage::Unknown), "1\tunknown"),
    ];
    for (event, expected) in cases {
        assert_eq!(event.to_string(), expected);
    }
}

#[test]
fn channel_only_for_channel_kinds() {
    let sysex = TrackEvent::new(0, SystemExclusiveMessage::new([1u8]));
    assert_eq!(sysex.channel(), None);
    assert_eq!(sysex.kind(), EventKind::SystemExclusive);
    assert!(sysex.sysex().is_some());
    assert!(sysex.meta().is_none());

    let eot = TrackEvent::new(0, MetaMessage::EndOfTrack);
    assert!(eot.is_end_of_track());
    assert_eq!(eot.kind(), EventKind::Meta);
}
