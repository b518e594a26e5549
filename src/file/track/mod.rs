mod decode;
use decode::TrackDecoder;

use alloc::vec::Vec;
use itertools::Itertools;

use crate::prelude::*;

/// What the `time` of every event in a [`Track`] counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimeDomain {
    /// Ticks since the previous event in the track
    #[default]
    Delta,
    /// Ticks since the start of the track
    Absolute,
}

#[doc = r#"
An ordered list of events and the time domain their `time` fields are in.

Decoded tracks start out in [`TimeDomain::Delta`].

```rust
# use miditrack::prelude::*;
let mut track = Track::new(
    vec![
        TrackEvent::new(10, MetaMessage::Tempo(Tempo::default())),
        TrackEvent::new(5, MetaMessage::EndOfTrack),
    ],
    TimeDomain::Delta,
);
track.to_absolute();
assert_eq!(track.events()[1].time(), 15);
track.to_delta();
assert_eq!(track.events()[1].time(), 5);
```
"#]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Track {
    events: Vec<TrackEvent>,
    domain: TimeDomain,
}

impl Track {
    /// Create a track whose event times are in `domain`
    pub fn new(events: Vec<TrackEvent>, domain: TimeDomain) -> Self {
        Self { events, domain }
    }

    /// Decodes one track chunk body.
    ///
    /// The reader must be positioned on the chunk length, just after the `MTrk` magic.
    /// Decoding stops at the end-of-track meta event or once the declared length is
    /// consumed. Either way the reader is left exactly at the declared end of the chunk.
    pub fn read<R: MidiSource>(reader: &mut Reader<R>) -> ReadResult<Self> {
        let length = reader.read_u32_be()? as u64;
        let start = reader.position();
        let end = start + length;

        let mut decoder = TrackDecoder::default();
        let mut events = Vec::new();
        while reader.position() < end {
            let event = decoder.read_event(reader)?;
            let terminal = event.is_end_of_track();
            events.push(event);
            if terminal {
                break;
            }
        }

        let position = reader.position();
        if position > end {
            tracing::warn!(
                overrun = position - end,
                "last event ran past the declared track length"
            );
        }
        reader.seek_to(end)?;

        tracing::debug!(events = events.len(), length, "decoded track");
        Ok(Self::new(events, TimeDomain::Delta))
    }

    /// The events, in order
    pub fn events(&self) -> &[TrackEvent] {
        &self.events
    }

    /// Returns the owned events
    pub fn into_events(self) -> Vec<TrackEvent> {
        self.events
    }

    /// The domain the event times are in
    pub const fn domain(&self) -> TimeDomain {
        self.domain
    }

    /// Number of events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True if the track holds no events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Appends an event whose time is in this track's domain.
    pub fn push(&mut self, event: TrackEvent) {
        self.events.push(event);
    }

    /// Rewrites every event time as ticks since the start of the track.
    ///
    /// Does nothing if the track is already absolute.
    pub fn to_absolute(&mut self) {
        if self.domain == TimeDomain::Absolute {
            return;
        }
        let mut total: u64 = 0;
        for event in &mut self.events {
            total = total.wrapping_add(event.time);
            event.time = total;
        }
        self.domain = TimeDomain::Absolute;
    }

    /// Rewrites every event time as ticks since the previous event.
    ///
    /// The exact inverse of [`Track::to_absolute`]. Does nothing if the track is
    /// already in delta time.
    pub fn to_delta(&mut self) {
        if self.domain == TimeDomain::Delta {
            return;
        }
        let mut previous: u64 = 0;
        for event in &mut self.events {
            let absolute = event.time;
            event.time = absolute.wrapping_sub(previous);
            previous = absolute;
        }
        self.domain = TimeDomain::Delta;
    }

    /// The tick of the last event, counted from the start of the track.
    pub fn duration(&self) -> u64 {
        match self.domain {
            TimeDomain::Absolute => self.events.last().map_or(0, TrackEvent::time),
            TimeDomain::Delta => self
                .events
                .iter()
                .fold(0u64, |total, event| total.wrapping_add(event.time)),
        }
    }

    #[doc = r#"
Merges two tracks into one absolute-time track, ordered by time.

Both tracks are converted to absolute time first. The merge is stable: events
with equal times keep their relative order, and on a tie every event of `self`
comes before the events of `other`.
"#]
    pub fn merge(mut self, mut other: Track) -> Track {
        self.to_absolute();
        other.to_absolute();
        let events = self
            .events
            .into_iter()
            .merge_by(other.events, |a, b| a.time <= b.time)
            .collect();
        Track::new(events, TimeDomain::Absolute)
    }

    /// Removes every end-of-track event except a final one.
    pub(crate) fn retain_final_end_of_track(&mut self) {
        let last = self.events.len().checked_sub(1);
        let mut index = 0;
        self.events.retain(|event| {
            let keep = !event.is_end_of_track() || Some(index) == last;
            index += 1;
            keep
        });
    }
}

#[cfg(test)]
fn note_on(time: u64, key: u8) -> TrackEvent {
    TrackEvent::new(
        time,
        ChannelVoiceMessage::new(Channel::One, VoiceEvent::NoteOn { key, velocity: 100 }),
    )
}

#[test]
fn absolute_round_trip() {
    use pretty_assertions::assert_eq;
    let original = Track::new(
        alloc::vec![note_on(0, 60), note_on(96, 62), note_on(0, 64), note_on(48, 65)],
        TimeDomain::Delta,
    );

    let mut track = original.clone();
    track.to_absolute();
    assert_eq!(track.domain(), TimeDomain::Absolute);
    let times: Vec<u64> = track.events().iter().map(TrackEvent::time).collect();
    assert_eq!(times, [0, 96, 96, 144]);
    assert_eq!(track.duration(), 144);

    track.to_absolute();
    assert_eq!(track.events()[3].time(), 144);

    track.to_delta();
    assert_eq!(track, original);
    assert_eq!(original.duration(), 144);
}

#[test]
fn round_trip_small_tracks() {
    use pretty_assertions::assert_eq;
    for original in [
        Track::default(),
        Track::new(alloc::vec![note_on(7, 60)], TimeDomain::Delta),
    ] {
        let mut track = original.clone();
        track.to_absolute();
        track.to_delta();
        assert_eq!(track, original);
    }
}

#[test]
fn merge_is_stable() {
    use pretty_assertions::assert_eq;
    let a = Track::new(alloc::vec![note_on(0, 1), note_on(10, 2)], TimeDomain::Delta);
    let b = Track::new(alloc::vec![note_on(5, 3)], TimeDomain::Delta);

    let merged = a.merge(b);
    let keys: Vec<u16> = merged
        .events()
        .iter()
        .filter_map(|e| match e.message() {
            TrackMessage::ChannelVoice(cv) => Some(cv.event().param1()),
            _ => None,
        })
        .collect();
    assert_eq!(keys, [1, 3, 2]);
    assert_eq!(merged.domain(), TimeDomain::Absolute);

    let left = Track::new(alloc::vec![note_on(4, 1), note_on(0, 2)], TimeDomain::Delta);
    let right = Track::new(alloc::vec![note_on(4, 3)], TimeDomain::Delta);
    let merged = left.merge(right);
    let keys: Vec<u16> = merged
        .events()
        .iter()
        .filter_map(|e| match e.message() {
            TrackMessage::ChannelVoice(cv) => Some(cv.event().param1()),
            _ => None,
        })
        .collect();
    assert_eq!(keys, [1, 2, 3]);
}

#[test]
fn read_forces_declared_end() {
    use pretty_assertions::assert_eq;
    // end of track after 4 bytes, 3 trailing bytes inside the chunk
    let bytes = [
        0, 0, 0, 11, //
        0x00, 0xFF, 0x2F, 0x00, //
        0x00, 0x90, 0x3C, 0x64, 0xAA, 0xBB, 0xCC, //
        b'M',
    ];
    let mut reader = Reader::from_byte_slice(&bytes);
    let track = Track::read(&mut reader).unwrap();
    assert_eq!(track.len(), 1);
    assert!(track.events()[0].is_end_of_track());
    assert_eq!(reader.position(), 15);
}

#[test]
fn read_without_end_of_track() {
    use pretty_assertions::assert_eq;
    let bytes = [0, 0, 0, 4, 0x00, 0x90, 0x3C, 0x64];
    let mut reader = Reader::from_byte_slice(&bytes);
    let track = Track::read(&mut reader).unwrap();
    assert_eq!(track.len(), 1);
    assert_eq!(track.domain(), TimeDomain::Delta);
    assert!(reader.at_end());
}

#[test]
fn read_rewinds_overrunning_event() {
    use pretty_assertions::assert_eq;
    // the declared length cuts the note on in half
    let bytes = [0, 0, 0, 3, 0x00, 0x90, 0x3C, 0x64, 0x00];
    let mut reader = Reader::from_byte_slice(&bytes);
    let track = Track::read(&mut reader).unwrap();
    assert_eq!(track.events()[0].kind(), EventKind::NoteOn);
    assert_eq!(reader.position(), 7);
}
