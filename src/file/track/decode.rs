//! Event decoding for a single track chunk.
//!
//! Only channel voice statuses become the running status; system and meta messages
//! neither set nor clear it.

use alloc::vec::Vec;

use crate::prelude::*;

const SYSEX: u8 = 0xF0;
const SONG_POSITION: u8 = 0xF2;
const SONG_SELECT: u8 = 0xF3;
const SYSEX_END: u8 = 0xF7;
const META: u8 = 0xFF;

/// Decodes the events of one track chunk.
///
/// Holds the running status, which only ever stores a channel voice status:
/// system and meta messages leave it untouched.
#[derive(Debug, Default)]
pub(super) struct TrackDecoder {
    running_status: Option<u8>,
}

impl TrackDecoder {
    /// Reads one delta-time/event pair.
    pub(super) fn read_event<R: MidiSource>(
        &mut self,
        reader: &mut Reader<R>,
    ) -> ReadResult<TrackEvent> {
        let delta = reader.read_varlen()? as u64;
        let byte = reader.read_u8()?;

        let is_status = byte & 0x80 != 0;
        let status = if is_status {
            byte
        } else if let Some(running) = self.running_status {
            running
        } else {
            tracing::trace!(byte, "data byte without running status");
            return Ok(TrackEvent::new(delta, TrackMessage::Unknown));
        };

        let message = match VoiceStatus::try_from(status & 0xF0) {
            Ok(kind) => {
                let first = if is_status {
                    self.running_status = Some(status);
                    reader.read_u8()?
                } else {
                    byte
                };
                let second = if kind.data_len() == 2 {
                    reader.read_u8()?
                } else {
                    0
                };
                TrackMessage::ChannelVoice(ChannelVoiceMessage::new(
                    Channel::from_status(status),
                    VoiceEvent::from_data(kind, first, second),
                ))
            }
            Err(_) => read_system(reader, status)?,
        };

        tracing::trace!(delta, ?message, "event");
        Ok(TrackEvent::new(delta, message))
    }
}

fn read_system<R: MidiSource>(reader: &mut Reader<R>, status: u8) -> ReadResult<TrackMessage> {
    match status {
        SYSEX => read_sysex(reader).map(TrackMessage::SystemExclusive),
        META => read_meta(reader),
        SONG_POSITION => {
            reader.skip(2)?;
            Ok(TrackMessage::Unknown)
        }
        SONG_SELECT => {
            reader.skip(1)?;
            Ok(TrackMessage::Unknown)
        }
        _ => Ok(TrackMessage::Unknown),
    }
}

/// Collects bytes up to the `0xF7` terminator, which is consumed but not stored.
fn read_sysex<R: MidiSource>(reader: &mut Reader<R>) -> ReadResult<SystemExclusiveMessage> {
    let capacity = reader.config().sysex_capacity();
    let mut data = Vec::new();
    loop {
        let byte = reader.read_u8()?;
        if byte == SYSEX_END {
            return Ok(SystemExclusiveMessage::new(data));
        }
        if data.len() == capacity {
            return Err(reader.error(ReaderErrorKind::SysexOverflow { capacity }));
        }
        data.push(byte);
    }
}

fn read_meta<R: MidiSource>(reader: &mut Reader<R>) -> ReadResult<TrackMessage> {
    let meta_type = reader.read_u8()?;
    let length = reader.read_varlen()?;

    match MetaType::try_from(meta_type) {
        // the payload, if any, is dropped when the cursor moves to the chunk end
        Ok(MetaType::EndOfTrack) => Ok(TrackMessage::Meta(MetaMessage::EndOfTrack)),
        Ok(MetaType::SetTempo) => {
            if length != 3 {
                return Err(reader.error(ReaderErrorKind::InvalidMetaLength { meta_type, length }));
            }
            let tempo = Tempo::from_be_bytes(reader.read_array()?);
            Ok(TrackMessage::Meta(MetaMessage::Tempo(tempo)))
        }
        Err(_) => {
            reader.skip(length as u64)?;
            Ok(TrackMessage::Unknown)
        }
    }
}

#[cfg(test)]
fn decode_all(bytes: &[u8]) -> ReadResult<alloc::vec::Vec<TrackEvent>> {
    let mut reader = Reader::from_byte_slice(bytes);
    let mut decoder = TrackDecoder::default();
    let mut events = alloc::vec::Vec::new();
    while !reader.at_end() {
        events.push(decoder.read_event(&mut reader)?);
    }
    Ok(events)
}

#[cfg(test)]
fn voice(time: u64, channel: Channel, event: VoiceEvent) -> TrackEvent {
    TrackEvent::new(time, ChannelVoiceMessage::new(channel, event))
}

#[test]
fn running_status_matches_explicit_status() {
    use pretty_assertions::assert_eq;
    let explicit = [0x00, 0x92, 0x3C, 0x64, 0x10, 0x92, 0x40, 0x50];
    let running = [0x00, 0x92, 0x3C, 0x64, 0x10, 0x40, 0x50];

    let expected = alloc::vec![
        voice(0, Channel::Three, VoiceEvent::NoteOn { key: 0x3C, velocity: 0x64 }),
        voice(0x10, Channel::Three, VoiceEvent::NoteOn { key: 0x40, velocity: 0x50 }),
    ];
    assert_eq!(decode_all(&explicit).unwrap(), expected);
    assert_eq!(decode_all(&running).unwrap(), expected);
}

#[test]
fn running_status_survives_meta_and_sysex() {
    use pretty_assertions::assert_eq;
    let bytes = [
        0x00, 0xC1, 0x05, // program change, channel 2
        0x00, 0xFF, 0x01, 0x02, b'h', b'i', // text meta, skipped
        0x00, 0x06, // running status program change
        0x00, 0xF0, 0x7E, 0xF7, // sysex
        0x00, 0x07, // running status again
    ];
    let events = decode_all(&bytes).unwrap();
    assert_eq!(
        events,
        alloc::vec![
            voice(0, Channel::Two, VoiceEvent::ProgramChange { program: 5 }),
            TrackEvent::new(0, TrackMessage::Unknown),
            voice(0, Channel::Two, VoiceEvent::ProgramChange { program: 6 }),
            TrackEvent::new(0, SystemExclusiveMessage::new([0x7Eu8])),
            voice(0, Channel::Two, VoiceEvent::ProgramChange { program: 7 }),
        ]
    );
}

#[test]
fn every_voice_shape() {
    use pretty_assertions::assert_eq;
    let bytes = [
        0x00, 0x80, 0x3C, 0x40, //
        0x01, 0xA1, 0x3C, 0x20, //
        0x02, 0xB2, 0x07, 0x64, //
        0x03, 0xD3, 0x30, //
        0x04, 0xE4, 0x00, 0x40, //
    ];
    let events = decode_all(&bytes).unwrap();
    assert_eq!(
        events,
        alloc::vec![
            voice(0, Channel::One, VoiceEvent::NoteOff { key: 0x3C, velocity: 0x40 }),
            voice(1, Channel::Two, VoiceEvent::PolyKeyPressure { key: 0x3C, pressure: 0x20 }),
            voice(2, Channel::Three, VoiceEvent::ControlChange { controller: 7, value: 100 }),
            voice(3, Channel::Four, VoiceEvent::ChannelPressure { pressure: 0x30 }),
            voice(4, Channel::Five, VoiceEvent::PitchBend(PitchBend::CENTER)),
        ]
    );
}

#[test]
fn data_byte_without_status_is_unknown() {
    use pretty_assertions::assert_eq;
    let events = decode_all(&[0x05, 0x3C, 0x00, 0x90, 0x3C, 0x64]).unwrap();
    assert_eq!(events[0], TrackEvent::new(5, TrackMessage::Unknown));
    assert_eq!(events[1].kind(), EventKind::NoteOn);
}

#[test]
fn system_common_payloads_are_skipped() {
    use pretty_assertions::assert_eq;
    let bytes = [
        0x00, 0xF2, 0x10, 0x20, // song position pointer
        0x00, 0xF3, 0x03, // song select
        0x00, 0xF6, // tune request
        0x00, 0xF8, // timing clock
    ];
    let events = decode_all(&bytes).unwrap();
    assert_eq!(events.len(), 4);
    assert!(events.iter().all(|e| e.kind() == EventKind::Unknown));
}

#[test]
fn tempo_meta() {
    use pretty_assertions::assert_eq;
    let events = decode_all(&[0x00, 0xFF, 0x51, 0x03, 0x07, 0xA1, 0x20]).unwrap();
    assert_eq!(
        events,
        alloc::vec![TrackEvent::new(0, MetaMessage::Tempo(Tempo::new(500_000)))]
    );

    let err = decode_all(&[0x00, 0xFF, 0x51, 0x02, 0x07, 0xA1]).unwrap_err();
    assert!(matches!(
        err.error_kind(),
        ReaderErrorKind::InvalidMetaLength {
            meta_type: 0x51,
            length: 2
        }
    ));

    let err = decode_all(&[0x00, 0xFF, 0x51, 0x03, 0x07, 0xA1]).unwrap_err();
    assert!(err.is_truncated());
}

#[test]
fn unknown_meta_skips_declared_length() {
    use pretty_assertions::assert_eq;
    for meta_type in [0x00u8, 0x03, 0x58, 0x7F, 0xAB] {
        let bytes = [0x00, 0xFF, meta_type, 0x04, 1, 2, 3, 4, 0x99];
        let mut reader = Reader::from_byte_slice(&bytes);
        let event = TrackDecoder::default().read_event(&mut reader).unwrap();
        assert_eq!(event.kind(), EventKind::Unknown);
        assert_eq!(reader.position(), 8);
    }
}

#[test]
fn sysex_capacity_boundary() {
    use pretty_assertions::assert_eq;
    let config = ReaderConfig::default().with_sysex_capacity(4);

    let fits = [0x00, 0xF0, 1, 2, 3, 0xF7];
    let mut reader = Reader::new(SliceSource::new(&fits), config);
    let event = TrackDecoder::default().read_event(&mut reader).unwrap();
    assert_eq!(event.sysex().unwrap().data(), &[1, 2, 3]);

    let full = [0x00, 0xF0, 1, 2, 3, 4, 0xF7];
    let mut reader = Reader::new(SliceSource::new(&full), config);
    let event = TrackDecoder::default().read_event(&mut reader).unwrap();
    assert_eq!(event.sysex().unwrap().len(), 4);

    let over = [0x00, 0xF0, 1, 2, 3, 4, 5, 0xF7];
    let mut reader = Reader::new(SliceSource::new(&over), config);
    let err = TrackDecoder::default().read_event(&mut reader).unwrap_err();
    assert!(matches!(
        err.error_kind(),
        ReaderErrorKind::SysexOverflow { capacity: 4 }
    ));
}

#[test]
fn truncated_event() {
    assert!(decode_all(&[0x00, 0x90, 0x3C]).unwrap_err().is_truncated());
    assert!(decode_all(&[0x00, 0xF0, 0x01]).unwrap_err().is_truncated());
    assert!(decode_all(&[0x00, 0xFF, 0x01, 0x05, 0x01]).unwrap_err().is_truncated());
}
