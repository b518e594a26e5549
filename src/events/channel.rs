use num_enum::{IntoPrimitive, TryFromPrimitive};

#[doc = r#"
One of the sixteen MIDI channels.

Channels are numbered from zero on the wire; `Channel::One` is `0`.

```rust
# use miditrack::prelude::*;
assert_eq!(Channel::try_from(9u8).unwrap(), Channel::Ten);
assert_eq!(u8::from(Channel::Sixteen), 15);
assert!(Channel::try_from(16u8).is_err());
```
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Channel {
    One = 0,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Eleven,
    Twelve,
    Thirteen,
    Fourteen,
    Fifteen,
    Sixteen,
}

impl Channel {
    const ALL: [Channel; 16] = [
        Channel::One,
        Channel::Two,
        Channel::Three,
        Channel::Four,
        Channel::Five,
        Channel::Six,
        Channel::Seven,
        Channel::Eight,
        Channel::Nine,
        Channel::Ten,
        Channel::Eleven,
        Channel::Twelve,
        Channel::Thirteen,
        Channel::Fourteen,
        Channel::Fifteen,
        Channel::Sixteen,
    ];

    /// The channel in the low nibble of a status byte.
    pub const fn from_status(status: u8) -> Self {
        Self::ALL[(status & 0x0F) as usize]
    }

    /// Zero-based channel number
    pub const fn index(&self) -> u8 {
        *self as u8
    }
}

/// The high nibble of a channel voice status byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum VoiceStatus {
    /// `0x8n`
    NoteOff = 0x80,
    /// `0x9n`
    NoteOn = 0x90,
    /// `0xAn`
    PolyKeyPressure = 0xA0,
    /// `0xBn`
    ControlChange = 0xB0,
    /// `0xCn`
    ProgramChange = 0xC0,
    /// `0xDn`
    ChannelPressure = 0xD0,
    /// `0xEn`
    PitchBend = 0xE0,
}

impl VoiceStatus {
    /// Number of data bytes following the status byte.
    pub const fn data_len(&self) -> usize {
        match self {
            Self::ProgramChange | Self::ChannelPressure => 1,
            _ => 2,
        }
    }
}

/// A 14-bit pitch bend value.
///
/// The wire carries the low seven bits first; the value is `lsb | (msb << 7)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PitchBend(u16);

impl PitchBend {
    /// The value with no bend applied
    pub const CENTER: Self = Self(0x2000);

    /// Combine the two data bytes as they appear on the wire.
    pub const fn from_lsb_msb(lsb: u8, msb: u8) -> Self {
        Self(lsb as u16 | ((msb as u16) << 7))
    }

    /// The packed value
    pub const fn value(&self) -> u16 {
        self.0
    }

    /// Offset from [`PitchBend::CENTER`]
    pub const fn signed(&self) -> i16 {
        self.0 as i16 - 0x2000
    }
}

/// The payload of a channel voice message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(missing_docs)]
pub enum VoiceEvent {
    NoteOff { key: u8, velocity: u8 },
    NoteOn { key: u8, velocity: u8 },
    PolyKeyPressure { key: u8, pressure: u8 },
    ControlChange { controller: u8, value: u8 },
    ProgramChange { program: u8 },
    ChannelPressure { pressure: u8 },
    PitchBend(PitchBend),
}

impl VoiceEvent {
    /// Builds the event for `status` from its data bytes.
    ///
    /// `second` is ignored for the single-byte kinds.
    pub const fn from_data(status: VoiceStatus, first: u8, second: u8) -> Self {
        match status {
            VoiceStatus::NoteOff => Self::NoteOff {
                key: first,
                velocity: second,
            },
            VoiceStatus::NoteOn => Self::NoteOn {
                key: first,
                velocity: second,
            },
            VoiceStatus::PolyKeyPressure => Self::PolyKeyPressure {
                key: first,
                pressure: second,
            },
            VoiceStatus::ControlChange => Self::ControlChange {
                controller: first,
                value: second,
            },
            VoiceStatus::ProgramChange => Self::ProgramChange { program: first },
            VoiceStatus::ChannelPressure => Self::ChannelPressure { pressure: first },
            VoiceStatus::PitchBend => Self::PitchBend(PitchBend::from_lsb_msb(first, second)),
        }
    }

    /// The status kind of this event
    pub const fn status(&self) -> VoiceStatus {
        match self {
            Self::NoteOff { .. } => VoiceStatus::NoteOff,
            Self::NoteOn { .. } => VoiceStatus::NoteOn,
            Self::PolyKeyPressure { .. } => VoiceStatus::PolyKeyPressure,
            Self::ControlChange { .. } => VoiceStatus::ControlChange,
            Self::ProgramChange { .. } => VoiceStatus::ProgramChange,
            Self::ChannelPressure { .. } => VoiceStatus::ChannelPressure,
            Self::PitchBend(_) => VoiceStatus::PitchBend,
        }
    }

    /// The first parameter. Pitch bend returns its full 14-bit value.
    pub const fn param1(&self) -> u16 {
        match *self {
            Self::NoteOff { key, .. }
            | Self::NoteOn { key, .. }
            | Self::PolyKeyPressure { key, .. } => key as u16,
            Self::ControlChange { controller, .. } => controller as u16,
            Self::ProgramChange { program } => program as u16,
            Self::ChannelPressure { pressure } => pressure as u16,
            Self::PitchBend(bend) => bend.value(),
        }
    }

    /// The second parameter, for the two-parameter kinds.
    pub const fn param2(&self) -> Option<u8> {
        match *self {
            Self::NoteOff { velocity, .. } | Self::NoteOn { velocity, .. } => Some(velocity),
            Self::PolyKeyPressure { pressure, .. } => Some(pressure),
            Self::ControlChange { value, .. } => Some(value),
            _ => None,
        }
    }
}

/// A voice event addressed to a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelVoiceMessage {
    pub(crate) channel: Channel,
    pub(crate) event: VoiceEvent,
}

impl ChannelVoiceMessage {
    /// Create a new channel voice message
    pub const fn new(channel: Channel, event: VoiceEvent) -> Self {
        Self { channel, event }
    }

    /// The channel the message is addressed to
    pub const fn channel(&self) -> Channel {
        self.channel
    }

    /// The voice event
    pub const fn event(&self) -> &VoiceEvent {
        &self.event
    }

    /// The status byte this message is sent with
    pub const fn status_byte(&self) -> u8 {
        self.event.status() as u8 | self.channel.index()
    }
}

#[test]
fn pitch_bend_packing() {
    use pretty_assertions::assert_eq;
    assert_eq!(PitchBend::from_lsb_msb(0x00, 0x40), PitchBend::CENTER);
    assert_eq!(PitchBend::from_lsb_msb(0x7F, 0x7F).value(), 0x3FFF);
    assert_eq!(PitchBend::from_lsb_msb(0x01, 0x00).signed(), -0x1FFF);
}

#[test]
fn voice_status_from_high_nibble() {
    use pretty_assertions::assert_eq;
    assert_eq!(VoiceStatus::try_from(0x93u8 & 0xF0).unwrap(), VoiceStatus::NoteOn);
    assert!(VoiceStatus::try_from(0xF0u8).is_err());
    assert_eq!(VoiceStatus::ChannelPressure.data_len(), 1);

    let msg = ChannelVoiceMessage::new(
        Channel::from_status(0xE5),
        VoiceEvent::from_data(VoiceStatus::PitchBend, 0x10, 0x20),
    );
    assert_eq!(msg.channel(), Channel::Six);
    assert_eq!(msg.status_byte(), 0xE5);
    assert_eq!(msg.event().param1(), 0x10 | (0x20 << 7));
    assert_eq!(msg.event().param2(), None);
}
