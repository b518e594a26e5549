mod smpte;
pub use smpte::*;

use crate::events::Tempo;

/// The meaning of a tick, decoded from the header's division field.
///
/// This is either the number of ticks per quarter note or
/// the SMPTE format: frames per second and ticks per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Timing {
    /// Delta times count fractions of a quarter note (bit 15 clear)
    TicksPerQuarterNote(u16),

    /// Delta times count fractions of an SMPTE frame (bit 15 set)
    Smpte {
        /// Frames per second
        fps: SmpteFps,
        /// Subdivisions of a frame
        ticks_per_frame: u8,
    },
}

impl Timing {
    /// Interpret a raw division value.
    ///
    /// Returns `None` for an SMPTE division whose frame code is not one of the four
    /// defined rates.
    pub const fn from_division(division: u16) -> Option<Self> {
        if division & 0x8000 == 0 {
            return Some(Self::TicksPerQuarterNote(division));
        }
        let [fps, ticks_per_frame] = division.to_be_bytes();
        match SmpteFps::from_division_byte(fps) {
            Some(fps) => Some(Self::Smpte {
                fps,
                ticks_per_frame,
            }),
            None => None,
        }
    }

    /// Returns Some if the timing is defined
    /// as ticks per quarter note
    pub const fn ticks_per_quarter_note(&self) -> Option<u16> {
        match self {
            Self::TicksPerQuarterNote(t) => Some(*t),
            _ => None,
        }
    }

    /// The duration of one tick in microseconds.
    ///
    /// SMPTE timing ignores `tempo`. A zero division yields infinity.
    pub fn micros_per_tick(&self, tempo: Tempo) -> f64 {
        match self {
            // µs_per_tick = tempo / TPQN
            Self::TicksPerQuarterNote(tpqn) => {
                tempo.micros_per_quarter_note() as f64 / *tpqn as f64
            }
            // µs_per_tick = 1 000 000 / (fps × ticks_per_frame)
            Self::Smpte {
                fps,
                ticks_per_frame,
            } => 1_000_000. / (fps.as_division() as f64 * *ticks_per_frame as f64),
        }
    }
}

#[test]
fn division_decoding() {
    use pretty_assertions::assert_eq;
    assert_eq!(
        Timing::from_division(480),
        Some(Timing::TicksPerQuarterNote(480))
    );
    // -25 fps, 40 ticks per frame
    assert_eq!(
        Timing::from_division(0xE728),
        Some(Timing::Smpte {
            fps: SmpteFps::TwentyFive,
            ticks_per_frame: 40
        })
    );
    assert_eq!(Timing::from_division(0x8028), None);
}

#[test]
fn tick_duration() {
    use pretty_assertions::assert_eq;
    let tpqn = Timing::TicksPerQuarterNote(480);
    assert_eq!(tpqn.micros_per_tick(Tempo::new(480_000)), 1_000.);

    let smpte = Timing::Smpte {
        fps: SmpteFps::Thirty,
        ticks_per_frame: 40,
    };
    assert_eq!(smpte.micros_per_tick(Tempo::default()), 1_000_000. / 1_200.);
}
