use crate::prelude::*;

#[doc = r#"
The contents of the `MThd` chunk.

All three fields are kept exactly as read; [`Header::format_type`] and
[`Header::timing`] interpret them.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Header {
    format: u16,
    track_count: u16,
    division: u16,
}

impl Header {
    /// Create a new header
    pub const fn new(format: u16, track_count: u16, division: u16) -> Self {
        Self {
            format,
            track_count,
            division,
        }
    }

    /// Reads the header chunk body.
    ///
    /// The reader must be positioned on the chunk length, just after the `MThd` magic.
    /// Bytes beyond the three fields a longer header declares are skipped.
    pub fn read<R: MidiSource>(reader: &mut Reader<R>) -> ReadResult<Self> {
        let length = reader.read_u32_be()?;
        let format = reader.read_u16_be()?;
        let track_count = reader.read_u16_be()?;
        let division = reader.read_u16_be()?;

        let extension = (length as u64).saturating_sub(6);
        if extension > 0 {
            tracing::debug!(extension, "skipping header extension bytes");
            reader.skip(extension)?;
        }

        Ok(Self {
            format,
            track_count,
            division,
        })
    }

    /// The raw format word
    pub const fn format(&self) -> u16 {
        self.format
    }

    /// The format, if it is one of the three defined values
    pub fn format_type(&self) -> Option<FormatType> {
        FormatType::try_from(self.format).ok()
    }

    /// The number of track chunks the file declares
    pub const fn track_count(&self) -> u16 {
        self.track_count
    }

    /// The raw division word
    pub const fn division(&self) -> u16 {
        self.division
    }

    /// Get the timing props
    pub const fn timing(&self) -> Option<Timing> {
        Timing::from_division(self.division)
    }

    /// The duration of one tick at `tempo`, if the division is interpretable.
    pub fn micros_per_tick(&self, tempo: Tempo) -> Option<f64> {
        self.timing().map(|timing| timing.micros_per_tick(tempo))
    }
}

#[test]
fn read_plain_header() {
    use pretty_assertions::assert_eq;
    let bytes = [0, 0, 0, 6, 0, 1, 0, 3, 0x01, 0xE0];
    let mut reader = Reader::from_byte_slice(&bytes);
    let header = Header::read(&mut reader).unwrap();
    assert_eq!(header, Header::new(1, 3, 480));
    assert_eq!(header.format_type(), Some(FormatType::Simultaneous));
    assert_eq!(header.timing(), Some(Timing::TicksPerQuarterNote(480)));
    assert!(reader.at_end());
}

#[test]
fn read_header_skips_extension() {
    use pretty_assertions::assert_eq;
    let bytes = [0, 0, 0, 9, 0, 7, 0, 1, 0, 96, 0xAA, 0xBB, 0xCC, b'M'];
    let mut reader = Reader::from_byte_slice(&bytes);
    let header = Header::read(&mut reader).unwrap();
    assert_eq!(header.format(), 7);
    assert_eq!(header.format_type(), None);
    assert_eq!(reader.position(), 13);
}

#[test]
fn read_truncated_header() {
    let bytes = [0, 0, 0, 6, 0, 1, 0];
    let mut reader = Reader::from_byte_slice(&bytes);
    assert!(Header::read(&mut reader).unwrap_err().is_truncated());

    // declared extension missing from the input
    let bytes = [0, 0, 0, 8, 0, 0, 0, 1, 0, 96, 0xAA];
    let mut reader = Reader::from_byte_slice(&bytes);
    assert!(Header::read(&mut reader).unwrap_err().is_truncated());
}
