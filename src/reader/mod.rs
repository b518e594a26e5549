#![doc = r#"
Byte-level access to a MIDI file

The [`Reader`] wraps a [`MidiSource`] together with a [`ReaderConfig`] and provides the
primitive big-endian and variable-length reads every chunk decoder is built from. Each
failure is tagged with the source position at which it happened.
"#]

mod config;
pub use config::*;

mod error;
pub use error::*;

mod source;
pub use source::*;

/// A cursor over a [`MidiSource`] that knows how to read MIDI primitives.
#[derive(Debug)]
pub struct Reader<R> {
    source: R,
    config: ReaderConfig,
}

impl<'a> Reader<SliceSource<'a>> {
    /// Create a reader over an in-memory buffer with the default configuration.
    pub fn from_byte_slice(bytes: &'a [u8]) -> Self {
        Self::new(SliceSource::new(bytes), ReaderConfig::default())
    }
}

impl<R: MidiSource> Reader<R> {
    /// Create a reader over `source`
    pub const fn new(source: R, config: ReaderConfig) -> Self {
        Self { source, config }
    }

    /// The limits in effect for this reader
    pub const fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// The current absolute position in the source
    pub fn position(&self) -> u64 {
        self.source.position()
    }

    /// True if no bytes remain
    pub fn at_end(&self) -> bool {
        self.source.at_end()
    }

    /// Returns the underlying source
    pub fn into_inner(self) -> R {
        self.source
    }

    /// Returns a mutable reference to the underlying source
    pub fn source_mut(&mut self) -> &mut R {
        &mut self.source
    }

    pub(crate) fn error(&self, kind: ReaderErrorKind) -> ReaderError {
        ReaderError::new(self.position(), kind)
    }

    /// Reads a single byte, failing if the input is exhausted.
    pub fn read_u8(&mut self) -> ReadResult<u8> {
        match self.source.read_byte() {
            Ok(Some(byte)) => Ok(byte),
            Ok(None) => Err(self.error(ReaderErrorKind::TruncatedInput)),
            Err(kind) => Err(self.error(kind)),
        }
    }

    /// Reads exactly `N` bytes.
    pub fn read_array<const N: usize>(&mut self) -> ReadResult<[u8; N]> {
        let mut buf = [0u8; N];
        self.source
            .read_exact(&mut buf)
            .map_err(|kind| self.error(kind))?;
        Ok(buf)
    }

    /// Reads a big-endian `u16`
    pub fn read_u16_be(&mut self) -> ReadResult<u16> {
        self.read_array().map(u16::from_be_bytes)
    }

    /// Reads a big-endian 24-bit value
    pub fn read_u24_be(&mut self) -> ReadResult<u32> {
        let [a, b, c] = self.read_array()?;
        Ok(u32::from_be_bytes([0, a, b, c]))
    }

    /// Reads a big-endian `u32`
    pub fn read_u32_be(&mut self) -> ReadResult<u32> {
        self.read_array().map(u32::from_be_bytes)
    }

    #[doc = r#"
Reads a variable-length quantity.

Each byte contributes its low seven bits, most significant group first. The
quantity ends at the first byte with the high bit clear.

Fails with [`ReaderErrorKind::MalformedVarint`] if more than
[`ReaderConfig::max_varint_bytes`] bytes would be needed, or if the value does not
fit in a `u32`.

```rust
# use miditrack::reader::Reader;
let mut reader = Reader::from_byte_slice(&[0x81, 0x80, 0x00, 0x7F]);
assert_eq!(reader.read_varlen().unwrap(), 0x4000);
assert_eq!(reader.read_varlen().unwrap(), 0x7F);
```
"#]
    pub fn read_varlen(&mut self) -> ReadResult<u32> {
        let max_bytes = self.config.max_varint_bytes();
        let mut value: u32 = 0;
        let mut count = 0;
        loop {
            let byte = self.read_u8()?;
            if value > u32::MAX >> 7 {
                return Err(self.error(ReaderErrorKind::MalformedVarint { max_bytes }));
            }
            value = (value << 7) | (byte & 0x7F) as u32;
            count += 1;
            if byte & 0x80 == 0 {
                return Ok(value);
            }
            if count >= max_bytes {
                return Err(self.error(ReaderErrorKind::MalformedVarint { max_bytes }));
            }
        }
    }

    /// Advances the cursor by `n` bytes without interpreting them.
    pub fn skip(&mut self, n: u64) -> ReadResult<()> {
        let delta = i64::try_from(n).map_err(|_| self.error(ReaderErrorKind::TruncatedInput))?;
        self.source
            .seek(SeekFrom::Current(delta))
            .map_err(|kind| self.error(kind))?;
        Ok(())
    }

    /// Moves the cursor to an absolute position.
    pub fn seek_to(&mut self, position: u64) -> ReadResult<()> {
        self.source
            .seek(SeekFrom::Start(position))
            .map_err(|kind| self.error(kind))?;
        Ok(())
    }
}

#[test]
fn read_big_endian_fields() {
    use pretty_assertions::assert_eq;
    let bytes = [0x00, 0x00, 0x00, 0x06, 0x01, 0xE0, 0x07, 0xA1, 0x20];
    let mut reader = Reader::from_byte_slice(&bytes);
    assert_eq!(reader.read_u32_be().unwrap(), 6);
    assert_eq!(reader.read_u16_be().unwrap(), 480);
    assert_eq!(reader.read_u24_be().unwrap(), 500_000);
    assert!(reader.at_end());
    assert!(reader.read_u8().unwrap_err().is_truncated());
}

#[test]
fn varlen_boundaries() {
    use pretty_assertions::assert_eq;
    let cases: [(&[u8], u32); 8] = [
        (&[0x00], 0),
        (&[0x40], 0x40),
        (&[0x7F], 0x7F),
        (&[0x81, 0x00], 0x80),
        (&[0xC0, 0x00], 0x2000),
        (&[0xFF, 0x7F], 0x3FFF),
        (&[0x81, 0x80, 0x80, 0x00], 0x0020_0000),
        (&[0xFF, 0xFF, 0xFF, 0x7F], 0x0FFF_FFFF),
    ];
    for (bytes, expected) in cases {
        let mut reader = Reader::from_byte_slice(bytes);
        assert_eq!(reader.read_varlen().unwrap(), expected);
        assert!(reader.at_end());
    }
}

#[test]
fn varlen_too_long() {
    let mut reader = Reader::from_byte_slice(&[0x81, 0x80, 0x80, 0x80, 0x00]);
    let err = reader.read_varlen().unwrap_err();
    assert!(matches!(
        err.error_kind(),
        ReaderErrorKind::MalformedVarint { max_bytes: 4 }
    ));

    let config = ReaderConfig::default().with_max_varint_bytes(5);
    let mut reader = Reader::new(SliceSource::new(&[0x81, 0x80, 0x80, 0x80, 0x00]), config);
    assert_eq!(reader.read_varlen().unwrap(), 0x1000_0000);
}

#[test]
fn varlen_wider_than_u32() {
    use pretty_assertions::assert_eq;
    let config = ReaderConfig::default().with_max_varint_bytes(5);

    // 2^32 - 1 is the largest five-byte quantity that still fits
    let mut reader = Reader::new(SliceSource::new(&[0x8F, 0xFF, 0xFF, 0xFF, 0x7F]), config);
    assert_eq!(reader.read_varlen().unwrap(), u32::MAX);

    let mut reader = Reader::new(SliceSource::new(&[0xFF, 0xFF, 0xFF, 0xFF, 0x7F]), config);
    let err = reader.read_varlen().unwrap_err();
    assert!(matches!(
        err.error_kind(),
        ReaderErrorKind::MalformedVarint { max_bytes: 5 }
    ));
    assert_eq!(err.position(), 5);
}

#[test]
fn varlen_truncated() {
    let mut reader = Reader::from_byte_slice(&[0x81, 0x80]);
    assert!(reader.read_varlen().unwrap_err().is_truncated());
}

#[test]
fn skip_past_end_is_truncated() {
    use pretty_assertions::assert_eq;
    let mut reader = Reader::from_byte_slice(&[1, 2, 3]);
    reader.skip(3).unwrap();
    assert_eq!(reader.position(), 3);
    reader.seek_to(1).unwrap();
    assert!(reader.skip(3).unwrap_err().is_truncated());
}
