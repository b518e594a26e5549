use super::ReaderErrorKind;

/// Where a [`MidiSource::seek`] is measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekFrom {
    /// An absolute offset from the first byte
    Start(u64),
    /// Relative to the current position
    Current(i64),
    /// Relative to one past the last byte
    End(i64),
}

#[doc = r#"
Sequential, seekable byte access for the decoder.

Anything that can hand out bytes one at a time and jump to a position can feed the
decoder: [`SliceSource`] covers in-memory buffers and [`IoSource`] wraps any
[`Read`](std::io::Read) + [`Seek`](std::io::Seek) transport such as a file.

Seeking past the last byte is a [`ReaderErrorKind::TruncatedInput`]: the decoder only
seeks to skip payload it was told exists, so a target beyond the end means the input
was cut short.
"#]
pub trait MidiSource {
    /// Reads one byte. `Ok(None)` at the end of the input.
    fn read_byte(&mut self) -> Result<Option<u8>, ReaderErrorKind>;

    /// Fills `buf` completely or fails with [`ReaderErrorKind::TruncatedInput`].
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), ReaderErrorKind> {
        for slot in buf.iter_mut() {
            *slot = self.read_byte()?.ok_or(ReaderErrorKind::TruncatedInput)?;
        }
        Ok(())
    }

    /// Moves the cursor, returning the new absolute position.
    fn seek(&mut self, pos: SeekFrom) -> Result<u64, ReaderErrorKind>;

    /// The current absolute position.
    fn position(&self) -> u64;

    /// True when no bytes remain.
    fn at_end(&self) -> bool;
}

fn resolve(pos: SeekFrom, current: u64, len: u64) -> Result<u64, ReaderErrorKind> {
    let target = match pos {
        SeekFrom::Start(offset) => Some(offset),
        SeekFrom::Current(delta) => current.checked_add_signed(delta),
        SeekFrom::End(delta) => len.checked_add_signed(delta),
    };
    match target {
        Some(target) if target <= len => Ok(target),
        _ => Err(ReaderErrorKind::TruncatedInput),
    }
}

/// An in-memory byte buffer.
#[derive(Debug, Clone)]
pub struct SliceSource<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> SliceSource<'a> {
    /// Create a source starting at the first byte of `bytes`.
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, position: 0 }
    }

    /// The bytes not yet consumed.
    pub fn remaining(&self) -> &'a [u8] {
        &self.bytes[self.position..]
    }
}

impl MidiSource for SliceSource<'_> {
    fn read_byte(&mut self) -> Result<Option<u8>, ReaderErrorKind> {
        let byte = self.bytes.get(self.position).copied();
        if byte.is_some() {
            self.position += 1;
        }
        Ok(byte)
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), ReaderErrorKind> {
        let end = self.position + buf.len();
        let Some(slice) = self.bytes.get(self.position..end) else {
            self.position = self.bytes.len();
            return Err(ReaderErrorKind::TruncatedInput);
        };
        buf.copy_from_slice(slice);
        self.position = end;
        Ok(())
    }

    fn seek(&mut self, pos: SeekFrom) -> Result<u64, ReaderErrorKind> {
        let target = resolve(pos, self.position as u64, self.bytes.len() as u64)?;
        self.position = target as usize;
        Ok(target)
    }

    fn position(&self) -> u64 {
        self.position as u64
    }

    fn at_end(&self) -> bool {
        self.position >= self.bytes.len()
    }
}

#[cfg(feature = "std")]
pub use io::IoSource;

#[cfg(feature = "std")]
mod io {
    use super::{MidiSource, ReaderErrorKind, SeekFrom, resolve};
    use std::io::{self, Read, Seek};

    /// A [`Read`] + [`Seek`] transport, typically a (buffered) file.
    ///
    /// The stream length is captured on construction.
    #[derive(Debug)]
    pub struct IoSource<R> {
        inner: R,
        position: u64,
        len: u64,
    }

    impl<R: Read + Seek> IoSource<R> {
        /// Wraps `inner`, starting at its current position.
        pub fn new(mut inner: R) -> io::Result<Self> {
            let position = inner.stream_position()?;
            let len = inner.seek(io::SeekFrom::End(0))?;
            inner.seek(io::SeekFrom::Start(position))?;
            Ok(Self {
                inner,
                position,
                len,
            })
        }

        /// Returns the wrapped transport.
        pub fn into_inner(self) -> R {
            self.inner
        }
    }

    impl<R: Read + Seek> MidiSource for IoSource<R> {
        fn read_byte(&mut self) -> Result<Option<u8>, ReaderErrorKind> {
            let mut byte = [0u8; 1];
            loop {
                match self.inner.read(&mut byte) {
                    Ok(0) => return Ok(None),
                    Ok(_) => {
                        self.position += 1;
                        return Ok(Some(byte[0]));
                    }
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(e) => return Err(e.into()),
                }
            }
        }

        fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), ReaderErrorKind> {
            match self.inner.read_exact(buf) {
                Ok(()) => {
                    self.position += buf.len() as u64;
                    Ok(())
                }
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                    self.position = self.len;
                    Err(ReaderErrorKind::TruncatedInput)
                }
                Err(e) => Err(e.into()),
            }
        }

        fn seek(&mut self, pos: SeekFrom) -> Result<u64, ReaderErrorKind> {
            let target = resolve(pos, self.position, self.len)?;
            self.position = self.inner.seek(io::SeekFrom::Start(target))?;
            Ok(self.position)
        }

        fn position(&self) -> u64 {
            self.position
        }

        fn at_end(&self) -> bool {
            self.position >= self.len
        }
    }

    #[test]
    fn io_source_tracks_position() {
        use pretty_assertions::assert_eq;
        let mut source = IoSource::new(io::Cursor::new(vec![1u8, 2, 3, 4])).unwrap();
        assert_eq!(source.read_byte().unwrap(), Some(1));
        let mut buf = [0; 2];
        source.read_exact(&mut buf).unwrap();
        assert_eq!(buf, [2, 3]);
        assert_eq!(source.position(), 3);
        assert!(matches!(
            source.seek(SeekFrom::Current(2)),
            Err(ReaderErrorKind::TruncatedInput)
        ));
        assert_eq!(source.seek(SeekFrom::End(0)).unwrap(), 4);
        assert!(source.at_end());
        assert_eq!(source.read_byte().unwrap(), None);
    }
}

#[test]
fn slice_source_seek_bounds() {
    use pretty_assertions::assert_eq;
    let bytes = [0u8, 1, 2, 3, 4];
    let mut source = SliceSource::new(&bytes);

    assert_eq!(source.seek(SeekFrom::Start(5)).unwrap(), 5);
    assert!(source.at_end());
    assert!(matches!(
        source.seek(SeekFrom::Start(6)),
        Err(ReaderErrorKind::TruncatedInput)
    ));
    assert!(matches!(
        source.seek(SeekFrom::End(-6)),
        Err(ReaderErrorKind::TruncatedInput)
    ));
    assert_eq!(source.seek(SeekFrom::Current(-3)).unwrap(), 2);
    assert_eq!(source.remaining(), &[2, 3, 4]);

    let mut buf = [0u8; 4];
    assert!(matches!(
        source.read_exact(&mut buf),
        Err(ReaderErrorKind::TruncatedInput)
    ));
    assert!(source.at_end());
}
