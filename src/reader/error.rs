use thiserror::Error;

#[doc = r#"
A set of errors that can occur while decoding a MIDI file.

Every error aborts the whole decode. A corrupt chunk invalidates timing for
every chunk after it, so partially decoded tracks are never handed back.
"#]
#[derive(Debug, Error)]
#[error("Reading at position {position}, {kind}")]
pub struct ReaderError {
    position: u64,
    pub(crate) kind: ReaderErrorKind,
}

/// A kind of error that a reader can produce
#[derive(Debug, Error)]
pub enum ReaderErrorKind {
    /// The source ran out of bytes in the middle of a field.
    #[error("Input ended in the middle of a field")]
    TruncatedInput,
    /// A chunk signature was required here, but another was found.
    #[error("Bad chunk magic {0:02X?}")]
    BadMagic([u8; 4]),
    /// The number of `MTrk` chunks disagrees with the header.
    #[error("Header declares {declared} tracks, found {found}")]
    TrackCountMismatch {
        /// The count declared in `MThd`
        declared: u16,
        /// The number of track chunks seen so far
        found: usize,
    },
    /// A system exclusive payload did not terminate within the buffer.
    #[error("System exclusive message exceeds {capacity} bytes")]
    SysexOverflow {
        /// The configured buffer capacity
        capacity: usize,
    },
    /// A variable-length quantity kept its continuation bit set for too long.
    #[error("Variable-length quantity longer than {max_bytes} bytes")]
    MalformedVarint {
        /// The configured continuation limit
        max_bytes: usize,
    },
    /// A recognized meta event declared a payload of the wrong size.
    #[error("Meta event {meta_type:#04X} declares length {length}")]
    InvalidMetaLength {
        /// The meta type byte
        meta_type: u8,
        /// The declared length
        length: u32,
    },
    /// A second `MThd` chunk
    #[error("Duplicate header chunk")]
    DuplicateHeader,
    /// A track chunk appeared before the header chunk.
    #[error("Track chunk before header chunk")]
    MissingHeader,
    /// Transport failure from an I/O backed source.
    #[cfg(feature = "std")]
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ReaderError {
    /// Create a reader error from a position and kind
    pub const fn new(position: u64, kind: ReaderErrorKind) -> Self {
        Self { position, kind }
    }
    /// True if the input ended before a field was complete
    pub const fn is_truncated(&self) -> bool {
        matches!(self.kind, ReaderErrorKind::TruncatedInput)
    }
    /// Returns the error kind of the reader.
    pub fn error_kind(&self) -> &ReaderErrorKind {
        &self.kind
    }
    /// Returns the position where the read error occurred.
    pub fn position(&self) -> u64 {
        self.position
    }
    /// Consumes the error, returning its kind.
    pub fn into_kind(self) -> ReaderErrorKind {
        self.kind
    }

    /// Create a new truncation error
    pub const fn truncated(position: u64) -> Self {
        Self {
            position,
            kind: ReaderErrorKind::TruncatedInput,
        }
    }
}

/// The Read Result type (see [`ReaderError`])
pub type ReadResult<T> = Result<T, ReaderError>;

#[test]
fn error_display_carries_position() {
    use alloc::string::ToString;
    use pretty_assertions::assert_eq;

    let err = ReaderError::new(
        22,
        ReaderErrorKind::TrackCountMismatch {
            declared: 1,
            found: 2,
        },
    );
    assert_eq!(
        err.to_string(),
        "Reading at position 22, Header declares 1 tracks, found 2"
    );
    assert!(!err.is_truncated());
    assert!(ReaderError::truncated(4).is_truncated());
}
