use num_enum::{IntoPrimitive, TryFromPrimitive};

/// How the tracks of a file relate to each other.
///
/// The header keeps the raw format word; this is its interpretation for the three
/// defined values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
pub enum FormatType {
    /// Format 0: a single track holding every channel
    SingleMultiChannel = 0,
    /// Format 1: tracks played together, sharing one timeline
    Simultaneous = 1,
    /// Format 2: independent single-track sequences
    SequentiallyIndependent = 2,
}
