use alloc::vec::Vec;

/// The payload of a system exclusive message.
///
/// Holds the bytes between the `0xF0` status and the `0xF7` terminator, exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SystemExclusiveMessage(Vec<u8>);

impl SystemExclusiveMessage {
    /// Create a new message from its payload bytes.
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self(data.into())
    }

    /// The payload
    pub fn data(&self) -> &[u8] {
        &self.0
    }

    /// Number of payload bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the message carried no bytes
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the owned payload
    pub fn into_data(self) -> Vec<u8> {
        self.0
    }
}
