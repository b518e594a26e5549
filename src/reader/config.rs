/// Largest system exclusive payload accepted by default.
pub const DEFAULT_SYSEX_CAPACITY: usize = 128;

/// Bytes in the longest variable-length quantity the format produces (`0x0FFFFFFF`).
pub const DEFAULT_MAX_VARINT_BYTES: usize = 4;

#[doc = r#"
Limits applied while decoding.

```rust
# use miditrack::reader::ReaderConfig;
let config = ReaderConfig::default().with_sysex_capacity(512);
assert_eq!(config.sysex_capacity(), 512);
assert_eq!(config.max_varint_bytes(), 4);
```
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReaderConfig {
    sysex_capacity: usize,
    max_varint_bytes: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            sysex_capacity: DEFAULT_SYSEX_CAPACITY,
            max_varint_bytes: DEFAULT_MAX_VARINT_BYTES,
        }
    }
}

impl ReaderConfig {
    /// Sets the number of payload bytes a system exclusive message may carry
    /// before its `0xF7` terminator.
    pub const fn with_sysex_capacity(mut self, capacity: usize) -> Self {
        self.sysex_capacity = capacity;
        self
    }

    /// Sets how many bytes a variable-length quantity may span.
    ///
    /// Values are decoded into a `u32`; a quantity that does not fit is rejected
    /// no matter how many bytes are allowed.
    pub const fn with_max_varint_bytes(mut self, max: usize) -> Self {
        self.max_varint_bytes = max;
        self
    }

    /// System exclusive payload capacity
    pub const fn sysex_capacity(&self) -> usize {
        self.sysex_capacity
    }

    /// Variable-length quantity byte limit
    pub const fn max_varint_bytes(&self) -> usize {
        self.max_varint_bytes
    }
}
