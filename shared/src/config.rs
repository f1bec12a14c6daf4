use crate::constants::MAX_EVENT_BUFFER_BYTES;

/// Contains Config properties which will be used by an `EventBatchWriter`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventBatchConfig {
    /// Maximum size in bytes of the packet a batch is written into, counting
    /// whatever the packet already held before the batch
    pub max_buffer_bytes: usize,
    /// Maximum number of slots (sent events and failure placeholders) in one
    /// batch. The slot count travels as a single byte.
    pub max_slots: u8,
}

impl Default for EventBatchConfig {
    fn default() -> Self {
        Self {
            max_buffer_bytes: MAX_EVENT_BUFFER_BYTES,
            max_slots: u8::MAX,
        }
    }
}
