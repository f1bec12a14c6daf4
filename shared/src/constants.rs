/// Upper bound, in bytes, on the packet an event batch is written into.
/// Sender and receiver must agree on it.
pub const MAX_EVENT_BUFFER_BYTES: usize = 1024;

/// First sequence (u16) followed by slot count (u8)
pub const EVENT_BATCH_HEADER_BYTES: usize = 3;
