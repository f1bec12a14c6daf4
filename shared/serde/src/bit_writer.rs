/// Sink for bit-level serialization. Implemented by [`BitWriter`], which
/// stores the bits, and by [`crate::BitCounter`], which only measures them.
pub trait BitWrite {
    fn write_bit(&mut self, bit: bool);
    fn write_byte(&mut self, byte: u8);
    fn count_bits(&mut self, bits: u32);
    fn is_counter(&self) -> bool;
    /// Total number of bits this sink has seen so far
    fn bits_written(&self) -> u32;

    fn write_bytes(&mut self, bytes: &[u8]) {
        for byte in bytes {
            self.write_byte(*byte);
        }
    }

    /// Writes zero bits until the stream sits on a byte boundary
    fn pad_to_byte(&mut self) {
        while self.bits_written() % 8 != 0 {
            self.write_bit(false);
        }
    }
}

/// A growable bit buffer. Bits are packed least-significant first, so a byte
/// written on a byte boundary lands in the buffer unchanged.
///
/// Has no size cap. Packet budgets are enforced by whoever fills the writer,
/// measuring ahead with a `BitCounter`.
#[derive(Debug, Default, Clone)]
pub struct BitWriter {
    scratch: u8,
    scratch_index: u8,
    buffer: Vec<u8>,
    bits_written: u32,
}

impl BitWriter {
    pub fn new() -> Self {
        Self {
            scratch: 0,
            scratch_index: 0,
            buffer: Vec::new(),
            bits_written: 0,
        }
    }

    fn flush_scratch(&mut self) {
        if self.scratch_index > 0 {
            let byte = (self.scratch << (8 - self.scratch_index)).reverse_bits();
            self.buffer.push(byte);
            self.scratch = 0;
            self.scratch_index = 0;
        }
    }

    /// Number of bytes the written bits occupy, counting a trailing partial byte
    pub fn byte_count(&self) -> usize {
        self.bits_written.div_ceil(8) as usize
    }

    /// Completed bytes only. Call `pad_to_byte` first to include the partial
    /// byte still held in scratch.
    pub fn bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn is_empty(&self) -> bool {
        self.bits_written == 0
    }

    /// Drops all written bits but keeps the allocation
    pub fn clear(&mut self) {
        self.scratch = 0;
        self.scratch_index = 0;
        self.buffer.clear();
        self.bits_written = 0;
    }

    pub fn to_bytes(mut self) -> Vec<u8> {
        self.flush_scratch();
        self.buffer
    }
}

impl BitWrite for BitWriter {
    fn write_bit(&mut self, bit: bool) {
        self.scratch <<= 1;

        if bit {
            self.scratch |= 1;
        }

        self.scratch_index += 1;
        self.bits_written += 1;

        if self.scratch_index >= 8 {
            self.buffer.push(self.scratch.reverse_bits());
            self.scratch_index = 0;
            self.scratch = 0;
        }
    }

    fn write_byte(&mut self, byte: u8) {
        if self.scratch_index == 0 {
            self.buffer.push(byte);
            self.bits_written += 8;
            return;
        }

        let mut temp = byte;
        for _ in 0..8 {
            self.write_bit(temp & 1 != 0);
            temp >>= 1;
        }
    }

    fn count_bits(&mut self, _bits: u32) {
        // only counters track bits without writing them
    }

    fn is_counter(&self) -> bool {
        false
    }

    fn bits_written(&self) -> u32 {
        self.bits_written
    }
}
