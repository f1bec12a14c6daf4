use crate::SerdeErr;

/// Reads bits back out of a buffer filled by a `BitWriter`
pub struct BitReader<'b> {
    buffer: &'b [u8],
    byte_index: usize,
    bit_index: u8,
}

impl<'b> BitReader<'b> {
    pub fn new(buffer: &'b [u8]) -> Self {
        Self {
            buffer,
            byte_index: 0,
            bit_index: 0,
        }
    }

    pub fn read_bit(&mut self) -> Result<bool, SerdeErr> {
        let Some(byte) = self.buffer.get(self.byte_index) else {
            return Err(SerdeErr);
        };

        let bit = (byte >> self.bit_index) & 1 != 0;

        self.bit_index += 1;
        if self.bit_index >= 8 {
            self.bit_index = 0;
            self.byte_index += 1;
        }

        Ok(bit)
    }

    pub fn read_byte(&mut self) -> Result<u8, SerdeErr> {
        if self.bit_index == 0 {
            let Some(byte) = self.buffer.get(self.byte_index) else {
                return Err(SerdeErr);
            };
            self.byte_index += 1;
            return Ok(*byte);
        }

        let mut output: u8 = 0;
        for index in 0..8 {
            if self.read_bit()? {
                output |= 1 << index;
            }
        }
        Ok(output)
    }

    pub fn read_bytes(&mut self, count: usize) -> Result<Vec<u8>, SerdeErr> {
        if count > self.bytes_remaining() {
            return Err(SerdeErr);
        }
        let mut output = Vec::with_capacity(count);
        for _ in 0..count {
            output.push(self.read_byte()?);
        }
        Ok(output)
    }

    /// Skips the rest of a partially read byte
    pub fn skip_padding(&mut self) {
        if self.bit_index != 0 {
            self.bit_index = 0;
            self.byte_index += 1;
        }
    }

    /// Whole bytes left, not counting a partially read one
    pub fn bytes_remaining(&self) -> usize {
        let whole = self.buffer.len().saturating_sub(self.byte_index);
        if self.bit_index == 0 {
            whole
        } else {
            whole.saturating_sub(1)
        }
    }

    pub fn bits_read(&self) -> usize {
        self.byte_index * 8 + self.bit_index as usize
    }

    pub fn is_exhausted(&self) -> bool {
        self.byte_index >= self.buffer.len()
    }
}
