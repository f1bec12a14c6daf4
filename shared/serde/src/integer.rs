use crate::{BitReader, BitWrite, ConstBitLength, Serde, SerdeErr};

pub type UnsignedInteger<const BITS: u8> = SerdeInteger<false, BITS>;
pub type UnsignedVariableInteger<const BITS: u8> = SerdeInteger<true, BITS>;

/// An unsigned integer written with an explicit bit width.
///
/// Fixed integers always take `BITS` bits. Variable integers are written in
/// groups of `BITS` bits, least significant group first, each group preceded
/// by a bit saying whether another group follows.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct SerdeInteger<const VARIABLE: bool, const BITS: u8> {
    value: u64,
}

impl<const VARIABLE: bool, const BITS: u8> SerdeInteger<VARIABLE, BITS> {
    /// # Panics
    /// Panics if `BITS` is 0 or above 64, or if a fixed-width integer can't
    /// hold `value`
    pub fn new<T: Into<u64>>(value: T) -> Self {
        let value = value.into();

        if BITS == 0 {
            panic!("can't create an integer with 0 bits...");
        }
        if BITS > 64 {
            panic!("can't create an integer with more than 64 bits...");
        }
        if !VARIABLE && BITS < 64 && value >= 1u64 << BITS {
            panic!(
                "with {} bits, can't encode number greater than {}",
                BITS,
                (1u64 << BITS) - 1
            );
        }

        Self { value }
    }

    pub fn get(&self) -> u64 {
        self.value
    }

    fn group_limit() -> u128 {
        1u128 << BITS
    }
}

impl<const VARIABLE: bool, const BITS: u8> Serde for SerdeInteger<VARIABLE, BITS> {
    fn ser(&self, writer: &mut dyn BitWrite) {
        let mut value = self.value as u128;

        if VARIABLE {
            loop {
                let proceed = value >= Self::group_limit();
                writer.write_bit(proceed);
                for _ in 0..BITS {
                    writer.write_bit(value & 1 != 0);
                    value >>= 1;
                }
                if !proceed {
                    return;
                }
            }
        } else {
            for _ in 0..BITS {
                writer.write_bit(value & 1 != 0);
                value >>= 1;
            }
        }
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let mut output: u128 = 0;
        let mut shift: u32 = 0;

        loop {
            let proceed = if VARIABLE { reader.read_bit()? } else { false };

            for _ in 0..BITS {
                if reader.read_bit()? {
                    output |= 1 << shift;
                }
                shift += 1;
                // more groups than a u64 could ever need
                if shift >= 128 {
                    return Err(SerdeErr);
                }
            }

            if !proceed {
                break;
            }
        }

        let Ok(value) = u64::try_from(output) else {
            return Err(SerdeErr);
        };
        Ok(Self { value })
    }

    fn bit_length(&self) -> u32 {
        if !VARIABLE {
            return BITS as u32;
        }

        let mut output: u32 = 0;
        let mut value = self.value as u128;
        loop {
            let proceed = value >= Self::group_limit();
            output += 1 + BITS as u32;
            value >>= BITS;
            if !proceed {
                return output;
            }
        }
    }
}

impl<const BITS: u8> ConstBitLength for SerdeInteger<false, BITS> {
    fn const_bit_length() -> u32 {
        BITS as u32
    }
}

impl<const VARIABLE: bool, const BITS: u8, T: Into<u64>> From<T> for SerdeInteger<VARIABLE, BITS> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}
