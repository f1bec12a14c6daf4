use std::fmt;

use entity_events_serde::{BitReader, BitWrite, ConstBitLength, Serde, SerdeErr};

/// Position of an event in the stream. Wraps around at `u16::MAX`, so
/// ordering must go through `sequence_greater_than`.
pub type EventSequence = u16;

/// Network identifier of a replicated entity
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u16);

impl EntityId {
    /// Reserved value no live entity may hold. Marks a slot whose event
    /// failed to encode.
    pub const NULL: EntityId = EntityId(0);

    pub fn new(value: u16) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u16 {
        self.0
    }

    pub fn is_null(&self) -> bool {
        *self == Self::NULL
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serde for EntityId {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.0.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        Ok(Self(u16::de(reader)?))
    }

    fn bit_length(&self) -> u32 {
        <Self as ConstBitLength>::const_bit_length()
    }
}

impl ConstBitLength for EntityId {
    fn const_bit_length() -> u32 {
        <u16 as ConstBitLength>::const_bit_length()
    }
}

/// Selects which encoder produces an event's payload
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EventKind(u16);

impl EventKind {
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
