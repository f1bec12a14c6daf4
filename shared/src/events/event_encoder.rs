use std::collections::HashMap;

use entity_events_serde::BitWrite;

use crate::{events::entity_event::EntityEvent, events::error::EncodeError, types::EventKind};

/// Produces the payload of an event, one implementation per event kind.
///
/// `R` identifies the recipient, for payloads shaped per destination. An
/// encoder that fails may leave partial bits in `writer`; the caller
/// discards them.
pub trait EventEncoder<E, R = ()> {
    fn encode(
        &self,
        event: &EntityEvent<E>,
        recipient: Option<&R>,
        writer: &mut dyn BitWrite,
    ) -> Result<(), EncodeError>;
}

/// Dispatches each event to the encoder registered for its kind
pub struct EventEncoders<'a, E, R = ()> {
    encoders: HashMap<EventKind, Box<dyn EventEncoder<E, R> + 'a>>,
}

impl<'a, E, R> EventEncoders<'a, E, R> {
    pub fn new() -> Self {
        Self {
            encoders: HashMap::new(),
        }
    }

    /// Registers `encoder` for `kind`, replacing any previous one
    pub fn add<T: EventEncoder<E, R> + 'a>(&mut self, kind: EventKind, encoder: T) -> &mut Self {
        self.encoders.insert(kind, Box::new(encoder));
        self
    }

    pub fn contains(&self, kind: &EventKind) -> bool {
        self.encoders.contains_key(kind)
    }

    pub fn len(&self) -> usize {
        self.encoders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.encoders.is_empty()
    }
}

impl<'a, E, R> Default for EventEncoders<'a, E, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, E, R> EventEncoder<E, R> for EventEncoders<'a, E, R> {
    fn encode(
        &self,
        event: &EntityEvent<E>,
        recipient: Option<&R>,
        writer: &mut dyn BitWrite,
    ) -> Result<(), EncodeError> {
        let Some(encoder) = self.encoders.get(&event.kind()) else {
            return Err(EncodeError::UnregisteredKind {
                kind: event.kind().value(),
            });
        };
        encoder.encode(event, recipient, writer)
    }
}
