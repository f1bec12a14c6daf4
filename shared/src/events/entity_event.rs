use std::fmt::Debug;

use crate::{
    diagnostics::DiagnosticsSink,
    events::{
        entity_validator::{EntityLookup, EntityValidator},
        error::EntityValidationError,
    },
    types::{EntityId, EventKind, EventSequence},
};

/// One pending state change for one entity.
///
/// `E` is the simulation's own handle for the entity. The record never owns
/// or mutates what it points at, and carries no payload: the payload is
/// produced at write time by an `EventEncoder`, since it may differ per
/// recipient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityEvent<E> {
    sequence: EventSequence,
    kind: EventKind,
    entity_id: EntityId,
    entity: E,
}

impl<E> EntityEvent<E> {
    /// Builds a record for an entity the caller has already validated
    pub fn new(sequence: EventSequence, kind: EventKind, entity_id: EntityId, entity: E) -> Self {
        Self {
            sequence,
            kind,
            entity_id,
            entity,
        }
    }

    /// Validates the entity against `lookup` before building the record.
    /// A failing entity is reported to `diagnostics` and no record is built.
    pub fn try_new(
        sequence: EventSequence,
        kind: EventKind,
        entity: E,
        lookup: &dyn EntityLookup<E>,
        diagnostics: &dyn DiagnosticsSink,
    ) -> Result<Self, EntityValidationError>
    where
        E: Debug,
    {
        match EntityValidator::validate(lookup, &entity) {
            Ok(entity_id) => Ok(Self::new(sequence, kind, entity_id, entity)),
            Err(error) => {
                diagnostics.report(&error.to_string(), None);
                Err(error)
            }
        }
    }

    pub fn sequence(&self) -> EventSequence {
        self.sequence
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn entity_id(&self) -> EntityId {
        self.entity_id
    }
}

impl<E: Copy> EntityEvent<E> {
    pub fn entity(&self) -> E {
        self.entity
    }
}
