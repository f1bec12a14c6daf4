use thiserror::Error;

/// Reasons an entity may not have an event created for it.
///
/// Between queuing a state change and creating its event, the entity may
/// have been destroyed, or its id handed back for reuse. Referencing it on
/// the wire would point the receiver at a dead or recycled id.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntityValidationError {
    /// The entity table has no record of the entity
    #[error("Can't create an entity event for {entity} - the entity could not be found")]
    NotFound { entity: String },

    /// The entity has been marked removed
    #[error("Can't create an entity event for {entity} - the entity has been removed")]
    Removed { entity: String },

    /// The entity's id has been freed for reuse
    #[error("Can't create an entity event for {entity} - the ID of the entity has been freed")]
    IdFreed { entity: String },

    /// The entity claims the id reserved for failed slots
    #[error("Can't create an entity event for {entity} - the entity holds the reserved null ID")]
    NullId { entity: String },
}

/// Errors raised while encoding a single event's payload.
///
/// These never escape the batch writer. The failed event still takes a slot
/// in the batch, as a null-entity placeholder, and is reported to diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// No encoder registered for the event's kind
    #[error("No encoder registered for event kind {kind}. Register one with EventEncoders::add()")]
    UnregisteredKind { kind: u16 },

    /// The entity could not be reached at write time
    #[error("Entity {entity_id} is no longer available to encode an event for")]
    EntityUnavailable { entity_id: u16 },

    /// Kind-specific payload failure
    #[error("Failed to encode event payload: {reason}")]
    Payload { reason: String },
}
