use std::fmt::Debug;

use crate::{events::error::EntityValidationError, types::EntityId};

/// What the entity table knows about an entity
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntityState {
    pub id: EntityId,
    pub removed: bool,
    pub id_freed: bool,
}

impl EntityState {
    pub fn live(id: EntityId) -> Self {
        Self {
            id,
            removed: false,
            id_freed: false,
        }
    }
}

/// Resolves an entity handle against the simulation's entity table
pub trait EntityLookup<E> {
    /// Returns `None` if the table has never heard of the entity
    fn entity_state(&self, entity: &E) -> Option<EntityState>;
}

/// Checks that an entity may still appear in the event stream
pub struct EntityValidator;

impl EntityValidator {
    /// Returns the entity's network id if events may be created for it
    pub fn validate<E: Debug>(
        lookup: &dyn EntityLookup<E>,
        entity: &E,
    ) -> Result<EntityId, EntityValidationError> {
        let Some(state) = lookup.entity_state(entity) else {
            return Err(EntityValidationError::NotFound {
                entity: format!("{:?}", entity),
            });
        };

        if state.removed {
            return Err(EntityValidationError::Removed {
                entity: format!("{:?}", entity),
            });
        }
        if state.id_freed {
            return Err(EntityValidationError::IdFreed {
                entity: format!("{:?}", entity),
            });
        }
        if state.id.is_null() {
            return Err(EntityValidationError::NullId {
                entity: format!("{:?}", entity),
            });
        }

        Ok(state.id)
    }
}
