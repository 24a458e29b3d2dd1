use thiserror::Error;

use crate::entity::{EntityKind, RecordId};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("{entity} not found")]
    NotFound { entity: EntityKind, id: RecordId },

    #[error("No {entity} ids left to assign")]
    IdsExhausted { entity: EntityKind },
}

impl StoreError {
    pub fn not_found(entity: EntityKind, id: RecordId) -> Self {
        tracing::warn!("{} {} not found", entity, id);
        StoreError::NotFound { entity, id }
    }

    pub fn entity(&self) -> EntityKind {
        match self {
            StoreError::NotFound { entity, .. } | StoreError::IdsExhausted { entity } => *entity,
        }
    }
}
