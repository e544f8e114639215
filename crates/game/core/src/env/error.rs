//! Collaborator errors.
//!
//! Errors raised by the external services the action graph calls into when it
//! materialises projectiles and damage zones.

use crate::error::{ErrorSeverity, GameError};

/// Errors that occur when a collaborator cannot satisfy a request.
///
/// None of these are fatal: the single action invocation fails and the rest of
/// the cast or tick pass carries on.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CollaboratorError {
    /// The projectile pool has no free instance.
    #[error("projectile pool exhausted (capacity {capacity})")]
    PoolExhausted { capacity: usize },

    /// The damage-zone prefab referenced by a template is not registered.
    #[error("damage zone prefab '{0}' is missing")]
    PrefabMissing(String),

    /// The collaborator refused the request for a reason of its own.
    #[error("request rejected: {0}")]
    Rejected(&'static str),
}

impl GameError for CollaboratorError {
    fn severity(&self) -> ErrorSeverity {
        use CollaboratorError::*;
        match self {
            PoolExhausted { .. } | Rejected(_) => ErrorSeverity::Recoverable,
            PrefabMissing(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use CollaboratorError::*;
        match self {
            PoolExhausted { .. } => "COLLABORATOR_POOL_EXHAUSTED",
            PrefabMissing(_) => "COLLABORATOR_PREFAB_MISSING",
            Rejected(_) => "COLLABORATOR_REJECTED",
        }
    }
}
