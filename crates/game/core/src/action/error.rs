//! Action resolution errors.
//!
//! A failing action never aborts the cast, tick pass or projectile hit that
//! triggered it. Callers log the error and move on to the next action.

use crate::env::CollaboratorError;
use crate::error::{ErrorSeverity, GameError};
use crate::state::EntityId;

// ============================================================================
// Action Resolution Errors
// ============================================================================

/// Errors raised while resolving a single action invocation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    /// The action needs a caster and none was supplied, or it no longer exists.
    #[error("caster missing")]
    CasterMissing,

    /// The action needs a target entity and the args carry none.
    #[error("no target")]
    NoTarget,

    /// The named target died or despawned before the action resolved.
    #[error("target {0} is gone")]
    TargetGone(EntityId),

    /// Neither a point, a target nor a caster position is available.
    #[error("no origin to resolve around")]
    NoOrigin,

    /// The template shape has no area.
    #[error("degenerate target shape")]
    DegenerateShape,

    /// An external collaborator refused the request.
    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        use ActionError::*;
        match self {
            CasterMissing | NoTarget | TargetGone(_) | NoOrigin => ErrorSeverity::Recoverable,
            DegenerateShape => ErrorSeverity::Validation,
            Collaborator(inner) => inner.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        use ActionError::*;
        match self {
            CasterMissing => "ACTION_CASTER_MISSING",
            NoTarget => "ACTION_NO_TARGET",
            TargetGone(_) => "ACTION_TARGET_GONE",
            NoOrigin => "ACTION_NO_ORIGIN",
            DegenerateShape => "ACTION_DEGENERATE_SHAPE",
            Collaborator(inner) => inner.error_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collaborator_errors_keep_their_classification() {
        let err: ActionError = CollaboratorError::PoolExhausted { capacity: 4 }.into();
        assert_eq!(err.severity(), ErrorSeverity::Recoverable);
        assert_eq!(err.error_code(), "COLLABORATOR_POOL_EXHAUSTED");
        assert_eq!(err.to_string(), "projectile pool exhausted (capacity 4)");
    }

    #[test]
    fn degenerate_shape_is_an_authoring_problem() {
        assert_eq!(
            ActionError::DegenerateShape.severity(),
            ErrorSeverity::Validation
        );
    }
}
