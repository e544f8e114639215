//! Runtime errors.

use combat_core::{CastError, ErrorSeverity, GameError, SpellId, TemplateId};

/// Errors raised while assembling or driving a [`Simulation`](crate::Simulation).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RuntimeError {
    /// A spawn zone names a creep template that was never loaded.
    #[error("spawn zone '{zone}' references unknown {template}")]
    UnknownCreep { zone: String, template: TemplateId },

    /// The starting deck names a spell missing from the codex.
    #[error("deck references unknown {0}")]
    UnknownSpell(SpellId),

    /// The starting deck ended up outside the configured size bounds.
    #[error("deck holds {included} cards, expected {min}..={max}")]
    InvalidDeck {
        included: usize,
        min: usize,
        max: usize,
    },

    /// A hand slot was empty or out of range.
    #[error("hand slot {0} holds no card")]
    EmptySlot(usize),

    /// The spell refused its input; nothing ran and the card stays in hand.
    #[error(transparent)]
    Cast(#[from] CastError),
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::EmptySlot(_) | Self::Cast(_) => ErrorSeverity::Recoverable,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownCreep { .. } => "RUNTIME_UNKNOWN_CREEP",
            Self::UnknownSpell(_) => "RUNTIME_UNKNOWN_SPELL",
            Self::InvalidDeck { .. } => "RUNTIME_INVALID_DECK",
            Self::EmptySlot(_) => "RUNTIME_EMPTY_SLOT",
            Self::Cast(err) => err.error_code(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
