//! Common error infrastructure for combat-core.
//!
//! Domain-specific errors (e.g., `ActionError`, `CastError`) are defined in their
//! respective modules alongside the operations that raise them.
//!
//! Errors are swallowed at the action/effect boundary that raised them and
//! surfaced as log records; they never abort a whole cast or tick pass.

/// Severity level of an error, used for categorization and logging.
///
/// - **Recoverable**: Transient conditions (pool exhausted, target left the area)
/// - **Validation**: Bad authored data or input that should be fixed, not retried
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - the single invocation fails, later ones may succeed.
    ///
    /// Examples: projectile pool exhausted, caster despawned before a delayed action
    Recoverable,

    /// Validation error - authored data or caller input is wrong.
    ///
    /// Examples: unknown action tag, dangling effect reference
    Validation,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Common trait for all combat-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_recoverable_errors_are_recoverable() {
        assert!(ErrorSeverity::Recoverable.is_recoverable());
        assert!(!ErrorSeverity::Validation.is_recoverable());
        assert_eq!(ErrorSeverity::Validation.as_str(), "validation");
    }
}
