// ============================================================================
// domain/error.rs - DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (callers may re-surface them after logging)
/// - Categorizable (for host-side display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// The metadata payload could not be parsed as XML, or an entry carried
    /// attributes without the required `name` attribute.
    ///
    /// This is fatal for the current invocation: a template that ships a
    /// broken metadata document must fail loudly, never half-run.
    #[error("Malformed template metadata: {reason}")]
    MetadataFormat { reason: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MetadataFormat { reason } => vec![
                "The template's metadata document is not well-formed XML".into(),
                format!("Details: {}", reason),
                "Fix the metadata entries in the template package and regenerate".into(),
            ],
        }
    }

    /// Error category for host display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MetadataFormat { .. } => ErrorCategory::Configuration,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Configuration,
    NotFound,
    Internal,
}
