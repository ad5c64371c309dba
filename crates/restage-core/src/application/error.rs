//! Application layer errors.
//!
//! These errors represent failures in orchestration, not parsing.
//! Parsing errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during lifecycle orchestration and strategy execution.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// A host variable the invocation contract guarantees was absent.
    #[error("Missing host variable '{key}'")]
    MissingHostVariable { key: &'static str },

    /// The host passed no custom parameters, so the template package path
    /// is unknown.
    #[error("Missing template package path in custom parameters")]
    MissingTemplateParameter,

    /// `run_finished` was called before `run_started` built a run state.
    #[error("Run has not been started")]
    RunNotStarted,

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// A workspace-graph mutation was rejected by the host.
    #[error("Workspace mutation failed: {reason}")]
    WorkspaceMutation { reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MissingHostVariable { key } => vec![
                format!("The host did not supply the '{}' variable", key),
                "This indicates a broken host invocation contract".into(),
            ],
            Self::MissingTemplateParameter => vec![
                "The host must pass the template package path as the first custom parameter".into(),
            ],
            Self::RunNotStarted => vec![
                "Call run_started before run_finished".into(),
                "This indicates a broken host invocation sequence".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::WorkspaceMutation { reason } => vec![
                format!("The workspace rejected the change: {}", reason),
                "The workspace graph may have changed mid-run".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingHostVariable { .. }
            | Self::MissingTemplateParameter
            | Self::RunNotStarted => ErrorCategory::Configuration,
            Self::FilesystemError { .. } | Self::WorkspaceMutation { .. } => {
                ErrorCategory::Internal
            }
        }
    }
}
