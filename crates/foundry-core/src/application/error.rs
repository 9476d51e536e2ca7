//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// A template generator failed. The whole construction stage fails with
    /// it; nothing is retried.
    #[error("Generator '{generator}' failed: {reason}")]
    GenerationFailed {
        generator: &'static str,
        reason: String,
    },

    /// The archive library reported an error. No partial archive exists.
    #[error("Packaging failed: {reason}")]
    PackagingFailed { reason: String },

    /// Packaging stopped because its cancellation token fired.
    #[error("Packaging cancelled")]
    PackagingCancelled,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::GenerationFailed { generator, .. } => vec![
                format!("The '{}' generator could not scaffold the project", generator),
                "Try another language with --lang".into(),
            ],
            Self::PackagingFailed { reason } => vec![
                format!("Archive error: {}", reason),
                "Check the packaging.compression_level setting (0-9)".into(),
            ],
            Self::PackagingCancelled => vec!["The archive was not written".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::GenerationFailed { .. } | Self::PackagingFailed { .. } => {
                ErrorCategory::Internal
            }
            Self::PackagingCancelled => ErrorCategory::Internal,
        }
    }
}
