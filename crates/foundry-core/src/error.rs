//! Unified error handling for Foundry Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Foundry Core operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FoundryError {
    /// Errors from the domain layer (invalid stage, bad input, bad config).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (generation, packaging).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl FoundryError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Check your setup and try again".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in Foundry".into(),
                "Please report this issue at: https://github.com/cosecruz/foundry/issues".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// The wrapped error's own message, without the layer prefix.
    pub fn detail(&self) -> String {
        match self {
            Self::Domain(e) => e.to_string(),
            Self::Application(e) => e.to_string(),
            Self::Configuration { message } | Self::Internal { message } => message.clone(),
        }
    }

    /// `true` when the error is the unknown-stage rejection.
    pub fn is_invalid_stage(&self) -> bool {
        matches!(self, Self::Domain(DomainError::InvalidStage { .. }))
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type FoundryResult<T> = Result<T, FoundryError>;

/// Extension trait for adding context to errors.
pub trait Context<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> FoundryResult<T>;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, msg: impl Into<String>) -> FoundryResult<T> {
        self.map_err(|e| FoundryError::Internal {
            message: format!("{}: {}", msg.into(), e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_stage_is_validation() {
        let err: FoundryError = DomainError::InvalidStage { stage: 99 }.into();
        assert!(err.is_invalid_stage());
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(err.to_string().contains("99"));
    }

    #[test]
    fn packaging_failure_is_internal() {
        let err: FoundryError = ApplicationError::PackagingFailed {
            reason: "disk".into(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Internal);
        assert!(!err.suggestions().is_empty());
    }

    #[test]
    fn context_wraps_foreign_errors() {
        let raw: Result<(), std::io::Error> = Err(std::io::Error::other("boom"));
        let err = raw.context("writing archive").unwrap_err();
        assert!(matches!(err, FoundryError::Internal { ref message } if message.contains("writing archive: boom")));
    }
}
