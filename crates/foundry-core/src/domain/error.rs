// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (outcomes are recorded in session journals)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    #[error("Invalid Stage ID: {stage}")]
    InvalidStage { stage: u32 },

    #[error("Invalid input for stage {stage}: {reason}")]
    InvalidStageInput { stage: u32, reason: String },

    #[error("Invalid project configuration: {0}")]
    InvalidProjectConfig(String),

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    // ========================================================================
    // Constraint Violations
    // ========================================================================
    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },

    #[error("Unknown stage name: {0}")]
    UnknownStageName(String),
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidStage { stage } => vec![
                format!("Stage {} does not exist", stage),
                "Valid stages are 1 (requirements) through 11 (delivery)".into(),
            ],
            Self::UnknownStageName(name) => vec![
                format!("'{}' is not a stage name", name),
                "Use one of: requirements, decision, architecture, design, planning, \
                 construction, qa, deployment, monitoring, valuation, delivery"
                    .into(),
            ],
            Self::InvalidStageInput { stage, reason } => vec![
                format!("Stage {} rejected its input", stage),
                format!("Details: {}", reason),
                "Stage input must be a JSON object".into(),
            ],
            Self::InvalidProjectConfig(msg) => vec![
                "Check your project configuration".into(),
                format!("Details: {}", msg),
            ],
            Self::MissingRequiredField { field } => {
                vec![format!("Provide a value for '{}'", field)]
            }
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidStage { .. }
            | Self::InvalidStageInput { .. }
            | Self::InvalidProjectConfig(_)
            | Self::MissingRequiredField { .. }
            | Self::AbsolutePathNotAllowed { .. } => ErrorCategory::Validation,
            Self::UnknownStageName(_) => ErrorCategory::NotFound,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}
