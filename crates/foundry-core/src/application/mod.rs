//! Application layer for Foundry.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (StageEngine, ProjectOrchestrator)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    FactoryRequirements, FactoryRun, FactoryStage, FactoryStageRecord, GeneratorRegistry,
    PipelineSession, ProjectOrchestrator, Resolution, RunStatus, StageEngine, StageOutcome,
};

// Re-export port traits (for adapter implementation)
pub use ports::{ArchivePackager, Clock, Generator};

pub use error::ApplicationError;
