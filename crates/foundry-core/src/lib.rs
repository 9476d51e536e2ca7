//! Foundry Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Foundry
//! production line: a questionnaire goes in, an accumulating project-state
//! document, a scaffolded file set, a heuristic audit and a hosting guide
//! come out.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           foundry-cli (CLI)             │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │   (StageEngine, ProjectOrchestrator)    │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │   (Driven: Generator, Packager, Clock)  │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    foundry-adapters (Infrastructure)    │
//! │  (JavaGenerator, ZipPackager, clocks)   │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (ProjectState, stages, QualityAuditor,  │
//! │  CloudAdvisor, ProjectConfig)           │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use foundry_core::{
//!     application::{PipelineSession, ProjectOrchestrator, StageEngine},
//! };
//!
//! # async fn demo(orchestrator: ProjectOrchestrator, clock: std::sync::Arc<dyn foundry_core::application::ports::Clock>) {
//! let engine = StageEngine::new(std::sync::Arc::new(orchestrator), clock);
//! let mut session = PipelineSession::new();
//!
//! let input = serde_json::json!({ "problemDescription": "Un banco digital" });
//! let outcome = engine.run_stage(&mut session, 1, &input).await.unwrap();
//! println!("{:?}", outcome.logs);
//! # }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        FactoryRun, PipelineSession, ProjectOrchestrator, StageEngine, StageOutcome,
        ports::{ArchivePackager, Clock, Generator},
    };
    pub use crate::domain::{
        AuditReport, CloudAdvisor, CloudProvider, FileEntry, GeneratedFile, GeneratorOutput,
        PackagedArchive, ProjectConfig, ProjectState, QualityAuditor, Role, StageId, StageOutput,
    };
    pub use crate::error::{FoundryError, FoundryResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
