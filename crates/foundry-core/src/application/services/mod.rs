//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "run stage N" or "create a project".

pub mod factory_run;
pub mod orchestrator;
pub mod stage_engine;

pub use factory_run::{FactoryRequirements, FactoryRun, FactoryStage, FactoryStageRecord, RunStatus};
pub use orchestrator::{GeneratorRegistry, ProjectOrchestrator, Resolution};
pub use stage_engine::{PipelineSession, StageEngine, StageOutcome};
