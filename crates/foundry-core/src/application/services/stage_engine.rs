//! Stage Engine - the production-line state machine.
//!
//! A [`PipelineSession`] owns one project-state document for one production
//! run. There is no process-wide state: every run gets its own session, and
//! the engine itself is shared and immutable.
//!
//! Each call computes the stage output from the current state first and
//! only applies it on success, so a failed call leaves the state exactly as
//! it was.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    application::{ports::Clock, services::orchestrator::ProjectOrchestrator},
    domain::{
        DomainError, ProjectState, StageId, StageOutput,
        pipeline::{
            inputs::{self, parse_input},
            outputs::{DecisionOutput, RequirementsOutput},
            stages,
        },
    },
    error::FoundryResult,
};

/// One production run: an id, the accumulating state, and a journal of
/// every log line produced so far.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineSession {
    pub id: Uuid,
    pub state: ProjectState,
    pub logs: Vec<String>,
}

impl PipelineSession {
    pub fn new() -> Self {
        Self::with_state(ProjectState::new())
    }

    /// Resume from an existing state document.
    pub fn with_state(state: ProjectState) -> Self {
        Self {
            id: Uuid::new_v4(),
            state,
            logs: Vec::new(),
        }
    }
}

impl Default for PipelineSession {
    fn default() -> Self {
        Self::new()
    }
}

/// The result of one successful `run_stage` call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageOutcome {
    pub stage: StageId,
    pub output: StageOutput,
    pub logs: Vec<String>,
}

/// Runs stages against a session.
#[derive(Clone)]
pub struct StageEngine {
    orchestrator: Arc<ProjectOrchestrator>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for StageEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StageEngine")
            .field("orchestrator", &self.orchestrator)
            .finish_non_exhaustive()
    }
}

impl StageEngine {
    pub fn new(orchestrator: Arc<ProjectOrchestrator>, clock: Arc<dyn Clock>) -> Self {
        Self {
            orchestrator,
            clock,
        }
    }

    pub fn orchestrator(&self) -> &ProjectOrchestrator {
        &self.orchestrator
    }

    /// Run stage `stage` (1..=11) with `input` against the session's state.
    ///
    /// The per-call log lines are returned in the outcome and also appended
    /// to the session journal. On failure the journal still receives the
    /// `Error in Stage N: ...` line and the state is untouched.
    #[instrument(skip(self, session, input), fields(session = %session.id))]
    pub async fn run_stage(
        &self,
        session: &mut PipelineSession,
        stage: u32,
        input: &Value,
    ) -> FoundryResult<StageOutcome> {
        let mut logs = vec![format!("Starting Stage {stage}...")];

        match self.execute(stage, input, &session.state).await {
            Ok(output) => {
                logs.push(format!("Stage {stage} completed successfully."));
                session.state.apply(output.clone());
                session.logs.extend(logs.iter().cloned());
                info!(stage = %output.stage(), "Stage completed");

                Ok(StageOutcome {
                    stage: output.stage(),
                    output,
                    logs,
                })
            }
            Err(err) => {
                logs.push(format!("Error in Stage {stage}: {}", err.detail()));
                session.logs.extend(logs);
                warn!(error = %err, "Stage failed");
                Err(err)
            }
        }
    }

    /// Run stages 1..=11 in order, stopping at the first failure.
    ///
    /// `inputs` is an object keyed by stage name (`"requirements"`) or
    /// number (`"1"`); stages without an entry get an empty input.
    #[instrument(skip(self, session, inputs), fields(session = %session.id))]
    pub async fn run_all(
        &self,
        session: &mut PipelineSession,
        inputs: &Value,
    ) -> FoundryResult<Vec<StageOutcome>> {
        if !(inputs.is_object() || inputs.is_null()) {
            return Err(DomainError::InvalidStageInput {
                stage: StageId::Requirements.number(),
                reason: "pipeline inputs must be an object keyed by stage name".into(),
            }
            .into());
        }

        let mut outcomes = Vec::with_capacity(StageId::ALL.len());
        for stage in StageId::ALL {
            let input = inputs
                .get(stage.name())
                .or_else(|| inputs.get(stage.number().to_string()))
                .unwrap_or(&Value::Null);
            outcomes.push(self.run_stage(session, stage.number(), input).await?);
        }

        info!(stages = outcomes.len(), "Pipeline completed");
        Ok(outcomes)
    }

    async fn execute(
        &self,
        stage: u32,
        input: &Value,
        state: &ProjectState,
    ) -> FoundryResult<StageOutput> {
        let id = StageId::try_from(stage)?;

        let output = match id {
            StageId::Requirements => {
                StageOutput::Requirements(stages::requirements(&parse_input(id, input)?))
            }
            StageId::Decision => {
                let fallback = RequirementsOutput::default();
                let requirements = state.requirements.as_ref().unwrap_or(&fallback);
                StageOutput::Decision(stages::decision(requirements, &parse_input(id, input)?))
            }
            StageId::Architecture => {
                parse_input::<inputs::NoInput>(id, input)?;
                let fallback = DecisionOutput::default();
                let decision = state.decision.as_ref().unwrap_or(&fallback);
                StageOutput::Architecture(stages::architecture(decision))
            }
            StageId::Design => StageOutput::Design(stages::design(&parse_input(id, input)?)),
            StageId::Planning => {
                StageOutput::Planning(stages::planning(&parse_input(id, input)?)?)
            }
            StageId::Construction => {
                let input: inputs::ConstructionInput = parse_input(id, input)?;
                let config = stages::build_config(&input, state)?;
                info!(%config, "Scaffolding project");
                let generated = self.orchestrator.create_project(&config).await?;
                StageOutput::Construction(Box::new(stages::construction_output(
                    &input, &generated,
                )))
            }
            StageId::Qa => {
                parse_input::<inputs::NoInput>(id, input)?;
                StageOutput::Qa(stages::qa())
            }
            StageId::Deployment => {
                StageOutput::Deployment(stages::deployment(&parse_input(id, input)?))
            }
            StageId::Monitoring => {
                StageOutput::Monitoring(stages::monitoring(&parse_input(id, input)?))
            }
            StageId::Valuation => {
                parse_input::<inputs::NoInput>(id, input)?;
                StageOutput::Valuation(stages::valuation(state, self.clock.now()))
            }
            StageId::Delivery => {
                parse_input::<inputs::NoInput>(id, input)?;
                StageOutput::Delivery(stages::delivery())
            }
        };

        Ok(output)
    }
}
