//! `foundry stage`: one stage against a state file.
//!
//! The state file plays the role of the session: it is read before the
//! stage runs and rewritten only when the stage succeeds.

use std::path::Path;

use serde_json::Value;
use tracing::{debug, instrument};

use foundry_core::{
    application::PipelineSession,
    domain::{ProjectState, StageId},
    error::FoundryError,
};

use crate::{
    cli::StageArgs,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

use super::{engine, read_json, write_json};

#[instrument(skip_all, fields(stage = %args.stage))]
pub async fn execute(args: StageArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let stage = stage_number(&args.stage)?;
    let input = stage_input(&args)?;
    let state = match &args.state {
        Some(path) => load_state(path)?,
        None => ProjectState::new(),
    };
    debug!(
        stage,
        completed = state.completed_stages().len(),
        "State loaded"
    );

    let engine = engine(&config, args.at.as_deref())?;
    let mut session = PipelineSession::with_state(state);

    let result = engine.run_stage(&mut session, stage, &input).await;
    if !output.is_json() {
        for line in &session.logs {
            output.print(line)?;
        }
    }
    let outcome = result?;

    if let Some(path) = &args.state {
        write_json(path, &session.state)?;
        output.info(&format!("State saved to {}", path.display()))?;
    }

    if output.is_json() {
        output.json(&outcome)
    } else {
        output.json(&outcome.output)
    }
}

/// A number is passed through untouched so out-of-range values reach the
/// engine's own rejection; names are mapped to their number.
fn stage_number(text: &str) -> CliResult<u32> {
    match text.trim().parse::<u32>() {
        Ok(n) => Ok(n),
        Err(_) => text
            .parse::<StageId>()
            .map(StageId::number)
            .map_err(|e| CliError::Core(FoundryError::from(e))),
    }
}

fn stage_input(args: &StageArgs) -> CliResult<Value> {
    match (&args.input, &args.input_file) {
        (Some(inline), _) => {
            serde_json::from_str(inline).with_cli_context(|| "--input is not valid JSON")
        }
        (None, Some(path)) => read_json(path),
        (None, None) => Ok(Value::Null),
    }
}

/// A missing file is a fresh state.
fn load_state(path: &Path) -> CliResult<ProjectState> {
    if !path.exists() {
        return Ok(ProjectState::new());
    }
    let value = read_json(path)?;
    serde_json::from_value(value)
        .with_cli_context(|| format!("'{}' is not a project state document", path.display()))
}
