//! `foundry run`: all eleven stages from one inputs document.

use serde_json::Value;
use tracing::{info, instrument};

use foundry_core::{application::PipelineSession, domain::ProjectState};

use crate::{
    cli::RunArgs,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

use super::{engine, read_json, write_json};

/// Run the pipeline, write `--state-out` (even after a failure, so the
/// completed stages can be resumed with `foundry stage`), then render.
#[instrument(skip_all)]
pub async fn execute(args: RunArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let inputs = match &args.inputs {
        Some(path) => read_json(path)?,
        None => Value::Null,
    };

    let engine = engine(&config, args.at.as_deref())?;
    let mut session = PipelineSession::new();
    info!(session = %session.id, "Pipeline run started");

    let spinner = output.spinner("Running the production line...");
    let result = engine.run_all(&mut session, &inputs).await;
    spinner.finish_and_clear();

    if let Some(path) = &args.state_out {
        write_json(path, &session.state)?;
    }

    if !output.is_json() {
        for line in &session.logs {
            output.print(line)?;
        }
    }
    result?;

    if output.is_json() {
        return output.json(&session);
    }

    output.success(&format!(
        "Completed {} stages",
        session.state.completed_stages().len()
    ))?;
    print_summary(&session.state, &output)?;

    match &args.state_out {
        Some(path) => output.info(&format!("State written to {}", path.display()))?,
        None => output.json(&session.state)?,
    }
    Ok(())
}

fn print_summary(state: &ProjectState, out: &OutputManager) -> CliResult<()> {
    out.header("Summary")?;
    if let Some(req) = &state.requirements {
        out.print(&format!(
            "  Domain:        {} ({} complexity, {:?} risk)",
            req.analysis.domain, req.analysis.estimated_complexity, req.risk_assessment.level
        ))?;
    }
    if let Some(decision) = &state.decision {
        out.print(&format!("  Methodology:   {}", decision.methodology.selected))?;
        out.print(&format!("  Architecture:  {}", decision.architecture.selected))?;
    }
    if let Some(planning) = &state.planning {
        out.print(&format!("  Budget:        {}", planning.budget.estimated_total))?;
    }
    if let Some(construction) = &state.construction {
        out.print(&format!("  Files:         {}", construction.generated_files.len()))?;
    }
    if let Some(valuation) = &state.valuation {
        out.print(&format!(
            "  Market value:  {} {} (ROI {})",
            valuation.financials.market_value,
            valuation.financials.currency,
            valuation.financials.roi
        ))?;
    }
    Ok(())
}
