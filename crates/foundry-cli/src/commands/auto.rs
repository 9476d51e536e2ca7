//! `foundry auto`: the simplified automated run.

use tracing::instrument;

use foundry_core::application::FactoryRequirements;

use crate::{cli::AutoArgs, config::AppConfig, error::CliResult, output::OutputManager};

use super::engine;

#[instrument(skip_all)]
pub fn execute(args: AutoArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let requirements = FactoryRequirements {
        product_type: args.product_type,
        time_to_market: args.time_to_market,
        scalability: args.scalability,
    };

    let run = engine(&config, None)?.run_automated(&requirements);

    if !output.is_json() {
        output.header("Automated factory run")?;
        for record in &run.stages {
            output.print(&format!("  {:<13} {}", stage_label(record), record.output))?;
        }
        output.success("Status: COMPLETED")?;
    }
    output.json(&run)
}

fn stage_label(record: &foundry_core::application::FactoryStageRecord) -> String {
    serde_json::to_value(record.stage)
        .ok()
        .and_then(|v| v.as_str().map(str::to_owned))
        .unwrap_or_default()
}
