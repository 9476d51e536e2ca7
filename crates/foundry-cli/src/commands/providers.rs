//! `foundry providers`: hosting recommendations for a stack.

use foundry_core::domain::{CloudAdvisor, CloudProvider, Role};

use crate::{cli::ProvidersArgs, error::CliResult, output::OutputManager};

pub fn execute(args: ProvidersArgs, output: OutputManager) -> CliResult<()> {
    let language = args.language.to_ascii_lowercase();
    let role = args
        .role
        .map_or_else(|| Role::for_language(&language), Role::from);
    let providers = CloudAdvisor::new().recommend(&language, role);

    if output.is_json() {
        return output.json(&providers);
    }

    if providers.is_empty() {
        output.warning(&format!("No provider in the catalog supports '{language}'"))?;
        return Ok(());
    }

    output.header(&format!("Hosting for {language} ({role})"))?;
    for provider in &providers {
        output.print(&describe(provider))?;
    }
    Ok(())
}

fn describe(provider: &CloudProvider) -> String {
    let badge = if provider.free_tier { " [free tier]" } else { "" };
    format!(
        "  {}{}\n    {}\n    {}",
        provider.name, badge, provider.url, provider.description
    )
}
