//! Command handlers. Each one translates arguments into core calls and
//! renders the result; no business rules live here.

use std::io::Read as _;
use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Value;

use foundry_adapters::{FixedClock, SystemClock, builtin_registry};
use foundry_core::application::{ProjectOrchestrator, StageEngine, ports::Clock};

use crate::{
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
};

pub mod auto;
pub mod completions;
pub mod config;
pub mod init;
pub mod new;
pub mod providers;
pub mod run;
pub mod stage;

/// Orchestrator over the built-in generators, audited with the configured
/// policy.
pub fn orchestrator(config: &AppConfig) -> ProjectOrchestrator {
    ProjectOrchestrator::new(builtin_registry()).with_audit_policy(config.audit)
}

/// Stage engine with a system clock, or a fixed one when `at` is given.
pub fn engine(config: &AppConfig, at: Option<&str>) -> CliResult<StageEngine> {
    let clock: Arc<dyn Clock> = match at {
        Some(at) => Arc::new(FixedClock::new(parse_instant(at)?)),
        None => Arc::new(SystemClock),
    };
    Ok(StageEngine::new(Arc::new(orchestrator(config)), clock))
}

fn parse_instant(text: &str) -> CliResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|e| CliError::invalid_input(format!("'{text}' is not an RFC 3339 timestamp"), e))
}

/// Read a JSON document from `path`, or stdin when the path is `-`.
pub fn read_json(path: &Path) -> CliResult<Value> {
    let text = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .with_cli_context(|| "Failed to read JSON from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_cli_context(|| format!("Failed to read '{}'", path.display()))?
    };

    serde_json::from_str(&text)
        .with_cli_context(|| format!("'{}' is not valid JSON", path.display()))
}

/// Pretty-print `value` into `path`, creating parent directories.
pub fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> CliResult<()> {
    let text = serde_json::to_string_pretty(value)
        .with_cli_context(|| "Failed to serialise project state")?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_cli_context(|| format!("Failed to create '{}'", parent.display()))?;
    }
    std::fs::write(path, text + "\n")
        .with_cli_context(|| format!("Failed to write '{}'", path.display()))
}
