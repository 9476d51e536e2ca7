//! `foundry new`: generate a project and write it as a ZIP archive.

use std::fs::File;
use std::io::{BufWriter, IsTerminal, Write};
use std::path::{Path, PathBuf};

use serde_json::json;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use foundry_adapters::ZipPackager;
use foundry_core::{
    application::{ApplicationError, ports::ArchivePackager},
    domain::{GeneratorOutput, PackagedArchive, ProjectConfig},
    error::FoundryError,
};

use crate::{
    cli::{NewArgs, global::GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

use super::orchestrator;

/// Archive bytes are written in slices of this size.
const WRITE_CHUNK: usize = 64 * 1024;

/// 1. Validate the name and build a [`ProjectConfig`]
/// 2. Confirm unless `--yes`, `--quiet`, JSON output or no terminal
/// 3. Refuse to overwrite without `--force`
/// 4. Generate (audit report and cloud guide included)
/// 5. Stop at the file listing for `--dry-run`
/// 6. Package, honouring Ctrl-C, and stream the archive to disk
#[instrument(skip_all, fields(project = %args.name))]
pub async fn execute(
    args: NewArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    validate_project_name(&args.name)?;
    let project = build_project_config(&args, &config)?;
    let archive_path = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("{}.zip", project.artifact_name())));

    debug!(%project, archive = %archive_path.display(), "Project resolved");

    let interactive = !global.quiet
        && !args.yes
        && !args.dry_run
        && !output.is_json()
        && std::io::stdin().is_terminal();
    if interactive {
        show_configuration(&project, &archive_path, &output)?;
        if !confirm()? {
            return Err(CliError::Cancelled);
        }
    }

    if archive_path.exists() && !args.force && !args.dry_run {
        return Err(CliError::ArchiveExists { path: archive_path });
    }

    let spinner = output.spinner(&format!("Generating '{}'...", project.project_name()));
    let generated = orchestrator(&config).create_project(&project).await;
    spinner.finish_and_clear();
    let generated = generated?;

    if args.dry_run {
        return report_dry_run(&generated, &archive_path, &output);
    }

    let packager = ZipPackager::new().with_compression_level(config.packaging.compression_level);
    let archive = package(&packager, &generated).await?;
    write_archive(&archive, &archive_path)?;
    info!(
        archive = %archive_path.display(),
        bytes = archive.len(),
        entries = archive.entries().len(),
        "Archive written"
    );

    if output.is_json() {
        return output.json(&json!({
            "archive": archive_path,
            "bytes": archive.len(),
            "entries": archive.entries(),
            "instructions": generated.instructions,
            "dependencies": generated.dependencies,
        }));
    }

    output.success(&format!(
        "Project '{}' packaged into {} ({} files, {} bytes)",
        project.project_name(),
        archive_path.display(),
        archive.entries().len(),
        archive.len()
    ))?;
    if !generated.instructions.is_empty() {
        output.print("")?;
        output.print("Next steps:")?;
        output.print(&format!("  unzip {}", archive_path.display()))?;
        for step in &generated.instructions {
            output.print(&format!("  {step}"))?;
        }
    }
    Ok(())
}

// ── Input ─────────────────────────────────────────────────────────────────────

fn validate_project_name(name: &str) -> CliResult<()> {
    let invalid = |reason: &str| CliError::InvalidProjectName {
        name: name.into(),
        reason: reason.into(),
    };

    if name.trim().is_empty() {
        return Err(invalid("name cannot be empty"));
    }
    if name.starts_with('.') {
        return Err(invalid("name cannot start with '.'"));
    }
    if name.contains('/') || name.contains('\\') {
        return Err(invalid("name cannot contain path separators"));
    }
    Ok(())
}

/// Flags win over `[defaults]` from the configuration.
fn build_project_config(args: &NewArgs, config: &AppConfig) -> CliResult<ProjectConfig> {
    let mut builder = ProjectConfig::builder()
        .project_name(args.name.trim())
        .language(
            args.language
                .as_deref()
                .unwrap_or(config.defaults.language.as_str()),
        )
        .architecture(
            args.architecture
                .as_deref()
                .unwrap_or(config.defaults.architecture.as_str()),
        );

    if let Some(description) = &args.description {
        builder = builder.description(description.as_str());
    }
    if let Some(license) = args.license {
        builder = builder.license(license.into());
    }

    builder.build().map_err(|e| CliError::Core(e.into()))
}

// ── Packaging ─────────────────────────────────────────────────────────────────

/// Ctrl-C cancels the token; the packager stops before the next entry.
async fn package(
    packager: &ZipPackager,
    generated: &GeneratorOutput,
) -> CliResult<PackagedArchive> {
    let cancel = CancellationToken::new();
    let watcher = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupt received, cancelling packaging");
                cancel.cancel();
            }
        })
    };

    let result = packager.create_zip_stream(&generated.files, &cancel).await;
    watcher.abort();

    result.map_err(|e| match e {
        FoundryError::Application(ApplicationError::PackagingCancelled) => CliError::Cancelled,
        other => CliError::Core(other),
    })
}

/// Stream the finished archive to `path` chunk by chunk.
fn write_archive(archive: &PackagedArchive, path: &Path) -> CliResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_cli_context(|| format!("Failed to create '{}'", parent.display()))?;
    }

    let file = File::create(path)
        .with_cli_context(|| format!("Failed to create '{}'", path.display()))?;
    let mut writer = BufWriter::new(file);
    for chunk in archive.chunks(WRITE_CHUNK) {
        writer
            .write_all(&chunk)
            .with_cli_context(|| format!("Failed to write '{}'", path.display()))?;
    }
    writer
        .flush()
        .with_cli_context(|| format!("Failed to write '{}'", path.display()))
}

// ── UI helpers ────────────────────────────────────────────────────────────────

fn report_dry_run(
    generated: &GeneratorOutput,
    archive_path: &Path,
    output: &OutputManager,
) -> CliResult<()> {
    if output.is_json() {
        let paths: Vec<_> = generated.paths().collect();
        return output.json(&json!({
            "dryRun": true,
            "archive": archive_path,
            "files": paths,
        }));
    }

    output.info(&format!(
        "Dry run: would write {} files to {}",
        generated.files.len(),
        archive_path.display()
    ))?;
    for path in generated.paths() {
        output.print(&format!("  {path}"))?;
    }
    Ok(())
}

fn show_configuration(
    project: &ProjectConfig,
    archive_path: &Path,
    out: &OutputManager,
) -> CliResult<()> {
    out.header("Configuration")?;
    out.print(&format!("  Project:      {}", project.project_name()))?;
    out.print(&format!("  Language:     {}", project.language()))?;
    out.print(&format!("  Architecture: {}", project.architecture()))?;
    if let Some(license) = project.license() {
        out.print(&format!("  License:      {license}"))?;
    }
    out.print(&format!("  Archive:      {}", archive_path.display()))?;
    out.print("")?;
    Ok(())
}

#[cfg(feature = "interactive")]
fn confirm() -> CliResult<bool> {
    dialoguer::Confirm::new()
        .with_prompt("Continue?")
        .default(true)
        .interact()
        .map_err(|e| CliError::IoError {
            message: "failed to read confirmation input".into(),
            source: std::io::Error::other(e),
        })
}

#[cfg(not(feature = "interactive"))]
fn confirm() -> CliResult<bool> {
    print!("Continue? [Y/n] ");
    std::io::stdout()
        .flush()
        .with_cli_context(|| "failed to flush stdout")?;

    let mut input = String::new();
    std::io::stdin()
        .read_line(&mut input)
        .with_cli_context(|| "failed to read confirmation input")?;

    let input = input.trim().to_ascii_lowercase();
    Ok(input.is_empty() || input == "y" || input == "yes")
}
