//! CLI argument definitions (clap derive).
//!
//! Only argument names, help text and value enums live here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use foundry_core::domain::{License, Role};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(
    name    = "foundry",
    bin_name = "foundry",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{2699} Software production line",
    long_about = "Foundry walks a project through eleven stages, from requirements \
                  to delivery, and scaffolds an audited, packaged code base.",
    after_help = "EXAMPLES:\n\
        \x20 foundry auto --product-type FinTech --scalability high\n\
        \x20 foundry run inputs.json --state-out state.json\n\
        \x20 foundry stage 1 --input '{\"problemDescription\": \"Un banco digital\"}'\n\
        \x20 foundry new \"Clinic App\" --lang python --license mit",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run all eleven stages from a JSON inputs document.
    #[command(
        about = "Run the full pipeline",
        after_help = "The inputs file is a JSON object keyed by stage name or number:\n\
            \x20 { \"requirements\": { \"problemDescription\": \"...\" }, \"5\": { \"teamSize\": 4 } }\n\
            Pass '-' to read it from stdin."
    )]
    Run(RunArgs),

    /// Simplified automated run from three answers.
    #[command(
        about = "Run the automated factory",
        after_help = "EXAMPLES:\n\
            \x20 foundry auto\n\
            \x20 foundry auto --product-type FinTech --time-to-market fast --scalability high"
    )]
    Auto(AutoArgs),

    /// Run one stage against a state file.
    #[command(
        about = "Run a single stage",
        after_help = "EXAMPLES:\n\
            \x20 foundry stage 1 --input '{\"problemDescription\": \"Tienda online\"}' --state s.json\n\
            \x20 foundry stage decision --state s.json\n\
            \x20 foundry stage valuation --state s.json --at 2026-01-01T00:00:00Z"
    )]
    Stage(StageArgs),

    /// Generate a project and write it as a ZIP archive.
    #[command(
        visible_alias = "n",
        about = "Create a new project archive",
        after_help = "EXAMPLES:\n\
            \x20 foundry new my-api --lang java\n\
            \x20 foundry new \"Shop Front\" --lang frontend --license mit -o shop.zip\n\
            \x20 foundry new demo --dry-run"
    )]
    New(NewArgs),

    /// Recommend hosting providers for a language.
    #[command(
        about = "Recommend cloud providers",
        after_help = "EXAMPLES:\n\
            \x20 foundry providers node\n\
            \x20 foundry providers frontend\n\
            \x20 foundry providers python --role fullstack"
    )]
    Providers(ProvidersArgs),

    /// Initialise a Foundry configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 foundry init           # platform config directory\n\
            \x20 foundry init --local   # ./foundry.toml"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 foundry completions bash > ~/.local/share/bash-completion/completions/foundry\n\
            \x20 foundry completions zsh  > ~/.zfunc/_foundry"
    )]
    Completions(CompletionsArgs),

    /// Inspect the loaded configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 foundry config get packaging.compression_level\n\
            \x20 foundry config list\n\
            \x20 foundry config path"
    )]
    Config(ConfigCommands),
}

// ── run ───────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct RunArgs {
    #[arg(value_name = "INPUTS", help = "JSON inputs file ('-' for stdin)")]
    pub inputs: Option<PathBuf>,

    #[arg(
        long = "state-out",
        value_name = "FILE",
        help = "Write the final project state to FILE"
    )]
    pub state_out: Option<PathBuf>,

    #[arg(
        long = "at",
        value_name = "RFC3339",
        help = "Fix the valuation timestamp instead of using the current time"
    )]
    pub at: Option<String>,
}

// ── auto ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct AutoArgs {
    #[arg(long = "product-type", value_name = "TYPE", help = "Product type or domain")]
    pub product_type: Option<String>,

    #[arg(
        long = "time-to-market",
        value_name = "PACE",
        help = "'fast' selects Lean Startup"
    )]
    pub time_to_market: Option<String>,

    #[arg(
        long = "scalability",
        value_name = "LEVEL",
        help = "'high' selects microservices"
    )]
    pub scalability: Option<String>,
}

// ── stage ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct StageArgs {
    /// Stage number (1-11) or name.
    #[arg(value_name = "STAGE", help = "Stage number (1-11) or name")]
    pub stage: String,

    #[arg(
        short = 'i',
        long = "input",
        value_name = "JSON",
        conflicts_with = "input_file",
        help = "Stage input as inline JSON"
    )]
    pub input: Option<String>,

    #[arg(
        long = "input-file",
        value_name = "FILE",
        help = "Read the stage input from FILE"
    )]
    pub input_file: Option<PathBuf>,

    /// Read the project state from FILE and write it back on success.
    #[arg(
        short = 's',
        long = "state",
        value_name = "FILE",
        help = "Project state file (created if missing)"
    )]
    pub state: Option<PathBuf>,

    #[arg(
        long = "at",
        value_name = "RFC3339",
        help = "Fix the valuation timestamp instead of using the current time"
    )]
    pub at: Option<String>,
}

// ── new ───────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct NewArgs {
    #[arg(value_name = "NAME", help = "Project name")]
    pub name: String,

    /// Generator language. Unknown languages fall back to the default.
    #[arg(
        short = 'l',
        long = "lang",
        value_name = "LANGUAGE",
        help = "Generator language (node, java, python, frontend)"
    )]
    pub language: Option<String>,

    #[arg(
        short = 'a',
        long = "arch",
        value_name = "ARCH",
        help = "Architecture label recorded in the scaffold"
    )]
    pub architecture: Option<String>,

    #[arg(short = 'd', long = "description", value_name = "TEXT")]
    pub description: Option<String>,

    #[arg(long = "license", value_enum, value_name = "LICENSE")]
    pub license: Option<LicenseArg>,

    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help = "Archive path (default: ./<artifact-name>.zip)"
    )]
    pub output: Option<PathBuf>,

    #[arg(short = 'y', long = "yes", help = "Skip the confirmation prompt")]
    pub yes: bool,

    #[arg(long = "force", help = "Overwrite an existing archive")]
    pub force: bool,

    #[arg(
        long = "dry-run",
        help = "List the files that would be packaged without writing anything"
    )]
    pub dry_run: bool,
}

/// Licenses a scaffold can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LicenseArg {
    Mit,
    Proprietary,
}

impl From<LicenseArg> for License {
    fn from(arg: LicenseArg) -> Self {
        match arg {
            LicenseArg::Mit => License::Mit,
            LicenseArg::Proprietary => License::Proprietary,
        }
    }
}

// ── providers ─────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ProvidersArgs {
    #[arg(value_name = "LANGUAGE", help = "Stack language, e.g. node or frontend")]
    pub language: String,

    /// Defaults to `frontend` for the frontend key and `backend` otherwise.
    #[arg(short = 'r', long = "role", value_enum)]
    pub role: Option<RoleArg>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RoleArg {
    Frontend,
    Backend,
    Fullstack,
}

impl From<RoleArg> for Role {
    fn from(arg: RoleArg) -> Self {
        match arg {
            RoleArg::Frontend => Role::Frontend,
            RoleArg::Backend => Role::Backend,
            RoleArg::Fullstack => Role::Fullstack,
        }
    }
}

// ── init ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write `foundry.toml` in the current directory.
    #[arg(long = "local", help = "Create local configuration in current directory")]
    pub local: bool,

    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `audit.pass_threshold`.
        key: String,
    },
    /// Print the whole effective configuration.
    List,
    /// Print the path of the default configuration file.
    Path,
}
