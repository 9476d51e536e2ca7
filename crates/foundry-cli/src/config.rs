//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! CLI owns it; the core only ever sees the pieces it needs (an
//! [`AuditPolicy`], a compression level).
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site)
//! 2. Environment variables, `FOUNDRY__SECTION__KEY`
//! 3. TOML file: `--config` if given, else the platform config path
//! 4. Built-in defaults

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use foundry_adapters::DEFAULT_COMPRESSION_LEVEL;
use foundry_core::domain::{
    AuditPolicy,
    entities::project_config::{DEFAULT_ARCHITECTURE, DEFAULT_LANGUAGE},
    pipeline::stages::DEFAULT_PROJECT_NAME,
};

/// Environment prefix; nesting uses the same double underscore.
pub const ENV_PREFIX: &str = "FOUNDRY";
pub const ENV_SEPARATOR: &str = "__";

/// File name used by `foundry init --local`.
pub const LOCAL_CONFIG_FILE: &str = "foundry.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Fallbacks for `foundry new`.
    pub defaults: Defaults,
    pub output: OutputConfig,
    pub packaging: PackagingConfig,
    /// Quality audit weights and pass threshold.
    pub audit: AuditPolicy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub language: String,
    pub architecture: String,
    pub project_name: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.into(),
            architecture: DEFAULT_ARCHITECTURE.into(),
            project_name: DEFAULT_PROJECT_NAME.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "human".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackagingConfig {
    /// Deflate level, 0-9.
    pub compression_level: u32,
}

impl Default for PackagingConfig {
    fn default() -> Self {
        Self {
            compression_level: DEFAULT_COMPRESSION_LEVEL,
        }
    }
}

impl AppConfig {
    /// Layer defaults, the TOML file and the environment.
    ///
    /// An explicit `config_file` must exist; the default location is optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let path = config_file.cloned().unwrap_or_else(Self::config_path);
        Self::load_from(&path, config_file.is_some())
    }

    fn load_from(path: &Path, required: bool) -> anyhow::Result<Self> {
        let defaults =
            Config::try_from(&Self::default()).context("Failed to encode built-in defaults")?;

        let settings = Config::builder()
            .add_source(defaults)
            .add_source(File::from(path).format(FileFormat::Toml).required(required))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?;

        settings
            .try_deserialize()
            .context("Configuration has invalid values")
    }

    /// Default configuration file, falling back to `./foundry.toml` when the
    /// platform has no config directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "foundry", "foundry")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_core_constants() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.defaults.language, "node");
        assert_eq!(cfg.defaults.architecture, "monolith");
        assert_eq!(cfg.packaging.compression_level, 9);
        assert_eq!(cfg.audit, AuditPolicy::STANDARD);
        assert!(!cfg.output.no_color);
    }

    #[test]
    fn missing_optional_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = AppConfig::load_from(&dir.path().join("absent.toml"), false).unwrap();
        assert_eq!(cfg.defaults, Defaults::default());
        assert_eq!(cfg.audit.pass_threshold, 70);
    }

    #[test]
    fn missing_required_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(AppConfig::load_from(&dir.path().join("absent.toml"), true).is_err());
    }

    #[test]
    fn file_overrides_only_the_keys_it_sets() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("foundry.toml");
        std::fs::write(
            &path,
            "[defaults]\nlanguage = \"java\"\n\n[audit]\nmissing_readme = 25\n",
        )
        .unwrap();

        let cfg = AppConfig::load_from(&path, true).unwrap();
        assert_eq!(cfg.defaults.language, "java");
        assert_eq!(cfg.defaults.architecture, "monolith");
        assert_eq!(cfg.audit.missing_readme, 25);
        assert_eq!(cfg.audit.missing_gitignore, 5);
    }

    #[test]
    fn toml_round_trip_of_defaults() {
        let text = toml::to_string_pretty(&AppConfig::default()).unwrap();
        let back: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(back, AppConfig::default());
    }

    #[test]
    fn config_path_is_not_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }
}
