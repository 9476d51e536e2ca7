//! The `ProjectConfig` record handed to template generators.
//!
//! A `ProjectConfig` is the small, read-only slice of the project state that
//! a generator is allowed to see. Generators never receive the full state
//! document, only this.
//!
//! # Domain purity
//!
//! This module must not import `tracing`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{error::DomainError, value_objects::License};

/// Language key used when none is supplied.
pub const DEFAULT_LANGUAGE: &str = "node";

/// Architecture key used when none is supplied.
pub const DEFAULT_ARCHITECTURE: &str = "monolith";

/// Immutable input to a template generator.
///
/// `language` and `architecture` are open strings: the generator registry
/// matches `language` case-insensitively and falls back to its default, so
/// any value is accepted here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    project_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    domain: Option<String>,
    language: String,
    architecture: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cloud_provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    database: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    license: Option<License>,
}

impl ProjectConfig {
    /// Start building a new `ProjectConfig`.
    pub fn builder() -> ProjectConfigBuilder {
        ProjectConfigBuilder::default()
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }
    pub fn language(&self) -> &str {
        &self.language
    }
    pub fn architecture(&self) -> &str {
        &self.architecture
    }
    pub fn cloud_provider(&self) -> Option<&str> {
        self.cloud_provider.as_deref()
    }
    pub fn database(&self) -> Option<&str> {
        self.database.as_deref()
    }
    pub const fn license(&self) -> Option<License> {
        self.license
    }

    /// Package-manager friendly name: lowercased, whitespace runs collapsed
    /// into a single `-`.
    pub fn artifact_name(&self) -> String {
        self.project_name
            .split_whitespace()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join("-")
    }

    /// Re-check the invariants. Called by the builder; available for values
    /// that arrived through deserialisation.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.project_name.trim().is_empty() {
            return Err(DomainError::MissingRequiredField {
                field: "projectName",
            });
        }
        if self.language.trim().is_empty() {
            return Err(DomainError::InvalidProjectConfig(
                "language must not be blank".into(),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for ProjectConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {})",
            self.project_name, self.language, self.architecture
        )
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

/// Builder for [`ProjectConfig`].
///
/// Unset `language` becomes `node`, unset `architecture` becomes `monolith`.
#[derive(Debug, Default, Clone)]
pub struct ProjectConfigBuilder {
    project_name: Option<String>,
    description: Option<String>,
    domain: Option<String>,
    language: Option<String>,
    architecture: Option<String>,
    cloud_provider: Option<String>,
    database: Option<String>,
    license: Option<License>,
}

impl ProjectConfigBuilder {
    pub fn project_name(mut self, name: impl Into<String>) -> Self {
        self.project_name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn architecture(mut self, architecture: impl Into<String>) -> Self {
        self.architecture = Some(architecture.into());
        self
    }

    pub fn cloud_provider(mut self, provider: impl Into<String>) -> Self {
        self.cloud_provider = Some(provider.into());
        self
    }

    pub fn database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    pub fn license(mut self, license: License) -> Self {
        self.license = Some(license);
        self
    }

    /// Build and validate the config, filling defaults for unset selectors.
    pub fn build(self) -> Result<ProjectConfig, DomainError> {
        let project_name = self
            .project_name
            .filter(|name| !name.trim().is_empty())
            .ok_or(DomainError::MissingRequiredField {
                field: "projectName",
            })?;

        let config = ProjectConfig {
            project_name,
            description: self.description,
            domain: self.domain,
            language: non_blank(self.language).unwrap_or_else(|| DEFAULT_LANGUAGE.into()),
            architecture: non_blank(self.architecture)
                .unwrap_or_else(|| DEFAULT_ARCHITECTURE.into()),
            cloud_provider: self.cloud_provider,
            database: self.database,
            license: self.license,
        };

        config.validate()?;
        Ok(config)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_fills_defaults() {
        let config = ProjectConfig::builder()
            .project_name("Demo")
            .build()
            .unwrap();

        assert_eq!(config.language(), "node");
        assert_eq!(config.architecture(), "monolith");
        assert_eq!(config.description(), None);
    }

    #[test]
    fn build_rejects_blank_name() {
        let err = ProjectConfig::builder()
            .project_name("   ")
            .language("java")
            .build()
            .unwrap_err();

        assert_eq!(
            err,
            DomainError::MissingRequiredField {
                field: "projectName"
            }
        );
    }

    #[test]
    fn build_rejects_missing_name() {
        assert!(ProjectConfig::builder().language("java").build().is_err());
    }

    #[test]
    fn blank_language_falls_back_to_default() {
        let config = ProjectConfig::builder()
            .project_name("Demo")
            .language("")
            .build()
            .unwrap();
        assert_eq!(config.language(), DEFAULT_LANGUAGE);
    }

    #[test]
    fn artifact_name_collapses_whitespace() {
        let config = ProjectConfig::builder()
            .project_name("My  Bank   App")
            .build()
            .unwrap();
        assert_eq!(config.artifact_name(), "my-bank-app");
    }

    #[test]
    fn serialises_camel_case_and_skips_unset() {
        let config = ProjectConfig::builder()
            .project_name("JavaTest")
            .language("java")
            .build()
            .unwrap();
        let json = serde_json::to_value(&config).unwrap();

        assert_eq!(json["projectName"], "JavaTest");
        assert!(json.get("description").is_none());
    }
}
