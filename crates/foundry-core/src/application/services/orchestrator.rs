//! Project Orchestrator - generator dispatch plus audit and hosting reports.
//!
//! Workflow for one `create_project` call:
//! 1. Resolve a generator for `config.language` (never fails)
//! 2. Generate the scaffold
//! 3. Append `QUALITY_REPORT.md` from the quality auditor
//! 4. Append `CLOUD_DEPLOY.md` from the cloud advisor

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{ApplicationError, ports::Generator},
    domain::{
        AuditPolicy, CLOUD_GUIDE_PATH, CloudAdvisor, DomainValidator as validator,
        GeneratedFile, GeneratorOutput, ProjectConfig, QUALITY_REPORT_PATH, QualityAuditor,
        Role,
    },
    error::{FoundryError, FoundryResult},
};

/// Language fragments checked, in order, when no key matches exactly.
const INFERRED_KEYS: [&str; 2] = ["java", "python"];

/// How a generator was picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Case-insensitive match on the registry key.
    Exact,
    /// The language contains `java` or `python`.
    Inferred,
    /// Nothing matched; the default generator was used.
    Fallback,
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Exact => "exact",
            Self::Inferred => "inferred",
            Self::Fallback => "fallback",
        })
    }
}

/// Generators keyed by lowercase language, with an explicit default.
#[derive(Clone)]
pub struct GeneratorRegistry {
    generators: BTreeMap<&'static str, Arc<dyn Generator>>,
    default: Arc<dyn Generator>,
}

impl GeneratorRegistry {
    /// Create a registry whose fallback is `default`. The default is also
    /// registered under its own key.
    pub fn new(default: Arc<dyn Generator>) -> Self {
        let mut generators: BTreeMap<&'static str, Arc<dyn Generator>> = BTreeMap::new();
        generators.insert(default.key(), Arc::clone(&default));
        Self {
            generators,
            default,
        }
    }

    /// Register a generator, replacing any previous one with the same key.
    pub fn register(mut self, generator: Arc<dyn Generator>) -> Self {
        self.generators.insert(generator.key(), generator);
        self
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.generators.keys().copied()
    }

    pub fn default_key(&self) -> &'static str {
        self.default.key()
    }

    /// Pick a generator for `language`. Always succeeds.
    pub fn resolve(&self, language: &str) -> (Arc<dyn Generator>, Resolution) {
        let lang = language.to_lowercase();

        if let Some(generator) = self.generators.get(lang.as_str()) {
            return (Arc::clone(generator), Resolution::Exact);
        }

        let inferred = INFERRED_KEYS
            .iter()
            .filter(|key| lang.contains(*key))
            .find_map(|key| self.generators.get(key));
        if let Some(generator) = inferred {
            return (Arc::clone(generator), Resolution::Inferred);
        }

        (Arc::clone(&self.default), Resolution::Fallback)
    }
}

impl fmt::Debug for GeneratorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratorRegistry")
            .field("keys", &self.generators.keys().collect::<Vec<_>>())
            .field("default", &self.default.key())
            .finish()
    }
}

/// Generator dispatcher.
///
/// Receives only the derived [`ProjectConfig`], never the project state.
#[derive(Debug, Clone)]
pub struct ProjectOrchestrator {
    registry: GeneratorRegistry,
    auditor: QualityAuditor,
    advisor: CloudAdvisor,
}

impl ProjectOrchestrator {
    pub fn new(registry: GeneratorRegistry) -> Self {
        Self {
            registry,
            auditor: QualityAuditor::default(),
            advisor: CloudAdvisor::new(),
        }
    }

    /// Replace the audit weights.
    pub fn with_audit_policy(mut self, policy: AuditPolicy) -> Self {
        self.auditor = QualityAuditor::new(policy);
        self
    }

    pub fn registry(&self) -> &GeneratorRegistry {
        &self.registry
    }

    /// Generate a project and append the audit report and the cloud guide,
    /// in that order.
    #[instrument(
        skip_all,
        fields(project = %config.project_name(), language = %config.language())
    )]
    pub async fn create_project(&self, config: &ProjectConfig) -> FoundryResult<GeneratorOutput> {
        validator::validate_project_config(config)?;

        let (generator, resolution) = self.registry.resolve(config.language());
        match resolution {
            Resolution::Fallback => warn!(
                generator = generator.key(),
                "No generator for '{}', using the default",
                config.language()
            ),
            _ => info!(generator = generator.key(), %resolution, "Generator resolved"),
        }

        let mut output = generator
            .generate(config)
            .await
            .map_err(|e| wrap_generation_error(generator.key(), e))?;
        validator::validate_file_set(&output.files)?;
        debug!(files = output.files.len(), "Scaffold generated");

        let report = self.auditor.audit(&output.files);
        info!(score = report.score, passed = report.passed, "Quality audit complete");
        output
            .files
            .push(GeneratedFile::new(QUALITY_REPORT_PATH, report.to_markdown()));

        let role = Role::for_language(config.language());
        let providers = self.advisor.recommend(config.language(), role);
        debug!(%role, providers = providers.len(), "Cloud providers recommended");
        output.files.push(GeneratedFile::new(
            CLOUD_GUIDE_PATH,
            self.advisor.render_guide(config.language(), &providers),
        ));

        info!(files = output.files.len(), "Project created");
        Ok(output)
    }
}

fn wrap_generation_error(generator: &'static str, err: FoundryError) -> FoundryError {
    match err {
        FoundryError::Application(ApplicationError::GenerationFailed { .. }) => err,
        other => ApplicationError::GenerationFailed {
            generator,
            reason: other.to_string(),
        }
        .into(),
    }
}
