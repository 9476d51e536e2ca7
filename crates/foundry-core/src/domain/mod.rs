//! Core domain layer for Foundry.
//!
//! Pure business logic: the project-state document and its stage
//! transforms, the generator input record, the heuristic quality auditor
//! and the hosting-provider catalog. Generation, packaging and time are
//! reached through ports defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, clock or external calls
//! - **No logging**: Observability belongs to the application and CLI layers
//! - **Value semantics**: All domain objects are Clone + PartialEq

pub mod audit;
pub mod cloud;
pub mod entities;
pub mod error;
pub mod pipeline;
pub mod value_objects;

mod validation;

pub use audit::{AuditPolicy, AuditReport, QualityAuditor, Standards, QUALITY_REPORT_PATH};
pub use cloud::{CloudAdvisor, CloudProvider, CLOUD_GUIDE_PATH};
pub use entities::{
    FileEntry, GeneratedFile, GeneratorOutput, PackagedArchive, ProjectConfig,
    ProjectConfigBuilder, RenderContext,
};
pub use error::{DomainError, ErrorCategory};
pub use pipeline::{ProjectState, StageOutput};
pub use validation::DomainValidator;
pub use value_objects::{
    ArchitectureStyle, Complexity, DomainCategory, License, Methodology, RiskLevel, Role,
    StageId, FRONTEND_LANGUAGE,
};

#[cfg(test)]
mod tests {
    use super::*;
    use pipeline::{inputs::*, stages};

    // ========================================================================
    // Cross-module behaviour
    // ========================================================================

    #[test]
    fn construction_config_feeds_render_context() {
        let mut state = ProjectState::new();
        state.apply(StageOutput::Requirements(stages::requirements(
            &RequirementsInput {
                project_name: Some("Ledger App".into()),
                problem_description: Some("Un banco".into()),
                ..Default::default()
            },
        )));

        let config = stages::build_config(&ConstructionInput::default(), &state).unwrap();
        let ctx = RenderContext::from_config(&config);

        assert_eq!(ctx.render("{{ARTIFACT_NAME}}"), "ledger-app");
        assert_eq!(ctx.render("{{DESCRIPTION}}"), "Un banco");
    }

    #[test]
    fn fintech_pipeline_recommends_java_generator() {
        let mut state = ProjectState::new();
        state.apply(StageOutput::Requirements(stages::requirements(
            &RequirementsInput {
                problem_description: Some("plataforma de pagos".into()),
                ..Default::default()
            },
        )));
        let decision = stages::decision(
            state.requirements.as_ref().unwrap(),
            &DecisionInput::default(),
        );
        state.apply(StageOutput::Decision(decision));

        assert_eq!(
            stages::select_language(&ConstructionInput::default(), &state),
            "java"
        );
        assert_eq!(Role::for_language("java"), Role::Backend);
    }

    #[test]
    fn audit_of_valid_files_passes_validation() {
        let files = vec![
            GeneratedFile::new("/README.md", "# x"),
            GeneratedFile::new(".gitignore", ""),
        ];
        assert!(DomainValidator::validate_file_set(&files).is_ok());
        assert!(QualityAuditor::default().audit(&files).score < 100);
    }
}
