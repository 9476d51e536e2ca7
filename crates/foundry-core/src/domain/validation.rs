use crate::domain::{
    entities::{GeneratedFile, ProjectConfig},
    error::DomainError,
};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across callers.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_project_config(config: &ProjectConfig) -> Result<(), DomainError> {
        config.validate()
    }

    /// A generated path must stay relative once normalised.
    pub fn validate_generated_file(file: &GeneratedFile) -> Result<(), DomainError> {
        let path = file.normalized_path();
        let drive_letter = path.as_bytes().get(1) == Some(&b':');
        if path.is_empty() || path.starts_with('/') || path.starts_with('\\') || drive_letter {
            return Err(DomainError::AbsolutePathNotAllowed {
                path: file.path.clone(),
            });
        }
        Ok(())
    }

    pub fn validate_file_set(files: &[GeneratedFile]) -> Result<(), DomainError> {
        files.iter().try_for_each(Self::validate_generated_file)
    }
}
