pub mod generated;
pub mod project_config;
pub mod render;

pub use generated::{FileEntry, GeneratedFile, GeneratorOutput, PackagedArchive};
pub use project_config::{ProjectConfig, ProjectConfigBuilder};
pub use render::RenderContext;
