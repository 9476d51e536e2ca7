//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `foundry-adapters` crate provides implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;

use crate::domain::{FileEntry, GeneratorOutput, PackagedArchive, ProjectConfig};
use crate::error::FoundryResult;

/// Port for template generators, one per target technology.
///
/// Implemented by:
/// - `foundry_adapters::generators::NodeGenerator` (default)
/// - `foundry_adapters::generators::JavaGenerator`
/// - `foundry_adapters::generators::PythonGenerator`
/// - `foundry_adapters::generators::FrontendGenerator`
///
/// ## Contract
///
/// - Pure: no external state is read or written
/// - Deterministic: identical configs give byte-identical output
/// - The file set includes a dependency manifest, an entry point, and at
///   least one route/controller file and one service file
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Generator: Send + Sync {
    /// Registry key, lowercase (`"node"`, `"java"`, ...).
    fn key(&self) -> &'static str;

    async fn generate(&self, config: &ProjectConfig) -> FoundryResult<GeneratorOutput>;
}

/// Port for archive packaging.
///
/// Implemented by:
/// - `foundry_adapters::packager::ZipPackager`
///
/// ## Contract
///
/// - Entries are named by `FileEntry::normalized_path`
/// - Either a complete archive or an error; never a truncated archive
/// - `cancel` is checked between entries and yields `PackagingCancelled`
#[async_trait]
pub trait ArchivePackager: Send + Sync {
    async fn create_zip_stream(
        &self,
        files: &[FileEntry],
        cancel: &CancellationToken,
    ) -> FoundryResult<PackagedArchive>;
}

/// Port for wall-clock time.
///
/// Implemented by:
/// - `foundry_adapters::clock::SystemClock` (production)
/// - `foundry_adapters::clock::FixedClock` (testing)
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
