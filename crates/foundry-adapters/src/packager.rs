//! ZIP archive packager.
//!
//! Compression is CPU-bound, so the archive is built on the blocking pool.
//! The whole archive is assembled in memory and returned only once the
//! central directory has been written; callers stream it afterwards with
//! [`PackagedArchive::chunks`].

use std::io::{Cursor, Write};

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument};
use zip::{CompressionMethod, ZipWriter, write::SimpleFileOptions};

use foundry_core::{
    application::{ApplicationError, ports::ArchivePackager},
    domain::{FileEntry, PackagedArchive},
    error::FoundryResult,
};

/// Deflate level used when none is configured.
pub const DEFAULT_COMPRESSION_LEVEL: u32 = 9;
const MAX_COMPRESSION_LEVEL: u32 = 9;

/// Packager writing Deflate-compressed ZIP archives.
#[derive(Debug, Clone, Copy)]
pub struct ZipPackager {
    compression_level: u32,
}

impl ZipPackager {
    pub fn new() -> Self {
        Self {
            compression_level: DEFAULT_COMPRESSION_LEVEL,
        }
    }

    /// Set the Deflate level, clamped to `0..=9`.
    pub fn with_compression_level(mut self, level: u32) -> Self {
        self.compression_level = level.min(MAX_COMPRESSION_LEVEL);
        self
    }

    pub const fn compression_level(&self) -> u32 {
        self.compression_level
    }
}

impl Default for ZipPackager {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ArchivePackager for ZipPackager {
    #[instrument(skip_all, fields(files = files.len(), level = self.compression_level))]
    async fn create_zip_stream(
        &self,
        files: &[FileEntry],
        cancel: &CancellationToken,
    ) -> FoundryResult<PackagedArchive> {
        if cancel.is_cancelled() {
            return Err(ApplicationError::PackagingCancelled.into());
        }

        let entries: Vec<(String, String)> = files
            .iter()
            .map(|f| (f.normalized_path().to_string(), f.content.clone()))
            .collect();
        let level = self.compression_level;
        let token = cancel.clone();

        let archive = tokio::task::spawn_blocking(move || build_archive(&entries, level, &token))
            .await
            .map_err(|e| {
                error!("Packaging task panicked: {}", e);
                ApplicationError::PackagingFailed {
                    reason: format!("packaging task aborted: {e}"),
                }
            })??;

        info!(bytes = archive.len(), entries = archive.entries().len(), "Archive ready");
        Ok(archive)
    }
}

fn build_archive(
    entries: &[(String, String)],
    level: u32,
    cancel: &CancellationToken,
) -> Result<PackagedArchive, ApplicationError> {
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(i64::from(level)));
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let mut names = Vec::with_capacity(entries.len());

    for (name, content) in entries {
        if cancel.is_cancelled() {
            debug!(written = names.len(), "Packaging cancelled");
            return Err(ApplicationError::PackagingCancelled);
        }

        writer.start_file(name.as_str(), options).map_err(failed)?;
        writer.write_all(content.as_bytes()).map_err(failed)?;
        debug!(entry = %name, bytes = content.len(), "Entry written");
        names.push(name.clone());
    }

    let cursor = writer.finish().map_err(failed)?;
    Ok(PackagedArchive::new(cursor.into_inner(), names))
}

fn failed(err: impl std::fmt::Display) -> ApplicationError {
    ApplicationError::PackagingFailed {
        reason: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn read_back(archive: &PackagedArchive) -> Vec<(String, String)> {
        let mut zip = zip::ZipArchive::new(Cursor::new(archive.bytes().to_vec())).unwrap();
        (0..zip.len())
            .map(|i| {
                let mut entry = zip.by_index(i).unwrap();
                let mut content = String::new();
                entry.read_to_string(&mut content).unwrap();
                (entry.name().to_string(), content)
            })
            .collect()
    }

    #[tokio::test]
    async fn strips_one_leading_separator() {
        let files = vec![
            FileEntry::new("/README.md", "# Demo"),
            FileEntry::new("src/index.ts", "export {};"),
        ];
        let archive = ZipPackager::new()
            .create_zip_stream(&files, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(archive.entries(), ["README.md", "src/index.ts"]);
        assert_eq!(
            read_back(&archive),
            vec![
                ("README.md".to_string(), "# Demo".to_string()),
                ("src/index.ts".to_string(), "export {};".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn cancelled_token_yields_no_bytes() {
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = ZipPackager::new()
            .create_zip_stream(&[FileEntry::new("a.txt", "a")], &cancel)
            .await
            .unwrap_err();

        assert_eq!(
            err,
            foundry_core::error::FoundryError::Application(ApplicationError::PackagingCancelled)
        );
    }

    #[tokio::test]
    async fn colliding_entry_names_fail_without_output() {
        let files = vec![
            FileEntry::new("/README.md", "# One"),
            FileEntry::new("README.md", "# Two"),
        ];

        let err = ZipPackager::new()
            .create_zip_stream(&files, &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            foundry_core::error::FoundryError::Application(ApplicationError::PackagingFailed { .. })
        ));
    }

    #[test]
    fn level_is_clamped() {
        assert_eq!(ZipPackager::new().with_compression_level(42).compression_level(), 9);
        assert_eq!(ZipPackager::new().with_compression_level(0).compression_level(), 0);
    }

    #[test]
    fn cancellation_between_entries_aborts() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let entries = vec![("a.txt".to_string(), "a".to_string())];
        assert_eq!(
            build_archive(&entries, 9, &cancel).unwrap_err(),
            ApplicationError::PackagingCancelled
        );
    }
}
