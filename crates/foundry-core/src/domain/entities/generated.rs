//! Generated artifacts: files, generator output, and packaged archives.
//!
//! # Domain purity
//!
//! This module must not import `tracing`.

use std::collections::BTreeMap;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// A `(path, content)` pair produced by a generator.
///
/// Paths are forward-slash separated and relative. A single leading
/// separator is tolerated on input and dropped by [`normalized_path`].
///
/// [`normalized_path`]: GeneratedFile::normalized_path
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GeneratedFile {
    pub path: String,
    pub content: String,
}

/// Entry handed to the archive packager.
pub type FileEntry = GeneratedFile;

impl GeneratedFile {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// The path with exactly one leading `/` or `\` stripped.
    pub fn normalized_path(&self) -> &str {
        self.path
            .strip_prefix('/')
            .or_else(|| self.path.strip_prefix('\\'))
            .unwrap_or(&self.path)
    }
}

/// Everything a single generator call produces.
///
/// Immutable once returned, except for the two report files the
/// orchestrator appends.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorOutput {
    pub files: Vec<GeneratedFile>,
    pub instructions: Vec<String>,
    pub dependencies: BTreeMap<String, String>,
}

impl GeneratorOutput {
    pub fn new(files: Vec<GeneratedFile>) -> Self {
        Self {
            files,
            ..Self::default()
        }
    }

    pub fn with_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instructions.push(instruction.into());
        self
    }

    pub fn with_dependency(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.dependencies.insert(name.into(), version.into());
        self
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(|f| f.path.as_str())
    }

    pub fn find(&self, path: &str) -> Option<&GeneratedFile> {
        self.files.iter().find(|f| f.path == path)
    }
}

/// A finished ZIP archive.
///
/// Only ever constructed from a fully finalised archive; a packaging error
/// never yields one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackagedArchive {
    bytes: Bytes,
    entries: Vec<String>,
}

impl PackagedArchive {
    pub fn new(bytes: impl Into<Bytes>, entries: Vec<String>) -> Self {
        Self {
            bytes: bytes.into(),
            entries,
        }
    }

    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub fn into_bytes(self) -> Bytes {
        self.bytes
    }

    /// Archive entry names in insertion order.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Split the archive into `size`-byte chunks for a transport.
    ///
    /// Chunks share the underlying buffer. A `size` of zero yields the whole
    /// archive as one chunk.
    pub fn chunks(&self, size: usize) -> impl Iterator<Item = Bytes> + '_ {
        let size = if size == 0 { self.bytes.len().max(1) } else { size };
        (0..self.bytes.len())
            .step_by(size)
            .map(move |start| self.bytes.slice(start..(start + size).min(self.bytes.len())))
    }
}
