//! Shared test utilities for graph and export testing

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use tempfile::TempDir;

use crate::{
    codec::{DocumentSource, SpecDocument},
    error::SpecError,
};

/// A [`DocumentSource`] backed by an in-memory map of path to markdown text.
///
/// Paths that were never added behave like missing files.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    docs: HashMap<PathBuf, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        MemorySource::default()
    }

    pub fn with(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.docs.insert(path.into(), content.into());
        self
    }
}

impl DocumentSource for MemorySource {
    fn parse(&self, path: &Path) -> Result<SpecDocument, SpecError> {
        self.docs
            .get(path)
            .map(|content| SpecDocument::parse_str(path, content.as_str()))
            .ok_or_else(|| SpecError::NotFound(format!("{path:?} is not in the memory source")))
    }
}

/// Write `content` to `relative` under the temp dir, creating parent directories.
/// Returns the absolute path written.
pub fn write_spec(dir: &TempDir, relative: &str, content: &str) -> PathBuf {
    let path = dir.path().join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}
