//! # Codec Module
//!
//! Reading spec documents and writing them back out as HTML.
//!
//! - [`md`]: the line-oriented markdown parser producing a [`SpecDocument`]
//! - [`html`]: the minimal structural markdown-to-HTML renderer and the page templates
//!
//! Everything that needs a parsed document goes through a [`DocumentSource`]. Production code
//! uses [`FileSystemSource`]; tests can substitute an in-memory source so graph logic runs
//! without touching the disk.

use std::{fs::read_to_string, path::Path};

use crate::error::SpecError;

pub mod html;
pub mod md;

pub use md::{Section, SpecDocument, SpecLink};

/// Provides parsed spec documents by path.
///
/// A source is consulted fresh on every call: there is no caching between parses.
pub trait DocumentSource {
    fn parse(&self, path: &Path) -> Result<SpecDocument, SpecError>;
}

impl<S: DocumentSource + ?Sized> DocumentSource for &S {
    fn parse(&self, path: &Path) -> Result<SpecDocument, SpecError> {
        (**self).parse(path)
    }
}

/// Reads spec documents from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSystemSource;

impl DocumentSource for FileSystemSource {
    fn parse(&self, path: &Path) -> Result<SpecDocument, SpecError> {
        tracing::debug!("Reading {:?}", path);
        let content = read_to_string(path)?;
        Ok(SpecDocument::parse_str(path, content))
    }
}

/// Parse a single spec file from disk.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<SpecDocument, SpecError> {
    FileSystemSource.parse(path.as_ref())
}
