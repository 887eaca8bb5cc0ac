//! End-to-end graph construction for a configured project.
//!
//! ## Pipeline
//!
//! 1. **Discovery**: scan the configured search roots for `*.md` files
//! 2. **Reference collection**: parse every candidate and union the canonical targets of its
//!    dependency links
//! 3. **Root detection**: keep the candidates nobody links to
//! 4. **Graph build**: depth-first walk from the roots
//!
//! Each run re-reads everything from disk. Failures on a single spec are logged and absorbed;
//! conditions that leave nothing to build (no roots configured, no specs found, no root specs)
//! are returned as errors before any graph is built.

use std::path::{Path, PathBuf};

use crate::{
    codec::{DocumentSource, FileSystemSource},
    config::{ConfigProvider, SpecConfig},
    discovery::find_specs,
    error::SpecError,
    graph::{collect_references, find_root_specs, GraphBuilder, ReferenceSet, SpecGraph},
};

pub struct SpecCompiler<S: DocumentSource = FileSystemSource> {
    search_roots: Vec<PathBuf>,
    builder: GraphBuilder<S>,
}

/// Everything produced by one compilation.
#[derive(Debug, Clone)]
pub struct Compilation {
    /// Candidate specs found under the search roots, in discovery order
    pub spec_files: Vec<PathBuf>,
    /// Canonical targets of every dependency link across all candidates
    pub references: ReferenceSet,
    /// Canonical paths of candidates no candidate links to
    pub root_specs: Vec<PathBuf>,
    pub graph: SpecGraph,
}

/// Counts for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompilerStats {
    pub spec_files: usize,
    pub root_specs: usize,
    pub nodes: usize,
    pub edges: usize,
    pub dangling: usize,
}

impl Compilation {
    pub fn stats(&self) -> CompilerStats {
        CompilerStats {
            spec_files: self.spec_files.len(),
            root_specs: self.root_specs.len(),
            nodes: self.graph.node_count(),
            edges: self.graph.edge_count(),
            dangling: self.graph.dangling().count(),
        }
    }
}

impl SpecCompiler<FileSystemSource> {
    /// Compiler for a project, reading its configuration through `provider`.
    pub fn from_provider<C: ConfigProvider + ?Sized>(provider: &C) -> Result<Self, SpecError> {
        let config = provider.load()?;
        SpecCompiler::from_config(&config, provider.project_dir(), FileSystemSource)
    }
}

impl<S: DocumentSource> SpecCompiler<S> {
    /// Compiler over `config`'s search roots, resolved against `project_dir`.
    pub fn from_config(
        config: &SpecConfig,
        project_dir: &Path,
        source: S,
    ) -> Result<Self, SpecError> {
        config.validate()?;
        Ok(SpecCompiler {
            search_roots: config.search_roots(project_dir),
            builder: GraphBuilder::new(source),
        })
    }

    pub fn search_roots(&self) -> &[PathBuf] {
        &self.search_roots
    }

    pub fn source(&self) -> &S {
        self.builder.source()
    }

    /// Run discovery, root detection and the graph build.
    pub fn compile(&self) -> Result<Compilation, SpecError> {
        let spec_files = find_specs(&self.search_roots);
        if spec_files.is_empty() {
            return Err(SpecError::NoSpecsFound);
        }
        tracing::info!(
            "Found {} spec files under {} search roots",
            spec_files.len(),
            self.search_roots.len()
        );
        self.compile_files(spec_files)
    }

    /// Root detection and graph build over an explicit candidate list.
    pub fn compile_files(&self, spec_files: Vec<PathBuf>) -> Result<Compilation, SpecError> {
        let references = collect_references(self.source(), &spec_files);
        let root_specs = find_root_specs(&spec_files, &references);
        if root_specs.is_empty() {
            return Err(SpecError::NoRootSpecs);
        }
        tracing::info!("Detected {} root specs", root_specs.len());

        let graph = self.builder.build(&root_specs);
        Ok(Compilation {
            spec_files,
            references,
            root_specs,
            graph,
        })
    }
}
