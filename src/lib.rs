//! # spec-agent
//!
//! Builds a dependency graph from a collection of interlinked markdown specifications and
//! renders it as a static HTML site.
//!
//! ## Overview
//!
//! Each spec is a markdown file describing one component. A link such as
//! `[Order Service](order_service.md)` that appears under a `##` section heading declares a
//! dependency on the linked spec. Links above the first `##` heading are kept for display but
//! do not create dependencies.
//!
//! The pipeline:
//!
//! 1. **Discovery** ([`discovery`]): find `*.md` files under the configured search roots
//! 2. **Parsing** ([`codec::md`]): title, sections and links of each spec
//! 3. **Root detection** ([`graph::roots`]): specs no other spec depends on
//! 4. **Graph build** ([`graph::builder`]): depth-first walk from the roots, cycle safe
//! 5. **Export** ([`export`]): `index.html` plus one page per spec
//!
//! Every link target is canonicalized by [`paths::resolve_reference`], so a spec has the same
//! identity whichever document links to it and however the link is spelled.
//!
//! ## Architecture
//!
//! - **[`codec`]**: markdown parsing, the minimal markdown-to-HTML converter and page templates
//! - **[`graph`]**: `SpecGraph`, root detection and the graph builder
//! - **[`compiler`]**: runs discovery, root detection and the build for a configured project
//! - **[`export`]**: writes the static site
//! - **[`config`]**: `.spec_agent/config.yaml`
//! - **[`init`]**: project scaffolding
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use spec_agent::{compiler::SpecCompiler, config::YamlConfigProvider, export::HtmlExporter};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = YamlConfigProvider::new(".");
//!     let compilation = SpecCompiler::from_provider(&provider)?.compile()?;
//!     for root in &compilation.root_specs {
//!         println!("root: {}", root.display());
//!     }
//!
//!     let report = HtmlExporter::new(".spec_agent/build").export(&compilation.graph)?;
//!     println!("wrote {} pages", report.pages.len());
//!     Ok(())
//! }
//! ```
//!
//! Graph logic is generic over [`codec::DocumentSource`], so documents can come from somewhere
//! other than the filesystem:
//!
//! ```rust
//! use spec_agent::codec::{DocumentSource, SpecDocument};
//! use spec_agent::graph::GraphBuilder;
//! use spec_agent::SpecError;
//! use std::path::Path;
//!
//! struct Fixed;
//!
//! impl DocumentSource for Fixed {
//!     fn parse(&self, path: &Path) -> Result<SpecDocument, SpecError> {
//!         match path.file_name().and_then(|n| n.to_str()) {
//!             Some("a.md") => Ok(SpecDocument::parse_str(path, "# A\n## Uses\n[B](b.md)\n")),
//!             Some("b.md") => Ok(SpecDocument::parse_str(path, "# B\n")),
//!             _ => Err(SpecError::NotFound(path.display().to_string())),
//!         }
//!     }
//! }
//!
//! let graph = GraphBuilder::new(Fixed).build(&["/specs/a.md"]);
//! assert_eq!(graph.node_count(), 2);
//! assert_eq!(graph.edge_count(), 1);
//! ```
//!
//! ## Feature Flags
//!
//! - `bin`: the `spec-agent` command line tool
//! - `service`: adds `spec-agent serve`, a static file server over the export directory

pub mod codec;
pub mod compiler;
pub mod config;
pub mod discovery;
pub mod error;
pub mod export;
pub mod graph;
pub mod init;
pub mod paths;
#[cfg(test)]
mod tests;

pub use error::*;
