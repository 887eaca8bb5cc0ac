//! Static HTML export of a [`SpecGraph`].
//!
//! The output directory receives `index.html` plus one page per node whose document can be
//! parsed. Nodes that cannot be parsed get no page; links pointing at them are still rendered
//! (marked as missing) and will not resolve.
//!
//! Pages are named `<basename>.html` (`orders.md` becomes `orders.md.html`). When several
//! exported documents share a base name, each of them is named after its path relative to the
//! common ancestor of all exported documents instead (`billing--api.md.html`). A name that is
//! still taken after that gets a numeric suffix (`billing--api.md-2.html`), so no page
//! overwrites another.

use std::{
    collections::{HashMap, HashSet},
    fs::{create_dir_all, write},
    path::{Path, PathBuf},
};

use crate::{
    codec::{
        html::{render_index, render_page, IndexEntry, NavLink},
        DocumentSource, FileSystemSource, SpecDocument,
    },
    error::SpecError,
    graph::SpecGraph,
    paths::{
        base_name, common_ancestor, page_file_name, page_slug, resolve_reference, HTML_SUFFIX,
    },
};

/// Name of the index page inside the output directory.
pub const INDEX_FILE: &str = "index.html";

pub struct HtmlExporter<S: DocumentSource = FileSystemSource> {
    output_dir: PathBuf,
    source: S,
}

/// Summary of a finished export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub output_dir: PathBuf,
    pub index: PathBuf,
    /// Pages written, excluding the index
    pub pages: Vec<PathBuf>,
    /// Graph nodes without a page because their document could not be parsed
    pub skipped: Vec<PathBuf>,
}

/// Output page name for every exported document, keyed by canonical path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageNames(HashMap<PathBuf, String>);

impl PageNames {
    /// Assign unique page names to `paths`.
    ///
    /// Every path starts with its plain name. Any name held by more than one path is replaced
    /// by the path's slug, repeated until no plain name collides with another name. Names that
    /// still collide after that (a slug equal to another slug) get a numeric suffix, in input
    /// order, the first holder keeping the bare name.
    pub fn assign<'a, I>(paths: I) -> Self
    where
        I: IntoIterator<Item = &'a Path>,
        I::IntoIter: Clone,
    {
        let paths = paths.into_iter();
        let ancestor = common_ancestor(paths.clone()).unwrap_or_default();
        let mut assigned: Vec<(&Path, String)> =
            paths.map(|path| (path, page_file_name(path))).collect();

        loop {
            let shared = shared_names(&assigned);
            let mut changed = false;
            for (path, name) in assigned.iter_mut() {
                if shared.contains(name.as_str()) {
                    let slug = page_slug(*path, &ancestor);
                    if *name != slug {
                        *name = slug;
                        changed = true;
                    }
                }
            }
            if !changed {
                break;
            }
        }

        let mut taken: HashSet<String> = assigned.iter().map(|(_, name)| name.clone()).collect();
        let mut seen = HashSet::new();
        let mut names = HashMap::new();
        for (path, name) in assigned {
            let name = if seen.insert(name.clone()) {
                name
            } else {
                let stem = name.strip_suffix(HTML_SUFFIX).unwrap_or(&name);
                let numbered = (2..)
                    .map(|n| format!("{stem}-{n}{HTML_SUFFIX}"))
                    .find(|candidate| !taken.contains(candidate))
                    .unwrap_or_default();
                tracing::debug!("Page name {name} is taken, using {numbered} for {:?}", path);
                taken.insert(numbered.clone());
                numbered
            };
            names.insert(path.to_path_buf(), name);
        }
        PageNames(names)
    }

    pub fn get(&self, path: &Path) -> Option<&str> {
        self.0.get(path).map(String::as_str)
    }

    /// Page name for `path`, or the name it would have if it were exported.
    pub fn href(&self, path: &Path) -> (String, bool) {
        match self.get(path) {
            Some(name) => (name.to_string(), true),
            None => (page_file_name(path), false),
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl HtmlExporter<FileSystemSource> {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        HtmlExporter {
            output_dir: output_dir.into(),
            source: FileSystemSource,
        }
    }
}

impl<S: DocumentSource> HtmlExporter<S> {
    pub fn with_source(output_dir: impl Into<PathBuf>, source: S) -> Self {
        HtmlExporter {
            output_dir: output_dir.into(),
            source,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write the index and one page per parseable node.
    ///
    /// Any directory or file write failure aborts the export; pages written before the
    /// failure are left in place.
    pub fn export(&self, graph: &SpecGraph) -> Result<ExportReport, SpecError> {
        create_dir_all(&self.output_dir).map_err(|e| {
            SpecError::Io(format!(
                "could not create output directory {}: {e}",
                self.output_dir.display()
            ))
        })?;

        let mut docs: Vec<SpecDocument> = Vec::new();
        let mut skipped = Vec::new();
        for node in graph.nodes() {
            match self.source.parse(&node.path) {
                Ok(doc) => docs.push(doc),
                Err(e) => {
                    tracing::debug!("No page for {:?}: {e}", node.path);
                    skipped.push(node.path.clone());
                }
            }
        }

        let names = PageNames::assign(docs.iter().map(|doc| doc.path.as_path()));

        let entries = docs
            .iter()
            .map(|doc| IndexEntry {
                title: doc.display_title(),
                href: names.get(&doc.path).unwrap_or_default().to_string(),
            })
            .collect::<Vec<_>>();
        let index = self.output_dir.join(INDEX_FILE);
        self.write_page(&index, &render_index(&entries)?)?;

        let mut pages = Vec::with_capacity(docs.len());
        for doc in &docs {
            let links = navigation_links(doc, &names);
            let html = render_page(&doc.display_title(), &doc.content, &links)?;
            let page = self
                .output_dir
                .join(names.get(&doc.path).unwrap_or_default());
            self.write_page(&page, &html)?;
            pages.push(page);
        }

        tracing::info!(
            "Exported {} pages to {:?} ({} nodes without a readable document)",
            pages.len(),
            self.output_dir,
            skipped.len()
        );
        Ok(ExportReport {
            output_dir: self.output_dir.clone(),
            index,
            pages,
            skipped,
        })
    }

    fn write_page(&self, path: &Path, html: &str) -> Result<(), SpecError> {
        tracing::debug!("Writing {:?}", path);
        write(path, html)
            .map_err(|e| SpecError::Io(format!("could not write {}: {e}", path.display())))
    }
}

/// Names held by more than one entry.
fn shared_names(assigned: &[(&Path, String)]) -> HashSet<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for (_, name) in assigned {
        *counts.entry(name.as_str()).or_default() += 1;
    }
    counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(name, _)| name.to_string())
        .collect()
}

/// "Related specifications" for a page: every displayable spec link in the document, resolved
/// the same way the graph resolves dependency links.
fn navigation_links(doc: &SpecDocument, names: &PageNames) -> Vec<NavLink> {
    doc.display_links()
        .map(|link| {
            let target = resolve_reference(&doc.path, &link.path);
            let (href, exported) = names.href(&target);
            if !exported {
                tracing::debug!(
                    "Link '{}' in {:?} points at {} which has no page",
                    link.title,
                    base_name(&doc.path),
                    href
                );
            }
            NavLink {
                title: link.title.clone(),
                href,
                exported,
            }
        })
        .collect()
}
