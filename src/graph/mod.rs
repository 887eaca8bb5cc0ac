//! The spec dependency graph.
//!
//! Nodes are identified by canonical path (see [`crate::paths`]). Edges are directed
//! `from -> to` pairs, one per link occurrence inside a section body, so two specs linked
//! twice are joined by two edges.
//!
//! - [`roots`]: global reference counting and root spec detection
//! - [`builder`]: depth-first traversal from the roots that materializes a [`SpecGraph`]

use std::{
    collections::{BTreeSet, HashMap},
    fmt::{Display, Formatter},
    path::{Path, PathBuf},
};

pub mod builder;
pub mod roots;

pub use builder::GraphBuilder;
pub use roots::{collect_references, find_root_specs, ReferenceSet};

/// Kind of document behind a node. Only specs exist today.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum NodeKind {
    #[default]
    Spec,
}

impl Display for NodeKind {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            NodeKind::Spec => write!(f, "spec"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Same value as `path`
    pub id: PathBuf,
    /// Canonical path of the backing document
    pub path: PathBuf,
    pub kind: NodeKind,
}

impl Node {
    pub fn spec(path: PathBuf) -> Self {
        Node {
            id: path.clone(),
            path,
            kind: NodeKind::Spec,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Edge {
    pub from: PathBuf,
    pub to: PathBuf,
}

/// Node set plus edge list produced by a single build.
///
/// Invariant: both endpoints of every edge have a node. Nodes are kept in the order they were
/// first reached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpecGraph {
    nodes: Vec<Node>,
    index: HashMap<PathBuf, usize>,
    edges: Vec<Edge>,
    dangling: BTreeSet<PathBuf>,
}

impl SpecGraph {
    pub fn new() -> Self {
        SpecGraph::default()
    }

    /// Insert a spec node for `path` unless one exists. Returns true if a node was created.
    pub fn ensure_node(&mut self, path: &Path) -> bool {
        if self.index.contains_key(path) {
            return false;
        }
        self.index.insert(path.to_path_buf(), self.nodes.len());
        self.nodes.push(Node::spec(path.to_path_buf()));
        true
    }

    /// Append an edge, creating nodes for both endpoints as needed.
    pub fn add_edge(&mut self, from: &Path, to: &Path) {
        self.ensure_node(from);
        self.ensure_node(to);
        self.edges.push(Edge {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
        });
    }

    /// Record that the document behind `path` could not be read.
    pub fn mark_dangling(&mut self, path: &Path) {
        self.ensure_node(path);
        self.dangling.insert(path.to_path_buf());
    }

    pub fn node(&self, path: &Path) -> Option<&Node> {
        self.index.get(path).map(|idx| &self.nodes[*idx])
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.index.contains_key(path)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Edges leaving `path`, in the order they were added.
    pub fn outgoing<'a>(&'a self, path: &'a Path) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |edge| edge.from == path)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Nodes whose backing document could not be parsed during the build.
    pub fn dangling(&self) -> impl Iterator<Item = &Path> {
        self.dangling.iter().map(PathBuf::as_path)
    }

    pub fn is_dangling(&self, path: &Path) -> bool {
        self.dangling.contains(path)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
