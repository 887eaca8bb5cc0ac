use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use crate::{
    codec::{DocumentSource, FileSystemSource},
    graph::SpecGraph,
};

/// Materializes a [`SpecGraph`] by walking dependency links depth-first from a set of roots.
///
/// ## Traversal
///
/// Roots are walked in the order given, sharing one `visited` set, so a spec reachable from
/// two roots is expanded only once. A path is marked visited before its own links are
/// followed, which is what terminates cycles: a link back to an ancestor adds an edge but
/// does not re-expand the ancestor.
///
/// The walk uses an explicit stack of frames rather than recursion, so arbitrarily deep
/// spec chains cannot overflow the call stack. The resulting node and edge order is the same
/// as a recursive depth-first walk: for each link of a spec, the edge is recorded and the
/// target is fully expanded before the next link is considered.
///
/// ## Unreadable documents
///
/// If a spec cannot be parsed (missing file, permission error, ...) it stays in the graph as a
/// childless *dangling* node. The build itself never fails.
pub struct GraphBuilder<S: DocumentSource = FileSystemSource> {
    source: S,
}

/// Traversal state owned by a single [`GraphBuilder::build`] call.
#[derive(Debug, Default)]
struct TraversalContext {
    visited: HashSet<PathBuf>,
    graph: SpecGraph,
    parses: usize,
}

/// A spec being expanded: its canonical dependency targets and the next one to follow.
struct Frame {
    path: PathBuf,
    targets: Vec<PathBuf>,
    next: usize,
}

impl GraphBuilder<FileSystemSource> {
    /// Builder reading documents from the filesystem.
    pub fn simple() -> Self {
        GraphBuilder {
            source: FileSystemSource,
        }
    }
}

impl Default for GraphBuilder<FileSystemSource> {
    fn default() -> Self {
        GraphBuilder::simple()
    }
}

impl<S: DocumentSource> GraphBuilder<S> {
    pub fn new(source: S) -> Self {
        GraphBuilder { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Walk every root and return the graph of everything reachable from them.
    ///
    /// Root paths are expected to be canonical (as returned by
    /// [`find_root_specs`](crate::graph::find_root_specs)).
    pub fn build<P: AsRef<Path>>(&self, roots: &[P]) -> SpecGraph {
        let mut ctx = TraversalContext::default();
        for root in roots {
            self.walk(root.as_ref(), &mut ctx);
        }
        tracing::info!(
            "Built spec graph: {} nodes, {} edges from {} roots ({} documents parsed)",
            ctx.graph.node_count(),
            ctx.graph.edge_count(),
            roots.len(),
            ctx.parses
        );
        ctx.graph
    }

    fn walk(&self, root: &Path, ctx: &mut TraversalContext) {
        let mut stack: Vec<Frame> = Vec::new();
        if let Some(frame) = self.enter(root, ctx) {
            stack.push(frame);
        }

        while let Some(frame) = stack.last_mut() {
            let Some(target) = frame.targets.get(frame.next).cloned() else {
                stack.pop();
                continue;
            };
            frame.next += 1;
            ctx.graph.add_edge(&frame.path, &target);
            if let Some(child) = self.enter(&target, ctx) {
                stack.push(child);
            }
        }
    }

    /// First visit of `path`: mark it, give it a node, and parse its links. Returns `None` if
    /// the path was already visited.
    fn enter(&self, path: &Path, ctx: &mut TraversalContext) -> Option<Frame> {
        if !ctx.visited.insert(path.to_path_buf()) {
            return None;
        }
        ctx.graph.ensure_node(path);

        ctx.parses += 1;
        let targets = match self.source.parse(path) {
            Ok(doc) => doc.dependencies(),
            Err(e) => {
                tracing::warn!("Treating {:?} as a leaf, it could not be read: {e}", path);
                ctx.graph.mark_dangling(path);
                Vec::new()
            }
        };
        tracing::debug!("Visiting {:?} with {} dependency links", path, targets.len());

        Some(Frame {
            path: path.to_path_buf(),
            targets,
            next: 0,
        })
    }
}
