use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use crate::{codec::DocumentSource, paths::canonical_path};

/// Canonical targets of every dependency link across a whole candidate pool.
///
/// Built from every candidate, reachable or not, and used only to decide which candidates
/// are roots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceSet(HashSet<PathBuf>);

impl ReferenceSet {
    pub fn new() -> Self {
        ReferenceSet::default()
    }

    pub fn insert(&mut self, path: PathBuf) -> bool {
        self.0.insert(path)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.0.contains(path)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PathBuf> {
        self.0.iter()
    }
}

impl FromIterator<PathBuf> for ReferenceSet {
    fn from_iter<T: IntoIterator<Item = PathBuf>>(iter: T) -> Self {
        ReferenceSet(iter.into_iter().collect())
    }
}

/// Parse every candidate and union the canonical targets of their dependency links.
///
/// Candidates that cannot be parsed contribute nothing; they are logged and skipped.
pub fn collect_references<S, P>(source: &S, spec_files: &[P]) -> ReferenceSet
where
    S: DocumentSource + ?Sized,
    P: AsRef<Path>,
{
    let mut referenced = ReferenceSet::new();
    for spec in spec_files {
        let path = canonical_path(spec);
        match source.parse(&path) {
            Ok(doc) => {
                for target in doc.dependencies() {
                    referenced.insert(target);
                }
            }
            Err(e) => {
                tracing::warn!("Skipping unreadable spec {:?}: {e}", path);
            }
        }
    }
    tracing::debug!(
        "Collected {} referenced specs from {} candidates",
        referenced.len(),
        spec_files.len()
    );
    referenced
}

/// Canonical paths of candidates that no candidate links to, in input order.
///
/// A self-referencing spec counts as referenced. Duplicate candidates are reported once. The
/// result is empty when every candidate is referenced (for example a closed cycle); the caller
/// decides how to report that.
pub fn find_root_specs<P: AsRef<Path>>(spec_files: &[P], referenced: &ReferenceSet) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    spec_files
        .iter()
        .map(canonical_path)
        .filter(|path| !referenced.contains(path))
        .filter(|path| seen.insert(path.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::helpers::MemorySource;

    #[test]
    fn unreferenced_spec_is_the_only_root() {
        let source = MemorySource::new()
            .with("/specs/a.md", "# A\n## Deps\n[B](b.md)\n")
            .with("/specs/b.md", "# B\n");
        let files = ["/specs/a.md", "/specs/b.md"];

        let referenced = collect_references(&source, &files);
        assert!(referenced.contains(Path::new("/specs/b.md")));

        let roots = find_root_specs(&files, &referenced);
        assert_eq!(roots, vec![PathBuf::from("/specs/a.md")]);
    }

    #[test]
    fn closed_cycle_has_no_roots() {
        let source = MemorySource::new()
            .with("/specs/a.md", "## Deps\n[B](b.md)\n")
            .with("/specs/b.md", "## Deps\n[A](./a.md)\n");
        let files = ["/specs/a.md", "/specs/b.md"];
        let referenced = collect_references(&source, &files);
        assert!(find_root_specs(&files, &referenced).is_empty());
    }

    #[test]
    fn self_reference_disqualifies_a_root() {
        let source = MemorySource::new().with("/specs/a.md", "## Deps\n[Me](a.md)\n");
        let files = ["/specs/a.md"];
        let referenced = collect_references(&source, &files);
        assert!(find_root_specs(&files, &referenced).is_empty());
    }

    #[test]
    fn display_only_links_do_not_count_as_references() {
        let source = MemorySource::new()
            .with("/specs/a.md", "See [B](b.md)\n## Deps\nnone\n")
            .with("/specs/b.md", "# B\n");
        let files = ["/specs/a.md", "/specs/b.md"];
        let referenced = collect_references(&source, &files);
        assert!(referenced.is_empty());
        assert_eq!(find_root_specs(&files, &referenced).len(), 2);
    }

    #[test]
    fn unreadable_candidates_are_skipped_and_still_considered() {
        let source = MemorySource::new().with("/specs/a.md", "## Deps\n[B](b.md)\n");
        let files = ["/specs/a.md", "/specs/missing.md", "/specs/b.md"];
        let referenced = collect_references(&source, &files);
        let roots = find_root_specs(&files, &referenced);
        assert_eq!(
            roots,
            vec![
                PathBuf::from("/specs/a.md"),
                PathBuf::from("/specs/missing.md")
            ]
        );
    }

    #[test]
    fn roots_keep_input_order_without_duplicates() {
        let referenced = ReferenceSet::new();
        let files = ["/specs/z.md", "/specs/a.md", "/specs/./z.md"];
        assert_eq!(
            find_root_specs(&files, &referenced),
            vec![PathBuf::from("/specs/z.md"), PathBuf::from("/specs/a.md")]
        );
    }
}
