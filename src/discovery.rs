//! Finding candidate specs under the configured search roots.

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};
use walkdir::{DirEntry, WalkDir};

use crate::paths::{canonical_path, is_spec_file};

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|s| s.starts_with('.'))
        .unwrap_or(false)
}

/// Recursively collect `*.md` files under each search root.
///
/// Roots are walked in the order given, each in file-name order. Hidden files and directories
/// below a root are skipped. A root that does not exist, and entries that cannot be read, are
/// logged and skipped. A file reachable from several roots is listed once, at its first
/// position.
pub fn find_specs<P: AsRef<Path>>(roots: &[P]) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    let mut specs = Vec::new();

    for root in roots {
        let root = root.as_ref();
        if !root.exists() {
            tracing::warn!("Search root {:?} does not exist, skipping", root);
            continue;
        }
        let before = specs.len();
        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e));
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry under {:?}: {e}", root);
                    continue;
                }
            };
            if !entry.file_type().is_file() || !is_spec_file(entry.path()) {
                continue;
            }
            let path = entry.into_path();
            if seen.insert(canonical_path(&path)) {
                specs.push(path);
            }
        }
        tracing::debug!("Found {} specs under {:?}", specs.len() - before, root);
    }

    specs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::helpers::write_spec;
    use tempfile::tempdir;
    use test_log::test;

    #[test]
    fn finds_markdown_recursively_in_name_order() {
        let dir = tempdir().unwrap();
        write_spec(&dir, "svc/b.md", "# B");
        write_spec(&dir, "svc/a.md", "# A");
        write_spec(&dir, "svc/nested/c.md", "# C");
        write_spec(&dir, "svc/notes.txt", "not a spec");
        write_spec(&dir, "svc/README.MD", "wrong case");

        let specs = find_specs(&[dir.path().join("svc")]);
        let names: Vec<_> = specs
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            names,
            vec![
                PathBuf::from("svc/a.md"),
                PathBuf::from("svc/b.md"),
                PathBuf::from("svc/nested/c.md"),
            ]
        );
    }

    #[test]
    fn hidden_entries_are_skipped() {
        let dir = tempdir().unwrap();
        write_spec(&dir, "svc/a.md", "# A");
        write_spec(&dir, "svc/.cache/b.md", "# B");
        write_spec(&dir, "svc/.draft.md", "# Draft");

        let specs = find_specs(&[dir.path().join("svc")]);
        assert_eq!(specs, vec![dir.path().join("svc/a.md")]);
    }

    #[test]
    fn missing_roots_are_skipped() {
        let dir = tempdir().unwrap();
        write_spec(&dir, "cmd/main.md", "# Main");

        let specs = find_specs(&[dir.path().join("nope"), dir.path().join("cmd")]);
        assert_eq!(specs, vec![dir.path().join("cmd/main.md")]);
    }

    #[test]
    fn overlapping_roots_list_files_once() {
        let dir = tempdir().unwrap();
        write_spec(&dir, "svc/inner/a.md", "# A");

        let specs = find_specs(&[dir.path().join("svc"), dir.path().join("svc/inner")]);
        assert_eq!(specs.len(), 1);
    }
}
