//! Reference resolution: turning a raw markdown link target into the canonical path that
//! identifies a spec in the graph.
//!
//! Canonicalization is lexical. `.` and `..` components are folded, relative paths are
//! anchored at the current working directory, and symlinks are never followed. The file a
//! canonical path names does not have to exist.
//!
//! Root detection, graph traversal and HTML navigation all resolve links through
//! [`resolve_reference`], so the same `(document, raw target)` pair always lands on the same
//! node identity.

use std::{
    borrow::Cow,
    path::{Component, Path, PathBuf},
};

/// Extension (without the dot) that marks a file as a spec.
pub const SPEC_EXTENSION: &str = "md";

/// Suffix appended to a spec's file name to form its exported page name.
pub const HTML_SUFFIX: &str = ".html";

/// Resolve `raw_target`, as written in the document at `referencing_doc`, to a canonical path.
///
/// The target is joined onto the referencing document's directory (an absolute target replaces
/// it) and the result is canonicalized with [`canonical_path`].
pub fn resolve_reference<P: AsRef<Path>>(referencing_doc: P, raw_target: &str) -> PathBuf {
    let dir = referencing_doc
        .as_ref()
        .parent()
        .unwrap_or_else(|| Path::new(""));
    let joined = dir.join(raw_target);
    let res = canonical_path(&joined);
    tracing::debug!(
        "resolve_reference: {:?} + '{}' -> {:?}",
        referencing_doc.as_ref(),
        raw_target,
        res
    );
    res
}

/// Absolute, lexically normalized form of `path`.
///
/// If the path cannot be made absolute (an empty path, or an unavailable working directory),
/// the lexically normalized relative path is returned instead. A link that cannot be anchored
/// becomes a dangling node, never an error.
pub fn canonical_path<P: AsRef<Path>>(path: P) -> PathBuf {
    match std::path::absolute(path.as_ref()) {
        Ok(abs) => normalize_path(abs),
        Err(e) => {
            tracing::warn!(
                "Could not make {:?} absolute ({e}); using the joined path as-is",
                path.as_ref()
            );
            normalize_path(path)
        }
    }
}

/// Fold `.` and `..` components without touching the filesystem.
///
/// A `..` directly under the root is dropped (`/..` is `/`). Leading `..` components of a
/// relative path are preserved.
pub fn normalize_path<P: AsRef<Path>>(path: P) -> PathBuf {
    let mut parts: Vec<Component> = Vec::new();
    for component in path.as_ref().components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            _ => parts.push(component),
        }
    }
    parts.iter().collect()
}

/// True if `path` names a spec file (extension exactly `md`).
pub fn is_spec_file<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == SPEC_EXTENSION)
        .unwrap_or(false)
}

/// Final path component as a display string, lossily converted.
pub fn base_name<P: AsRef<Path>>(path: &P) -> Cow<'_, str> {
    path.as_ref()
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_else(|| path.as_ref().to_string_lossy())
}

/// Default exported page name for a spec: its base name plus [`HTML_SUFFIX`].
///
/// `docs/api.md` becomes `api.md.html`.
pub fn page_file_name<P: AsRef<Path>>(path: P) -> String {
    format!("{}{}", base_name(&path), HTML_SUFFIX)
}

/// Page name derived from the path of `path` relative to `ancestor`, with separators replaced
/// by `--`. Used when two exported specs share a base name.
///
/// `/specs/api/index.md` relative to `/specs` becomes `api--index.md.html`.
pub fn page_slug<P: AsRef<Path>, Q: AsRef<Path>>(path: P, ancestor: Q) -> String {
    let relative = path
        .as_ref()
        .strip_prefix(ancestor.as_ref())
        .unwrap_or(path.as_ref());
    let slug = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("--");
    format!("{slug}{HTML_SUFFIX}")
}

/// Longest directory shared by every path in `paths`.
///
/// Returns `None` for an empty input. For a single path this is its parent directory.
pub fn common_ancestor<'a, I>(paths: I) -> Option<PathBuf>
where
    I: IntoIterator<Item = &'a Path>,
{
    let mut iter = paths.into_iter();
    let first = iter.next()?;
    let mut prefix: Vec<Component> = first
        .parent()
        .map(|dir| dir.components().collect())
        .unwrap_or_default();
    for path in iter {
        let dir: Vec<Component> = path
            .parent()
            .map(|dir| dir.components().collect())
            .unwrap_or_default();
        let shared = prefix
            .iter()
            .zip(dir.iter())
            .take_while(|(a, b)| a == b)
            .count();
        prefix.truncate(shared);
    }
    Some(prefix.iter().collect())
}
