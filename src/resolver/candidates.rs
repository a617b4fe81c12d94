//! Candidate directory helpers: segment splitting, normalisation and
//! discovery of every directory under a workspace root.

use std::path::{is_separator, Component, Path};

use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::fs_op::error::ResolveError;
use crate::fs_op::stat::PathType;

/// Split a relative path string into its meaningful segments.
///
/// Segments are split on the platform's separators: `/` everywhere, and
/// `\` only on Windows. Empty segments and `.` are dropped, so `./a//b/`
/// yields `["a", "b"]`.
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split(is_separator)
        .filter(|s| !s.is_empty() && *s != ".")
}

/// Depth of a candidate below the root. The root itself (`""`) is 0.
pub fn segment_count(candidate: &str) -> usize {
    segments(candidate).count()
}

/// Canonical spelling of a candidate directory: `/`-separated with a
/// trailing `/`, or `""` for the root itself.
pub fn normalize(candidate: &str) -> String {
    let parts: Vec<&str> = segments(candidate).collect();
    if parts.is_empty() {
        String::new()
    } else {
        format!("{}/", parts.join("/"))
    }
}

/// Enumerate candidate directories under `root`.
///
/// The root itself comes first as `""`, followed by every directory at most
/// `max_depth` levels below it in file-name order. Symlinks are not
/// followed. Entries that cannot be read are skipped; failing to read the
/// root is an error.
pub fn discover(
    root: &Path,
    max_depth: usize,
    include_hidden: bool,
) -> Result<Vec<String>, ResolveError> {
    match PathType::of(root) {
        PathType::Directory => {}
        PathType::NotFound => return Err(ResolveError::RootNotFound(root.to_path_buf())),
        _ => return Err(ResolveError::RootNotDirectory(root.to_path_buf())),
    }

    let mut found = vec![String::new()];
    let walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(max_depth)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        // the predicate also sees the root, which may well be a dot-dir
        .filter_entry(|e| e.depth() == 0 || include_hidden || !is_hidden(e));

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) if e.depth() == 0 => return Err(e.into()),
            Err(e) => {
                warn!("skipping unreadable entry: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_dir() {
            continue;
        }
        let Ok(rel) = entry.path().strip_prefix(root) else {
            continue;
        };
        match to_candidate(rel) {
            Some(c) => found.push(c),
            None => warn!("skipping non UTF-8 directory {}", entry.path().display()),
        }
    }

    debug!("discovered {} candidates under {}", found.len(), root.display());
    Ok(found)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|s| s.starts_with('.'))
        .unwrap_or(false)
}

fn to_candidate(rel: &Path) -> Option<String> {
    let mut out = String::new();
    for c in rel.components() {
        if let Component::Normal(s) = c {
            out.push_str(s.to_str()?);
            out.push('/');
        }
    }
    Some(out)
}
