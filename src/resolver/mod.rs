//! Matching coverage-reported relative filenames to the candidate directory
//! that actually holds them.
//!
//! Coverage tools usually report paths relative to a source root that is
//! not the workspace root, and the same relative name can exist under more
//! than one directory. `PathResolver` checks, for every candidate `c`,
//! whether `c + filename` is a real file and keeps the shallowest hit.

pub mod candidates;

use std::collections::BTreeMap;
use std::path::{is_separator, Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, trace};

use crate::fs_op::stat::{FileProbe, LocalFs};
use candidates::{segment_count, segments};

/// Resolves relative filenames against an ordered set of candidate
/// directories.
///
/// When several candidates contain the file, the one with the fewest path
/// segments wins; equal depths go to whichever candidate was supplied first.
#[derive(Debug, Clone)]
pub struct PathResolver<P = LocalFs> {
    probe: P,
    candidates: Vec<String>,
    // candidate indices, stable-sorted by depth
    by_depth: Vec<usize>,
}

impl PathResolver<LocalFs> {
    /// Resolver over the real filesystem below `root`.
    pub fn new<I, S>(root: impl Into<PathBuf>, candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_probe(LocalFs::new(root), candidates)
    }
}

impl<P: FileProbe> PathResolver<P> {
    pub fn with_probe<I, S>(probe: P, candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let candidates: Vec<String> = candidates.into_iter().map(Into::into).collect();
        let mut by_depth: Vec<usize> = (0..candidates.len()).collect();
        by_depth.sort_by_key(|&i| segment_count(&candidates[i]));
        Self {
            probe,
            candidates,
            by_depth,
        }
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// Every candidate containing `filename`, in the order supplied.
    pub fn matches(&self, filename: &str) -> Vec<&str> {
        if !is_resolvable(filename) {
            return Vec::new();
        }
        self.candidates
            .iter()
            .filter(|c| self.contains(c, filename))
            .map(String::as_str)
            .collect()
    }

    /// The chosen candidate for a single filename, if any.
    pub fn resolve_one(&self, filename: &str) -> Option<&str> {
        if !is_resolvable(filename) {
            debug!("not resolvable: {:?}", filename);
            return None;
        }
        let chosen = self
            .by_depth
            .iter()
            .map(|&i| self.candidates[i].as_str())
            .find(|c| self.contains(c, filename));
        match chosen {
            Some(c) => debug!("resolved {} -> {:?}", filename, c),
            None => debug!("no candidate contains {}", filename),
        }
        chosen
    }

    /// Map each filename to the directory that contains it.
    ///
    /// Filenames no candidate contains are left out of the result.
    pub fn choose<I, S>(&self, filenames: I) -> BTreeMap<String, String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut chosen = BTreeMap::new();
        for filename in filenames {
            let filename = filename.as_ref();
            if chosen.contains_key(filename) {
                continue;
            }
            if let Some(dir) = self.resolve_one(filename) {
                chosen.insert(filename.to_string(), dir.to_string());
            }
        }
        chosen
    }

    fn contains(&self, candidate: &str, filename: &str) -> bool {
        let rel = join_relative(candidate, filename);
        let hit = self.probe.is_file(&rel);
        trace!("probe {} -> {}", rel.display(), hit);
        hit
    }
}

impl<P: FileProbe + Sync> PathResolver<P> {
    /// Same result as [`PathResolver::choose`], with filenames spread over
    /// the rayon pool.
    pub fn choose_parallel<S>(&self, filenames: &[S]) -> BTreeMap<String, String>
    where
        S: AsRef<str> + Sync,
    {
        filenames
            .par_iter()
            .filter_map(|f| {
                let f = f.as_ref();
                self.resolve_one(f).map(|dir| (f.to_string(), dir.to_string()))
            })
            .collect()
    }
}

/// A reported filename can only name something below a candidate when it is
/// non-empty, relative and never steps upwards.
fn is_resolvable(filename: &str) -> bool {
    if filename.starts_with(is_separator) || Path::new(filename).is_absolute() {
        return false;
    }
    let mut any = false;
    for seg in segments(filename) {
        if seg == ".." {
            return false;
        }
        any = true;
    }
    any
}

fn join_relative(candidate: &str, filename: &str) -> PathBuf {
    segments(candidate).chain(segments(filename)).collect()
}
