use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::resolver::candidates::segments;

/// Lightweight classification of a filesystem path's kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathType {
    /// The path does not exist, or its metadata could not be read.
    NotFound,
    /// The path exists and is a directory.
    Directory,
    /// The path exists and is a regular file.
    File,
    /// The path exists but is neither a regular file nor a directory
    /// (for example: socket, FIFO, block device).
    Other,
}

impl PathType {
    /// Classify `path` with a single metadata lookup. Symlinks are followed.
    ///
    /// Errors never escape: permission or I/O failures classify the path as
    /// `NotFound` so callers can keep probing other paths.
    pub fn of<P: AsRef<Path>>(path: P) -> Self {
        let p = path.as_ref();
        match fs::metadata(p) {
            Ok(m) if m.is_dir() => PathType::Directory,
            Ok(m) if m.is_file() => PathType::File,
            Ok(_) => PathType::Other,
            Err(e) => {
                if e.kind() != io::ErrorKind::NotFound {
                    debug!("treating {} as missing: {}", p.display(), e);
                }
                PathType::NotFound
            }
        }
    }
}

/// The one capability the resolver needs from its host: "is `relative` a
/// regular file under my root?".
///
/// `relative` is the candidate's segments followed by the filename's. The
/// filename part never holds `..`, `.` or a root component; candidates are
/// passed through as the caller wrote them, minus `.` and empty segments.
pub trait FileProbe {
    fn is_file(&self, relative: &Path) -> bool;
}

impl<P: FileProbe + ?Sized> FileProbe for &P {
    fn is_file(&self, relative: &Path) -> bool {
        (**self).is_file(relative)
    }
}

/// Probe backed by the real filesystem, rooted at `root`.
#[derive(Debug, Clone)]
pub struct LocalFs {
    root: PathBuf,
}

impl LocalFs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl FileProbe for LocalFs {
    fn is_file(&self, relative: &Path) -> bool {
        PathType::of(self.root.join(relative)) == PathType::File
    }
}

/// In-memory probe holding a fixed set of relative file paths.
///
/// Paths are split with the same separator rules as the resolver.
#[derive(Debug, Clone, Default)]
pub struct MemoryFs {
    files: BTreeSet<String>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style `insert`.
    pub fn with_file(mut self, relative: &str) -> Self {
        self.insert(relative);
        self
    }

    pub fn insert(&mut self, relative: &str) {
        self.files.insert(key(segments(relative)));
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl FileProbe for MemoryFs {
    fn is_file(&self, relative: &Path) -> bool {
        let parts = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>();
        self.files.contains(&parts.join("/"))
    }
}

fn key<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    parts.collect::<Vec<_>>().join("/")
}
