use thiserror::Error;
use std::path::PathBuf;

/// Errors produced by candidate discovery, settings loading and the CLI.
///
/// Resolution itself never fails; see `PathResolver::choose`.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// A settings file could not be read or parsed.
    #[error("invalid settings in `{}`: {}", .path.display(), .msg)]
    Config { path: PathBuf, msg: String },

    #[error("root does not exist: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("root is not a directory: {}", .0.display())]
    RootNotDirectory(PathBuf),

    /// Directory walk failed in a way that prevents discovery altogether.
    #[error("failed to walk candidates: {0}")]
    Walk(String),
}

impl From<walkdir::Error> for ResolveError {
    fn from(e: walkdir::Error) -> Self {
        ResolveError::Walk(e.to_string())
    }
}
