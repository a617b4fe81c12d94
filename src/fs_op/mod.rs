//! Filesystem-facing pieces: probing and the crate's error type.

pub mod error;
pub mod stat;

pub use error::ResolveError;
pub use stat::{FileProbe, LocalFs, MemoryFs, PathType};
