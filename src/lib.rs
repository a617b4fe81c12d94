pub mod fs_op;
pub mod logging;
pub mod resolver;
pub mod runner;
pub mod settings;

pub use crate::fs_op::{FileProbe, LocalFs, MemoryFs, ResolveError};
pub use crate::resolver::PathResolver;
pub use crate::settings::{OutputFormat, Settings};
