use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::fs_op::error::ResolveError;
use crate::settings::config_dirs::default_config_path;

/// How resolved mappings are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `filename<TAB>directory`, one per line.
    #[default]
    Text,
    /// A single JSON object.
    Json,
}

/// Settings read from `config.toml`. Every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub root: PathBuf,
    pub candidates: Vec<String>,
    pub discover: bool,
    pub max_depth: usize,
    pub include_hidden: bool,
    pub parallel: bool,
    pub format: OutputFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            candidates: Vec::new(),
            discover: false,
            max_depth: 8,
            include_hidden: false,
            parallel: false,
            format: OutputFormat::Text,
        }
    }
}

impl Settings {
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }
}

/// Load settings from `path`, or from the default location when `path` is
/// `None`.
///
/// A missing file at the default location yields `Settings::default()`; a
/// missing file that was asked for explicitly is an error.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, ResolveError> {
    let (path, explicit) = match path {
        Some(p) => (p.to_path_buf(), true),
        None => match default_config_path() {
            Some(p) => (p, false),
            None => return Ok(Settings::default()),
        },
    };

    let text = match fs::read_to_string(&path) {
        Ok(t) => t,
        Err(e) if e.kind() == io::ErrorKind::NotFound && !explicit => {
            debug!("no settings at {}, using defaults", path.display());
            return Ok(Settings::default());
        }
        Err(e) => {
            return Err(ResolveError::Config {
                path,
                msg: e.to_string(),
            })
        }
    };

    Settings::from_toml(&text).map_err(|e| ResolveError::Config {
        path,
        msg: e.to_string(),
    })
}
