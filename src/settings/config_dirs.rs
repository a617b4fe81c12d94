use directories_next::ProjectDirs;
use std::path::PathBuf;

/// Per-user configuration directory for this tool, when the platform has one.
pub fn project_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "coverage_paths").map(|d| d.config_dir().to_path_buf())
}

/// `<config dir>/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    project_config_dir().map(|d| d.join("config.toml"))
}
