pub mod config_dirs;
pub mod read_settings;

// Re-export commonly used types/functions for convenience
pub use config_dirs::{default_config_path, project_config_dir};
pub use read_settings::{load_settings, OutputFormat, Settings};
