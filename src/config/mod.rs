mod core;
mod loader;

pub use self::core::{AnalysisSettings, AppConfig, GitHubConfig, ServerConfig, SummarizerConfig};
pub use loader::{
    apply_env_overrides, directory_ancestors, load_config, load_config_from, parse_config,
    CONFIG_FILE_NAME,
};
