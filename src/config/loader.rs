use std::fs;
use std::path::{Path, PathBuf};

use super::core::AppConfig;
use crate::errors::{Error, Result};

pub const CONFIG_FILE_NAME: &str = ".repodoc.toml";

/// Pure function to parse config from TOML string
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    toml::from_str::<AppConfig>(contents)
        .map_err(|e| Error::Config(format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e)))
}

/// Try loading config from a specific path.
///
/// A missing file is `Ok(None)`; a file that exists but cannot be read or
/// parsed is an error.
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Result<Option<AppConfig>> {
    let contents = match fs::read_to_string(config_path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(Error::Config(format!(
                "Failed to read {}: {}",
                config_path.display(),
                e
            )))
        }
    };

    let config = parse_config(&contents).map_err(|e| match e {
        Error::Config(message) => {
            Error::Config(format!("{} ({})", message, config_path.display()))
        }
        other => other,
    })?;
    tracing::debug!("Loaded config from {}", config_path.display());
    Ok(Some(config))
}

/// Directory and its ancestors, nearest first, up to `max_depth` entries
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Search upward from `start` for `.repodoc.toml`; the nearest file wins
pub fn load_config_from(start: PathBuf) -> Result<AppConfig> {
    const MAX_TRAVERSAL_DEPTH: usize = 10;

    for dir in directory_ancestors(start, MAX_TRAVERSAL_DEPTH) {
        if let Some(config) = try_load_config_from_path(&dir.join(CONFIG_FILE_NAME))? {
            return Ok(config);
        }
    }

    tracing::debug!(
        "No config found after checking {} directories. Using default config.",
        MAX_TRAVERSAL_DEPTH
    );
    Ok(AppConfig::default())
}

/// File config from the working directory upward, then environment overrides
pub fn load_config() -> Result<AppConfig> {
    let config = load_config_from(std::env::current_dir()?)?;
    apply_env_overrides(config, |key| std::env::var(key).ok())
}

/// Overlay environment variables onto a loaded config.
///
/// `lookup` abstracts `std::env::var` so overrides can be exercised without
/// touching the process environment.
pub fn apply_env_overrides<F>(mut config: AppConfig, lookup: F) -> Result<AppConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(token) = non_empty("GITHUB_TOKEN") {
        config.github.token = Some(token);
    }
    if let Some(api) = non_empty("GITHUB_API_URL") {
        config.github.api_base = api;
    }
    if let Some(token) = non_empty("HUGGINGFACE_TOKEN") {
        config.summarizer.token = Some(token);
    }
    if let Some(host) = non_empty("REPODOC_HOST") {
        config.server.host = host;
    }
    if let Some(port) = non_empty("REPODOC_PORT") {
        config.server.port = port
            .parse()
            .map_err(|_| Error::Config(format!("REPODOC_PORT is not a valid port: {}", port)))?;
    }
    if let Some(level) = non_empty("REPODOC_LOG") {
        config.log_level = level;
    }

    Ok(config)
}
