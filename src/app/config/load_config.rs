use std::fs;
use std::path::Path;

use crate::domain::AppError;
use crate::domain::config::{self, AppConfig, ACCESS_TOKEN_ENV};

/// Load settings from `path`, or from `./clusterforge.toml` when no path is given.
///
/// A missing default file means defaults; a missing explicit file is an error.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, AppError> {
    let env_token = std::env::var(ACCESS_TOKEN_ENV).ok();
    match path {
        Some(path) => load_config_from(path, env_token),
        None => {
            let default_path = config::paths::settings(&std::env::current_dir()?);
            if default_path.exists() {
                load_config_from(&default_path, env_token)
            } else {
                tracing::debug!(path = %default_path.display(), "No settings file; using defaults");
                config::parse::parse_config_content("", env_token)
            }
        }
    }
}

pub fn load_config_from(path: &Path, env_token: Option<String>) -> Result<AppConfig, AppError> {
    if !path.is_file() {
        return Err(AppError::config_error(format!("Settings file not found: {}", path.display())));
    }
    let content = fs::read_to_string(path)?;
    tracing::debug!(path = %path.display(), "Loaded settings");
    config::parse::parse_config_content(&content, env_token)
}
