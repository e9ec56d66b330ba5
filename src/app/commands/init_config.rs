use std::fs;
use std::path::{Path, PathBuf};

use crate::adapters::assets::{self, SETTINGS_TEMPLATE};
use crate::domain::AppError;

/// Write the commented sample settings file to `path`.
pub fn execute(path: &Path) -> Result<PathBuf, AppError> {
    if path.exists() {
        return Err(AppError::AlreadyExists(path.to_path_buf()));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, assets::template_content(SETTINGS_TEMPLATE)?)?;
    Ok(path.to_path_buf())
}
