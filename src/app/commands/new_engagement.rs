use std::fs;
use std::path::Path;

use crate::domain::{AppError, Engagement, EngagementFile, Team};

/// Validate `file` and write it to `path`. Existing files are never overwritten.
pub fn execute(path: &Path, file: &EngagementFile, team: Option<Team>) -> Result<Engagement, AppError> {
    if path.exists() {
        return Err(AppError::AlreadyExists(path.to_path_buf()));
    }
    let engagement = file.validate(team)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, file.to_toml()?)?;
    tracing::info!(path = %path.display(), "Wrote engagement file");
    Ok(engagement)
}
