use std::fs;
use std::path::Path;

use crate::domain::{AppError, Engagement, EngagementFile, Team};

/// Read and validate an engagement definition.
pub fn load_engagement(path: &Path, team: Option<Team>) -> Result<Engagement, AppError> {
    if !path.is_file() {
        return Err(AppError::config_error(format!(
            "Engagement file not found: {}",
            path.display()
        )));
    }
    let content = fs::read_to_string(path)?;
    let engagement = EngagementFile::parse(&content)?.validate(team)?;
    Ok(engagement)
}
