use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::domain::{AppError, PruneTask};

pub fn execute(task: &PruneTask) -> Result<(), AppError> {
    tracing::debug!(path = %task.path.display(), reason = %task.reason, "Pruning");
    remove(&task.path)
}

/// Delete a file or directory tree. An absent path is success.
pub fn remove(path: &Path) -> Result<(), AppError> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(()),
        Err(err) => return Err(err.into()),
    };
    let result = if metadata.is_dir() { fs::remove_dir_all(path) } else { fs::remove_file(path) };
    match result {
        Err(err) if err.kind() != ErrorKind::NotFound => Err(err.into()),
        _ => Ok(()),
    }
}
