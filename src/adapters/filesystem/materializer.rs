use std::fs;
use std::path::Path;

use crate::domain::{AppError, FileCopyTask};

/// Execute one planned copy.
pub fn execute(task: &FileCopyTask) -> Result<(), AppError> {
    tracing::debug!(
        slot = %task.slot,
        from = %task.source.display(),
        to = %task.destination.display(),
        "Copying template fragment"
    );
    if task.is_directory {
        copy_directory(&task.source, &task.destination).map(|_| ())
    } else {
        copy_file(&task.source, &task.destination)
    }
}

/// Copy one file, creating missing parent directories and overwriting `to`.
pub fn copy_file(from: &Path, to: &Path) -> Result<(), AppError> {
    if !from.is_file() {
        return Err(AppError::TemplateMissing(from.to_path_buf()));
    }
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent).map_err(|source| copy_error(from, to, source))?;
    }
    fs::copy(from, to).map_err(|source| copy_error(from, to, source))?;
    Ok(())
}

/// Copy the contents of `from` into `to`, recursively. Returns the number of files copied.
pub fn copy_directory(from: &Path, to: &Path) -> Result<usize, AppError> {
    if !from.is_dir() {
        return Err(AppError::TemplateMissing(from.to_path_buf()));
    }
    fs::create_dir_all(to).map_err(|source| copy_error(from, to, source))?;

    let mut copied = 0;
    let entries = fs::read_dir(from).map_err(|source| copy_error(from, to, source))?;
    for entry in entries {
        let entry = entry.map_err(|source| copy_error(from, to, source))?;
        let source_path = entry.path();
        let target_path = to.join(entry.file_name());
        if source_path.is_dir() {
            copied += copy_directory(&source_path, &target_path)?;
        } else {
            fs::copy(&source_path, &target_path)
                .map_err(|source| copy_error(&source_path, &target_path, source))?;
            copied += 1;
        }
    }
    Ok(copied)
}

/// Merge `from` into `to`, then remove `from`.
pub fn move_directory(from: &Path, to: &Path) -> Result<(), AppError> {
    copy_directory(from, to)?;
    fs::remove_dir_all(from)?;
    Ok(())
}

fn copy_error(from: &Path, to: &Path, source: std::io::Error) -> AppError {
    AppError::Copy { from: from.to_path_buf(), to: to.to_path_buf(), source }
}
