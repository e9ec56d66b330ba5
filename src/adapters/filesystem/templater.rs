use std::fs;
use std::path::Path;

use crate::domain::{AppError, TemplateTask, TemplateTokenMap};

/// Rewrite the task's file in place, then rename it.
pub fn execute(task: &TemplateTask) -> Result<(), AppError> {
    tracing::debug!(
        file = %task.path.display(),
        renamed_to = %task.renamed_to.display(),
        tokens = task.tokens.len(),
        "Rewriting config file"
    );
    rewrite(&task.path, &task.tokens)?;
    if task.renamed_to != task.path {
        fs::rename(&task.path, &task.renamed_to)?;
    }
    Ok(())
}

pub fn rewrite(path: &Path, tokens: &TemplateTokenMap) -> Result<(), AppError> {
    if !path.is_file() {
        return Err(AppError::TemplateMissing(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    fs::write(path, tokens.rewrite(&content))?;
    Ok(())
}

/// Render `template` through `tokens` and write it to `path`.
pub fn write_rendered(path: &Path, template: &str, tokens: &TemplateTokenMap) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, tokens.rewrite(template))?;
    Ok(())
}
