use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::domain::validation::ValidationError;

/// Library-wide error type for clusterforge operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// Settings file contained keys that are not part of the schema.
    #[error("Unrecognized settings: {}", .0.join(", "))]
    UnknownConfigKeys(Vec<String>),

    /// Settings or engagement file could not be parsed.
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    /// Engagement or cluster input rejected by validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A template fragment the plan depends on is missing.
    #[error("Template source missing: {}", .0.display())]
    TemplateMissing(PathBuf),

    /// Copying a template fragment failed.
    #[error("Failed to copy {} to {}: {source}", from.display(), to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Refusing to overwrite an existing file.
    #[error("{} already exists", .0.display())]
    AlreadyExists(PathBuf),

    /// Git execution failed.
    #[error("Git error running '{operation}': {details}")]
    GitError { operation: String, details: String },

    /// Remote hosting API returned an unexpected status.
    #[error("Remote API returned status {status}: {body}")]
    RemoteApi { status: u16, body: String },

    /// HTTP transport failure.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Run interrupted by the user.
    #[error("Interrupted")]
    Cancelled,
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    pub(crate) fn git(operation: &str, err: git2::Error) -> Self {
        AppError::GitError { operation: operation.to_string(), details: err.message().to_string() }
    }
}
