//! Cooperative cancellation and best-effort cleanup of in-progress paths.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::adapters::filesystem::pruner;
use crate::domain::AppError;

/// Shared flag tripped by an interrupt handler and polled between pipeline steps.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// `Err(AppError::Cancelled)` once the token has been tripped.
    pub fn check(&self) -> Result<(), AppError> {
        if self.is_cancelled() { Err(AppError::Cancelled) } else { Ok(()) }
    }
}

/// Paths that must not outlive a failed run.
#[derive(Debug, Default)]
pub struct CleanupRegistry {
    paths: Vec<PathBuf>,
}

impl CleanupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, path: impl Into<PathBuf>) {
        self.paths.push(path.into());
    }

    /// Forget a path that has been handed off successfully.
    pub fn release(&mut self, path: &Path) {
        self.paths.retain(|registered| registered != path);
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Remove every registered path, newest first. Failures are logged, not returned.
    pub fn cleanup(&mut self) {
        for path in self.paths.drain(..).rev() {
            match pruner::remove(&path) {
                Ok(()) => tracing::info!(path = %path.display(), "Removed in-progress files"),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "Cleanup failed")
                }
            }
        }
    }
}
