use std::path::Path;

use crate::domain::AppError;

/// Result of staging everything and attempting a commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    Committed(String),
    /// The staged tree matched `HEAD`; no commit was created.
    NothingToCommit,
}

/// Local repository operations on an engagement working copy.
///
/// Every method takes the working-copy path; implementations hold only
/// identity and credentials.
pub trait Git {
    /// Whether `path` is the root of a git working copy.
    fn is_repository(&self, path: &Path) -> bool;

    /// Clone `url` into `path` (authenticated).
    fn clone_repository(&self, url: &str, path: &Path) -> Result<(), AppError>;

    /// Fetch all heads and tags from `origin`, forcing ref updates, then
    /// fast-forward the checked-out branch when possible.
    fn fetch_all(&self, path: &Path) -> Result<(), AppError>;

    /// Initialize `path`, stage everything and commit on a fresh `main`
    /// branch that `HEAD` points to. Returns the commit id.
    fn init_with_initial_commit(&self, path: &Path, message: &str) -> Result<String, AppError>;

    /// Stage all changes (including deletions) and commit unless clean.
    fn commit_all(&self, path: &Path, message: &str) -> Result<CommitOutcome, AppError>;

    /// Point `origin` at `url`, creating the remote when missing.
    fn ensure_remote(&self, path: &Path, url: &str) -> Result<(), AppError>;

    /// Name of the checked-out branch.
    fn current_branch(&self, path: &Path) -> Result<String, AppError>;

    /// Push `refspec` to `origin`. An up-to-date remote is success; a
    /// rejected reference is an error.
    fn push(&self, path: &Path, refspec: &str) -> Result<(), AppError>;
}
