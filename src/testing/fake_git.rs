use std::path::Path;
use std::sync::Mutex;

use crate::domain::AppError;
use crate::ports::{CommitOutcome, Git};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitCall {
    Clone(String),
    Fetch,
    Init(String),
    Commit(String),
    EnsureRemote(String),
    Push(String),
}

/// In-memory `Git` that records every mutating call.
///
/// `is_repository` ignores the path; a clone or init flips it to true.
pub struct FakeGit {
    pub calls: Mutex<Vec<GitCall>>,
    pub is_repo: Mutex<bool>,
    pub pending_changes: Mutex<bool>,
    pub current_branch: Mutex<String>,
    pub push_failure: Mutex<Option<String>>,
}

impl Default for FakeGit {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeGit {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            is_repo: Mutex::new(false),
            pending_changes: Mutex::new(false),
            current_branch: Mutex::new("main".to_string()),
            push_failure: Mutex::new(None),
        }
    }

    pub fn set_repository(&self, exists: bool) {
        *self.is_repo.lock().unwrap() = exists;
    }

    pub fn set_pending_changes(&self, pending: bool) {
        *self.pending_changes.lock().unwrap() = pending;
    }

    pub fn fail_push_with(&self, details: &str) {
        *self.push_failure.lock().unwrap() = Some(details.to_string());
    }

    pub fn calls(&self) -> Vec<GitCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: GitCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl Git for FakeGit {
    fn is_repository(&self, _path: &Path) -> bool {
        *self.is_repo.lock().unwrap()
    }

    fn clone_repository(&self, url: &str, _path: &Path) -> Result<(), AppError> {
        self.record(GitCall::Clone(url.to_string()));
        self.set_repository(true);
        Ok(())
    }

    fn fetch_all(&self, _path: &Path) -> Result<(), AppError> {
        self.record(GitCall::Fetch);
        Ok(())
    }

    fn init_with_initial_commit(&self, _path: &Path, message: &str) -> Result<String, AppError> {
        self.record(GitCall::Init(message.to_string()));
        self.set_repository(true);
        self.set_pending_changes(false);
        Ok("0000001".to_string())
    }

    fn commit_all(&self, _path: &Path, message: &str) -> Result<CommitOutcome, AppError> {
        self.record(GitCall::Commit(message.to_string()));
        let mut pending = self.pending_changes.lock().unwrap();
        if *pending {
            *pending = false;
            Ok(CommitOutcome::Committed("abc123".to_string()))
        } else {
            Ok(CommitOutcome::NothingToCommit)
        }
    }

    fn ensure_remote(&self, _path: &Path, url: &str) -> Result<(), AppError> {
        self.record(GitCall::EnsureRemote(url.to_string()));
        Ok(())
    }

    fn current_branch(&self, _path: &Path) -> Result<String, AppError> {
        Ok(self.current_branch.lock().unwrap().clone())
    }

    fn push(&self, _path: &Path, refspec: &str) -> Result<(), AppError> {
        if let Some(details) = self.push_failure.lock().unwrap().clone() {
            return Err(AppError::GitError { operation: "git2::Remote::push".into(), details });
        }
        self.record(GitCall::Push(refspec.to_string()));
        Ok(())
    }
}
