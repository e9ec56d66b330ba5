use std::path::Path;

use git2::build::{CheckoutBuilder, RepoBuilder};
use git2::{
    Cred, ErrorCode, FetchOptions, IndexAddOption, PushOptions, RemoteCallbacks, Repository,
    RepositoryInitOptions, Signature,
};

use crate::domain::{AppError, CommitIdentity, GitCredentials};
use crate::ports::{CommitOutcome, Git};

pub const ORIGIN: &str = "origin";
pub const MAIN_BRANCH: &str = "main";
const FETCH_REFSPECS: [&str; 2] =
    ["+refs/heads/*:refs/remotes/origin/*", "+refs/tags/*:refs/tags/*"];

/// [`Git`] implementation backed by libgit2.
#[derive(Clone)]
pub struct Git2Repository {
    identity: CommitIdentity,
    credentials: Option<GitCredentials>,
}

impl std::fmt::Debug for Git2Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Git2Repository")
            .field("identity", &self.identity)
            .field("credentials", &self.credentials)
            .finish()
    }
}

impl Git2Repository {
    pub fn new(identity: CommitIdentity, credentials: Option<GitCredentials>) -> Self {
        Self { identity, credentials }
    }

    fn open(&self, path: &Path) -> Result<Repository, AppError> {
        Repository::open(path).map_err(|e| AppError::git("git2::Repository::open", e))
    }

    fn signature(&self) -> Result<Signature<'static>, AppError> {
        Signature::now(&self.identity.name, &self.identity.email)
            .map_err(|e| AppError::git("git2::Signature::now", e))
    }

    fn callbacks(&self) -> RemoteCallbacks<'_> {
        let mut callbacks = RemoteCallbacks::new();
        if let Some(credentials) = &self.credentials {
            callbacks.credentials(move |_url, _username, _allowed| {
                Cred::userpass_plaintext(&credentials.username, &credentials.access_token)
            });
        }
        callbacks
    }

    fn fetch_options(&self) -> FetchOptions<'_> {
        let mut options = FetchOptions::new();
        options.remote_callbacks(self.callbacks());
        options
    }

    /// Stage every change, deletions included, and write the tree.
    fn stage_all(repo: &Repository) -> Result<git2::Oid, AppError> {
        let mut index = repo.index().map_err(|e| AppError::git("git2::Repository::index", e))?;
        index
            .add_all(["*"], IndexAddOption::DEFAULT, None)
            .map_err(|e| AppError::git("git2::Index::add_all", e))?;
        index.update_all(["*"], None).map_err(|e| AppError::git("git2::Index::update_all", e))?;
        index.write().map_err(|e| AppError::git("git2::Index::write", e))?;
        index.write_tree().map_err(|e| AppError::git("git2::Index::write_tree", e))
    }

    fn head_commit(repo: &Repository) -> Result<Option<git2::Commit<'_>>, AppError> {
        match repo.head() {
            Ok(head) => head
                .peel_to_commit()
                .map(Some)
                .map_err(|e| AppError::git("git2::Reference::peel_to_commit", e)),
            Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
                Ok(None)
            }
            Err(e) => Err(AppError::git("git2::Repository::head", e)),
        }
    }

    fn fast_forward(repo: &Repository) -> Result<(), AppError> {
        let Ok(head) = repo.head() else {
            return Ok(());
        };
        let (Some(head_name), Some(branch)) = (head.name(), head.shorthand()) else {
            return Ok(());
        };
        let head_name = head_name.to_string();
        let upstream = match repo.find_reference(&format!("refs/remotes/{}/{}", ORIGIN, branch)) {
            Ok(reference) => reference,
            Err(e) if e.code() == ErrorCode::NotFound => return Ok(()),
            Err(e) => return Err(AppError::git("git2::Repository::find_reference", e)),
        };
        let incoming = repo
            .reference_to_annotated_commit(&upstream)
            .map_err(|e| AppError::git("git2::Repository::reference_to_annotated_commit", e))?;
        let (analysis, _) = repo
            .merge_analysis(&[&incoming])
            .map_err(|e| AppError::git("git2::Repository::merge_analysis", e))?;

        if analysis.is_up_to_date() {
            return Ok(());
        }
        if !analysis.is_fast_forward() {
            tracing::warn!(branch, "Local branch has diverged from origin; not fast-forwarding");
            return Ok(());
        }

        let mut reference = repo
            .find_reference(&head_name)
            .map_err(|e| AppError::git("git2::Repository::find_reference", e))?;
        reference
            .set_target(incoming.id(), "fast-forward")
            .map_err(|e| AppError::git("git2::Reference::set_target", e))?;
        repo.set_head(&head_name).map_err(|e| AppError::git("git2::Repository::set_head", e))?;
        repo.checkout_head(Some(CheckoutBuilder::new().force()))
            .map_err(|e| AppError::git("git2::Repository::checkout_head", e))?;
        tracing::debug!(branch, "Fast-forwarded to origin");
        Ok(())
    }
}

impl Git for Git2Repository {
    fn is_repository(&self, path: &Path) -> bool {
        Repository::open(path).is_ok()
    }

    fn clone_repository(&self, url: &str, path: &Path) -> Result<(), AppError> {
        RepoBuilder::new()
            .fetch_options(self.fetch_options())
            .clone(url, path)
            .map_err(|e| AppError::git("git2::build::RepoBuilder::clone", e))?;
        Ok(())
    }

    fn fetch_all(&self, path: &Path) -> Result<(), AppError> {
        let repo = self.open(path)?;
        {
            let mut remote = repo
                .find_remote(ORIGIN)
                .map_err(|e| AppError::git("git2::Repository::find_remote", e))?;
            remote
                .fetch(&FETCH_REFSPECS, Some(&mut self.fetch_options()), None)
                .map_err(|e| AppError::git("git2::Remote::fetch", e))?;
        }
        Self::fast_forward(&repo)
    }

    fn init_with_initial_commit(&self, path: &Path, message: &str) -> Result<String, AppError> {
        let mut options = RepositoryInitOptions::new();
        options.initial_head(MAIN_BRANCH);
        let repo = Repository::init_opts(path, &options)
            .map_err(|e| AppError::git("git2::Repository::init_opts", e))?;

        let tree_id = Self::stage_all(&repo)?;
        let tree =
            repo.find_tree(tree_id).map_err(|e| AppError::git("git2::Repository::find_tree", e))?;
        let signature = self.signature()?;
        let oid = repo
            .commit(None, &signature, &signature, message, &tree, &[])
            .map_err(|e| AppError::git("git2::Repository::commit", e))?;

        let main_ref = format!("refs/heads/{}", MAIN_BRANCH);
        repo.reference(&main_ref, oid, true, message)
            .map_err(|e| AppError::git("git2::Repository::reference", e))?;
        repo.set_head(&main_ref).map_err(|e| AppError::git("git2::Repository::set_head", e))?;
        Ok(oid.to_string())
    }

    fn commit_all(&self, path: &Path, message: &str) -> Result<CommitOutcome, AppError> {
        let repo = self.open(path)?;
        let tree_id = Self::stage_all(&repo)?;
        let parent = Self::head_commit(&repo)?;

        if parent.as_ref().is_some_and(|commit| commit.tree_id() == tree_id) {
            return Ok(CommitOutcome::NothingToCommit);
        }

        let tree =
            repo.find_tree(tree_id).map_err(|e| AppError::git("git2::Repository::find_tree", e))?;
        let signature = self.signature()?;
        let parents: Vec<&git2::Commit> = parent.iter().collect();
        let oid = repo
            .commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)
            .map_err(|e| AppError::git("git2::Repository::commit", e))?;
        Ok(CommitOutcome::Committed(oid.to_string()))
    }

    fn ensure_remote(&self, path: &Path, url: &str) -> Result<(), AppError> {
        let repo = self.open(path)?;
        match repo.find_remote(ORIGIN) {
            Ok(remote) if remote.url() == Some(url) => Ok(()),
            Ok(_) => repo
                .remote_set_url(ORIGIN, url)
                .map_err(|e| AppError::git("git2::Repository::remote_set_url", e)),
            Err(e) if e.code() == ErrorCode::NotFound => repo
                .remote(ORIGIN, url)
                .map(|_| ())
                .map_err(|e| AppError::git("git2::Repository::remote", e)),
            Err(e) => Err(AppError::git("git2::Repository::find_remote", e)),
        }
    }

    fn current_branch(&self, path: &Path) -> Result<String, AppError> {
        let repo = self.open(path)?;
        let head = repo.head().map_err(|e| AppError::git("git2::Repository::head", e))?;
        head.shorthand().map(str::to_string).ok_or_else(|| AppError::GitError {
            operation: "git2::Reference::shorthand".to_string(),
            details: "HEAD is not a valid UTF-8 branch".to_string(),
        })
    }

    fn push(&self, path: &Path, refspec: &str) -> Result<(), AppError> {
        let repo = self.open(path)?;
        let mut remote =
            repo.find_remote(ORIGIN).map_err(|e| AppError::git("git2::Repository::find_remote", e))?;

        let mut rejected: Vec<String> = Vec::new();
        {
            let mut callbacks = self.callbacks();
            callbacks.push_update_reference(|reference, status| {
                if let Some(message) = status {
                    rejected.push(format!("{}: {}", reference, message));
                }
                Ok(())
            });
            let mut options = PushOptions::new();
            options.remote_callbacks(callbacks);
            remote
                .push(&[refspec], Some(&mut options))
                .map_err(|e| AppError::git("git2::Remote::push", e))?;
        }

        if !rejected.is_empty() {
            return Err(AppError::GitError {
                operation: format!("push {}", refspec),
                details: rejected.join("; "),
            });
        }
        Ok(())
    }
}
