//! Commits a finished engagement tree and synchronizes it with the hosted remote.
//!
//! Publication runs in two phases around promotion of the staged tree:
//! [`RepoPublisher::sync`] brings the local working copy up to date (clone or
//! fetch) before files land in it, and [`RepoPublisher::publish`] commits and
//! pushes afterwards. A clean worktree is a successful no-op.

use std::fs;
use std::path::Path;

use crate::app::context::RemoteBinding;
use crate::domain::config::INITIAL_COMMIT_MESSAGE;
use crate::domain::{AppError, PublishReport, PublishStep, RemoteStatus, RepoState, Slug, SyncAction};
use crate::ports::{CommitOutcome, Git, RemoteHost};

pub const ABBREVIATION_VARIABLE: &str = "abbreviation";
pub const PUBLISH_REFSPEC: &str = "refs/heads/main:refs/heads/main";

pub struct RepoPublisher<'a, G: Git, R: RemoteHost> {
    git: &'a G,
    remote: Option<&'a RemoteBinding<R>>,
    commit_message: &'a str,
}

impl<'a, G: Git, R: RemoteHost> RepoPublisher<'a, G, R> {
    pub fn new(git: &'a G, remote: Option<&'a RemoteBinding<R>>, commit_message: &'a str) -> Self {
        Self { git, remote, commit_message }
    }

    /// Observe the local working copy and, when publishing remotely, the hosted project.
    pub fn inspect(&self, working_copy: &Path, organization: &Slug) -> Result<RepoState, AppError> {
        let has_local_repo = self.git.is_repository(working_copy);
        let remote = match self.remote {
            Some(binding) => {
                if binding.host.project_exists(organization)? {
                    RemoteStatus::Exists
                } else {
                    RemoteStatus::Absent
                }
            }
            None => RemoteStatus::Unchecked,
        };
        tracing::info!(has_local_repo, remote = ?remote, "Inspected engagement repository");
        Ok(RepoState { has_local_repo, remote })
    }

    /// Clone or fetch so the working copy reflects the remote before files are written.
    pub fn sync(
        &self,
        state: &RepoState,
        working_copy: &Path,
        organization: &Slug,
        report: &mut PublishReport,
    ) -> Result<(), AppError> {
        let Some(binding) = self.remote else {
            return Ok(());
        };
        let url = binding.settings.clone_url(organization.as_str());

        match state.sync_action() {
            SyncAction::Clone => {
                if let Some(parent) = working_copy.parent() {
                    fs::create_dir_all(parent)?;
                }
                tracing::info!(%url, "Cloning engagement repository");
                self.git.clone_repository(&url, working_copy)?;
                report.record(PublishStep::Cloned);
            }
            SyncAction::Fetch => {
                self.git.ensure_remote(working_copy, &url)?;
                tracing::info!("Fetching engagement repository");
                self.git.fetch_all(working_copy)?;
                report.record(PublishStep::Fetched);
            }
            SyncAction::CreateRemote | SyncAction::LocalOnly => {}
        }
        Ok(())
    }

    /// Commit the promoted tree and push it where the state requires.
    pub fn publish(
        &self,
        state: &RepoState,
        working_copy: &Path,
        organization: &Slug,
        abbreviation: Option<&str>,
        report: &mut PublishReport,
    ) -> Result<(), AppError> {
        match (state.sync_action(), self.remote) {
            (SyncAction::Clone | SyncAction::Fetch, Some(_)) => {
                match self.git.commit_all(working_copy, self.commit_message)? {
                    CommitOutcome::NothingToCommit => {
                        tracing::info!("Worktree clean; nothing to publish");
                        report.record(PublishStep::NothingToCommit);
                    }
                    CommitOutcome::Committed(id) => {
                        tracing::info!(commit = %id, "Committed engagement changes");
                        report.record(PublishStep::Committed);
                        let branch = self.git.current_branch(working_copy)?;
                        self.git.push(working_copy, &format!("refs/heads/{0}:refs/heads/{0}", branch))?;
                        report.record(PublishStep::Pushed);
                    }
                }
            }
            (SyncAction::CreateRemote, Some(binding)) => {
                self.commit_local(state, working_copy, report)?;

                let project = binding.host.create_project(organization)?;
                tracing::info!(project = project.id, url = ?project.web_url, "Created remote project");
                report.record(PublishStep::RemoteCreated);
                if let Some(value) = abbreviation {
                    binding.host.create_project_variable(project.id, ABBREVIATION_VARIABLE, value)?;
                }

                let url = binding.settings.clone_url(organization.as_str());
                self.git.ensure_remote(working_copy, &url)?;
                self.git.push(working_copy, PUBLISH_REFSPEC)?;
                report.record(PublishStep::Published);
            }
            _ => self.commit_local(state, working_copy, report)?,
        }
        Ok(())
    }

    fn commit_local(
        &self,
        state: &RepoState,
        working_copy: &Path,
        report: &mut PublishReport,
    ) -> Result<(), AppError> {
        if !state.has_local_repo {
            let id = self.git.init_with_initial_commit(working_copy, INITIAL_COMMIT_MESSAGE)?;
            tracing::info!(commit = %id, "Initialized engagement repository");
            report.record(PublishStep::Initialized);
            return Ok(());
        }
        match self.git.commit_all(working_copy, self.commit_message)? {
            CommitOutcome::Committed(id) => {
                tracing::info!(commit = %id, "Committed engagement changes");
                report.record(PublishStep::Committed);
            }
            CommitOutcome::NothingToCommit => report.record(PublishStep::NothingToCommit),
        }
        Ok(())
    }
}
