use std::fmt;

/// What is known about the hosted counterpart of an engagement repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteStatus {
    /// Not queried; publication is local only.
    Unchecked,
    Exists,
    Absent,
}

/// Observed state of an engagement repository before publication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepoState {
    pub has_local_repo: bool,
    pub remote: RemoteStatus,
}

/// How the publisher brings the local copy in line with the remote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncAction {
    Clone,
    Fetch,
    /// Create locally, create the hosted project, then publish `main`.
    CreateRemote,
    LocalOnly,
}

impl RepoState {
    pub fn sync_action(&self) -> SyncAction {
        match (self.remote, self.has_local_repo) {
            (RemoteStatus::Exists, false) => SyncAction::Clone,
            (RemoteStatus::Exists, true) => SyncAction::Fetch,
            (RemoteStatus::Absent, _) => SyncAction::CreateRemote,
            (RemoteStatus::Unchecked, _) => SyncAction::LocalOnly,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishStep {
    Cloned,
    Fetched,
    Initialized,
    Committed,
    NothingToCommit,
    RemoteCreated,
    Pushed,
    Published,
}

impl fmt::Display for PublishStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PublishStep::Cloned => "cloned",
            PublishStep::Fetched => "fetched",
            PublishStep::Initialized => "initialized",
            PublishStep::Committed => "committed",
            PublishStep::NothingToCommit => "nothing to commit",
            PublishStep::RemoteCreated => "remote created",
            PublishStep::Pushed => "pushed",
            PublishStep::Published => "published",
        };
        f.write_str(label)
    }
}

/// Steps taken by one publication, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishReport {
    steps: Vec<PublishStep>,
}

impl PublishReport {
    pub fn record(&mut self, step: PublishStep) {
        self.steps.push(step);
    }

    pub fn steps(&self) -> &[PublishStep] {
        &self.steps
    }

    pub fn contains(&self, step: PublishStep) -> bool {
        self.steps.contains(&step)
    }

    /// True when this run created a new commit.
    pub fn created_commit(&self) -> bool {
        self.contains(PublishStep::Committed) || self.contains(PublishStep::Initialized)
    }
}

impl fmt::Display for PublishReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<String> = self.steps.iter().map(ToString::to_string).collect();
        f.write_str(&labels.join(", "))
    }
}
