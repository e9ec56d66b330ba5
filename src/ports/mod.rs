mod git;
mod remote_host;

pub use git::{CommitOutcome, Git};
pub use remote_host::{RemoteHost, RemoteProject};
