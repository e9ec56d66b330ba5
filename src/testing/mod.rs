mod fake_git;
mod fake_remote_host;
mod template_fixture;

pub use fake_git::{FakeGit, GitCall};
pub use fake_remote_host::FakeRemoteHost;
pub use template_fixture::TemplateFixture;
