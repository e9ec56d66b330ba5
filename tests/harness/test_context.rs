use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

use super::templates;

pub(crate) const ENGAGEMENT_FILE: &str = "engagement.toml";

/// Isolated workspace: template repository, extracted plugins, staging and a fake home.
pub(crate) struct TestContext {
    root: TempDir,
    repository: PathBuf,
    scripts: PathBuf,
    staging: PathBuf,
    home: PathBuf,
}

impl TestContext {
    pub(crate) fn new() -> Self {
        let root = TempDir::new().expect("failed to create temp dir");
        let repository = root.path().join("hpc-repo");
        let scripts = root.path().join("plugins");
        let staging = root.path().join("staging");
        let home = root.path().join("home");
        for dir in [&repository, &scripts, &staging, &home] {
            fs::create_dir_all(dir).expect("failed to create workspace dir");
        }
        templates::write_template_tree(&repository, &scripts, &templates::SCHEDULERS);
        Self { root, repository, scripts, staging, home }
    }

    pub(crate) fn root(&self) -> &Path {
        self.root.path()
    }

    pub(crate) fn repository(&self) -> &Path {
        &self.repository
    }

    pub(crate) fn scripts(&self) -> &Path {
        &self.scripts
    }

    pub(crate) fn staging(&self) -> &Path {
        &self.staging
    }

    pub(crate) fn settings_path(&self) -> PathBuf {
        self.repository.join("clusterforge.toml")
    }

    pub(crate) fn engagement_path(&self) -> PathBuf {
        self.repository.join(ENGAGEMENT_FILE)
    }

    /// `Customer-Engagements/<org>`, the git working copy.
    pub(crate) fn organization_dir(&self, organization: &str) -> PathBuf {
        self.repository.join("Customer-Engagements").join(organization)
    }

    pub(crate) fn contact_dir(&self, organization: &str, contact: &str) -> PathBuf {
        self.organization_dir(organization).join(contact)
    }

    /// Write `clusterforge.toml` pointing at this workspace, followed by `extra`.
    pub(crate) fn write_settings(&self, extra: &str) -> PathBuf {
        let content = format!(
            "[paths]\nscripts = {:?}\nrepository = {:?}\nstaging = {:?}\n\n{}",
            self.scripts.display().to_string(),
            self.repository.display().to_string(),
            self.staging.display().to_string(),
            extra
        );
        let path = self.settings_path();
        fs::write(&path, content).expect("failed to write settings");
        path
    }

    pub(crate) fn write_engagement(&self, content: &str) -> PathBuf {
        let path = self.engagement_path();
        fs::write(&path, content).expect("failed to write engagement");
        path
    }

    /// The binary, run from the template repository with an isolated home.
    pub(crate) fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("clusterforge").expect("binary should build");
        cmd.current_dir(&self.repository)
            .env("HOME", &self.home)
            .env_remove("CLUSTERFORGE_ACCESS_TOKEN")
            .env_remove("RUST_LOG");
        cmd
    }
}
