use std::path::{Path, PathBuf};

use crate::domain::{Scheduler, Slug};

pub const ENGAGEMENTS_DIR: &str = "Customer-Engagements";
pub const INTEGRATION_SCRIPTS_DIR: &str = "IntegrationScripts";
pub const README_FILE: &str = "README.md";

/// Where engagements live inside the repository checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryLayout {
    engagements: PathBuf,
}

impl RepositoryLayout {
    pub fn new(repository: &Path) -> Self {
        Self { engagements: repository.join(ENGAGEMENTS_DIR) }
    }

    /// The organization directory doubles as the engagement's git working copy.
    pub fn organization_dir(&self, organization: &Slug) -> PathBuf {
        self.engagements.join(organization.as_str())
    }

    pub fn contact_dir(&self, organization: &Slug, contact: &Slug) -> PathBuf {
        self.organization_dir(organization).join(contact.as_str())
    }
}

/// Tree produced for one contact, rooted either at staging or at the final location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactLayout {
    root: PathBuf,
    release: String,
}

impl ContactLayout {
    pub fn new(root: PathBuf, release: &str) -> Self {
        Self { root, release: release.to_string() }
    }

    /// `<staging>/clusterforge-<org>-<contact>`
    pub fn staging(staging_root: &Path, organization: &Slug, contact: &Slug, release: &str) -> Self {
        let dir = format!("clusterforge-{}-{}", organization, contact);
        Self::new(staging_root.join(dir), release)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn doc_dir(&self) -> PathBuf {
        self.root.join("doc")
    }

    pub fn pub_dir(&self) -> PathBuf {
        self.root.join("pub")
    }

    pub fn readme(&self) -> PathBuf {
        self.root.join(README_FILE)
    }

    /// `scripts/<scheduler>/<release>`
    pub fn release_dir(&self, scheduler: Scheduler) -> PathBuf {
        self.root.join("scripts").join(scheduler.name()).join(&self.release)
    }

    pub fn bin_dir(&self, scheduler: Scheduler) -> PathBuf {
        self.release_dir(scheduler).join("bin")
    }

    pub fn matlab_dir(&self, scheduler: Scheduler) -> PathBuf {
        self.release_dir(scheduler).join("matlab")
    }

    pub fn integration_scripts_dir(&self, scheduler: Scheduler, cluster: &Slug) -> PathBuf {
        self.matlab_dir(scheduler).join(INTEGRATION_SCRIPTS_DIR).join(cluster.as_str())
    }
}
