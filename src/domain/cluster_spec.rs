use serde::{Deserialize, Serialize};

use crate::domain::validation::{self, ValidationError};
use crate::domain::{ConfigVariant, Scheduler, Slug, SubmissionType};

/// Resolved configuration for one target cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterSpec {
    /// Slug used in directory and file names.
    pub name: Slug,
    /// Name of the MATLAB cluster profile, as the user typed it.
    pub profile_name: String,
    pub scheduler: Scheduler,
    pub submission: SubmissionType,
    pub workers: u32,
    pub shared_filesystem: bool,
    /// Present when the submission type includes desktop.
    pub matlab_root: Option<String>,
    /// Present when the submission type includes desktop.
    pub hostname: Option<String>,
    pub custom_mpi: bool,
    pub include_remote_config: bool,
}

impl ClusterSpec {
    pub fn required_variants(&self) -> Vec<ConfigVariant> {
        ConfigVariant::required(self.submission, self.include_remote_config)
    }

    pub fn is_below_recommended_workers(&self) -> bool {
        self.workers < validation::RECOMMENDED_MIN_WORKERS
    }
}

/// A `[[clusters]]` entry of an engagement file, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClusterEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub scheduler: Scheduler,
    #[serde(default)]
    pub submission: SubmissionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workers: Option<u64>,
    #[serde(default = "default_true")]
    pub shared_filesystem: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matlab_root: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(default)]
    pub custom_mpi: bool,
    #[serde(default)]
    pub include_remote_config: bool,
}

fn default_true() -> bool {
    true
}

impl ClusterEntry {
    pub fn validate(&self) -> Result<ClusterSpec, ValidationError> {
        let (name, profile_name) =
            validation::validate_cluster_name(self.name.as_deref().unwrap_or_default())?;
        let workers = match self.workers {
            Some(count) => validation::validate_worker_count(count)?,
            None => validation::DEFAULT_WORKERS,
        };

        let (matlab_root, hostname) = if self.submission.includes_desktop() {
            let root = self.matlab_root.as_deref().ok_or_else(|| {
                ValidationError::MissingDesktopField {
                    cluster: name.to_string(),
                    field: "MATLAB root",
                }
            })?;
            let host = self.hostname.as_deref().ok_or_else(|| {
                ValidationError::MissingDesktopField { cluster: name.to_string(), field: "hostname" }
            })?;
            (
                Some(validation::validate_matlab_root(root)?),
                Some(validation::validate_hostname(host)?),
            )
        } else {
            (None, None)
        };

        Ok(ClusterSpec {
            name,
            profile_name,
            scheduler: self.scheduler,
            submission: self.submission,
            workers,
            shared_filesystem: self.shared_filesystem,
            matlab_root,
            hostname,
            custom_mpi: self.custom_mpi,
            include_remote_config: self.include_remote_config,
        })
    }
}
