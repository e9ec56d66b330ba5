use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Where jobs are submitted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionType {
    /// From a MATLAB desktop session outside the cluster.
    Desktop,
    /// From a MATLAB session on the cluster itself.
    Cluster,
    #[default]
    Both,
}

impl SubmissionType {
    pub const ALL: [SubmissionType; 3] =
        [SubmissionType::Desktop, SubmissionType::Cluster, SubmissionType::Both];

    pub fn name(&self) -> &'static str {
        match self {
            SubmissionType::Desktop => "desktop",
            SubmissionType::Cluster => "cluster",
            SubmissionType::Both => "both",
        }
    }

    pub fn includes_desktop(&self) -> bool {
        matches!(self, SubmissionType::Desktop | SubmissionType::Both)
    }

    pub fn includes_cluster(&self) -> bool {
        matches!(self, SubmissionType::Cluster | SubmissionType::Both)
    }
}

impl FromStr for SubmissionType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let lowered = value.trim().to_lowercase();
        SubmissionType::ALL
            .into_iter()
            .find(|s| s.name() == lowered)
            .ok_or_else(|| format!("unknown submission type '{}'", value.trim()))
    }
}

impl fmt::Display for SubmissionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The generated cluster profile config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConfigVariant {
    Desktop,
    Cluster,
    RemoteDesktop,
    RemoteCluster,
}

impl ConfigVariant {
    pub const ALL: [ConfigVariant; 4] = [
        ConfigVariant::Desktop,
        ConfigVariant::Cluster,
        ConfigVariant::RemoteDesktop,
        ConfigVariant::RemoteCluster,
    ];

    /// Prefix shared by every config file name; replaced by the cluster slug on rename.
    pub const PLACEHOLDER_PREFIX: &'static str = "hpc";

    pub fn file_name(&self) -> &'static str {
        match self {
            ConfigVariant::Desktop => "hpcDesktop.conf",
            ConfigVariant::Cluster => "hpcCluster.conf",
            ConfigVariant::RemoteDesktop => "hpcRemoteDesktop.conf",
            ConfigVariant::RemoteCluster => "hpcRemoteCluster.conf",
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, ConfigVariant::RemoteDesktop | ConfigVariant::RemoteCluster)
    }

    /// Cluster-side variants run on the cluster and need no MATLAB root or host.
    pub fn is_cluster_side(&self) -> bool {
        matches!(self, ConfigVariant::Cluster | ConfigVariant::RemoteCluster)
    }

    pub fn applies_to(&self, submission: SubmissionType) -> bool {
        if self.is_cluster_side() {
            submission.includes_cluster()
        } else {
            submission.includes_desktop()
        }
    }

    /// Variants required for a submission type and remote-config choice.
    pub fn required(submission: SubmissionType, include_remote: bool) -> Vec<ConfigVariant> {
        ConfigVariant::ALL
            .into_iter()
            .filter(|variant| variant.applies_to(submission))
            .filter(|variant| !variant.is_remote() || include_remote)
            .collect()
    }
}

impl fmt::Display for ConfigVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}
