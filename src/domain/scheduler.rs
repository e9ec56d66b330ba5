use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Job schedulers with a published MATLAB Parallel Server plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheduler {
    #[default]
    Slurm,
    Pbs,
    Lsf,
    GridEngine,
    HtCondor,
    AwsBatch,
    Kubernetes,
}

impl Scheduler {
    /// All schedulers, in menu order.
    pub const ALL: [Scheduler; 7] = [
        Scheduler::Slurm,
        Scheduler::Pbs,
        Scheduler::Lsf,
        Scheduler::GridEngine,
        Scheduler::HtCondor,
        Scheduler::AwsBatch,
        Scheduler::Kubernetes,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Scheduler::Slurm => "slurm",
            Scheduler::Pbs => "pbs",
            Scheduler::Lsf => "lsf",
            Scheduler::GridEngine => "gridengine",
            Scheduler::HtCondor => "htcondor",
            Scheduler::AwsBatch => "awsbatch",
            Scheduler::Kubernetes => "kubernetes",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Scheduler::Slurm => "Slurm",
            Scheduler::Pbs => "PBS",
            Scheduler::Lsf => "LSF",
            Scheduler::GridEngine => "Grid Engine",
            Scheduler::HtCondor => "HTCondor",
            Scheduler::AwsBatch => "AWS Batch",
            Scheduler::Kubernetes => "Kubernetes",
        }
    }

    /// Whether `Utilities/config-scripts/<scheduler>/bin` ships for this scheduler.
    pub fn has_helper_bin(&self) -> bool {
        !self.is_plugin_only()
    }

    /// Whether the scheduler helper bundle (with its `discover` script) ships.
    pub fn has_discover_script(&self) -> bool {
        !self.is_plugin_only()
    }

    /// Conf files set a queue through `QueueName` unless the scheduler uses another key.
    pub fn uses_queue_name(&self) -> bool {
        !matches!(self, Scheduler::Pbs | Scheduler::Lsf | Scheduler::GridEngine)
    }

    pub fn uses_partition(&self) -> bool {
        !matches!(self, Scheduler::Slurm)
    }

    /// Directory name of the extracted upstream plugin archive.
    pub fn plugin_dir_name(&self) -> String {
        format!("matlab-parallel-{}-plugin-main", self.name())
    }

    fn is_plugin_only(&self) -> bool {
        matches!(self, Scheduler::AwsBatch | Scheduler::Kubernetes | Scheduler::HtCondor)
    }
}

impl FromStr for Scheduler {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let lowered = value.trim().to_lowercase();
        Scheduler::ALL
            .into_iter()
            .find(|s| s.name() == lowered)
            .ok_or_else(|| format!("unknown scheduler '{}'", value.trim()))
    }
}

impl fmt::Display for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
