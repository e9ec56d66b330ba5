//! Task planning: which fragments are copied, pruned and rewritten for a cluster.
//!
//! Planning is pure. Paths are computed from the [`TemplateStore`] and the
//! [`ContactLayout`]; nothing is read or written here.

use std::ffi::OsStr;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::domain::layout::ContactLayout;
use crate::domain::template_store::{PCT_DEBUG_DIR, PCT_DEBUG_FILES};
use crate::domain::template_tokens::{TemplateTokenMap, rename_placeholder};
use crate::domain::{ClusterSpec, ConfigVariant, Engagement, Scheduler, TemplateStore};

/// Files shipped with the shared fragments that never belong in a delivery.
pub const ALWAYS_PRUNED: [&str; 3] = ["mdcs.rc", "licenseCheck.m", "parseGenericTemplateFile.m"];
pub const MPI_CONFIG_FILE: &str = "mpiLibConf.m";
pub const DISCOVER_SCRIPT: &str = "discover";

/// What a copy task delivers. Availability is decided per slot, by capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CopySlot {
    GettingStartedDoc,
    DocReadme,
    PubDir,
    HelperBin,
    PctDebug,
    SchedulerHelpers,
    CommonHelpers,
    ConfFiles,
    MatlabFiles,
    Plugin,
}

impl CopySlot {
    pub fn name(&self) -> &'static str {
        match self {
            CopySlot::GettingStartedDoc => "getting-started-doc",
            CopySlot::DocReadme => "doc-readme",
            CopySlot::PubDir => "pub",
            CopySlot::HelperBin => "helper-bin",
            CopySlot::PctDebug => "pct-debug",
            CopySlot::SchedulerHelpers => "scheduler-helpers",
            CopySlot::CommonHelpers => "common-helpers",
            CopySlot::ConfFiles => "conf-files",
            CopySlot::MatlabFiles => "matlab-files",
            CopySlot::Plugin => "plugin",
        }
    }

    pub fn is_available_for(&self, scheduler: Scheduler) -> bool {
        match self {
            CopySlot::HelperBin => scheduler.has_helper_bin(),
            CopySlot::SchedulerHelpers => scheduler.has_discover_script(),
            _ => true,
        }
    }
}

impl fmt::Display for CopySlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCopyTask {
    pub slot: CopySlot,
    pub source: PathBuf,
    pub destination: PathBuf,
    pub is_directory: bool,
}

impl FileCopyTask {
    fn file(slot: CopySlot, source: PathBuf, destination: PathBuf) -> Self {
        Self { slot, source, destination, is_directory: false }
    }

    fn directory(slot: CopySlot, source: PathBuf, destination: PathBuf) -> Self {
        Self { slot, source, destination, is_directory: true }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PruneReason {
    NotDelivered,
    CustomMpiDisabled,
    VariantNotRequired(ConfigVariant),
}

impl fmt::Display for PruneReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PruneReason::NotDelivered => f.write_str("not delivered"),
            PruneReason::CustomMpiDisabled => f.write_str("custom MPI disabled"),
            PruneReason::VariantNotRequired(variant) => write!(f, "{} not required", variant),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PruneTask {
    pub path: PathBuf,
    pub reason: PruneReason,
}

/// Rewrite `path` with `tokens`, then rename it to `renamed_to`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateTask {
    pub path: PathBuf,
    pub renamed_to: PathBuf,
    pub variant: ConfigVariant,
    pub tokens: TemplateTokenMap,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterPlan {
    pub cluster: ClusterSpec,
    pub copies: Vec<FileCopyTask>,
    pub prunes: Vec<PruneTask>,
    pub templates: Vec<TemplateTask>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngagementPlan {
    /// Copied once per engagement, before any cluster.
    pub shared: Vec<FileCopyTask>,
    pub clusters: Vec<ClusterPlan>,
}

pub fn plan_engagement(
    engagement: &Engagement,
    store: &TemplateStore,
    layout: &ContactLayout,
) -> EngagementPlan {
    // Clusters on one scheduler share its matlab directory, so one custom MPI
    // request keeps the MPI config for all of them.
    let custom_mpi: Vec<Scheduler> =
        engagement.clusters.iter().filter(|c| c.custom_mpi).map(|c| c.scheduler).collect();
    let clusters = engagement
        .clusters
        .iter()
        .map(|spec| {
            let mut plan = plan_cluster(spec, store, layout);
            if custom_mpi.contains(&spec.scheduler) {
                plan.prunes.retain(|task| task.reason != PruneReason::CustomMpiDisabled);
            }
            plan
        })
        .collect();

    EngagementPlan { shared: plan_shared(store, layout), clusters }
}

pub fn plan_shared(store: &TemplateStore, layout: &ContactLayout) -> Vec<FileCopyTask> {
    let doc = layout.doc_dir();
    vec![
        FileCopyTask::file(
            CopySlot::GettingStartedDoc,
            store.getting_started_doc(),
            doc.join(file_name_of(&store.getting_started_doc())),
        ),
        FileCopyTask::file(
            CopySlot::DocReadme,
            store.doc_readme(),
            doc.join(file_name_of(&store.doc_readme())),
        ),
        FileCopyTask::directory(CopySlot::PubDir, store.pub_dir(), layout.pub_dir()),
    ]
}

pub fn plan_cluster(spec: &ClusterSpec, store: &TemplateStore, layout: &ContactLayout) -> ClusterPlan {
    let scheduler = spec.scheduler;
    let matlab = layout.matlab_dir(scheduler);
    let integration = layout.integration_scripts_dir(scheduler, &spec.name);

    let mut copies = vec![FileCopyTask::directory(
        CopySlot::HelperBin,
        store.helper_bin(scheduler),
        layout.bin_dir(scheduler),
    )];
    copies.extend(PCT_DEBUG_FILES.iter().map(|file| {
        FileCopyTask::file(CopySlot::PctDebug, store.pct_debug(file), matlab.join(PCT_DEBUG_DIR).join(file))
    }));
    copies.extend([
        FileCopyTask::directory(CopySlot::SchedulerHelpers, store.scheduler_helpers(scheduler), matlab.clone()),
        FileCopyTask::directory(CopySlot::CommonHelpers, store.common_helpers(), matlab.clone()),
        FileCopyTask::directory(CopySlot::ConfFiles, store.conf_files(), matlab.clone()),
        FileCopyTask::directory(CopySlot::MatlabFiles, store.matlab_files(), matlab.clone()),
        FileCopyTask::directory(CopySlot::Plugin, store.plugin_dir(scheduler), integration.clone()),
    ]);
    copies.retain(|task| task.slot.is_available_for(scheduler));

    let mut prunes: Vec<PruneTask> = ALWAYS_PRUNED
        .iter()
        .map(|file| PruneTask { path: matlab.join(file), reason: PruneReason::NotDelivered })
        .collect();
    prunes.push(PruneTask { path: integration.join(DISCOVER_SCRIPT), reason: PruneReason::NotDelivered });
    if !spec.custom_mpi {
        prunes.push(PruneTask { path: matlab.join(MPI_CONFIG_FILE), reason: PruneReason::CustomMpiDisabled });
    }

    let required = spec.required_variants();
    prunes.extend(ConfigVariant::ALL.into_iter().filter(|v| !required.contains(v)).map(|variant| {
        PruneTask { path: matlab.join(variant.file_name()), reason: PruneReason::VariantNotRequired(variant) }
    }));

    let tokens = TemplateTokenMap::for_cluster(spec);
    let templates = required
        .into_iter()
        .map(|variant| {
            let renamed = rename_placeholder(variant.file_name(), ConfigVariant::PLACEHOLDER_PREFIX, &spec.name)
                .unwrap_or_else(|| variant.file_name().to_string());
            TemplateTask {
                path: matlab.join(variant.file_name()),
                renamed_to: matlab.join(renamed),
                variant,
                tokens: tokens.resolve(variant, scheduler),
            }
        })
        .collect();

    ClusterPlan { cluster: spec.clone(), copies, prunes, templates }
}

fn file_name_of(path: &Path) -> &OsStr {
    path.file_name().unwrap_or(path.as_os_str())
}
