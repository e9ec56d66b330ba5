use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::domain::config::AppConfig;
use crate::domain::template_store::{
    DOC_README, GETTING_STARTED_DOC, PCT_DEBUG_DIR, PCT_DEBUG_FILES, UTILITIES_DIR,
};
use crate::domain::{ConfigVariant, Scheduler, TemplateStore};

const CONF_TEMPLATE: &str = concat!(
    "# Cluster profile generated for cluster_name\n",
    "Name = profile_name\n",
    "NumWorkers = 100000\n",
    "ClusterMatlabRoot = \n",
    "ClusterHost =\n",
    "QueueName = \n",
    "Partition = \n",
    "HasSharedFilesystem = true\n",
    "JobStorageLocation = /home/cluster_name\n",
);

/// A throwaway template tree: `repo/Utilities`, extracted plugins under
/// `scripts/`, and an empty `staging/` root.
pub struct TemplateFixture {
    dir: TempDir,
}

impl TemplateFixture {
    pub fn new(schedulers: &[Scheduler]) -> Self {
        let fixture = Self { dir: TempDir::new().unwrap() };
        fixture.write_utilities();
        for scheduler in schedulers {
            fixture.write_scheduler(*scheduler);
        }
        fs::create_dir_all(fixture.staging()).unwrap();
        fixture
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn repository(&self) -> PathBuf {
        self.root().join("repo")
    }

    pub fn utilities(&self) -> PathBuf {
        self.repository().join(UTILITIES_DIR)
    }

    pub fn scripts(&self) -> PathBuf {
        self.root().join("scripts")
    }

    pub fn staging(&self) -> PathBuf {
        self.root().join("staging")
    }

    pub fn store(&self) -> TemplateStore {
        TemplateStore::new(self.utilities(), self.scripts())
    }

    /// Local-only settings pointing at this fixture.
    pub fn config(&self) -> AppConfig {
        let mut config = AppConfig::default();
        config.paths.repository = self.repository();
        config.paths.scripts = self.scripts();
        config.paths.staging = Some(self.staging());
        config
    }

    fn write(&self, path: PathBuf, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn write_utilities(&self) {
        let utilities = self.utilities();
        self.write(utilities.join("doc").join(GETTING_STARTED_DOC), "getting started");
        self.write(utilities.join("doc").join(DOC_README), "docs");
        self.write(utilities.join("pub").join("index.html"), "<html></html>");
        for file in PCT_DEBUG_FILES {
            self.write(utilities.join(PCT_DEBUG_DIR).join(file), "p-code");
        }
        self.write(utilities.join("helper-fcn/common/configCluster.m"), "function configCluster\n");
        for variant in ConfigVariant::ALL {
            self.write(utilities.join("conf-files").join(variant.file_name()), CONF_TEMPLATE);
        }
        for file in ["mdcs.rc", "licenseCheck.m", "parseGenericTemplateFile.m", "mpiLibConf.m"] {
            self.write(utilities.join("matlab-files").join(file), "% shipped\n");
        }
        self.write(utilities.join("matlab-files/ClusterInfo.m"), "classdef ClusterInfo\n");
    }

    fn write_scheduler(&self, scheduler: Scheduler) {
        let utilities = self.utilities();
        if scheduler.has_helper_bin() {
            self.write(
                utilities.join("config-scripts").join(scheduler.name()).join("bin/submit.sh"),
                "#!/bin/sh\n",
            );
        }
        if scheduler.has_discover_script() {
            let helpers = utilities.join("helper-fcn").join(scheduler.name());
            self.write(helpers.join("discover"), "#!/bin/sh\n");
        }
        let plugin = self.scripts().join(scheduler.plugin_dir_name());
        self.write(plugin.join("independentSubmitFcn.m"), "function independentSubmitFcn\n");
        self.write(plugin.join("communicatingSubmitFcn.m"), "function communicatingSubmitFcn\n");
        self.write(plugin.join("discover"), "#!/bin/sh\n");
    }
}
