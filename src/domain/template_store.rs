use std::path::{Path, PathBuf};

use crate::domain::config::AppConfig;
use crate::domain::{AppError, Scheduler};

pub const UTILITIES_DIR: &str = "Utilities";
pub const GETTING_STARTED_DOC: &str = "Getting_Started_With_Serial_And_Parallel_MATLAB.docx";
pub const DOC_README: &str = "README.txt";
pub const PCT_DEBUG_DIR: &str = "+pctDebug";
pub const PCT_DEBUG_FILES: [&str; 4] =
    ["ClientJavaLogging.p", "ClientJavaMessageHandler.p", "Finalize.p", "Init.p"];

/// Read-only view of the reusable template fragments.
///
/// Shared fragments live under `<repository>/Utilities`; the upstream
/// scheduler plugins are extracted side by side under the scripts path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateStore {
    utilities: PathBuf,
    plugins: PathBuf,
}

impl TemplateStore {
    pub fn new(utilities: PathBuf, plugins: PathBuf) -> Self {
        Self { utilities, plugins }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.paths.repository.join(UTILITIES_DIR), config.paths.scripts.clone())
    }

    pub fn utilities(&self) -> &Path {
        &self.utilities
    }

    pub fn getting_started_doc(&self) -> PathBuf {
        self.utilities.join("doc").join(GETTING_STARTED_DOC)
    }

    pub fn doc_readme(&self) -> PathBuf {
        self.utilities.join("doc").join(DOC_README)
    }

    pub fn pub_dir(&self) -> PathBuf {
        self.utilities.join("pub")
    }

    pub fn helper_bin(&self, scheduler: Scheduler) -> PathBuf {
        self.utilities.join("config-scripts").join(scheduler.name()).join("bin")
    }

    pub fn pct_debug(&self, file: &str) -> PathBuf {
        self.utilities.join(PCT_DEBUG_DIR).join(file)
    }

    /// Scheduler-specific helper functions, including the `discover` script.
    pub fn scheduler_helpers(&self, scheduler: Scheduler) -> PathBuf {
        self.utilities.join("helper-fcn").join(scheduler.name())
    }

    pub fn common_helpers(&self) -> PathBuf {
        self.utilities.join("helper-fcn").join("common")
    }

    pub fn conf_files(&self) -> PathBuf {
        self.utilities.join("conf-files")
    }

    pub fn matlab_files(&self) -> PathBuf {
        self.utilities.join("matlab-files")
    }

    pub fn plugin_dir(&self, scheduler: Scheduler) -> PathBuf {
        self.plugins.join(scheduler.plugin_dir_name())
    }

    /// Check the fragments every run needs before anything is written.
    pub fn verify(&self, schedulers: &[Scheduler]) -> Result<(), AppError> {
        if !self.utilities.is_dir() {
            return Err(AppError::TemplateMissing(self.utilities.clone()));
        }
        for scheduler in schedulers {
            let plugin = self.plugin_dir(*scheduler);
            if !plugin.is_dir() {
                return Err(AppError::TemplateMissing(plugin));
            }
        }
        Ok(())
    }
}
