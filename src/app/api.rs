//! API Facade for the application.
//!
//! Glues settings loading, context creation and command execution together.

use std::path::{Path, PathBuf};

use crate::adapters::{Git2Repository, GitLabClient};
use crate::app::cancellation::CancellationToken;
use crate::app::commands;
use crate::app::config::{load_config, load_engagement};
use crate::app::{AppContext, RemoteBinding};
use crate::domain::config::paths;

pub use crate::app::commands::plan::PlanOutcome;
pub use crate::app::commands::scaffold::ScaffoldOutcome;
pub use crate::domain::{AppConfig, AppError, Engagement, EngagementFile, Team};

/// Build the production context. `local_only` forces publication to stay local.
fn create_context(
    mut config: AppConfig,
    local_only: bool,
    cancel: CancellationToken,
) -> Result<AppContext<Git2Repository, GitLabClient>, AppError> {
    if local_only {
        config.scaffold.submit_to_remote = false;
    }

    let remote = if config.scaffold.submit_to_remote {
        let settings = config.remote_settings()?;
        let host = GitLabClient::new(&settings)?;
        Some(RemoteBinding { host, settings })
    } else {
        None
    };
    let credentials = remote.as_ref().map(|binding| binding.settings.credentials.clone());
    let git = Git2Repository::new(config.commit_identity(), credentials);

    Ok(AppContext::new(config, git, remote, cancel))
}

/// Load settings from `config_path`, or `./clusterforge.toml` when absent.
pub fn settings(config_path: Option<&Path>) -> Result<AppConfig, AppError> {
    load_config(config_path)
}

/// Generate, commit and publish the integration scripts for an engagement file.
pub fn scaffold(
    engagement_path: &Path,
    config_path: Option<&Path>,
    local_only: bool,
    cancel: CancellationToken,
) -> Result<ScaffoldOutcome, AppError> {
    let config = load_config(config_path)?;
    let engagement = load_engagement(engagement_path, config.scaffold.team)?;
    let ctx = create_context(config, local_only, cancel)?;
    commands::scaffold::execute(&ctx, &engagement)
}

/// Show what `scaffold` would copy, prune and rewrite.
pub fn plan(engagement_path: &Path, config_path: Option<&Path>) -> Result<PlanOutcome, AppError> {
    let config = load_config(config_path)?;
    let engagement = load_engagement(engagement_path, config.scaffold.team)?;
    Ok(commands::plan::execute(&config, &engagement))
}

/// Validate and write an engagement definition.
pub fn new_engagement(
    output: &Path,
    file: &EngagementFile,
    team: Option<Team>,
) -> Result<Engagement, AppError> {
    commands::new_engagement::execute(output, file, team)
}

/// Write the sample settings file, to `./clusterforge.toml` by default.
pub fn init_config(path: Option<&Path>) -> Result<PathBuf, AppError> {
    let target = match path {
        Some(path) => path.to_path_buf(),
        None => paths::settings(&std::env::current_dir()?),
    };
    commands::init_config::execute(&target)
}
