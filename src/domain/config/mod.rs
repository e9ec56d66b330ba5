//! Settings schema for clusterforge (`clusterforge.toml`).

pub mod parse;
pub mod paths;

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::AppError;

pub const DEFAULT_RELEASE: &str = "R2024a";
pub const DEFAULT_COMMIT_MESSAGE: &str = "Updated integration scripts.";
pub const INITIAL_COMMIT_MESSAGE: &str = "Initial commit.";
pub const ACCESS_TOKEN_ENV: &str = "CLUSTERFORGE_ACCESS_TOKEN";
pub const DEFAULT_AUTHOR_NAME: &str = "clusterforge";
pub const DEFAULT_AUTHOR_EMAIL: &str = "clusterforge@localhost";

/// Immutable per-run configuration, built once and passed by reference.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub scaffold: ScaffoldConfig,
    #[serde(default)]
    pub git: GitConfig,
    #[serde(default)]
    pub remote: RemoteConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        self.scaffold.validate()?;
        self.git.validate()?;
        self.remote.validate()?;
        if self.scaffold.submit_to_remote {
            self.remote_settings()?;
        }
        Ok(())
    }

    /// Resolve everything remote publication needs, or explain what is missing.
    pub fn remote_settings(&self) -> Result<RemoteSettings, AppError> {
        let api_url = self.remote.api_url.clone();
        let group_name = non_empty(&self.remote.group_name);
        let group_id = self.remote.group_id;
        let username = non_empty(&self.git.username);
        let access_token = non_empty(&self.git.access_token);

        let (Some(api_url), Some(group_name), Some(group_id), Some(username), Some(access_token)) =
            (api_url, group_name, group_id, username, access_token)
        else {
            let mut missing = Vec::new();
            if self.remote.api_url.is_none() {
                missing.push("remote.api_url");
            }
            if non_empty(&self.remote.group_name).is_none() {
                missing.push("remote.group_name");
            }
            if self.remote.group_id.is_none() {
                missing.push("remote.group_id");
            }
            if non_empty(&self.git.username).is_none() {
                missing.push("git.username");
            }
            if non_empty(&self.git.access_token).is_none() {
                missing.push("git.access_token");
            }
            return Err(AppError::Configuration(format!(
                "Remote submission requires: {}",
                missing.join(", ")
            )));
        };

        let api_url = normalize_api_url(api_url);
        let clone_base = match &self.remote.clone_base_url {
            Some(base) => base.trim_end_matches('/').to_string(),
            None => api_url.origin().ascii_serialization(),
        };

        Ok(RemoteSettings {
            api_url,
            group_name,
            group_id,
            clone_base,
            timeout: Duration::from_secs(self.remote.timeout_secs),
            credentials: GitCredentials { username, access_token },
        })
    }

    pub fn staging_root(&self) -> PathBuf {
        self.paths.staging.clone().unwrap_or_else(std::env::temp_dir)
    }

    /// Author and committer for commits made by the tool.
    pub fn commit_identity(&self) -> CommitIdentity {
        CommitIdentity {
            name: non_empty(&self.git.username).unwrap_or_else(|| DEFAULT_AUTHOR_NAME.to_string()),
            email: non_empty(&self.git.email).unwrap_or_else(|| DEFAULT_AUTHOR_EMAIL.to_string()),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

/// Ensure the API base ends in `/projects/` so project paths can be appended.
pub fn normalize_api_url(mut url: Url) -> Url {
    let trimmed = url.path().trim_end_matches('/').to_string();
    let path = if trimmed.ends_with("/projects") || trimmed == "projects" {
        format!("{}/", trimmed)
    } else {
        format!("{}/projects/", trimmed)
    };
    url.set_path(&path);
    url
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathsConfig {
    /// Directory holding the extracted plugin archives.
    #[serde(default = "std::env::temp_dir")]
    pub scripts: PathBuf,
    /// Repository root containing `Utilities/` and `Customer-Engagements/`.
    #[serde(default = "default_repository")]
    pub repository: PathBuf,
    /// Root for in-progress materialization; defaults to the OS temp dir.
    #[serde(default)]
    pub staging: Option<PathBuf>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self { scripts: std::env::temp_dir(), repository: default_repository(), staging: None }
    }
}

fn default_repository() -> PathBuf {
    PathBuf::from(".")
}

/// Which services team runs the engagement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    Install,
    Parallel,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScaffoldConfig {
    /// MATLAB release the scripts are generated for.
    #[serde(default = "default_release")]
    pub release: String,
    #[serde(default)]
    pub team: Option<Team>,
    /// Publish to the hosted remote after committing locally.
    #[serde(default)]
    pub submit_to_remote: bool,
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self { release: default_release(), team: None, submit_to_remote: false }
    }
}

impl ScaffoldConfig {
    fn validate(&self) -> Result<(), AppError> {
        if self.release.trim().is_empty() {
            return Err(AppError::config_error("scaffold.release must not be empty"));
        }
        if self.release.contains(['/', '\\']) {
            return Err(AppError::config_error("scaffold.release must be a single path segment"));
        }
        Ok(())
    }
}

fn default_release() -> String {
    DEFAULT_RELEASE.to_string()
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GitConfig {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Message for commits made to an existing repository.
    #[serde(default = "default_commit_message")]
    pub commit_message: String,
    #[serde(default)]
    pub access_token: Option<String>,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            username: None,
            email: None,
            commit_message: default_commit_message(),
            access_token: None,
        }
    }
}

impl fmt::Debug for GitConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitConfig")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("commit_message", &self.commit_message)
            .field("access_token", &self.access_token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl GitConfig {
    fn validate(&self) -> Result<(), AppError> {
        if self.commit_message.trim().is_empty() {
            return Err(AppError::config_error("git.commit_message must not be empty"));
        }
        Ok(())
    }
}

fn default_commit_message() -> String {
    DEFAULT_COMMIT_MESSAGE.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RemoteConfig {
    /// Hosting API base, e.g. `https://gitlab.example.com/api/v4/projects/`.
    #[serde(default)]
    pub api_url: Option<Url>,
    /// Group (namespace) path that holds one project per organization.
    #[serde(default)]
    pub group_name: Option<String>,
    #[serde(default)]
    pub group_id: Option<u64>,
    /// Base for clone URLs; defaults to the API URL origin.
    #[serde(default)]
    pub clone_base_url: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            group_name: None,
            group_id: None,
            clone_base_url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl RemoteConfig {
    fn validate(&self) -> Result<(), AppError> {
        if self.timeout_secs == 0 {
            return Err(AppError::config_error("remote.timeout_secs must be greater than 0"));
        }
        Ok(())
    }
}

fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitIdentity {
    pub name: String,
    pub email: String,
}

/// Username/access-token pair for HTTPS git operations.
#[derive(Clone, PartialEq, Eq)]
pub struct GitCredentials {
    pub username: String,
    pub access_token: String,
}

impl fmt::Debug for GitCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitCredentials")
            .field("username", &self.username)
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

/// Fully resolved remote publication settings.
#[derive(Debug, Clone)]
pub struct RemoteSettings {
    pub api_url: Url,
    pub group_name: String,
    pub group_id: u64,
    pub clone_base: String,
    pub timeout: Duration,
    pub credentials: GitCredentials,
}

impl RemoteSettings {
    /// `<clone_base>/<group>/<org>.git`
    pub fn clone_url(&self, organization: &str) -> String {
        format!("{}/{}/{}.git", self.clone_base, self.group_name, organization)
    }
}
