use crate::domain::{AppError, Slug};

/// A project created on the hosting service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteProject {
    pub id: u64,
    pub web_url: Option<String>,
}

/// Project lookup and creation on the git hosting service.
pub trait RemoteHost {
    /// Whether the organization's project exists in the configured group.
    fn project_exists(&self, organization: &Slug) -> Result<bool, AppError>;

    fn create_project(&self, organization: &Slug) -> Result<RemoteProject, AppError>;

    fn create_project_variable(&self, project_id: u64, key: &str, value: &str) -> Result<(), AppError>;
}
