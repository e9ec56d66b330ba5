//! Hosting API client (GitLab v4 projects API) using reqwest.

use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::{AppError, RemoteSettings, Slug};
use crate::ports::{RemoteHost, RemoteProject};

const PRIVATE_TOKEN: &str = "PRIVATE-TOKEN";

#[derive(Clone)]
pub struct GitLabClient {
    api_url: Url,
    group_name: String,
    group_id: u64,
    access_token: String,
    client: Client,
}

impl std::fmt::Debug for GitLabClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitLabClient")
            .field("api_url", &self.api_url)
            .field("group_name", &self.group_name)
            .field("group_id", &self.group_id)
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

impl GitLabClient {
    pub fn new(settings: &RemoteSettings) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| AppError::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            api_url: settings.api_url.clone(),
            group_name: settings.group_name.clone(),
            group_id: settings.group_id,
            access_token: settings.credentials.access_token.clone(),
            client,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, AppError> {
        self.api_url
            .join(path)
            .map_err(|e| AppError::config_error(format!("Invalid API path '{}': {}", path, e)))
    }

    fn failure(response: Response) -> AppError {
        let status = response.status().as_u16();
        let body = response.text().unwrap_or_default();
        AppError::RemoteApi { status, body: body.trim().to_string() }
    }
}

#[derive(Debug, Serialize)]
struct CreateProjectRequest<'a> {
    name: &'a str,
    namespace_id: u64,
}

#[derive(Debug, Deserialize)]
struct ProjectResponse {
    id: u64,
    #[serde(default)]
    web_url: Option<String>,
}

#[derive(Debug, Serialize)]
struct CreateVariableRequest<'a> {
    key: &'a str,
    value: &'a str,
}

impl RemoteHost for GitLabClient {
    fn project_exists(&self, organization: &Slug) -> Result<bool, AppError> {
        let url = self.endpoint(&format!("{}%2F{}", self.group_name, organization))?;
        tracing::debug!(%url, "Checking for remote project");
        let response = self
            .client
            .get(url)
            .header(PRIVATE_TOKEN, &self.access_token)
            .send()
            .map_err(|e| AppError::Http(e.to_string()))?;

        match response.status() {
            StatusCode::OK => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            _ => Err(Self::failure(response)),
        }
    }

    fn create_project(&self, organization: &Slug) -> Result<RemoteProject, AppError> {
        let request = CreateProjectRequest { name: organization.as_str(), namespace_id: self.group_id };
        let response = self
            .client
            .post(self.api_url.clone())
            .header(PRIVATE_TOKEN, &self.access_token)
            .json(&request)
            .send()
            .map_err(|e| AppError::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::failure(response));
        }
        let status = response.status().as_u16();
        let body = response.text().map_err(|e| AppError::Http(e.to_string()))?;
        let project: ProjectResponse = serde_json::from_str(&body).map_err(|e| AppError::RemoteApi {
            status,
            body: format!("Failed to parse project response: {}", e),
        })?;
        Ok(RemoteProject { id: project.id, web_url: project.web_url })
    }

    fn create_project_variable(&self, project_id: u64, key: &str, value: &str) -> Result<(), AppError> {
        let url = self.endpoint(&format!("{}/variables", project_id))?;
        let response = self
            .client
            .post(url)
            .header(PRIVATE_TOKEN, &self.access_token)
            .json(&CreateVariableRequest { key, value })
            .send()
            .map_err(|e| AppError::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::failure(response));
        }
        Ok(())
    }
}
