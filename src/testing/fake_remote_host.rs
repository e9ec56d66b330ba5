use std::sync::Mutex;

use crate::domain::{AppError, Slug};
use crate::ports::{RemoteHost, RemoteProject};

pub const FAKE_PROJECT_ID: u64 = 101;

#[derive(Debug)]
pub struct FakeRemoteHost {
    pub exists: Mutex<bool>,
    pub lookup_failure: Mutex<Option<u16>>,
    pub created: Mutex<Vec<Slug>>,
    pub variables: Mutex<Vec<(u64, String, String)>>,
}

impl FakeRemoteHost {
    pub fn new(exists: bool) -> Self {
        Self {
            exists: Mutex::new(exists),
            lookup_failure: Mutex::new(None),
            created: Mutex::new(Vec::new()),
            variables: Mutex::new(Vec::new()),
        }
    }

    pub fn fail_lookup_with(&self, status: u16) {
        *self.lookup_failure.lock().unwrap() = Some(status);
    }

    pub fn created_projects(&self) -> Vec<Slug> {
        self.created.lock().unwrap().clone()
    }

    pub fn variables(&self) -> Vec<(u64, String, String)> {
        self.variables.lock().unwrap().clone()
    }

    pub fn next_project_id(&self) -> u64 {
        FAKE_PROJECT_ID
    }
}

impl RemoteHost for FakeRemoteHost {
    fn project_exists(&self, _organization: &Slug) -> Result<bool, AppError> {
        if let Some(status) = *self.lookup_failure.lock().unwrap() {
            return Err(AppError::RemoteApi { status, body: "lookup failed".into() });
        }
        Ok(*self.exists.lock().unwrap())
    }

    fn create_project(&self, organization: &Slug) -> Result<RemoteProject, AppError> {
        self.created.lock().unwrap().push(organization.clone());
        *self.exists.lock().unwrap() = true;
        Ok(RemoteProject {
            id: FAKE_PROJECT_ID,
            web_url: Some(format!("https://git.example.com/customers/{}", organization)),
        })
    }

    fn create_project_variable(&self, project_id: u64, key: &str, value: &str) -> Result<(), AppError> {
        self.variables.lock().unwrap().push((project_id, key.to_string(), value.to_string()));
        Ok(())
    }
}
