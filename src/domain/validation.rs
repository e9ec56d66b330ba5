//! Pure validators for engagement and cluster answers.
//!
//! Each validator takes raw text (or a raw number) and returns the parsed
//! value or a [`ValidationError`]. The engagement file loader and the
//! interactive wizard share them; neither retries on its own.

use thiserror::Error;

use crate::domain::Slug;

pub const MIN_WORKERS: u32 = 1;
pub const MAX_WORKERS: u32 = 100_000;
/// Licenses below this size are unusual; accepted with a warning.
pub const RECOMMENDED_MIN_WORKERS: u32 = 16;
pub const DEFAULT_WORKERS: u32 = MAX_WORKERS;

pub const DEFAULT_CLUSTER_NAME: &str = "HPC";
pub const DEFAULT_CONTACT: &str = "first-last";

const MIN_CASE_NUMBER: u32 = 1_000_000;
const MAX_CASE_NUMBER: u32 = 20_000_000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Organization name must contain at least one letter or number")]
    EmptyOrganization,

    #[error("Abbreviation '{0}' may only contain letters")]
    InvalidAbbreviation(String),

    #[error("Contact name '{0}' must contain at least one letter")]
    InvalidContact(String),

    #[error("Cluster name '{0}' must contain at least one letter or number")]
    InvalidClusterName(String),

    #[error("Worker count {0} is outside the licensable range 1-100000")]
    WorkerCountOutOfRange(u64),

    #[error("'{0}' is not a whole number")]
    NotANumber(String),

    #[error("MATLAB root '{0}' is not a file path")]
    InvalidMatlabRoot(String),

    #[error("A {field} is required for desktop submission on cluster '{cluster}'")]
    MissingDesktopField { cluster: String, field: &'static str },

    #[error("Hostname must not be empty")]
    EmptyHostname,

    #[error("Case number {0} is outside the expected range")]
    CaseNumberOutOfRange(u32),

    #[error("Case numbers are only recorded for the install team")]
    CaseNumberNotAllowed,

    #[error("At least one cluster is required")]
    NoClusters,

    #[error("Cluster '{cluster}' is defined twice for the {scheduler} scheduler")]
    DuplicateCluster { cluster: String, scheduler: String },
}

pub fn validate_organization(raw: &str) -> Result<Slug, ValidationError> {
    let slug = Slug::new(raw);
    if !slug.has_alphanumeric() {
        return Err(ValidationError::EmptyOrganization);
    }
    Ok(slug)
}

pub fn validate_abbreviation(raw: &str) -> Result<Option<String>, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ValidationError::InvalidAbbreviation(trimmed.to_string()));
    }
    Ok(Some(trimmed.to_string()))
}

pub fn validate_contact(raw: &str) -> Result<Slug, ValidationError> {
    if raw.trim().is_empty() {
        return Ok(Slug::from_normalized(DEFAULT_CONTACT));
    }
    let slug = Slug::new(raw);
    if !slug.has_letter() {
        return Err(ValidationError::InvalidContact(raw.trim().to_string()));
    }
    Ok(slug)
}

/// Returns the cluster slug and the profile name shown to MATLAB users.
pub fn validate_cluster_name(raw: &str) -> Result<(Slug, String), ValidationError> {
    let profile = raw.trim();
    // `hpc` is the config file placeholder; keep the default slug distinct from it.
    if profile.is_empty() || profile.eq_ignore_ascii_case(DEFAULT_CLUSTER_NAME) {
        return Ok((Slug::from_normalized(DEFAULT_CLUSTER_NAME), DEFAULT_CLUSTER_NAME.to_string()));
    }
    let slug = Slug::new(profile);
    if !slug.has_alphanumeric() {
        return Err(ValidationError::InvalidClusterName(profile.to_string()));
    }
    Ok((slug, profile.to_string()))
}

pub fn validate_worker_count(count: u64) -> Result<u32, ValidationError> {
    if count < u64::from(MIN_WORKERS) || count > u64::from(MAX_WORKERS) {
        return Err(ValidationError::WorkerCountOutOfRange(count));
    }
    Ok(count as u32)
}

/// Empty input selects [`DEFAULT_WORKERS`].
pub fn parse_worker_count(raw: &str) -> Result<u32, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(DEFAULT_WORKERS);
    }
    let count: u64 =
        trimmed.parse().map_err(|_| ValidationError::NotANumber(trimmed.to_string()))?;
    validate_worker_count(count)
}

pub fn validate_matlab_root(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if !trimmed.contains('/') && !trimmed.contains('\\') {
        return Err(ValidationError::InvalidMatlabRoot(trimmed.to_string()));
    }
    Ok(trimmed.to_string())
}

pub fn validate_hostname(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyHostname);
    }
    Ok(trimmed.to_string())
}

pub fn validate_case_number(number: u32) -> Result<u32, ValidationError> {
    if !(MIN_CASE_NUMBER..=MAX_CASE_NUMBER).contains(&number) {
        return Err(ValidationError::CaseNumberOutOfRange(number));
    }
    Ok(number)
}

/// Empty input skips the case number.
pub fn parse_case_number(raw: &str) -> Result<Option<u32>, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let number: u32 =
        trimmed.parse().map_err(|_| ValidationError::NotANumber(trimmed.to_string()))?;
    validate_case_number(number).map(Some)
}
