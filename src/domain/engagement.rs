use serde::{Deserialize, Serialize};

use crate::domain::cluster_spec::{ClusterEntry, ClusterSpec};
use crate::domain::config::Team;
use crate::domain::validation::{self, ValidationError};
use crate::domain::{AppError, Slug};

/// A customer scaffolding session: one organization/contact pair and its clusters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Engagement {
    pub organization: Slug,
    pub abbreviation: Option<String>,
    pub contact: Slug,
    pub case_number: Option<u32>,
    pub clusters: Vec<ClusterSpec>,
}

/// On-disk engagement definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngagementFile {
    pub organization: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abbreviation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_number: Option<u32>,
    #[serde(default)]
    pub clusters: Vec<ClusterEntry>,
}

impl EngagementFile {
    pub fn parse(content: &str) -> Result<Self, AppError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String, AppError> {
        toml::to_string_pretty(self)
            .map_err(|e| AppError::config_error(format!("Failed to serialize engagement: {}", e)))
    }

    pub fn validate(&self, team: Option<Team>) -> Result<Engagement, ValidationError> {
        let organization = validation::validate_organization(&self.organization)?;
        let abbreviation =
            validation::validate_abbreviation(self.abbreviation.as_deref().unwrap_or_default())?;
        let contact = validation::validate_contact(self.contact.as_deref().unwrap_or_default())?;

        let case_number = match self.case_number {
            Some(_) if team != Some(Team::Install) => {
                return Err(ValidationError::CaseNumberNotAllowed);
            }
            Some(number) => Some(validation::validate_case_number(number)?),
            None => None,
        };

        if self.clusters.is_empty() {
            return Err(ValidationError::NoClusters);
        }
        let clusters =
            self.clusters.iter().map(ClusterEntry::validate).collect::<Result<Vec<_>, _>>()?;
        for (index, cluster) in clusters.iter().enumerate() {
            let clash = clusters[..index]
                .iter()
                .any(|earlier| earlier.scheduler == cluster.scheduler && earlier.name == cluster.name);
            if clash {
                return Err(ValidationError::DuplicateCluster {
                    cluster: cluster.name.to_string(),
                    scheduler: cluster.scheduler.to_string(),
                });
            }
        }

        Ok(Engagement { organization, abbreviation, contact, case_number, clusters })
    }
}
