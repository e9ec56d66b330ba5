pub mod cluster_spec;
pub mod config;
pub mod engagement;
pub mod error;
pub mod layout;
pub mod plan;
pub mod repo_state;
pub mod scheduler;
pub mod slug;
pub mod submission;
pub mod template_store;
pub mod template_tokens;
pub mod validation;

pub use cluster_spec::{ClusterEntry, ClusterSpec};
pub use config::{AppConfig, CommitIdentity, GitCredentials, RemoteSettings, Team};
pub use engagement::{Engagement, EngagementFile};
pub use error::AppError;
pub use layout::{ContactLayout, RepositoryLayout};
pub use plan::{
    ClusterPlan, CopySlot, EngagementPlan, FileCopyTask, PruneReason, PruneTask, TemplateTask,
    plan_cluster, plan_engagement,
};
pub use repo_state::{PublishReport, PublishStep, RemoteStatus, RepoState, SyncAction};
pub use scheduler::Scheduler;
pub use slug::Slug;
pub use submission::{ConfigVariant, SubmissionType};
pub use template_store::TemplateStore;
pub use template_tokens::TemplateTokenMap;
pub use validation::ValidationError;
