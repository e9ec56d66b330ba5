use std::path::PathBuf;

use crate::domain::{
    AppConfig, ContactLayout, Engagement, EngagementPlan, RepositoryLayout, TemplateStore,
    plan_engagement,
};

#[derive(Debug)]
pub struct PlanOutcome {
    pub contact_dir: PathBuf,
    pub plan: EngagementPlan,
    /// Copy sources that do not exist yet; a real run would fail on the first.
    pub missing_sources: Vec<PathBuf>,
}

/// Plan against the final contact directory without touching the filesystem.
pub fn execute(config: &AppConfig, engagement: &Engagement) -> PlanOutcome {
    let store = TemplateStore::from_config(config);
    let repository = RepositoryLayout::new(&config.paths.repository);
    let contact_dir = repository.contact_dir(&engagement.organization, &engagement.contact);
    let layout = ContactLayout::new(contact_dir.clone(), &config.scaffold.release);

    let plan = plan_engagement(engagement, &store, &layout);
    let missing_sources = plan
        .shared
        .iter()
        .chain(plan.clusters.iter().flat_map(|cluster| cluster.copies.iter()))
        .filter(|task| !task.source.exists())
        .map(|task| task.source.clone())
        .collect();

    PlanOutcome { contact_dir, plan, missing_sources }
}
