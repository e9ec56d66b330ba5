//! The scaffolding pipeline: verify, sync, stage, promote, publish.

use std::path::{Path, PathBuf};

use crate::adapters::assets::{self, README_TEMPLATE};
use crate::adapters::filesystem::{materializer, pruner, templater};
use crate::app::AppContext;
use crate::app::cancellation::{CancellationToken, CleanupRegistry};
use crate::app::services::RepoPublisher;
use crate::domain::{
    AppConfig, AppError, ClusterPlan, ContactLayout, Engagement, PublishReport, RepositoryLayout,
    Scheduler, Slug, TemplateStore, TemplateTokenMap, plan_engagement,
};
use crate::ports::{Git, RemoteHost};

#[derive(Debug)]
pub struct ScaffoldOutcome {
    /// Final location of the contact's tree.
    pub contact_dir: PathBuf,
    pub clusters: Vec<Slug>,
    pub report: PublishReport,
}

pub fn execute<G: Git, R: RemoteHost>(
    ctx: &AppContext<G, R>,
    engagement: &Engagement,
) -> Result<ScaffoldOutcome, AppError> {
    let config = ctx.config();
    let store = TemplateStore::from_config(config);
    let schedulers: Vec<Scheduler> = engagement.clusters.iter().map(|c| c.scheduler).collect();
    store.verify(&schedulers)?;

    for cluster in &engagement.clusters {
        if cluster.is_below_recommended_workers() {
            tracing::warn!(
                cluster = %cluster.name,
                workers = cluster.workers,
                "Worker count is unusually small for a cluster license"
            );
        }
    }

    let repository = RepositoryLayout::new(&config.paths.repository);
    let working_copy = repository.organization_dir(&engagement.organization);
    let contact_dir = repository.contact_dir(&engagement.organization, &engagement.contact);

    let publisher = RepoPublisher::new(ctx.git(), ctx.remote(), &config.git.commit_message);
    let mut report = PublishReport::default();
    let state = publisher.inspect(&working_copy, &engagement.organization)?;
    ctx.cancel().check()?;
    publisher.sync(&state, &working_copy, &engagement.organization, &mut report)?;

    let mut registry = CleanupRegistry::new();
    if let Err(err) = stage_and_promote(config, ctx.cancel(), engagement, &store, &contact_dir, &mut registry) {
        registry.cleanup();
        return Err(err);
    }

    ctx.cancel().check()?;
    publisher.publish(
        &state,
        &working_copy,
        &engagement.organization,
        engagement.abbreviation.as_deref(),
        &mut report,
    )?;
    tracing::info!(report = %report, "Engagement published");

    Ok(ScaffoldOutcome {
        contact_dir,
        clusters: engagement.clusters.iter().map(|c| c.name.clone()).collect(),
        report,
    })
}

fn stage_and_promote(
    config: &AppConfig,
    cancel: &CancellationToken,
    engagement: &Engagement,
    store: &TemplateStore,
    contact_dir: &Path,
    registry: &mut CleanupRegistry,
) -> Result<(), AppError> {
    let staging = ContactLayout::staging(
        &config.staging_root(),
        &engagement.organization,
        &engagement.contact,
        &config.scaffold.release,
    );
    pruner::remove(staging.root())?;
    registry.register(staging.root());
    tracing::info!(staging = %staging.root().display(), "Materializing engagement");

    let plan = plan_engagement(engagement, store, &staging);
    for task in &plan.shared {
        cancel.check()?;
        materializer::execute(task)?;
    }
    for cluster in &plan.clusters {
        cancel.check()?;
        apply_cluster(cluster, cancel)?;
    }

    write_readme(&staging, engagement, &config.scaffold.release)?;
    cancel.check()?;

    tracing::info!(to = %contact_dir.display(), "Promoting staged tree");
    materializer::move_directory(staging.root(), contact_dir)?;
    registry.release(staging.root());
    Ok(())
}

fn apply_cluster(plan: &ClusterPlan, cancel: &CancellationToken) -> Result<(), AppError> {
    tracing::info!(
        cluster = %plan.cluster.name,
        scheduler = %plan.cluster.scheduler,
        submission = %plan.cluster.submission,
        "Generating cluster scripts"
    );
    for task in &plan.copies {
        cancel.check()?;
        materializer::execute(task)?;
    }
    for task in &plan.prunes {
        pruner::execute(task)?;
    }
    for task in &plan.templates {
        templater::execute(task)?;
    }
    Ok(())
}

fn write_readme(layout: &ContactLayout, engagement: &Engagement, release: &str) -> Result<(), AppError> {
    let template = assets::template_content(README_TEMPLATE)?;
    templater::write_rendered(&layout.readme(), template, &readme_tokens(engagement, release))
}

fn readme_tokens(engagement: &Engagement, release: &str) -> TemplateTokenMap {
    let case_line =
        engagement.case_number.map(|number| format!("Case number: {}", number)).unwrap_or_default();
    let clusters = engagement
        .clusters
        .iter()
        .map(|c| {
            format!(
                "- {} ({}): {} scheduler, {} submission, {} workers",
                c.name, c.profile_name, c.scheduler, c.submission, c.workers
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let mut tokens = TemplateTokenMap::new();
    tokens
        .insert("{{organization}}", engagement.organization.as_str())
        .insert("{{contact}}", engagement.contact.as_str())
        .insert("{{release}}", release)
        .insert("{{case_line}}", case_line)
        .insert("{{clusters}}", clusters);
    tokens
}
