//! clusterforge: generate, commit and publish MATLAB Parallel Server
//! integration scripts for customer clusters.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use app::api::{
    PlanOutcome, ScaffoldOutcome, init_config, new_engagement, plan, scaffold, settings,
};
pub use app::cancellation::CancellationToken;
pub use domain::AppError;
