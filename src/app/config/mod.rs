//! Filesystem and environment backed loaders.
//!
//! Pure schema parsing lives in `domain::config` and `domain::engagement`.

mod load_config;
mod load_engagement;

pub use load_config::{load_config, load_config_from};
pub use load_engagement::load_engagement;
