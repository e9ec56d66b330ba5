use std::path::{Path, PathBuf};

pub const SETTINGS_FILE: &str = "clusterforge.toml";

/// `<dir>/clusterforge.toml`
pub fn settings(dir: &Path) -> PathBuf {
    dir.join(SETTINGS_FILE)
}
