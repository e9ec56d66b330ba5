use include_dir::{Dir, include_dir};

use crate::domain::AppError;

static TEMPLATES_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/assets/templates");

pub const README_TEMPLATE: &str = "README.md";
pub const SETTINGS_TEMPLATE: &str = "clusterforge.toml";

pub fn template_content(name: &str) -> Result<&'static str, AppError> {
    TEMPLATES_DIR
        .get_file(name)
        .and_then(|file| file.contents_utf8())
        .ok_or_else(|| AppError::config_error(format!("Missing embedded template: {}", name)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::parse::parse_config_content;

    #[test]
    fn embedded_templates_exist() {
        assert!(template_content(README_TEMPLATE).unwrap().contains("{{organization}}"));
        assert!(template_content("nope.txt").is_err());
    }

    #[test]
    fn sample_settings_parse_cleanly() {
        let config = parse_config_content(template_content(SETTINGS_TEMPLATE).unwrap(), None).unwrap();
        assert_eq!(config.scaffold.release, "R2024a");
        assert!(!config.scaffold.submit_to_remote);
    }
}
