//! Pure parse/validate for settings (`clusterforge.toml`).

use toml::Table;

use crate::domain::AppError;
use crate::domain::config::AppConfig;

/// Declared keys per section. Anything else is reported in one error.
const SCHEMA: &[(&str, &[&str])] = &[
    ("paths", &["scripts", "repository", "staging"]),
    ("scaffold", &["release", "team", "submit_to_remote"]),
    ("git", &["username", "email", "commit_message", "access_token"]),
    ("remote", &["api_url", "group_name", "group_id", "clone_base_url", "timeout_secs"]),
];

/// Parse settings content. `env_token` wins over a token in the file.
pub fn parse_config_content(
    content: &str,
    env_token: Option<String>,
) -> Result<AppConfig, AppError> {
    let table: Table = toml::from_str(content)?;
    let unknown = unknown_keys(&table);
    if !unknown.is_empty() {
        return Err(AppError::UnknownConfigKeys(unknown));
    }

    let mut config: AppConfig = toml::Value::Table(table).try_into()?;
    apply_access_token(&mut config, env_token);
    config.validate()?;
    Ok(config)
}

pub fn apply_access_token(config: &mut AppConfig, env_token: Option<String>) {
    if let Some(token) = env_token.filter(|t| !t.trim().is_empty()) {
        config.git.access_token = Some(token);
    }
}

fn unknown_keys(table: &Table) -> Vec<String> {
    let mut unknown = Vec::new();
    for (key, value) in table {
        match SCHEMA.iter().find(|(section, _)| *section == key.as_str()) {
            Some((section, fields)) => {
                if let Some(inner) = value.as_table() {
                    for field in inner.keys() {
                        if !fields.contains(&field.as_str()) {
                            unknown.push(format!("{}.{}", section, field));
                        }
                    }
                }
            }
            None => unknown.push(key.clone()),
        }
    }
    unknown
}
