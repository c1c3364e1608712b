use crate::application_port::RelationPolicy;
use crate::domain_model::UserId;
use anyhow::{Result, anyhow};
use config::{Config, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub auth: Auth,
    pub http: Http,
    pub log: Log,
    pub store: Store,
    #[serde(default)]
    pub social: RelationPolicy,
}

#[derive(Debug, Deserialize)]
pub struct Auth {
    pub backend: String, // "fake" or "jwt"
    #[serde(default)]
    pub issuer: String,
    #[serde(default)]
    pub audience: String,
}

#[derive(Debug, Deserialize)]
pub struct Http {
    pub address: String,
    pub cert_path: Option<String>,
    pub key_path: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Log {
    pub filter: String,
}

#[derive(Debug, Deserialize)]
pub struct Store {
    pub backend: String, // "memory" or "mysql"
    #[serde(default)]
    pub dsn: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default)]
    pub run_migrations: bool,
    #[serde(default)]
    pub seed_accounts: Vec<SeedAccount>,
}

/// Accounts preloaded into the memory backend.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedAccount {
    pub user_id: UserId,
    pub username: String,
    #[serde(default)]
    pub avatar_id: i32,
}

fn default_max_connections() -> u32 {
    10
}

#[cfg(debug_assertions)]
const SETTINGS_PATH: &str = "settings/dev.toml";
#[cfg(not(debug_assertions))]
const SETTINGS_PATH: &str = "settings/release.toml";

pub fn parse_settings(path: Option<&str>) -> Result<Settings> {
    let path = path.unwrap_or(SETTINGS_PATH);

    let settings: Settings = Config::builder()
        .add_source(File::with_name(path))
        .build()
        .map_err(|e| anyhow!(e))?
        .try_deserialize()
        .map_err(|e| anyhow!(e))?;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_settings(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    #[test]
    fn parses_minimal_file_with_defaults() {
        let file = write_settings(
            r#"
[auth]
backend = "fake"

[http]
address = "127.0.0.1:8080"

[log]
filter = "info"

[store]
backend = "memory"
"#,
        );

        let settings = parse_settings(file.path().to_str()).unwrap();
        assert_eq!(settings.store.max_connections, 10);
        assert!(!settings.store.run_migrations);
        assert!(settings.http.cert_path.is_none());
        assert_eq!(settings.social, RelationPolicy::default());
    }

    #[test]
    fn parses_policy_and_seed_accounts() {
        let file = write_settings(
            r#"
[auth]
backend = "jwt"
issuer = "amity.auth"
audience = "amity-client"

[http]
address = "0.0.0.0:8443"

[log]
filter = "amity=debug"

[store]
backend = "memory"

[[store.seed_accounts]]
user_id = "6f1c2a47-7a38-4d0e-9d3b-2f0a1c9e5b11"
username = "john"

[social]
strict_accept = true
"#,
        );

        let settings = parse_settings(file.path().to_str()).unwrap();
        assert!(settings.social.strict_accept);
        assert!(!settings.social.strict_unblock);
        assert!(settings.social.empty_list_is_not_found);
        assert_eq!(settings.store.seed_accounts.len(), 1);
        assert_eq!(settings.store.seed_accounts[0].username, "john");
        assert_eq!(settings.auth.audience, "amity-client");
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(parse_settings(Some("settings/does-not-exist.toml")).is_err());
    }
}
