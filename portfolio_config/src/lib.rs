use std::{
    net::IpAddr,
    path::{Path, PathBuf},
};

use anyhow::Context;
use config::{Environment, File, FileFormat};
use portfolio_models::email_address::EmailAddressWithName;
use serde::Deserialize;

pub use duration::Duration;

mod duration;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

/// Colon separated list of config files, later files override earlier ones.
pub const CONFIG_PATH_ENV: &str = "PORTFOLIO_CONFIG";

/// Load the config from the files listed in `PORTFOLIO_CONFIG` (or the default
/// config file) and apply `PORTFOLIO__SECTION__KEY` environment overrides.
pub fn load() -> anyhow::Result<Config> {
    match std::env::var(CONFIG_PATH_ENV) {
        Ok(paths) => load_paths(&paths.split(':').collect::<Vec<_>>()),
        Err(_) => load_paths(&[DEFAULT_CONFIG_PATH]),
    }
}

pub fn load_paths(paths: &[impl AsRef<Path>]) -> anyhow::Result<Config> {
    paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        })?
        .add_source(
            Environment::with_prefix("PORTFOLIO")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub email: EmailConfig,
    pub contact: ContactConfig,
    pub rate_limit: RateLimitConfig,
    pub health: HealthConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub host: IpAddr,
    pub port: u16,
    pub real_ip: Option<HttpRealIpConfig>,
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

fn default_allowed_origins() -> Vec<String> {
    vec!["*".into()]
}

/// Trust `header` for the client address, but only on requests coming from
/// `set_from` (usually a reverse proxy).
#[derive(Debug, Deserialize)]
pub struct HttpRealIpConfig {
    pub header: String,
    pub set_from: IpAddr,
}

#[derive(Debug, Deserialize)]
pub struct EmailConfig {
    pub smtp_url: String,
    pub from: EmailAddressWithName,
}

#[derive(Debug, Deserialize)]
pub struct ContactConfig {
    /// Mailbox receiving the contact notifications.
    pub recipient: EmailAddressWithName,
    /// Name used to sign the confirmation emails.
    pub owner_name: String,
    #[serde(default = "default_contact_rate_limit")]
    pub rate_limit: Duration,
    #[serde(default = "default_true")]
    pub confirmation: bool,
    pub audit_log: PathBuf,
}

fn default_contact_rate_limit() -> Duration {
    Duration(std::time::Duration::from_secs(60))
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum RateLimitConfig {
    Memory,
    File { directory: PathBuf },
    Valkey(ValkeyConfig),
}

#[derive(Debug, Deserialize)]
pub struct ValkeyConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Option<Duration>,
    pub max_lifetime: Option<Duration>,
}

#[derive(Debug, Deserialize)]
pub struct HealthConfig {
    pub cache_ttl: Duration,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_default_config() {
        let config = load_paths(&[DEFAULT_CONFIG_PATH]).unwrap();
        assert_eq!(*config.contact.rate_limit, std::time::Duration::from_secs(60));
        assert!(matches!(config.rate_limit, RateLimitConfig::Memory));
    }

    #[test]
    fn rate_limit_backends() {
        let file = serde_json::from_value::<RateLimitConfig>(serde_json::json!({
            "backend": "file",
            "directory": "/tmp/portfolio",
        }))
        .unwrap();
        assert!(
            matches!(file, RateLimitConfig::File { directory } if directory == Path::new("/tmp/portfolio"))
        );

        let valkey = serde_json::from_value::<RateLimitConfig>(serde_json::json!({
            "backend": "valkey",
            "url": "redis://127.0.0.1:6379/0",
            "max_connections": 4,
            "min_connections": 1,
            "acquire_timeout": "5s",
        }))
        .unwrap();
        assert!(matches!(valkey, RateLimitConfig::Valkey(ValkeyConfig { max_connections: 4, .. })));

        assert!(serde_json::from_value::<RateLimitConfig>(serde_json::json!({
            "backend": "carrier-pigeon",
        }))
        .is_err());
    }

    #[test]
    fn contact_defaults() {
        let contact = serde_json::from_value::<ContactConfig>(serde_json::json!({
            "recipient": "Owner <owner@example.com>",
            "owner_name": "Owner",
            "audit_log": "contact_log.txt",
        }))
        .unwrap();
        assert_eq!(*contact.rate_limit, std::time::Duration::from_secs(60));
        assert!(contact.confirmation);
    }
}
