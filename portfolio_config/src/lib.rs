use std::{net::IpAddr, path::Path};

use anyhow::Context;
use config::{File, FileFormat};
use portfolio_models::email_address::EmailAddress;
use serde::Deserialize;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

/// Load the configuration from the given TOML files, later files overriding
/// earlier ones. Environment variables prefixed with `PORTFOLIO__` override
/// both (e.g. `PORTFOLIO__HTTP__PORT=8000`).
pub fn load(paths: &[impl AsRef<Path>]) -> anyhow::Result<Config> {
    paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        })?
        .add_source(config::Environment::with_prefix("PORTFOLIO").separator("__"))
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub database: DatabaseConfig,
    pub email: Option<EmailConfig>,
    pub health: HealthConfig,
    pub contact: ContactConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub host: IpAddr,
    pub port: u16,
    pub real_ip: Option<HttpRealIpConfig>,
}

#[derive(Debug, Deserialize)]
pub struct HttpRealIpConfig {
    /// Header to read the real client ip from.
    pub header: String,
    /// Address of the trusted reverse proxy.
    pub set_from: IpAddr,
}

#[derive(Debug, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Option<Duration>,
    pub max_lifetime: Option<Duration>,
}

#[derive(Debug, Deserialize)]
pub struct EmailConfig {
    pub smtp_url: String,
    pub from: EmailAddress,
    pub timeout: Duration,
}

#[derive(Debug, Deserialize)]
pub struct HealthConfig {
    pub cache_ttl: Duration,
}

#[derive(Debug, Deserialize)]
pub struct ContactConfig {
    /// Recipient of new submission notifications. Falls back to `email.from`
    /// if unset.
    pub notification_email: Option<EmailAddress>,
    pub owner_name: String,
    pub duplicate_window: Duration,
    #[serde(default = "default_spam_keywords")]
    pub spam_keywords: Vec<String>,
}

fn default_spam_keywords() -> Vec<String> {
    ["viagra", "cialis", "lottery", "winner"]
        .map(String::from)
        .into()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Duration(pub std::time::Duration);

impl From<Duration> for std::time::Duration {
    fn from(value: Duration) -> Self {
        value.0
    }
}

impl<'de> Deserialize<'de> for Duration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let mut out = std::time::Duration::default();
        for part in s.split_whitespace() {
            let (number, multiplier) = if let Some(number) = part.strip_suffix('s') {
                (number, 1)
            } else if let Some(number) = part.strip_suffix('m') {
                (number, 60)
            } else if let Some(number) = part.strip_suffix('h') {
                (number, 60 * 60)
            } else if let Some(number) = part.strip_suffix('d') {
                (number, 24 * 60 * 60)
            } else {
                return Err(serde::de::Error::custom("Invalid duration"));
            };
            let seconds = number
                .parse::<u64>()
                .map_err(|_| serde::de::Error::custom("Invalid duration"))?;
            out += std::time::Duration::from_secs(seconds * multiplier);
        }
        Ok(Self(out))
    }
}
