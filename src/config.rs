use std::collections::HashSet;
use std::env;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

use crate::domain::UserRecord;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub notification: NotificationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default = "default_seed")]
    pub seed: Vec<UserRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_mailbox_size")]
    pub mailbox_size: usize,
}

/// Where and how the downstream notification service is reached.
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationConfig {
    #[serde(default = "default_notification_address")]
    pub address: String,
    #[serde(default)]
    pub transport: Transport,
    /// Extra root certificate (PEM) trusted for `tls`.
    #[serde(default)]
    pub ca_cert_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    #[default]
    Insecure,
    Tls,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 50051 }
fn default_mailbox_size() -> usize { 100 }
fn default_notification_address() -> String { "localhost:50052".to_string() }

fn default_seed() -> Vec<UserRecord> {
    vec![
        UserRecord::new("1", "John Doe", "john@example.com"),
        UserRecord::new("2", "Jane Smith", "jane@example.com"),
    ]
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            notification: NotificationConfig::default(),
            logging: LoggingConfig::default(),
            seed: default_seed(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            mailbox_size: default_mailbox_size(),
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            address: default_notification_address(),
            transport: Transport::default(),
            ca_cert_path: None,
        }
    }
}

impl Transport {
    pub fn scheme(self) -> &'static str {
        match self {
            Transport::Insecure => "http",
            Transport::Tls => "https",
        }
    }
}

impl std::str::FromStr for Transport {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "insecure" => Ok(Transport::Insecure),
            "tls" => Ok(Transport::Tls),
            other => Err(anyhow!("unknown notification transport `{other}` (expected insecure or tls)")),
        }
    }
}

/// Loads `CONFIG_PATH` (default `config.toml`), then applies environment
/// overrides and validates. A missing file means built-in defaults.
pub fn load_default() -> Result<AppConfig> {
    let path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    let mut cfg = if Path::new(&path).exists() {
        load_from_file(&path)?
    } else {
        AppConfig::default()
    };
    cfg.apply_env_overrides(|key| env::var(key).ok())?;
    cfg.validate()?;
    Ok(cfg)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
    parse(&content).with_context(|| format!("parsing {path}"))
}

pub fn parse(content: &str) -> Result<AppConfig> {
    Ok(toml::from_str(content)?)
}

impl AppConfig {
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        Ok(format!("{}:{}", self.server.host, self.server.port).parse()?)
    }

    /// `lookup` is `std::env::var` in production; tests pass a map.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(host) = lookup("USER_SERVICE_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("USER_SERVICE_PORT") {
            self.server.port = port
                .parse()
                .with_context(|| format!("USER_SERVICE_PORT `{port}` is not a port"))?;
        }
        if let Some(address) = lookup("NOTIFICATION_ADDR") {
            self.notification.address = address;
        }
        if let Some(transport) = lookup("NOTIFICATION_TRANSPORT") {
            self.notification.transport = transport.parse()?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.host.trim().is_empty() {
            return Err(anyhow!("server.host must not be empty"));
        }
        if self.server.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        if self.server.mailbox_size == 0 {
            return Err(anyhow!("server.mailbox_size must be >= 1"));
        }
        if self.notification.address.trim().is_empty() {
            return Err(anyhow!("notification.address must not be empty"));
        }
        if self.notification.ca_cert_path.is_some() && self.notification.transport != Transport::Tls {
            return Err(anyhow!("notification.ca_cert_path requires transport = \"tls\""));
        }
        let mut ids = HashSet::new();
        for user in &self.seed {
            if !ids.insert(user.user_id.as_str()) {
                return Err(anyhow!("duplicate seed userId `{}`", user.user_id));
            }
        }
        Ok(())
    }
}
