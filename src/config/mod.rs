pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use toml_config::TomlConfig;

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Parser)]
#[command(name = "gchat-adapter")]
#[command(about = "Forwards Alertmanager webhook notifications to Google Chat")]
pub struct CliConfig {
    #[arg(long, env = "GOOGLE_CHAT_WEBHOOK_URL", hide_env_values = true)]
    pub webhook_url: Option<String>,

    #[arg(long, env = "LISTEN_ADDR", help = "Listen address [default: 0.0.0.0:8080]")]
    pub listen_addr: Option<String>,

    #[arg(long, env = "WEBHOOK_TIMEOUT_SECONDS", help = "Google Chat request timeout [default: 10]")]
    pub timeout_seconds: Option<u64>,

    #[arg(long, help = "Optional TOML config file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

/// Settings after merging flags/env over the TOML file over defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterConfig {
    pub webhook_url: String,
    pub listen_addr: SocketAddr,
    pub timeout_seconds: u64,
}

impl AdapterConfig {
    pub fn resolve(cli: &CliConfig) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => {
                tracing::debug!("Loading config file {}", path.display());
                TomlConfig::from_file(path)?
            }
            None => TomlConfig::default(),
        };
        Self::merge(cli, file)
    }

    pub fn merge(cli: &CliConfig, file: TomlConfig) -> Result<Self> {
        let webhook_url = cli
            .webhook_url
            .clone()
            .or(file.google_chat.webhook_url)
            .filter(|url| !url.trim().is_empty());
        let webhook_url = validation::validate_required_field("webhook_url", &webhook_url)?.clone();

        let listen_addr = cli
            .listen_addr
            .clone()
            .or(file.server.listen_addr)
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());

        let config = Self {
            webhook_url,
            listen_addr: validation::validate_socket_addr("listen_addr", &listen_addr)?,
            timeout_seconds: cli
                .timeout_seconds
                .or(file.google_chat.timeout_seconds)
                .unwrap_or(DEFAULT_TIMEOUT_SECONDS),
        };
        config.validate()?;
        Ok(config)
    }
}

impl Validate for AdapterConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("webhook_url", &self.webhook_url)?;
        validation::validate_positive_number("timeout_seconds", self.timeout_seconds, 1)?;
        Ok(())
    }
}

impl ConfigProvider for AdapterConfig {
    fn webhook_url(&self) -> &str {
        &self.webhook_url
    }

    fn listen_addr(&self) -> SocketAddr {
        self.listen_addr
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}
