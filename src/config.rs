use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub telegram: TelegramConfig,
    #[serde(default = "default_server_config")]
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TelegramConfig {
    /// Bot API token. May be left empty: the webhook then acknowledges
    /// updates without replying instead of refusing to start.
    #[serde(default)]
    pub bot_token: String,
    /// Secret Telegram echoes back in the X-Telegram-Bot-Api-Secret-Token
    /// header on every delivery. Unset or empty disables the check.
    #[serde(default)]
    pub webhook_secret: Option<String>,
    /// Public HTTPS URL registered by the setwebhook binary.
    #[serde(default)]
    pub webhook_url: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_server_config() -> ServerConfig {
    ServerConfig {
        host: default_host(),
        port: default_port(),
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Webhook secret with empty strings treated as unset.
    pub fn webhook_secret(&self) -> Option<&str> {
        self.telegram
            .webhook_secret
            .as_deref()
            .filter(|s| !s.is_empty())
    }

    pub fn has_bot_token(&self) -> bool {
        !self.telegram.bot_token.is_empty()
    }
}
