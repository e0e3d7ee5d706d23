//! Registers the bot's webhook URL with Telegram.
//!
//! Usage:
//!   setwebhook [--config config.toml] [--url https://example.com/telegram/webhook]
//!
//! The URL defaults to `webhook_url` from the `[telegram]` config section.
//! When a webhook secret is configured it is registered alongside the URL as
//! `secret_token`, so Telegram echoes it back on every delivery and the
//! server can authenticate inbound requests.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use greetbot::config::Config;
use greetbot::telegram::TelegramClient;

/// Value following `flag` in argv, if both are present.
fn arg_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1).cloned())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();

    let config_path = arg_value(&args, "--config")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("config.toml"));
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    let url = match arg_value(&args, "--url").or_else(|| config.telegram.webhook_url.clone()) {
        Some(url) if !url.is_empty() => url,
        _ => bail!("Provide --url or set webhook_url in the [telegram] config section."),
    };

    if !config.has_bot_token() {
        bail!("bot_token is missing; set it before registering the webhook.");
    }

    let client = TelegramClient::new(config.telegram.bot_token.clone());

    if !client.set_webhook(&url, config.webhook_secret()).await {
        bail!("Failed to register webhook with Telegram using URL {}", url);
    }

    println!("Webhook successfully set to {}", url);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_arg_value_returns_following_value() {
        let argv = args(&["setwebhook", "--url", "https://example.com/hook"]);
        assert_eq!(
            arg_value(&argv, "--url").as_deref(),
            Some("https://example.com/hook")
        );
    }

    #[test]
    fn test_arg_value_missing_flag() {
        let argv = args(&["setwebhook"]);
        assert_eq!(arg_value(&argv, "--url"), None);
    }

    #[test]
    fn test_arg_value_flag_without_value() {
        let argv = args(&["setwebhook", "--url"]);
        assert_eq!(arg_value(&argv, "--url"), None);
    }
}
