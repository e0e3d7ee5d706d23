use std::time::Duration;

use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, error};

const API_BASE: &str = "https://api.telegram.org";

/// Upper bound on any single Bot API call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// The slice of the Bot API response envelope we inspect.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Thin client for the Telegram Bot API.
///
/// Every operation returns a plain `bool`: network errors, timeouts,
/// non-success statuses and `ok: false` envelopes are all logged and
/// collapsed to `false`, so callers never have to unwind a failed send.
pub struct TelegramClient {
    client: reqwest::Client,
    api_base: String,
    token: String,
}

impl TelegramClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_api_base(token, API_BASE)
    }

    /// Point the client at a different API host. Tests use this to talk to
    /// a local mock server instead of api.telegram.org.
    pub fn with_api_base(token: impl Into<String>, api_base: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: api_base.into(),
            token: token.into(),
        }
    }

    async fn call(&self, method: &str, payload: &Value) -> bool {
        let url = format!("{}/bot{}/{}", self.api_base, self.token, method);

        debug!("Calling Telegram API method: {}", method);

        let response = match self
            .client
            .post(&url)
            .timeout(REQUEST_TIMEOUT)
            .json(payload)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                error!("Telegram API request failed for method {}: {}", method, e);
                return false;
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(
                "Telegram API error for method {} ({}): {}",
                method, status, body
            );
            return false;
        }

        let data: ApiResponse = match response.json().await {
            Ok(data) => data,
            Err(e) => {
                error!(
                    "Failed to parse Telegram API response for method {}: {}",
                    method, e
                );
                return false;
            }
        };

        if !data.ok {
            error!(
                "Telegram API responded with failure for method {}: {}",
                method,
                data.description.as_deref().unwrap_or("no description")
            );
            return false;
        }

        true
    }

    /// Post a text message into a chat. The chat id is passed through as
    /// received, so both integer and string ids survive untouched.
    pub async fn send_message(&self, chat_id: &Value, text: &str) -> bool {
        self.call(
            "sendMessage",
            &json!({
                "chat_id": chat_id,
                "text": text,
            }),
        )
        .await
    }

    /// Register `url` as the bot's webhook. The URL is sent verbatim in the
    /// request body; the secret, when present, travels alongside it as
    /// `secret_token` and is never spliced into the URL.
    pub async fn set_webhook(&self, url: &str, secret_token: Option<&str>) -> bool {
        let mut payload = json!({ "url": url });
        if let Some(secret) = secret_token {
            payload["secret_token"] = json!(secret);
        }
        self.call("setWebhook", &payload).await
    }
}
