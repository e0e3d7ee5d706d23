use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::Router;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::greeting::{extract_sender_name, pick_greeting};
use crate::telegram::TelegramClient;

/// Header Telegram echoes the configured secret back in on every delivery.
const SECRET_TOKEN_HEADER: &str = "X-Telegram-Bot-Api-Secret-Token";

/// Read-only state shared across webhook requests.
pub struct AppState {
    pub config: Config,
    pub telegram: TelegramClient,
}

impl AppState {
    pub fn new(config: Config, telegram: TelegramClient) -> Self {
        Self { config, telegram }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/telegram/webhook", post(handle_update))
        .with_state(state)
}

/// Handle one Update delivery from Telegram.
///
/// Once a request passes authentication and JSON parsing it is always
/// answered with 200, whether or not a greeting goes out: Telegram re-delivers
/// the same update on any other status, and none of the remaining failure
/// modes can be fixed by a retry.
async fn handle_update(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    if let Some(secret) = state.config.webhook_secret() {
        let supplied = headers
            .get(SECRET_TOKEN_HEADER)
            .and_then(|value| value.to_str().ok());
        if supplied != Some(secret) {
            warn!("Rejecting webhook request with missing or invalid secret token");
            return StatusCode::FORBIDDEN;
        }
    }

    let payload: Value = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(_) => {
            warn!("Received invalid JSON payload from Telegram");
            return StatusCode::BAD_REQUEST;
        }
    };

    let message = match extract_text_message(&payload) {
        Some(message) => message,
        None => {
            debug!(
                "Ignoring update without text message: {}",
                payload.get("update_id").unwrap_or(&serde_json::Value::Null)
            );
            return StatusCode::OK;
        }
    };

    let chat_id = match message.get("chat").and_then(|chat| chat.get("id")) {
        Some(id) if !id.is_null() => id.clone(),
        _ => {
            warn!("Received message without chat id");
            return StatusCode::OK;
        }
    };

    let greeting = pick_greeting(&extract_sender_name(message), &mut rand::thread_rng());

    if !state.config.has_bot_token() {
        error!("Bot token is not configured; cannot respond");
        return StatusCode::OK;
    }

    if state.telegram.send_message(&chat_id, &greeting).await {
        info!("Greeting sent to chat {}: {}", chat_id, greeting);
    } else {
        error!("Failed to send greeting to chat {}", chat_id);
    }

    StatusCode::OK
}

/// `message` wins over `edited_message`; the chosen object must carry a
/// string `text` to be worth replying to. Everything else (stickers, photos,
/// callback queries) is acknowledged without a reply.
fn extract_text_message(payload: &Value) -> Option<&Value> {
    let message = payload
        .get("message")
        .filter(|m| m.is_object())
        .or_else(|| payload.get("edited_message").filter(|m| m.is_object()))?;

    message.get("text").and_then(Value::as_str)?;
    Some(message)
}
