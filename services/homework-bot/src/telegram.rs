//! Telegram Bot API notification client

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::io::HttpClient;
use crate::notifier::Notifier;

/// Error body returned by the Bot API on rejected requests
#[derive(Debug, Deserialize)]
struct BotApiError {
    #[serde(default)]
    description: Option<String>,
}

/// Telegram message sender bound to a single chat
pub struct TelegramNotifier {
    send_url: String,
    chat_id: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for TelegramNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramNotifier")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

impl TelegramNotifier {
    pub fn new(api_base: &str, bot_token: &str, chat_id: &str, http: Arc<dyn HttpClient>) -> Self {
        tracing::debug!("Created TelegramNotifier for chat {}", chat_id);

        Self {
            send_url: format!(
                "{}/bot{}/sendMessage",
                api_base.trim_end_matches('/'),
                bot_token
            ),
            chat_id: chat_id.to_string(),
            http,
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    fn type_name(&self) -> &str {
        "telegram"
    }

    async fn send(&self, text: &str) -> crate::Result<()> {
        let params = [("chat_id", self.chat_id.as_str()), ("text", text)];

        tracing::debug!("Sending Telegram message to chat {}", self.chat_id);

        let response = match self.http.post_form(&self.send_url, &params).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Failed to send Telegram message: {}", e);
                return Err(crate::BotError::Delivery(e.to_string()));
            }
        };

        if response.status != 200 {
            let reason = serde_json::from_str::<BotApiError>(&response.body)
                .ok()
                .and_then(|e| e.description)
                .unwrap_or(response.body);
            tracing::error!(
                "Telegram rejected message with status {}: {}",
                response.status,
                reason
            );
            return Err(crate::BotError::Delivery(format!(
                "Telegram API returned status {}: {}",
                response.status, reason
            )));
        }

        tracing::info!("Telegram message sent");
        Ok(())
    }
}
