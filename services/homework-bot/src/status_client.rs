//! Client for the Practicum homework status API

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::io::HttpClient;

/// Source of raw homework status payloads
#[async_trait]
pub trait StatusClient: Send + Sync + std::fmt::Debug {
    /// Fetch every homework updated since `cursor` (Unix seconds)
    async fn fetch(&self, cursor: i64) -> crate::Result<Value>;
}

/// Status client talking to the Practicum REST endpoint
pub struct PracticumClient {
    endpoint: String,
    authorization: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for PracticumClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PracticumClient")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl PracticumClient {
    pub fn new(endpoint: &str, token: &str, http: Arc<dyn HttpClient>) -> Self {
        tracing::debug!("Created PracticumClient for {}", endpoint);
        Self {
            endpoint: endpoint.to_string(),
            authorization: format!("OAuth {}", token),
            http,
        }
    }
}

#[async_trait]
impl StatusClient for PracticumClient {
    async fn fetch(&self, cursor: i64) -> crate::Result<Value> {
        let from_date = cursor.to_string();
        tracing::debug!("Requesting homework statuses from_date={}", from_date);

        let response = self
            .http
            .get(
                &self.endpoint,
                &[("from_date", from_date.as_str())],
                &[("Authorization", self.authorization.as_str())],
            )
            .await?;

        if response.status != 200 {
            return Err(crate::BotError::ApiUnavailable(format!(
                "endpoint returned status {}",
                response.status
            )));
        }

        serde_json::from_str(&response.body)
            .map_err(|e| crate::BotError::MalformedPayload(format!("response is not JSON: {}", e)))
    }
}
