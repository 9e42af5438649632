//! HTTP relay delivery — posts the envelope to a server-side relay that
//! holds the real provider credentials (the relay forwards to the mail
//! provider; keeping the key server-side also avoids CORS games in the
//! dashboard).
//!
//! Provider trouble never surfaces as an `Err`: every failure mode becomes
//! `DeliveryResult { accepted: false, diagnostic }`.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::debug;

use crate::pipeline::types::{DeliveryResult, DeliveryService, OutboundEmail};

/// Default per-send timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Relay endpoint configuration.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// URL of the send-email relay function.
    pub url: String,
    /// Bearer token for the relay.
    pub api_key: SecretString,
    /// Per-request timeout.
    pub timeout: Duration,
}

/// Expected relay response body.
#[derive(Deserialize)]
struct RelayResponse {
    success: bool,
    #[serde(default)]
    error: Option<String>,
}

/// `DeliveryService` backed by the HTTP relay.
pub struct HttpRelayDelivery {
    client: reqwest::Client,
    config: RelayConfig,
}

impl HttpRelayDelivery {
    pub fn new(config: RelayConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl DeliveryService for HttpRelayDelivery {
    async fn send(&self, email: &OutboundEmail) -> DeliveryResult {
        let response = match self
            .client
            .post(&self.config.url)
            .bearer_auth(self.config.api_key.expose_secret())
            .timeout(self.config.timeout)
            .json(email)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return DeliveryResult::rejected(format!("relay request failed: {e}")),
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return DeliveryResult::rejected(format!("relay returned {status}: {body}"));
        }

        match response.json::<RelayResponse>().await {
            Ok(RelayResponse { success: true, .. }) => {
                debug!(to = %email.to, "Relay accepted the message");
                DeliveryResult::accepted()
            }
            Ok(RelayResponse { error, .. }) => DeliveryResult::rejected(
                error.unwrap_or_else(|| "relay reported failure without detail".to_string()),
            ),
            Err(e) => DeliveryResult::rejected(format!("unreadable relay response: {e}")),
        }
    }
}
