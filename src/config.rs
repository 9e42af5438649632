//! Environment-driven configuration.

use std::time::Duration;

use secrecy::SecretString;

use crate::classifier::RemoteClassifierConfig;
use crate::delivery::RelayConfig;
use crate::error::ConfigError;

/// Fallback verified sender when `REPLYFLOW_VERIFIED_SENDER` is unset.
pub const DEFAULT_VERIFIED_SENDER: &str = "noreply@example.com";

/// Shared default for the two outbound HTTP calls (remote classifier and
/// delivery relay). Both suspension points must stay bounded.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Full pipeline configuration.
///
/// The relay and remote-classifier sections are optional: without a relay
/// the caller must supply its own `DeliveryService`; without a remote
/// endpoint classification runs in keyword mode only.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Verified sender address used as the envelope `from`.
    pub verified_sender: String,
    /// Delivery relay, if `REPLYFLOW_RELAY_URL` is set.
    pub relay: Option<RelayConfig>,
    /// Remote zero-shot classifier, if `REPLYFLOW_ZERO_SHOT_URL` is set.
    pub remote_classifier: Option<RemoteClassifierConfig>,
}

impl PipelineConfig {
    /// Load from environment variables.
    ///
    /// A section's URL being present makes its key mandatory; a missing key
    /// is a hard `ConfigError` rather than a silently unauthenticated client.
    pub fn from_env() -> Result<Self, ConfigError> {
        let verified_sender = std::env::var("REPLYFLOW_VERIFIED_SENDER")
            .unwrap_or_else(|_| DEFAULT_VERIFIED_SENDER.to_string());

        let timeout = http_timeout()?;

        let relay = match std::env::var("REPLYFLOW_RELAY_URL") {
            Ok(url) => Some(RelayConfig {
                url,
                api_key: required_secret("REPLYFLOW_RELAY_KEY")?,
                timeout,
            }),
            Err(_) => None,
        };

        let remote_classifier = match std::env::var("REPLYFLOW_ZERO_SHOT_URL") {
            Ok(endpoint) => Some(RemoteClassifierConfig {
                endpoint,
                api_key: required_secret("REPLYFLOW_ZERO_SHOT_KEY")?,
                timeout,
            }),
            Err(_) => None,
        };

        Ok(Self {
            verified_sender,
            relay,
            remote_classifier,
        })
    }
}

fn required_secret(key: &str) -> Result<SecretString, ConfigError> {
    std::env::var(key)
        .map(SecretString::from)
        .map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

fn http_timeout() -> Result<Duration, ConfigError> {
    match std::env::var("REPLYFLOW_HTTP_TIMEOUT_SECS") {
        Ok(raw) => raw
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|e| ConfigError::InvalidValue {
                key: "REPLYFLOW_HTTP_TIMEOUT_SECS".to_string(),
                message: e.to_string(),
            }),
        Err(_) => Ok(DEFAULT_HTTP_TIMEOUT),
    }
}
