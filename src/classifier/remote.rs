//! Remote zero-shot classifier — the optional higher-accuracy backend.
//!
//! Posts the email body plus every taxonomy label as a candidate to a hosted
//! zero-shot text-classification endpoint and maps the top-ranked label back
//! into the taxonomy. Everything that can go wrong here surfaces as a
//! `ClassifyError`; only `FallbackClassifier` sees those, so a dead endpoint
//! degrades quality, never availability.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::classifier::Classification;
use crate::error::ClassifyError;
use crate::taxonomy::Category;

/// Default request timeout — the remote path must stay bounded.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the hosted zero-shot endpoint.
#[derive(Debug, Clone)]
pub struct RemoteClassifierConfig {
    /// Full model endpoint URL.
    pub endpoint: String,
    /// Bearer token for the inference API.
    pub api_key: SecretString,
    /// Per-request timeout.
    pub timeout: Duration,
}

#[derive(Serialize)]
struct ZeroShotRequest<'a> {
    inputs: &'a str,
    parameters: ZeroShotParameters,
}

#[derive(Serialize)]
struct ZeroShotParameters {
    candidate_labels: Vec<String>,
}

/// Zero-shot response: labels ranked best-first, scores parallel to them.
#[derive(Deserialize)]
struct ZeroShotResponse {
    labels: Vec<String>,
    scores: Vec<f32>,
}

/// Client for the hosted zero-shot model.
pub struct RemoteClassifier {
    client: reqwest::Client,
    config: RemoteClassifierConfig,
}

impl RemoteClassifier {
    pub fn new(config: RemoteClassifierConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Classify via the remote model.
    ///
    /// Fails on transport errors, timeouts, non-2xx statuses, malformed
    /// bodies, and labels outside the taxonomy. Callers (the fallback
    /// decorator) treat every failure identically.
    pub async fn classify(&self, text: &str) -> Result<Classification, ClassifyError> {
        let request = ZeroShotRequest {
            inputs: text,
            parameters: ZeroShotParameters {
                candidate_labels: Category::ALL.iter().map(|c| c.remote_label()).collect(),
            },
        };

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(self.config.api_key.expose_secret())
            .timeout(self.config.timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| ClassifyError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClassifyError::BadStatus {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ZeroShotResponse = response
            .json()
            .await
            .map_err(|e| ClassifyError::InvalidResponse(e.to_string()))?;

        top_classification(&parsed)
    }
}

/// Pick the top-ranked label and map it back into the taxonomy.
fn top_classification(response: &ZeroShotResponse) -> Result<Classification, ClassifyError> {
    let (label, score) = response
        .labels
        .first()
        .zip(response.scores.first())
        .ok_or(ClassifyError::EmptyResponse)?;

    let category = Category::from_remote_label(label)
        .ok_or_else(|| ClassifyError::UnknownLabel(label.clone()))?;

    Ok(Classification {
        category,
        confidence: score.clamp(0.0, 1.0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(labels: &[&str], scores: &[f32]) -> ZeroShotResponse {
        ZeroShotResponse {
            labels: labels.iter().map(|s| s.to_string()).collect(),
            scores: scores.to_vec(),
        }
    }

    #[test]
    fn top_label_maps_to_category() {
        let parsed = response(&["order inquiry", "general"], &[0.91, 0.06]);
        let result = top_classification(&parsed).unwrap();
        assert_eq!(result.category, Category::OrderInquiry);
        assert_eq!(result.confidence, 0.91);
    }

    #[test]
    fn empty_label_list_is_an_error() {
        let parsed = response(&[], &[]);
        assert!(matches!(
            top_classification(&parsed),
            Err(ClassifyError::EmptyResponse)
        ));
    }

    #[test]
    fn missing_score_is_an_error() {
        let parsed = response(&["general"], &[]);
        assert!(matches!(
            top_classification(&parsed),
            Err(ClassifyError::EmptyResponse)
        ));
    }

    #[test]
    fn unmapped_label_is_an_error() {
        let parsed = response(&["spam complaint"], &[0.8]);
        match top_classification(&parsed) {
            Err(ClassifyError::UnknownLabel(label)) => assert_eq!(label, "spam complaint"),
            other => panic!("Expected UnknownLabel, got {other:?}"),
        }
    }

    #[test]
    fn out_of_range_score_is_clamped() {
        let parsed = response(&["win back"], &[1.7]);
        let result = top_classification(&parsed).unwrap();
        assert_eq!(result.category, Category::WinBack);
        assert_eq!(result.confidence, 1.0);
    }

    #[test]
    fn request_serializes_all_candidate_labels() {
        let request = ZeroShotRequest {
            inputs: "hello",
            parameters: ZeroShotParameters {
                candidate_labels: Category::ALL.iter().map(|c| c.remote_label()).collect(),
            },
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["inputs"], "hello");
        let labels = json["parameters"]["candidate_labels"].as_array().unwrap();
        assert_eq!(labels.len(), 20);
        assert_eq!(labels[0], "order inquiry");
    }
}
