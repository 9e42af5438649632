//! Remote-first classifier with silent keyword fallback.
//!
//! The remote path only ever changes quality, never availability: any
//! `ClassifyError` from the hosted model is logged at debug level and the
//! deterministic keyword scorer answers instead.

use async_trait::async_trait;
use tracing::debug;

use crate::classifier::{Classification, Classifier, KeywordClassifier, RemoteClassifier};

/// Decorator composing the remote and keyword backends.
pub struct FallbackClassifier {
    remote: RemoteClassifier,
    keyword: KeywordClassifier,
}

impl FallbackClassifier {
    pub fn new(remote: RemoteClassifier, keyword: KeywordClassifier) -> Self {
        Self { remote, keyword }
    }
}

#[async_trait]
impl Classifier for FallbackClassifier {
    async fn classify(&self, text: &str) -> Classification {
        match self.remote.classify(text).await {
            Ok(classification) => classification,
            Err(e) => {
                debug!(error = %e, "Remote classifier unavailable, using keyword scoring");
                self.keyword.classify_text(text)
            }
        }
    }
}
