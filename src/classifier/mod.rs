//! Email classification.
//!
//! Two backends behind one trait:
//! - `KeywordClassifier` — deterministic keyword-overlap scoring, no I/O.
//! - `RemoteClassifier` — hosted zero-shot model (higher quality, may fail).
//!
//! `FallbackClassifier` composes them: remote first, keyword on any failure.
//! Classification never errors at the trait boundary — uncertainty is a low
//! confidence score, not an `Err`.

pub mod fallback;
pub mod keyword;
pub mod remote;

pub use fallback::FallbackClassifier;
pub use keyword::{KeywordClassifier, KeywordTable};
pub use remote::{RemoteClassifier, RemoteClassifierConfig};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::taxonomy::Category;

/// Confidence assigned when no keyword matched at all. Distinct from a
/// genuine low-scoring match (1 hit = 0.2).
pub const NO_MATCH_CONFIDENCE: f32 = 0.3;

/// Keyword hits at which confidence saturates at 1.0.
pub const SATURATION_HITS: f32 = 5.0;

/// The outcome of classifying one email body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub category: Category,
    /// Heuristic certainty in [0,1] — not a calibrated probability.
    pub confidence: f32,
}

/// A classification backend.
///
/// Implementations must be infallible: malformed or empty input degrades to
/// `general` with a low confidence, never an error.
#[async_trait]
pub trait Classifier: Send + Sync {
    async fn classify(&self, text: &str) -> Classification;
}
