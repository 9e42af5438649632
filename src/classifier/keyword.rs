//! Keyword-overlap classifier — the primary, deterministic backend.
//!
//! Scoring: lowercase the body, count how many of a category's keywords
//! occur anywhere in it as substrings (each keyword counts at most once, so
//! repetition never inflates a score), take the first category in taxonomy
//! order with the strictly highest count. Zero hits everywhere resolves to
//! `general` at a fixed 0.3; otherwise confidence is min(hits / 5, 1.0).

use async_trait::async_trait;
use tracing::debug;

use crate::classifier::{Classification, Classifier, NO_MATCH_CONFIDENCE, SATURATION_HITS};
use crate::taxonomy::Category;

/// Immutable per-category keyword lists, built once at startup and shared
/// read-only across any number of concurrent classifications.
#[derive(Debug, Clone)]
pub struct KeywordTable {
    entries: Vec<(Category, &'static [&'static str])>,
}

/// Hand-tuned keyword lists. The order_inquiry and support_request lists are
/// calibration-sensitive (downstream confidence expectations depend on their
/// exact contents); the rest were chosen to keep categories from shadowing
/// each other on common phrasings. `general` carries no keywords — it is the
/// fallback, never scored.
const BUILTIN_KEYWORDS: [(Category, &[&str]); 19] = [
    (
        Category::OrderInquiry,
        &[
            "order", "purchase", "buy", "product", "price", "cost", "payment", "invoice",
            "shipping", "delivery",
        ],
    ),
    (
        Category::SupportRequest,
        &[
            "help",
            "problem",
            "issue",
            "bug",
            "error",
            "not working",
            "broken",
            "fix",
            "troubleshoot",
            "support",
        ],
    ),
    (
        Category::AbandonedCart,
        &["cart", "checkout", "abandoned", "unfinished", "waiting for you"],
    ),
    (
        Category::WelcomeEmail,
        &["welcome", "getting started", "onboard", "new account", "glad you joined"],
    ),
    (
        Category::ReEngagement,
        &["miss you", "been a while", "come back", "inactive", "long time"],
    ),
    (
        Category::Promotional,
        &["sale", "discount", "promo", "coupon", "limited time", "special offer"],
    ),
    (
        Category::Newsletter,
        &["newsletter", "digest", "this week", "roundup", "monthly update"],
    ),
    (
        Category::Confirmation,
        &["confirm", "receipt", "booking", "reservation", "verify"],
    ),
    (
        Category::Birthday,
        &["birthday", "celebrate", "cake", "special day", "many happy returns"],
    ),
    (
        Category::FeedbackRequest,
        &["feedback", "survey", "your opinion", "rate your", "tell us"],
    ),
    (
        Category::CrossSellUpsell,
        &["you may also like", "recommended", "upgrade", "bundle", "pairs well"],
    ),
    (
        Category::Motivational,
        &["motivation", "inspire", "you can do it", "keep going", "believe"],
    ),
    (
        Category::BackInStock,
        &["back in stock", "restocked", "available again", "inventory"],
    ),
    (
        Category::Behavioral,
        &["you viewed", "browsing", "recently looked", "activity", "based on your"],
    ),
    (
        Category::DripCampaign,
        &["drip", "email series", "next in the series", "lesson"],
    ),
    (
        Category::EmailMarketing,
        &["marketing", "campaign", "audience", "subscribers", "open rate"],
    ),
    (
        Category::ProductReview,
        &["review", "rating", "stars", "testimonial", "share your experience"],
    ),
    (
        Category::ReEngagementCampaign,
        &["re-engagement", "dormant", "reactivate", "still interested"],
    ),
    (
        Category::WinBack,
        &["win back", "one last chance", "before you go"],
    ),
];

impl KeywordTable {
    /// The built-in table. Entries follow taxonomy declaration order, which
    /// is what makes tie-breaks deterministic.
    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN_KEYWORDS.to_vec(),
        }
    }

    /// Keywords for one category (empty for `general`).
    pub fn keywords(&self, category: Category) -> &[&'static str] {
        self.entries
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, kws)| *kws)
            .unwrap_or(&[])
    }

    /// Count distinct keyword hits for every category against an
    /// already-lowercased body. Repeated occurrences of one keyword still
    /// count once.
    fn score(&self, lowered: &str) -> Vec<(Category, usize)> {
        self.entries
            .iter()
            .map(|(category, keywords)| {
                let hits = keywords.iter().filter(|kw| lowered.contains(*kw)).count();
                (*category, hits)
            })
            .collect()
    }
}

/// The pure keyword-scoring classifier. Safe for unlimited concurrent use;
/// holds nothing but the immutable table.
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    table: KeywordTable,
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::new(KeywordTable::builtin())
    }
}

impl KeywordClassifier {
    pub fn new(table: KeywordTable) -> Self {
        Self { table }
    }

    /// Classify synchronously. Any input is valid — empty or keyword-free
    /// text resolves to `general` with the fixed no-match confidence.
    pub fn classify_text(&self, text: &str) -> Classification {
        let lowered = text.to_lowercase();

        let mut best: Option<(Category, usize)> = None;
        for (category, hits) in self.table.score(&lowered) {
            // Strict > keeps the first category in taxonomy order on ties.
            if hits > best.map(|(_, h)| h).unwrap_or(0) {
                best = Some((category, hits));
            }
        }

        let classification = match best {
            Some((category, hits)) => Classification {
                category,
                confidence: (hits as f32 / SATURATION_HITS).min(1.0),
            },
            None => Classification {
                category: Category::General,
                confidence: NO_MATCH_CONFIDENCE,
            },
        };

        debug!(
            category = %classification.category,
            confidence = classification.confidence,
            "Keyword classification"
        );
        classification
    }
}

#[async_trait]
impl Classifier for KeywordClassifier {
    async fn classify(&self, text: &str) -> Classification {
        self.classify_text(text)
    }
}
