//! The fixed email-category taxonomy.
//!
//! `Category` is a closed set: classification always resolves to exactly one
//! variant, and the declaration order below is the tie-break order for
//! keyword scoring. External stores may grow extra category tags; those parse
//! to `None` and callers fall back to `General`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One label from the classification taxonomy.
///
/// Declaration order is load-bearing: `KeywordClassifier` resolves score ties
/// in favor of the earliest variant. Do not re-sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    OrderInquiry,
    SupportRequest,
    General,
    AbandonedCart,
    WelcomeEmail,
    ReEngagement,
    Promotional,
    Newsletter,
    Confirmation,
    Birthday,
    FeedbackRequest,
    CrossSellUpsell,
    Motivational,
    BackInStock,
    Behavioral,
    DripCampaign,
    EmailMarketing,
    ProductReview,
    ReEngagementCampaign,
    WinBack,
}

impl Category {
    /// All categories in declaration (tie-break) order.
    pub const ALL: [Category; 20] = [
        Category::OrderInquiry,
        Category::SupportRequest,
        Category::General,
        Category::AbandonedCart,
        Category::WelcomeEmail,
        Category::ReEngagement,
        Category::Promotional,
        Category::Newsletter,
        Category::Confirmation,
        Category::Birthday,
        Category::FeedbackRequest,
        Category::CrossSellUpsell,
        Category::Motivational,
        Category::BackInStock,
        Category::Behavioral,
        Category::DripCampaign,
        Category::EmailMarketing,
        Category::ProductReview,
        Category::ReEngagementCampaign,
        Category::WinBack,
    ];

    /// Stable snake_case tag, matching the external store's category column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::OrderInquiry => "order_inquiry",
            Category::SupportRequest => "support_request",
            Category::General => "general",
            Category::AbandonedCart => "abandoned_cart",
            Category::WelcomeEmail => "welcome_email",
            Category::ReEngagement => "re_engagement",
            Category::Promotional => "promotional",
            Category::Newsletter => "newsletter",
            Category::Confirmation => "confirmation",
            Category::Birthday => "birthday",
            Category::FeedbackRequest => "feedback_request",
            Category::CrossSellUpsell => "cross_sell_upsell",
            Category::Motivational => "motivational",
            Category::BackInStock => "back_in_stock",
            Category::Behavioral => "behavioral",
            Category::DripCampaign => "drip_campaign",
            Category::EmailMarketing => "email_marketing",
            Category::ProductReview => "product_review",
            Category::ReEngagementCampaign => "re_engagement_campaign",
            Category::WinBack => "win_back",
        }
    }

    /// Parse a stored tag. Unknown tags (e.g. categories added in the
    /// external store after this build) return `None`; callers fall back to
    /// [`Category::General`].
    pub fn from_tag(tag: &str) -> Option<Self> {
        Category::ALL.iter().copied().find(|c| c.as_str() == tag)
    }

    /// Human-readable label sent to the remote zero-shot classifier as a
    /// candidate, e.g. "order inquiry".
    pub fn remote_label(&self) -> String {
        self.as_str().replace('_', " ")
    }

    /// Map a remote classifier label back into the taxonomy.
    pub fn from_remote_label(label: &str) -> Option<Self> {
        let normalized = label.trim().to_lowercase();
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.remote_label() == normalized)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
