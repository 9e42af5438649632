//! Shared types and collaborator traits for the auto-response pipeline.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::LogError;
use crate::responder::TenantId;
use crate::taxonomy::Category;

// ── Inbound / outbound mail ─────────────────────────────────────────

/// An inbound message handed to the pipeline by the enclosing application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomingEmail {
    /// Sender address — the reply goes back here.
    pub sender_email: String,
    /// Display name for `[Name]` personalization (if known).
    pub sender_name: Option<String>,
    /// Original subject line.
    pub subject: String,
    /// Raw body text — the classification input.
    pub body: String,
    /// When the message was received.
    pub received_at: DateTime<Utc>,
}

/// The envelope handed to the delivery collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutboundEmail {
    pub to: String,
    pub from: String,
    pub subject: String,
    /// Body with newlines converted to `<br>` line breaks.
    pub html: String,
    /// Plain-text body, unmodified.
    pub text: String,
}

/// Convert a plain-text body into the HTML variant of the envelope.
pub fn body_to_html(body: &str) -> String {
    body.replace('\n', "<br>")
}

// ── Delivery ────────────────────────────────────────────────────────

/// Outcome of a delivery attempt. Provider errors are reported here as
/// `accepted: false` plus a diagnostic, never as an `Err` — this keeps the
/// pipeline's control flow linear.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryResult {
    pub accepted: bool,
    pub diagnostic: Option<String>,
}

impl DeliveryResult {
    pub fn accepted() -> Self {
        Self {
            accepted: true,
            diagnostic: None,
        }
    }

    pub fn rejected(diagnostic: impl Into<String>) -> Self {
        Self {
            accepted: false,
            diagnostic: Some(diagnostic.into()),
        }
    }
}

/// The outbound-mail provider boundary. Implementations own the bounded
/// timeout; the caller owns any retry policy.
#[async_trait]
pub trait DeliveryService: Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> DeliveryResult;
}

// ── Transaction log ─────────────────────────────────────────────────

/// One processed transaction, as recorded for the external log/store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: Uuid,
    pub tenant: TenantId,
    pub sender_email: String,
    pub sender_name: Option<String>,
    pub original_subject: String,
    pub original_body: String,
    pub category: Category,
    pub confidence: f32,
    pub response_sent: bool,
    /// Response content, present only when delivery was accepted.
    pub response_subject: Option<String>,
    pub response_body: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Best-effort transaction recording. The pipeline fires and forgets:
/// a failure here is warned about and never masks the primary result.
#[async_trait]
pub trait TransactionLog: Send + Sync {
    async fn record(&self, entry: LogEntry) -> Result<(), LogError>;
}

// ── Outcome ─────────────────────────────────────────────────────────

/// Result of one `process_incoming` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProcessOutcome {
    /// Classified, templated, and accepted by the delivery provider.
    Sent { category: Category, confidence: f32 },
    /// Classified and templated, but the provider rejected the send.
    /// Classification is still reported; the caller owns retries.
    DeliveryFailed {
        category: Category,
        confidence: f32,
        reason: String,
    },
    /// Processing stopped before delivery (e.g. no active template).
    Failed { error: String },
}

impl ProcessOutcome {
    /// True only when the response was accepted by the provider.
    pub fn success(&self) -> bool {
        matches!(self, ProcessOutcome::Sent { .. })
    }

    /// Short label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            ProcessOutcome::Sent { .. } => "sent",
            ProcessOutcome::DeliveryFailed { .. } => "delivery_failed",
            ProcessOutcome::Failed { .. } => "failed",
        }
    }
}
