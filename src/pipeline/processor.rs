//! The classify → respond → deliver → log orchestration.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::classifier::Classifier;
use crate::pipeline::types::{
    DeliveryService, IncomingEmail, LogEntry, OutboundEmail, ProcessOutcome, TransactionLog,
    body_to_html,
};
use crate::responder::{self, TemplateLookup, TenantId};

/// The auto-response pipeline. All collaborators are constructor-injected;
/// the pipeline itself holds no mutable state, so concurrent
/// `process_incoming` calls are fully independent.
pub struct EmailPipeline {
    classifier: Arc<dyn Classifier>,
    templates: Arc<dyn TemplateLookup>,
    delivery: Arc<dyn DeliveryService>,
    log: Arc<dyn TransactionLog>,
    /// Verified sender address used as the envelope `from`.
    verified_sender: String,
}

impl EmailPipeline {
    pub fn new(
        classifier: Arc<dyn Classifier>,
        templates: Arc<dyn TemplateLookup>,
        delivery: Arc<dyn DeliveryService>,
        log: Arc<dyn TransactionLog>,
        verified_sender: impl Into<String>,
    ) -> Self {
        Self {
            classifier,
            templates,
            delivery,
            log,
            verified_sender: verified_sender.into(),
        }
    }

    /// Process one inbound message end to end.
    ///
    /// Classification never fails. A missing active template stops the
    /// attempt with `Failed` (reported, not panicked). Delivery rejection
    /// yields `DeliveryFailed` with the classification retained. The log
    /// record is best-effort — its failure never changes the outcome.
    pub async fn process_incoming(
        &self,
        tenant: &TenantId,
        incoming: &IncomingEmail,
    ) -> ProcessOutcome {
        let classification = self.classifier.classify(&incoming.body).await;
        info!(
            %tenant,
            sender = %incoming.sender_email,
            category = %classification.category,
            confidence = classification.confidence,
            "Classified inbound email"
        );

        let sender_name = incoming.sender_name.as_deref().unwrap_or("");
        let response = match responder::generate(
            classification.category,
            self.templates.as_ref(),
            tenant,
            sender_name,
        )
        .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(%tenant, category = %classification.category, error = %e, "Response generation failed");
                return ProcessOutcome::Failed {
                    error: e.to_string(),
                };
            }
        };

        let outbound = OutboundEmail {
            to: incoming.sender_email.clone(),
            from: self.verified_sender.clone(),
            subject: response.subject.clone(),
            html: body_to_html(&response.body),
            text: response.body.clone(),
        };

        let delivered = self.delivery.send(&outbound).await;
        if let Some(ref diagnostic) = delivered.diagnostic {
            warn!(%tenant, to = %outbound.to, %diagnostic, "Delivery provider rejected the response");
        }

        let entry = LogEntry {
            id: Uuid::new_v4(),
            tenant: tenant.clone(),
            sender_email: incoming.sender_email.clone(),
            sender_name: incoming.sender_name.clone(),
            original_subject: incoming.subject.clone(),
            original_body: incoming.body.clone(),
            category: classification.category,
            confidence: classification.confidence,
            response_sent: delivered.accepted,
            response_subject: delivered.accepted.then(|| response.subject.clone()),
            response_body: delivered.accepted.then(|| response.body.clone()),
            created_at: Utc::now(),
        };
        if let Err(e) = self.log.record(entry).await {
            // Best-effort: the transaction result stands regardless.
            warn!(%tenant, error = %e, "Failed to record transaction log entry");
        }

        if delivered.accepted {
            ProcessOutcome::Sent {
                category: classification.category,
                confidence: classification.confidence,
            }
        } else {
            ProcessOutcome::DeliveryFailed {
                category: classification.category,
                confidence: classification.confidence,
                reason: delivered
                    .diagnostic
                    .unwrap_or_else(|| "delivery rejected".to_string()),
            }
        }
    }
}
