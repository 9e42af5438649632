//! End-to-end pipeline flow against in-memory collaborators.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use replyflow::classifier::KeywordClassifier;
use replyflow::pipeline::{
    DeliveryResult, DeliveryService, EmailPipeline, IncomingEmail, OutboundEmail, ProcessOutcome,
    TransactionLog,
};
use replyflow::responder::{Template, TenantId};
use replyflow::store::{MemoryTemplateStore, MemoryTransactionLog};
use replyflow::taxonomy::Category;

/// Delivery double that accepts everything and keeps the envelopes.
#[derive(Default)]
struct CapturingDelivery {
    sent: Mutex<Vec<OutboundEmail>>,
}

#[async_trait]
impl DeliveryService for CapturingDelivery {
    async fn send(&self, email: &OutboundEmail) -> DeliveryResult {
        self.sent.lock().await.push(email.clone());
        DeliveryResult::accepted()
    }
}

async fn seeded_store(tenant: &TenantId) -> Arc<MemoryTemplateStore> {
    let store = MemoryTemplateStore::new();
    store
        .insert(
            tenant.clone(),
            Template {
                category: Category::OrderInquiry,
                subject: "Re: your order, [Name]".into(),
                body: "Hi [Name],\nwe received your order question.\nWe'll reply soon.".into(),
                active: true,
            },
        )
        .await;
    store
        .insert(
            tenant.clone(),
            Template {
                category: Category::General,
                subject: "Thanks, [Name]".into(),
                body: "Hi [Name], thanks for writing in.".into(),
                active: true,
            },
        )
        .await;
    Arc::new(store)
}

#[tokio::test]
async fn order_inquiry_end_to_end() {
    let tenant = TenantId::new("acct-42");
    let delivery = Arc::new(CapturingDelivery::default());
    let log = Arc::new(MemoryTransactionLog::new());

    let pipeline = EmailPipeline::new(
        Arc::new(KeywordClassifier::default()),
        seeded_store(&tenant).await,
        Arc::clone(&delivery) as Arc<dyn DeliveryService>,
        Arc::clone(&log) as Arc<dyn TransactionLog>,
        "noreply@shop.example.com",
    );

    let incoming = IncomingEmail {
        sender_email: "sam@customer.example.com".into(),
        sender_name: Some("Sam".into()),
        subject: "Where is my package?".into(),
        body: "I want to check my order shipping status".into(),
        received_at: Utc::now(),
    };

    let outcome = pipeline.process_incoming(&tenant, &incoming).await;

    // "order" and "shipping" both hit: score 2, confidence 0.4.
    match &outcome {
        ProcessOutcome::Sent {
            category,
            confidence,
        } => {
            assert_eq!(*category, Category::OrderInquiry);
            assert_eq!(*confidence, 0.4);
        }
        other => panic!("Expected Sent, got {other:?}"),
    }
    assert!(outcome.success());

    // Exactly one envelope, personalized and addressed back to the sender.
    let sent = delivery.sent.lock().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "sam@customer.example.com");
    assert_eq!(sent[0].from, "noreply@shop.example.com");
    assert_eq!(sent[0].subject, "Re: your order, Sam");
    assert_eq!(
        sent[0].html,
        "Hi Sam,<br>we received your order question.<br>We'll reply soon."
    );
    assert_eq!(
        sent[0].text,
        "Hi Sam,\nwe received your order question.\nWe'll reply soon."
    );

    // Full transaction recorded.
    let entries = log.entries().await;
    assert_eq!(entries.len(), 1);
    let entry = &entries[0];
    assert_eq!(entry.tenant, tenant);
    assert_eq!(entry.category, Category::OrderInquiry);
    assert_eq!(entry.confidence, 0.4);
    assert!(entry.response_sent);
    assert_eq!(entry.original_body, "I want to check my order shipping status");
    assert_eq!(entry.response_subject.as_deref(), Some("Re: your order, Sam"));
}

#[tokio::test]
async fn keyword_free_body_uses_general_template() {
    let tenant = TenantId::new("acct-42");
    let delivery = Arc::new(CapturingDelivery::default());
    let log = Arc::new(MemoryTransactionLog::new());

    let pipeline = EmailPipeline::new(
        Arc::new(KeywordClassifier::default()),
        seeded_store(&tenant).await,
        Arc::clone(&delivery) as Arc<dyn DeliveryService>,
        Arc::clone(&log) as Arc<dyn TransactionLog>,
        "noreply@shop.example.com",
    );

    let incoming = IncomingEmail {
        sender_email: "kim@customer.example.com".into(),
        sender_name: None,
        subject: "hello".into(),
        body: "just wanted to say hello".into(),
        received_at: Utc::now(),
    };

    let outcome = pipeline.process_incoming(&tenant, &incoming).await;
    match outcome {
        ProcessOutcome::Sent {
            category,
            confidence,
        } => {
            assert_eq!(category, Category::General);
            assert_eq!(confidence, 0.3);
        }
        other => panic!("Expected Sent, got {other:?}"),
    }

    // No sender name: the neutral fallback is substituted.
    let sent = delivery.sent.lock().await;
    assert_eq!(sent[0].subject, "Thanks, there");
}

#[tokio::test]
async fn concurrent_messages_are_independent() {
    let tenant = TenantId::new("acct-42");
    let delivery = Arc::new(CapturingDelivery::default());
    let log = Arc::new(MemoryTransactionLog::new());

    let pipeline = Arc::new(EmailPipeline::new(
        Arc::new(KeywordClassifier::default()),
        seeded_store(&tenant).await,
        Arc::clone(&delivery) as Arc<dyn DeliveryService>,
        Arc::clone(&log) as Arc<dyn TransactionLog>,
        "noreply@shop.example.com",
    ));

    let mut handles = Vec::new();
    for i in 0..8 {
        let pipeline = Arc::clone(&pipeline);
        let tenant = tenant.clone();
        handles.push(tokio::spawn(async move {
            let incoming = IncomingEmail {
                sender_email: format!("user{i}@example.com"),
                sender_name: Some(format!("User {i}")),
                subject: "order".into(),
                body: "a question about my order".into(),
                received_at: Utc::now(),
            };
            pipeline.process_incoming(&tenant, &incoming).await
        }));
    }

    for handle in handles {
        let outcome = handle.await.expect("task panicked");
        assert!(outcome.success());
    }

    assert_eq!(delivery.sent.lock().await.len(), 8);
    assert_eq!(log.entries().await.len(), 8);
}
