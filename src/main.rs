use std::io::Read;
use std::sync::Arc;

use chrono::Utc;
use replyflow::classifier::{Classifier, FallbackClassifier, KeywordClassifier, RemoteClassifier};
use replyflow::config::PipelineConfig;
use replyflow::delivery::HttpRelayDelivery;
use replyflow::pipeline::{EmailPipeline, IncomingEmail};
use replyflow::responder::{Template, TenantId};
use replyflow::store::{MemoryTemplateStore, MemoryTransactionLog};
use replyflow::taxonomy::Category;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = PipelineConfig::from_env()?;

    let sender_email = std::env::var("REPLYFLOW_SENDER_EMAIL")
        .unwrap_or_else(|_| "sender@example.com".to_string());
    let sender_name = std::env::var("REPLYFLOW_SENDER_NAME").ok();
    let tenant = TenantId::new(
        std::env::var("REPLYFLOW_TENANT").unwrap_or_else(|_| "demo-tenant".to_string()),
    );

    eprintln!("replyflow v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Verified sender: {}", config.verified_sender);
    eprintln!(
        "   Classifier: {}",
        if config.remote_classifier.is_some() {
            "remote zero-shot with keyword fallback"
        } else {
            "keyword"
        }
    );
    eprintln!("   Paste an email body, then close stdin (Ctrl-D).\n");

    let mut body = String::new();
    std::io::stdin().read_to_string(&mut body)?;

    let keyword = KeywordClassifier::default();
    let classifier: Arc<dyn Classifier> = match config.remote_classifier.clone() {
        Some(remote) => Arc::new(FallbackClassifier::new(
            RemoteClassifier::new(remote),
            keyword,
        )),
        None => Arc::new(keyword),
    };

    // Without a relay configured there is nothing to deliver through, so
    // report the classification alone.
    let Some(relay) = config.relay.clone() else {
        let classification = classifier.classify(&body).await;
        println!("{}", serde_json::to_string_pretty(&classification)?);
        return Ok(());
    };

    let templates = Arc::new(MemoryTemplateStore::new());
    seed_demo_templates(&templates, &tenant).await;
    let log = Arc::new(MemoryTransactionLog::new());

    let pipeline = EmailPipeline::new(
        classifier,
        templates,
        Arc::new(HttpRelayDelivery::new(relay)),
        Arc::clone(&log) as Arc<dyn replyflow::pipeline::types::TransactionLog>,
        config.verified_sender.clone(),
    );

    let incoming = IncomingEmail {
        sender_email,
        sender_name,
        subject: std::env::var("REPLYFLOW_SUBJECT").unwrap_or_else(|_| "(no subject)".to_string()),
        body,
        received_at: Utc::now(),
    };

    let outcome = pipeline.process_incoming(&tenant, &incoming).await;
    println!("{}", serde_json::to_string_pretty(&outcome)?);

    let stats = replyflow::stats::summarize(&log.entries().await);
    eprintln!(
        "\nProcessed {} email(s), {} response(s) sent ({:.0}% response rate)",
        stats.total_emails, stats.responses_sent, stats.response_rate
    );

    Ok(())
}

/// One active template per common category, enough to exercise the pipeline
/// without the external store.
async fn seed_demo_templates(store: &MemoryTemplateStore, tenant: &TenantId) {
    let demo = [
        (
            Category::OrderInquiry,
            "About your order, [Name]",
            "Hi [Name],\n\nThanks for reaching out about your order. We're checking the status and will follow up shortly.\n\nBest,\nThe team",
        ),
        (
            Category::SupportRequest,
            "We're on it, [Name]",
            "Hi [Name],\n\nSorry you ran into trouble. Our support team has your report and will get back to you soon.\n\nBest,\nThe team",
        ),
        (
            Category::General,
            "Thanks for your message, [Name]",
            "Hi [Name],\n\nThanks for getting in touch. We'll reply as soon as we can.\n\nBest,\nThe team",
        ),
    ];

    for (category, subject, body) in demo {
        store
            .insert(
                tenant.clone(),
                Template {
                    category,
                    subject: subject.to_string(),
                    body: body.to_string(),
                    active: true,
                },
            )
            .await;
    }
}
