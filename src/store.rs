//! In-memory reference implementations of the store-facing traits.
//!
//! The production system keeps templates and logs in an external relational
//! store; these stand in for it in the demo binary and in tests, and encode
//! the one-active-template-per-category selection the core expects.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::{Mutex, RwLock};

use crate::error::{LogError, TemplateStoreError};
use crate::pipeline::types::{LogEntry, TransactionLog};
use crate::responder::{Template, TemplateLookup, TenantId, select_active};
use crate::taxonomy::Category;

/// Per-tenant template collection.
#[derive(Default)]
pub struct MemoryTemplateStore {
    templates: RwLock<HashMap<TenantId, Vec<Template>>>,
}

impl MemoryTemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a template for a tenant. Candidate sets may hold several
    /// templates per category; lookups pick the first active one.
    pub async fn insert(&self, tenant: TenantId, template: Template) {
        self.templates
            .write()
            .await
            .entry(tenant)
            .or_default()
            .push(template);
    }
}

#[async_trait]
impl TemplateLookup for MemoryTemplateStore {
    async fn active_template(
        &self,
        tenant: &TenantId,
        category: Category,
    ) -> Result<Option<Template>, TemplateStoreError> {
        let templates = self.templates.read().await;
        let candidates: Vec<Template> = templates
            .get(tenant)
            .map(|all| {
                all.iter()
                    .filter(|t| t.category == category)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Ok(select_active(&candidates).cloned())
    }
}

/// Append-only in-memory transaction log.
#[derive(Default)]
pub struct MemoryTransactionLog {
    entries: Mutex<Vec<LogEntry>>,
}

impl MemoryTransactionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded entries, oldest first.
    pub async fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().await.clone()
    }
}

#[async_trait]
impl TransactionLog for MemoryTransactionLog {
    async fn record(&self, entry: LogEntry) -> Result<(), LogError> {
        self.entries.lock().await.push(entry);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(category: Category, subject: &str, active: bool) -> Template {
        Template {
            category,
            subject: subject.into(),
            body: "body".into(),
            active,
        }
    }

    #[tokio::test]
    async fn lookup_is_scoped_by_tenant() {
        let store = MemoryTemplateStore::new();
        store
            .insert(
                TenantId::new("t1"),
                template(Category::General, "t1 general", true),
            )
            .await;

        let found = store
            .active_template(&TenantId::new("t1"), Category::General)
            .await
            .unwrap();
        assert_eq!(found.unwrap().subject, "t1 general");

        let other = store
            .active_template(&TenantId::new("t2"), Category::General)
            .await
            .unwrap();
        assert!(other.is_none());
    }

    #[tokio::test]
    async fn inactive_templates_are_skipped() {
        let store = MemoryTemplateStore::new();
        let tenant = TenantId::new("t1");
        store
            .insert(tenant.clone(), template(Category::Birthday, "retired", false))
            .await;
        store
            .insert(tenant.clone(), template(Category::Birthday, "current", true))
            .await;

        let found = store
            .active_template(&tenant, Category::Birthday)
            .await
            .unwrap();
        assert_eq!(found.unwrap().subject, "current");
    }

    #[tokio::test]
    async fn category_without_templates_is_none() {
        let store = MemoryTemplateStore::new();
        let tenant = TenantId::new("t1");
        store
            .insert(tenant.clone(), template(Category::Birthday, "b", true))
            .await;

        let found = store
            .active_template(&tenant, Category::WinBack)
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn transaction_log_appends_in_order() {
        use chrono::Utc;
        use uuid::Uuid;

        let log = MemoryTransactionLog::new();
        for i in 0..3 {
            log.record(LogEntry {
                id: Uuid::new_v4(),
                tenant: TenantId::new("t1"),
                sender_email: format!("s{i}@example.com"),
                sender_name: None,
                original_subject: "s".into(),
                original_body: "b".into(),
                category: Category::General,
                confidence: 0.3,
                response_sent: true,
                response_subject: None,
                response_body: None,
                created_at: Utc::now(),
            })
            .await
            .unwrap();
        }
        let entries = log.entries().await;
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].sender_email, "s0@example.com");
    }
}
