//! Templated response generation.
//!
//! Given a resolved category, a read-only template lookup, and the sender's
//! display name, produce a personalized subject/body pair. Every literal
//! `[Name]` placeholder is replaced in a single non-recursive pass — the
//! substituted name itself is never re-scanned for placeholders.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ResponderError, TemplateStoreError};
use crate::taxonomy::Category;

/// Substituted when the sender's display name is missing or blank.
pub const NEUTRAL_NAME: &str = "there";

static NAME_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[Name\]").expect("placeholder pattern is valid"));

/// The tenant (owning account) whose templates and logs are in scope.
/// Scoping itself is enforced by the external store; the core just threads
/// this through.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TenantId(String);

impl TenantId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TenantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A response template as persisted by the external store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub category: Category,
    /// May contain `[Name]` placeholders.
    pub subject: String,
    /// May contain `[Name]` placeholders.
    pub body: String,
    /// At most one active template is expected per (tenant, category).
    pub active: bool,
}

/// A personalized subject/body pair, ready for delivery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedResponse {
    pub subject: String,
    pub body: String,
}

/// Read-only collaborator answering "the active template for category X,
/// for this tenant". Implemented by the external store.
#[async_trait]
pub trait TemplateLookup: Send + Sync {
    async fn active_template(
        &self,
        tenant: &TenantId,
        category: Category,
    ) -> Result<Option<Template>, TemplateStoreError>;
}

/// Pick the active template out of a candidate set. Lookups backed by stores
/// that return all candidates for a category use this to enforce the
/// one-active-per-category expectation (first active wins).
pub fn select_active(candidates: &[Template]) -> Option<&Template> {
    candidates.iter().find(|t| t.active)
}

/// Generate the personalized response for an already-classified message.
///
/// Fails with [`ResponderError::TemplateNotFound`] when the lookup has no
/// active template — the core never fabricates a fallback template; the
/// caller decides whether to retry, skip, or alert.
pub async fn generate(
    category: Category,
    templates: &dyn TemplateLookup,
    tenant: &TenantId,
    sender_name: &str,
) -> Result<GeneratedResponse, ResponderError> {
    let template = templates
        .active_template(tenant, category)
        .await?
        .ok_or(ResponderError::TemplateNotFound(category))?;

    let name = if sender_name.trim().is_empty() {
        NEUTRAL_NAME
    } else {
        sender_name
    };

    debug!(%category, %tenant, "Generating templated response");
    Ok(GeneratedResponse {
        subject: personalize(&template.subject, name),
        body: personalize(&template.body, name),
    })
}

/// Replace every `[Name]` occurrence with the given name, verbatim.
fn personalize(text: &str, name: &str) -> String {
    NAME_PLACEHOLDER
        .replace_all(text, regex::NoExpand(name))
        .into_owned()
}
