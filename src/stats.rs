//! Dashboard summary over transaction log entries.
//!
//! Pure computation — the caller fetches the tenant's entries from the
//! external store and hands them in.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::pipeline::types::LogEntry;
use crate::taxonomy::Category;

/// How many entries `recent` keeps.
pub const RECENT_LIMIT: usize = 10;

/// Aggregated view of a tenant's processed emails.
#[derive(Debug, Clone, Serialize)]
pub struct EmailStats {
    pub total_emails: usize,
    pub responses_sent: usize,
    /// Percentage of processed emails that got a response out.
    pub response_rate: f32,
    pub category_counts: BTreeMap<Category, usize>,
    /// Up to [`RECENT_LIMIT`] entries, newest first.
    pub recent: Vec<LogEntry>,
}

/// Summarize a slice of log entries, in any order.
pub fn summarize(entries: &[LogEntry]) -> EmailStats {
    let total_emails = entries.len();
    let responses_sent = entries.iter().filter(|e| e.response_sent).count();
    let response_rate = if total_emails > 0 {
        (responses_sent as f32 / total_emails as f32) * 100.0
    } else {
        0.0
    };

    let mut category_counts: BTreeMap<Category, usize> = BTreeMap::new();
    for entry in entries {
        *category_counts.entry(entry.category).or_default() += 1;
    }

    let mut recent: Vec<LogEntry> = entries.to_vec();
    recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    recent.truncate(RECENT_LIMIT);

    EmailStats {
        total_emails,
        responses_sent,
        response_rate,
        category_counts,
        recent,
    }
}
