//! replyflow — email classification and templated auto-response core.
//!
//! Inbound message → keyword (or remote zero-shot, with silent fallback)
//! classification → active per-tenant template → `[Name]` personalization →
//! external delivery + best-effort transaction log.

pub mod classifier;
pub mod config;
pub mod delivery;
pub mod error;
pub mod pipeline;
pub mod responder;
pub mod stats;
pub mod store;
pub mod taxonomy;
