//! The auto-response pipeline.
//!
//! One inbound message flows through:
//! 1. `Classifier::classify()` — category + confidence, never an error
//! 2. `responder::generate()` — active template + `[Name]` personalization
//! 3. `DeliveryService::send()` — external provider, bool + diagnostic
//! 4. `TransactionLog::record()` — best-effort audit record
//!
//! Collaborators are injected traits; the pipeline holds no mutable state.

pub mod processor;
pub mod types;

pub use processor::EmailPipeline;
pub use types::{
    DeliveryResult, DeliveryService, IncomingEmail, LogEntry, OutboundEmail, ProcessOutcome,
    TransactionLog,
};
