//! Error types for replyflow.

use crate::taxonomy::Category;

/// Top-level error type for the responder core.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Classification error: {0}")]
    Classify(#[from] ClassifyError),

    #[error("Template store error: {0}")]
    TemplateStore(#[from] TemplateStoreError),

    #[error("Responder error: {0}")]
    Responder(#[from] ResponderError),

    #[error("Transaction log error: {0}")]
    Log(#[from] LogError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Remote classification failures.
///
/// These never reach pipeline callers — `FallbackClassifier` converts every
/// variant into a keyword-mode pass.
#[derive(Debug, thiserror::Error)]
pub enum ClassifyError {
    #[error("Zero-shot request failed: {0}")]
    Http(String),

    #[error("Zero-shot endpoint returned status {status}: {body}")]
    BadStatus { status: u16, body: String },

    #[error("Malformed zero-shot response: {0}")]
    InvalidResponse(String),

    #[error("Zero-shot endpoint returned no labels")]
    EmptyResponse,

    #[error("Unmapped classification label: {0}")]
    UnknownLabel(String),
}

/// Template lookup backend errors.
#[derive(Debug, thiserror::Error)]
pub enum TemplateStoreError {
    #[error("Template store query failed: {0}")]
    Backend(String),
}

/// Response-generation errors.
#[derive(Debug, thiserror::Error)]
pub enum ResponderError {
    #[error("No active template found for category {0}")]
    TemplateNotFound(Category),

    #[error("Template store error: {0}")]
    Store(#[from] TemplateStoreError),
}

/// Transaction log errors. Recording is best-effort — the pipeline warns on
/// these and never lets them mask the primary result.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("Failed to record transaction: {0}")]
    Backend(String),
}

/// Result type alias for the responder core.
pub type Result<T> = std::result::Result<T, Error>;
