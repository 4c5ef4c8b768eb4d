//! Text translation backend client.
//!
//! Thin wrapper over the Azure Translator v3 REST API. The handler layer
//! depends on the [`TranslationBackend`] trait, injected at startup.

mod client;
mod config;
mod messages;

pub use client::{TranslationBackend, TranslatorClient};
pub use config::TranslatorConfig;
pub use messages::{TranslationItem, TranslatorErrorResponse};

use thiserror::Error;

/// Errors surfaced by the translation backend, categorized by the service
/// status so the HTTP layer can map them onto user-facing responses.
#[derive(Debug, Error)]
pub enum TranslateError {
    /// The client was built with unusable settings.
    #[error("translator configuration error: {0}")]
    Configuration(String),

    /// Subscription key rejected (HTTP 401).
    #[error("authentication failed with translation service: {0}")]
    AuthenticationFailed(String),

    /// Subscription lacks access (HTTP 403).
    #[error("translation service access denied: {0}")]
    AccessDenied(String),

    /// Quota exhausted (HTTP 429).
    #[error("translation rate limit exceeded: {0}")]
    RateLimited(String),

    /// Any other non-success status.
    #[error("translation failed: {0}")]
    Provider(String),

    /// Transport-level failure.
    #[error("translation network error: {0}")]
    Network(String),

    /// A 2xx response that does not carry a translation.
    #[error("translation result invalid: {0}")]
    InvalidResponse(String),
}
