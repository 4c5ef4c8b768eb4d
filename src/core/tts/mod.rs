//! Speech synthesis backend client.
//!
//! Thin wrapper over the Azure Speech synthesis REST API: SSML in, WAV
//! bytes out. The handler layer depends on the [`SynthesisBackend`] trait.

mod client;
mod config;

pub use client::{SynthesisBackend, SynthesisClient};
pub use config::SynthesisConfig;

use thiserror::Error;

/// Errors surfaced by the synthesis backend, categorized by service status.
#[derive(Debug, Error)]
pub enum SynthesisError {
    /// The client was built with unusable settings.
    #[error("synthesis configuration error: {0}")]
    Configuration(String),

    /// Subscription key rejected (HTTP 401).
    #[error("authentication failed with the speech service: {0}")]
    AuthenticationFailed(String),

    /// Subscription lacks access (HTTP 403).
    #[error("speech service access denied: {0}")]
    AccessDenied(String),

    /// Quota exhausted (HTTP 429).
    #[error("synthesis rate limit exceeded: {0}")]
    RateLimited(String),

    /// Any other non-success status.
    #[error("speech synthesis failed: {0}")]
    Provider(String),

    /// Transport-level failure.
    #[error("synthesis network error: {0}")]
    Network(String),

    /// A 2xx response with no audio payload.
    #[error("synthesis result invalid: {0}")]
    InvalidResponse(String),
}
