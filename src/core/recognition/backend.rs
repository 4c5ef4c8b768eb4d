//! Recognition backend contract.
//!
//! The sequencer never talks to a cloud SDK directly; it drives these
//! traits, injected at construction time. Recognizer sessions are scoped
//! resources: one per strategy attempt, closed on every exit path (success,
//! no-match, error, timeout, cancellation) so nothing leaks across
//! strategies.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

use super::strategy::AudioFormatDescriptor;

/// Terminal event of a single recognition submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionOutcome {
    /// The backend produced a transcript (possibly blank).
    Recognized { text: String },
    /// The backend processed the audio but detected no speech.
    NoMatch,
    /// The backend reported a processing error.
    Error { details: String },
}

/// Errors raised while talking to the recognition backend.
#[derive(Debug, Error)]
pub enum RecognitionError {
    /// The client was built with unusable settings.
    #[error("recognition configuration error: {0}")]
    Configuration(String),

    /// The backend rejected the request or failed server-side.
    #[error("recognition backend error: {0}")]
    Backend(String),

    /// Transport-level failure before a terminal event arrived.
    #[error("recognition network error: {0}")]
    Network(String),

    /// The attempt exceeded its strategy timeout. Raised by the sequencer,
    /// never by a backend implementation.
    #[error("recognition timed out after {0:?}")]
    Timeout(Duration),
}

/// A speech-recognition backend capable of one-shot transcription.
#[async_trait]
pub trait RecognitionBackend: Send + Sync {
    /// Open a scoped recognizer session for one submission of `audio`
    /// described by `format`.
    async fn open_session(
        &self,
        audio: Bytes,
        format: AudioFormatDescriptor,
    ) -> Result<Box<dyn RecognizerSession>, RecognitionError>;
}

/// An in-flight recognizer, bounded to a single attempt.
#[async_trait]
pub trait RecognizerSession: Send {
    /// Await the terminal event for this submission.
    async fn recognize_once(&mut self) -> Result<RecognitionOutcome, RecognitionError>;

    /// Release backend resources. Idempotent; the sequencer calls this on
    /// every exit path, including after timeout and cancellation.
    async fn close(&mut self);
}
