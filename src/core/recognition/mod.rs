//! Tiered-fallback speech recognition.
//!
//! The sequencer walks an ordered strategy list against an injected
//! [`RecognitionBackend`] until one tier yields a non-empty transcript or
//! all tiers are exhausted.

mod backend;
mod sequencer;
mod strategy;

pub use backend::{RecognitionBackend, RecognitionError, RecognitionOutcome, RecognizerSession};
pub use sequencer::{
    prepare_strategy_payloads, SessionError, SessionState, TranscriptionSession,
};
pub use strategy::{
    default_strategies, strategies_with_timeout, AttemptOutcome, AudioFormatDescriptor,
    RecognitionAttempt, RecognitionStrategy, STRATEGY_TIMEOUT,
};
