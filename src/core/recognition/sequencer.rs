//! The tiered recognition fallback state machine.
//!
//! A [`TranscriptionSession`] owns the attempt log for one uploaded file and
//! walks the configured strategy list strictly in order: `Pending` ->
//! `Trying(0)` -> ... -> `Succeeded(text)` or `Exhausted(attempts)`. The
//! first strategy to yield a non-empty transcript wins; later strategies
//! are never attempted. Every failure mode of an individual strategy
//! (no-match, empty text, backend error, timeout) is recorded and cascades
//! to the next tier.

use bytes::Bytes;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::core::audio::{AudioError, NormalizationPipeline};

use super::backend::{RecognitionBackend, RecognitionError, RecognitionOutcome, RecognizerSession};
use super::strategy::{
    default_strategies, AudioFormatDescriptor, RecognitionAttempt, RecognitionStrategy,
};

/// Where a session currently stands.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// Created, nothing submitted yet.
    Pending,
    /// Strategy at this index is in flight.
    Trying(usize),
    /// Terminal: a strategy produced this transcript.
    Succeeded(String),
    /// Terminal: every strategy failed; the full attempt log.
    Exhausted(Vec<RecognitionAttempt>),
}

/// Session-level failures surfaced to the caller.
///
/// Strategy-level failures never appear here; they live in the attempt log.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The upload could not be turned into submittable audio.
    #[error(transparent)]
    Audio(#[from] AudioError),

    /// Every configured strategy failed.
    #[error("no strategy produced a transcript ({} attempts)", .attempts.len())]
    RecognitionFailed { attempts: Vec<RecognitionAttempt> },

    /// The caller aborted before a terminal state was reached. No partial
    /// text is returned.
    #[error("transcription cancelled")]
    Cancelled,
}

/// Build the per-strategy submission payloads for one upload.
///
/// The upload is decoded at most once. Strategies that require format
/// conversion receive the re-encoded WAV at their tier's rate; the
/// auto-detect tier always receives the raw upload. When the decoder cannot
/// parse the upload (a compressed format without a configured decoder
/// backend), PCM tiers fall back to submitting the raw bytes under their
/// format hint, matching what the original uploader did when client-side
/// conversion failed.
///
/// # Errors
/// [`AudioError::InvalidAudio`] for an empty upload; no strategy is tried.
pub fn prepare_strategy_payloads(
    strategies: &[RecognitionStrategy],
    pipeline: &NormalizationPipeline,
    raw: &[u8],
    declared_mime: Option<&str>,
) -> Result<Vec<Bytes>, AudioError> {
    let decoded = match pipeline.decode(raw, declared_mime) {
        Ok(sample) => Some(sample),
        Err(AudioError::InvalidAudio(detail)) => {
            return Err(AudioError::InvalidAudio(detail));
        }
        Err(err) => {
            warn!(error = %err, "decode failed; submitting raw bytes to every tier");
            None
        }
    };

    let raw_payload = Bytes::copy_from_slice(raw);
    strategies
        .iter()
        .map(|strategy| match (&decoded, strategy.format) {
            (Some(sample), AudioFormatDescriptor::PcmWav { sample_rate }) => {
                NormalizationPipeline::convert(sample, sample_rate)
                    .map(|wav| Bytes::from(wav.into_bytes()))
            }
            _ => Ok(raw_payload.clone()),
        })
        .collect()
}

/// The ordered attempt sequence for one uploaded file.
///
/// Not shared across uploads: each session owns its strategies, state, and
/// attempt log. Strategies execute strictly sequentially; a new strategy
/// starts only after the prior one's terminal event, timeout, or teardown.
pub struct TranscriptionSession {
    strategies: Vec<RecognitionStrategy>,
    state: SessionState,
    attempts: Vec<RecognitionAttempt>,
}

impl TranscriptionSession {
    /// Session over the canonical strategy tiers.
    pub fn new() -> Self {
        Self::with_strategies(default_strategies())
    }

    /// Session over an explicit strategy list.
    pub fn with_strategies(strategies: Vec<RecognitionStrategy>) -> Self {
        Self {
            strategies,
            state: SessionState::Pending,
            attempts: Vec::new(),
        }
    }

    /// The configured strategy tiers, in submission order.
    pub fn strategies(&self) -> &[RecognitionStrategy] {
        &self.strategies
    }

    /// Current state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Attempts recorded so far, in submission order.
    pub fn attempts(&self) -> &[RecognitionAttempt] {
        &self.attempts
    }

    /// Drive the strategy tiers against `backend` until one yields a
    /// non-empty transcript or all are exhausted.
    ///
    /// `payloads` must align with [`strategies`](Self::strategies); build it
    /// with [`prepare_strategy_payloads`]. Each attempt opens a scoped
    /// recognizer session and closes it before the next tier starts,
    /// including on timeout and cancellation.
    ///
    /// # Errors
    /// [`SessionError::RecognitionFailed`] with the full attempt log on
    /// exhaustion, [`SessionError::Cancelled`] if `cancel` fires first.
    pub async fn run(
        &mut self,
        backend: &dyn RecognitionBackend,
        payloads: Vec<Bytes>,
        cancel: &CancellationToken,
    ) -> Result<String, SessionError> {
        debug_assert_eq!(payloads.len(), self.strategies.len());

        let strategies = self.strategies.clone();
        for (index, (strategy, payload)) in strategies.iter().zip(payloads).enumerate() {
            if cancel.is_cancelled() {
                return Err(SessionError::Cancelled);
            }

            self.state = SessionState::Trying(index);
            info!(
                strategy = strategy.id,
                format = %strategy.format,
                bytes = payload.len(),
                tier = index + 1,
                tiers = strategies.len(),
                "submitting recognition attempt"
            );

            match self.try_strategy(backend, strategy, payload, cancel).await? {
                StrategyVerdict::Succeeded(text) => {
                    info!(strategy = strategy.id, chars = text.len(), "recognition succeeded");
                    self.state = SessionState::Succeeded(text.clone());
                    return Ok(text);
                }
                StrategyVerdict::Failed(attempt) => {
                    debug!(
                        strategy = strategy.id,
                        outcome = ?attempt.outcome,
                        detail = attempt.error_message.as_deref().unwrap_or(""),
                        "recognition attempt failed"
                    );
                    self.attempts.push(attempt);
                }
            }
        }

        warn!(
            attempts = self.attempts.len(),
            "all recognition strategies exhausted"
        );
        self.state = SessionState::Exhausted(self.attempts.clone());
        Err(SessionError::RecognitionFailed {
            attempts: self.attempts.clone(),
        })
    }

    /// Run one strategy to its terminal event, timeout, or cancellation.
    /// The recognizer session is closed on every path out of this function.
    async fn try_strategy(
        &mut self,
        backend: &dyn RecognitionBackend,
        strategy: &RecognitionStrategy,
        payload: Bytes,
        cancel: &CancellationToken,
    ) -> Result<StrategyVerdict, SessionError> {
        let mut session = match backend.open_session(payload, strategy.format).await {
            Ok(session) => session,
            Err(err) => {
                return Ok(StrategyVerdict::Failed(RecognitionAttempt::errored(
                    strategy,
                    err.to_string(),
                )));
            }
        };

        let recognition = tokio::time::timeout(strategy.timeout, session.recognize_once());
        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            result = recognition => Some(result),
        };

        // Terminal event, timeout, or cancellation: tear the session down
        // before anything else happens.
        session.close().await;

        let Some(outcome) = outcome else {
            self.attempts.push(RecognitionAttempt::errored(
                strategy,
                "cancelled while in flight",
            ));
            return Err(SessionError::Cancelled);
        };

        let verdict = match outcome {
            Err(_elapsed) => {
                StrategyVerdict::Failed(RecognitionAttempt::timed_out(strategy))
            }
            Ok(Err(err)) => {
                StrategyVerdict::Failed(RecognitionAttempt::errored(strategy, err.to_string()))
            }
            Ok(Ok(RecognitionOutcome::Recognized { text })) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    StrategyVerdict::Failed(RecognitionAttempt::no_match(
                        strategy,
                        "recognizer returned an empty transcript",
                    ))
                } else {
                    let text = trimmed.to_string();
                    self.attempts
                        .push(RecognitionAttempt::success(strategy, text.clone()));
                    StrategyVerdict::Succeeded(text)
                }
            }
            Ok(Ok(RecognitionOutcome::NoMatch)) => StrategyVerdict::Failed(
                RecognitionAttempt::no_match(strategy, "no speech detected"),
            ),
            Ok(Ok(RecognitionOutcome::Error { details })) => {
                StrategyVerdict::Failed(RecognitionAttempt::errored(strategy, details))
            }
        };
        Ok(verdict)
    }
}

impl Default for TranscriptionSession {
    fn default() -> Self {
        Self::new()
    }
}

/// How one tier resolved, from the sequencer's point of view.
enum StrategyVerdict {
    Succeeded(String),
    Failed(RecognitionAttempt),
}
