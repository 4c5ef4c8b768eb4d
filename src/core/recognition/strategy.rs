//! Recognition strategies and attempt records.
//!
//! A strategy is one configured way of submitting audio to the backend: an
//! audio format paired with a timeout. The canonical tier order runs from
//! most to least compatible: 16 kHz PCM WAV, 8 kHz PCM WAV, then the raw
//! upload with no format hint so the backend can auto-detect.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Per-strategy timeout in the observed configuration.
pub const STRATEGY_TIMEOUT: Duration = Duration::from_secs(30);

/// How the audio bytes of one attempt are described to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormatDescriptor {
    /// Mono 16-bit PCM WAV at the given sample rate.
    PcmWav { sample_rate: u32 },
    /// No format hint; the backend sniffs the stream.
    AutoDetect,
}

impl AudioFormatDescriptor {
    /// Stable label used in attempt diagnostics and logs.
    pub fn describe(&self) -> String {
        match self {
            Self::PcmWav { sample_rate } => format!("pcm-wav-{sample_rate}hz"),
            Self::AutoDetect => "auto-detect".to_string(),
        }
    }
}

impl std::fmt::Display for AudioFormatDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.describe())
    }
}

/// One configured submission attempt: format plus timeout.
#[derive(Debug, Clone)]
pub struct RecognitionStrategy {
    /// Stable identifier carried into attempt records.
    pub id: &'static str,
    /// Audio format for this tier.
    pub format: AudioFormatDescriptor,
    /// Budget for the backend's terminal event.
    pub timeout: Duration,
}

/// The canonical fallback tiers, most compatible first.
pub fn default_strategies() -> Vec<RecognitionStrategy> {
    strategies_with_timeout(STRATEGY_TIMEOUT)
}

/// The canonical tiers with an operator-supplied timeout.
pub fn strategies_with_timeout(timeout: Duration) -> Vec<RecognitionStrategy> {
    vec![
        RecognitionStrategy {
            id: "pcm-16khz",
            format: AudioFormatDescriptor::PcmWav { sample_rate: 16000 },
            timeout,
        },
        RecognitionStrategy {
            id: "pcm-8khz",
            format: AudioFormatDescriptor::PcmWav { sample_rate: 8000 },
            timeout,
        },
        RecognitionStrategy {
            id: "auto-detect",
            format: AudioFormatDescriptor::AutoDetect,
            timeout,
        },
    ]
}

/// Outcome of one recorded attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttemptOutcome {
    /// Non-empty transcript after trimming.
    Success,
    /// Backend terminal event without usable text.
    NoMatch,
    /// Backend or transport error.
    Error,
    /// The strategy timeout elapsed first.
    Timeout,
}

/// Immutable record of one strategy attempt within a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognitionAttempt {
    /// The strategy that was tried.
    pub strategy_id: String,
    /// Format descriptor label the audio was submitted under.
    pub format: String,
    /// How the attempt ended.
    pub outcome: AttemptOutcome,
    /// Transcript, present only on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recognized_text: Option<String>,
    /// Failure detail, absent on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl RecognitionAttempt {
    pub fn success(strategy: &RecognitionStrategy, text: String) -> Self {
        Self {
            strategy_id: strategy.id.to_string(),
            format: strategy.format.describe(),
            outcome: AttemptOutcome::Success,
            recognized_text: Some(text),
            error_message: None,
        }
    }

    pub fn no_match(strategy: &RecognitionStrategy, detail: impl Into<String>) -> Self {
        Self {
            strategy_id: strategy.id.to_string(),
            format: strategy.format.describe(),
            outcome: AttemptOutcome::NoMatch,
            recognized_text: None,
            error_message: Some(detail.into()),
        }
    }

    pub fn errored(strategy: &RecognitionStrategy, detail: impl Into<String>) -> Self {
        Self {
            strategy_id: strategy.id.to_string(),
            format: strategy.format.describe(),
            outcome: AttemptOutcome::Error,
            recognized_text: None,
            error_message: Some(detail.into()),
        }
    }

    pub fn timed_out(strategy: &RecognitionStrategy) -> Self {
        Self {
            strategy_id: strategy.id.to_string(),
            format: strategy.format.describe(),
            outcome: AttemptOutcome::Timeout,
            recognized_text: None,
            error_message: Some(format!(
                "no terminal event within {:?}",
                strategy.timeout
            )),
        }
    }
}
