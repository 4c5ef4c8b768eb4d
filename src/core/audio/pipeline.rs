//! The decode -> normalize -> encode pipeline.
//!
//! Single source of truth for what audio the recognizer receives. Strategies
//! that need format conversion route through this pipeline exactly once per
//! session: the session decodes once and re-normalizes per strategy rate.

use std::sync::Arc;

use tracing::debug;

use super::decode::AudioDecoder;
use super::sample::{AudioSample, TARGET_SAMPLE_RATE};
use super::wav::{encode, WavBuffer};
use super::{normalize, AudioError};

/// Orchestrates decoding, downmix/resample, and WAV encoding.
///
/// Holds the injected decode capability; everything downstream is pure
/// computation, so the pipeline is cheap to clone and safe to share across
/// concurrent sessions (it owns no per-session buffers).
#[derive(Clone)]
pub struct NormalizationPipeline {
    decoder: Arc<dyn AudioDecoder>,
}

impl NormalizationPipeline {
    pub fn new(decoder: Arc<dyn AudioDecoder>) -> Self {
        Self { decoder }
    }

    /// Decode raw uploaded bytes into an [`AudioSample`].
    ///
    /// # Errors
    /// [`AudioError::InvalidAudio`] for an empty buffer (the decoder is
    /// never consulted), otherwise whatever the decoder reports.
    pub fn decode(
        &self,
        raw: &[u8],
        declared_mime: Option<&str>,
    ) -> Result<AudioSample, AudioError> {
        if raw.is_empty() {
            return Err(AudioError::InvalidAudio(
                "audio payload is empty".to_string(),
            ));
        }
        self.decoder.decode(raw, declared_mime)
    }

    /// Produce the canonical recognizer submission: 16 kHz mono 16-bit WAV.
    ///
    /// Deterministic: identical input bytes yield byte-identical output.
    pub fn prepare_for_recognition(
        &self,
        raw: &[u8],
        declared_mime: Option<&str>,
    ) -> Result<WavBuffer, AudioError> {
        self.prepare_at(raw, declared_mime, TARGET_SAMPLE_RATE)
    }

    /// Like [`prepare_for_recognition`](Self::prepare_for_recognition) but
    /// targeting an explicit sample rate (the 8 kHz fallback tier).
    pub fn prepare_at(
        &self,
        raw: &[u8],
        declared_mime: Option<&str>,
        target_rate: u32,
    ) -> Result<WavBuffer, AudioError> {
        let sample = self.decode(raw, declared_mime)?;
        let wav = Self::convert(&sample, target_rate)?;
        debug!(
            input_bytes = raw.len(),
            output_bytes = wav.len(),
            target_rate,
            "prepared audio for recognition"
        );
        Ok(wav)
    }

    /// Normalize and encode an already-decoded sample.
    ///
    /// Used by sessions that decode once and convert per strategy rate.
    pub fn convert(sample: &AudioSample, target_rate: u32) -> Result<WavBuffer, AudioError> {
        let normalized = normalize(sample.clone(), target_rate)?;
        Ok(encode(&normalized))
    }
}
