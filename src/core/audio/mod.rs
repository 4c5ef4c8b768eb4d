//! Audio format normalization.
//!
//! Everything the recognizer receives flows through this module: uploaded
//! bytes are decoded into [`AudioSample`] buffers, downmixed and resampled
//! to mono at the target rate, and re-encoded as canonical 16-bit PCM WAV.
//!
//! The decode step is pluggable via the [`AudioDecoder`] trait; the
//! downmix/resample/encode steps are pure synchronous computation.

use thiserror::Error;

mod decode;
mod pipeline;
mod resample;
mod sample;
mod wav;

pub use decode::{AudioDecoder, WavDecoder};
pub use pipeline::NormalizationPipeline;
pub use resample::normalize;
pub use sample::{AudioSample, NormalizedAudio, TARGET_SAMPLE_RATE};
pub use wav::{WavBuffer, encode};

/// Errors produced while turning uploaded bytes into recognizer-ready audio.
///
/// All three variants are fatal for the input that produced them; none of
/// them triggers a retry.
#[derive(Debug, Error)]
pub enum AudioError {
    /// The input buffer is empty or not audio at all.
    #[error("invalid audio input: {0}")]
    InvalidAudio(String),

    /// The byte stream could not be parsed by the configured decoder.
    #[error("unsupported audio format: {0}")]
    UnsupportedFormat(String),

    /// The stream parsed but its contents are malformed (for example
    /// channel sequences of unequal length).
    #[error("audio decode failed: {0}")]
    Decode(String),
}
