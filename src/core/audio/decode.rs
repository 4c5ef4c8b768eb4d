//! Decoding uploaded bytes into [`AudioSample`] buffers.
//!
//! Decoding is a pluggable capability: the pipeline receives an
//! [`AudioDecoder`] at construction time rather than reaching for a global.
//! The built-in [`WavDecoder`] handles RIFF/WAV streams (integer and float
//! PCM at any rate and channel count) through `hound`; compressed uploads
//! (MP3/M4A) need a decoder backend that understands them.

use std::io::Cursor;

use tracing::debug;

use super::sample::AudioSample;
use super::AudioError;

/// Parses raw uploaded bytes into a decoded audio buffer.
pub trait AudioDecoder: Send + Sync {
    /// Decode `raw` into an [`AudioSample`].
    ///
    /// `declared_mime` is the content type the uploader claimed, when known.
    /// Implementations may use it as a hint but should trust the bytes.
    ///
    /// # Errors
    /// [`AudioError::UnsupportedFormat`] when the byte stream cannot be
    /// parsed, [`AudioError::Decode`] when it parses but is malformed.
    fn decode(&self, raw: &[u8], declared_mime: Option<&str>) -> Result<AudioSample, AudioError>;
}

/// RIFF/WAV decoder built on `hound`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WavDecoder;

impl AudioDecoder for WavDecoder {
    fn decode(&self, raw: &[u8], declared_mime: Option<&str>) -> Result<AudioSample, AudioError> {
        let reader = hound::WavReader::new(Cursor::new(raw)).map_err(|e| {
            AudioError::UnsupportedFormat(format!(
                "cannot parse byte stream as WAV (declared format: {}): {e}",
                declared_mime.unwrap_or("unknown")
            ))
        })?;
        let spec = reader.spec();
        if spec.channels == 0 {
            return Err(AudioError::Decode("WAV header declares zero channels".to_string()));
        }
        if spec.sample_rate == 0 {
            return Err(AudioError::Decode("WAV header declares zero sample rate".to_string()));
        }

        debug!(
            sample_rate = spec.sample_rate,
            channels = spec.channels,
            bits = spec.bits_per_sample,
            "decoding WAV upload"
        );

        let interleaved: Vec<f32> = match spec.sample_format {
            hound::SampleFormat::Int => {
                let max_val = (1i64 << (spec.bits_per_sample - 1)) as f32;
                reader
                    .into_samples::<i32>()
                    .filter_map(Result::ok)
                    .map(|s| s as f32 / max_val)
                    .collect()
            }
            hound::SampleFormat::Float => reader
                .into_samples::<f32>()
                .filter_map(Result::ok)
                .collect(),
        };

        if interleaved.is_empty() {
            return Err(AudioError::Decode("WAV stream carries no samples".to_string()));
        }

        // De-interleave, dropping any trailing partial frame.
        let channel_count = spec.channels as usize;
        let frames = interleaved.len() / channel_count;
        if frames == 0 {
            return Err(AudioError::Decode(format!(
                "WAV stream shorter than one {channel_count}-channel frame"
            )));
        }
        let mut channels: Vec<Vec<f32>> =
            (0..channel_count).map(|_| Vec::with_capacity(frames)).collect();
        for (i, sample) in interleaved.iter().take(frames * channel_count).enumerate() {
            channels[i % channel_count].push(*sample);
        }

        Ok(AudioSample {
            channels,
            sample_rate: spec.sample_rate,
        })
    }
}
