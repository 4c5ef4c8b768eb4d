//! Canonical 16-bit PCM WAV serialization.
//!
//! Produces the one layout the recognition backend is guaranteed to accept:
//! a 44-byte RIFF/WAVE header (PCM format tag, mono, 16-bit) followed by
//! little-endian int16 sample data.

use super::sample::NormalizedAudio;

/// WAV header size in bytes.
const HEADER_LEN: usize = 44;

/// Bytes per mono 16-bit frame.
const BLOCK_ALIGN: u16 = 2;

/// A serialized mono 16-bit PCM WAV file.
///
/// Invariant: the header fields are mutually consistent with the payload
/// (byte rate = sample rate x block align, data size = sample count x
/// block align).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavBuffer {
    bytes: Vec<u8>,
}

impl WavBuffer {
    /// The complete file bytes, header included.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume the buffer, yielding the file bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Total file size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always false: an encoded buffer carries at least the header.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl AsRef<[u8]> for WavBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

/// Serialize a normalized mono buffer as 16-bit PCM WAV.
///
/// Each sample is quantized with `round(clamp(sample, -1, 1) * 32767)`.
/// Pure function; the caller guarantees a non-empty buffer (upheld by
/// [`NormalizedAudio`]'s constructor).
pub fn encode(audio: &NormalizedAudio) -> WavBuffer {
    let data_size = audio.len() * BLOCK_ALIGN as usize;
    let mut bytes = Vec::with_capacity(HEADER_LEN + data_size);
    bytes.extend_from_slice(&pcm16_mono_header(data_size as u32, audio.sample_rate()));

    for &sample in audio.samples() {
        let quantized = (sample.clamp(-1.0, 1.0) * 32767.0).round() as i16;
        bytes.extend_from_slice(&quantized.to_le_bytes());
    }

    WavBuffer { bytes }
}

/// Build the 44-byte RIFF/WAVE header for mono 16-bit PCM data.
fn pcm16_mono_header(data_size: u32, sample_rate: u32) -> [u8; HEADER_LEN] {
    let byte_rate = sample_rate * BLOCK_ALIGN as u32;
    let riff_size = 36 + data_size;

    let mut header = [0u8; HEADER_LEN];

    header[0..4].copy_from_slice(b"RIFF");
    header[4..8].copy_from_slice(&riff_size.to_le_bytes());
    header[8..12].copy_from_slice(b"WAVE");

    header[12..16].copy_from_slice(b"fmt ");
    header[16..20].copy_from_slice(&16u32.to_le_bytes()); // fmt chunk size
    header[20..22].copy_from_slice(&1u16.to_le_bytes()); // PCM format tag
    header[22..24].copy_from_slice(&1u16.to_le_bytes()); // mono
    header[24..28].copy_from_slice(&sample_rate.to_le_bytes());
    header[28..32].copy_from_slice(&byte_rate.to_le_bytes());
    header[32..34].copy_from_slice(&BLOCK_ALIGN.to_le_bytes());
    header[34..36].copy_from_slice(&16u16.to_le_bytes()); // bits per sample

    header[36..40].copy_from_slice(b"data");
    header[40..44].copy_from_slice(&data_size.to_le_bytes());

    header
}
