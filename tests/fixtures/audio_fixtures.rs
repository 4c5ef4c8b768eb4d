//! Audio Test Fixtures
//!
//! Programmatically generated audio test data. Generated audio keeps test
//! inputs reproducible, needs no external files, and gives precise control
//! over sample rate, channel count, and signal shape.
//!
//! Available fixtures:
//! - Sine wave tones at arbitrary rates and channel counts
//! - Complete WAV files (16-bit PCM) built from float samples
//! - A WAV decoder for inspecting pipeline output

use std::f32::consts::PI;
use std::io::Cursor;

/// Generate a sine wave at `frequency` Hz.
pub fn sine_samples(frames: usize, frequency: f32, sample_rate: u32, amplitude: f32) -> Vec<f32> {
    let angular_freq = 2.0 * PI * frequency / sample_rate as f32;
    (0..frames)
        .map(|i| (angular_freq * i as f32).sin() * amplitude)
        .collect()
}

/// Generate `channels` sine waves of equal length. Each channel gets a
/// progressively lower amplitude so downmix output is distinguishable from
/// any single channel.
pub fn multichannel_sine(
    channels: usize,
    frames: usize,
    frequency: f32,
    sample_rate: u32,
) -> Vec<Vec<f32>> {
    (0..channels)
        .map(|c| {
            let amplitude = 0.8 / (c + 1) as f32;
            sine_samples(frames, frequency, sample_rate, amplitude)
        })
        .collect()
}

/// Serialize per-channel float samples as an interleaved 16-bit PCM WAV
/// file.
pub fn wav_file(channels: &[Vec<f32>], sample_rate: u32) -> Vec<u8> {
    let spec = hound::WavSpec {
        channels: channels.len() as u16,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let frames = channels.first().map_or(0, Vec::len);

    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
        for i in 0..frames {
            for channel in channels {
                let sample = (channel[i].clamp(-1.0, 1.0) * 32767.0).round() as i16;
                writer.write_sample(sample).unwrap();
            }
        }
        writer.finalize().unwrap();
    }
    cursor.into_inner()
}

/// A 2-channel sine WAV of the given duration.
pub fn stereo_sine_wav(sample_rate: u32, seconds: f32) -> Vec<u8> {
    let frames = (sample_rate as f32 * seconds) as usize;
    wav_file(&multichannel_sine(2, frames, 440.0, sample_rate), sample_rate)
}

/// A mono sine WAV at 16 kHz.
pub fn mono_sine_wav_16k(seconds: f32) -> Vec<u8> {
    let frames = (16000.0 * seconds) as usize;
    wav_file(&[sine_samples(frames, 440.0, 16000, 0.5)], 16000)
}

/// Parse a WAV file back into per-channel float samples and its rate.
pub fn decode_wav(bytes: &[u8]) -> (Vec<Vec<f32>>, u32) {
    let reader = hound::WavReader::new(Cursor::new(bytes)).unwrap();
    let spec = reader.spec();
    let interleaved: Vec<f32> = reader
        .into_samples::<i16>()
        .map(|s| s.unwrap() as f32 / 32767.0)
        .collect();

    let channel_count = spec.channels as usize;
    let mut channels = vec![Vec::new(); channel_count];
    for (i, sample) in interleaved.iter().enumerate() {
        channels[i % channel_count].push(*sample);
    }
    (channels, spec.sample_rate)
}

/// Bytes that are not parseable as audio in any container.
pub fn garbage_bytes() -> Vec<u8> {
    b"\x00\x01\x02\x03 definitely not audio \xff\xfe".to_vec()
}
