//! Channel downmix and sample-rate conversion.
//!
//! Converts an arbitrary-channel, arbitrary-rate [`AudioSample`] into mono
//! samples at a target rate. Downmix averages all channels with equal
//! weight; rate conversion is linear time-domain interpolation.

use tracing::debug;

use super::sample::{AudioSample, NormalizedAudio};
use super::AudioError;

/// Convert `input` to a single channel at `target_rate`.
///
/// Mono input already at the target rate is returned unchanged. Averaging
/// keeps amplitudes within [-1, 1] whenever the input is, so no additional
/// clamping happens here.
///
/// # Errors
/// [`AudioError::Decode`] when the channel sequences have mismatched
/// lengths, the buffer has no channels or no frames, or a rate is zero.
pub fn normalize(input: AudioSample, target_rate: u32) -> Result<NormalizedAudio, AudioError> {
    if target_rate == 0 || input.sample_rate == 0 {
        return Err(AudioError::Decode(format!(
            "sample rate must be positive (input {} Hz, target {} Hz)",
            input.sample_rate, target_rate
        )));
    }
    if input.channels.is_empty() {
        return Err(AudioError::Decode("audio buffer has no channels".to_string()));
    }
    let frames = input.channels[0].len();
    if let Some(mismatched) = input.channels.iter().find(|c| c.len() != frames) {
        return Err(AudioError::Decode(format!(
            "channel length mismatch: expected {} samples, found {}",
            frames,
            mismatched.len()
        )));
    }
    if frames == 0 {
        return Err(AudioError::Decode("audio buffer has no frames".to_string()));
    }

    // Identity fast path: nothing to convert, move the buffer through.
    if input.channels.len() == 1 && input.sample_rate == target_rate {
        let mut channels = input.channels;
        return Ok(NormalizedAudio::new(channels.remove(0), target_rate));
    }

    debug!(
        channels = input.channels.len(),
        from_rate = input.sample_rate,
        to_rate = target_rate,
        frames,
        "normalizing audio"
    );

    let mono = downmix(&input.channels, frames);
    let resampled = resample_linear(&mono, input.sample_rate, target_rate);
    Ok(NormalizedAudio::new(resampled, target_rate))
}

/// Average all channels frame-by-frame with equal weight 1/channel_count.
fn downmix(channels: &[Vec<f32>], frames: usize) -> Vec<f32> {
    if channels.len() == 1 {
        return channels[0].clone();
    }
    let gain = 1.0 / channels.len() as f32;
    (0..frames)
        .map(|i| channels.iter().map(|c| c[i]).sum::<f32>() * gain)
        .collect()
}

/// Resample `mono` from `from_rate` to `to_rate` by linear interpolation.
///
/// Output length is `ceil(len * to_rate / from_rate)`.
fn resample_linear(mono: &[f32], from_rate: u32, to_rate: u32) -> Vec<f32> {
    if from_rate == to_rate {
        return mono.to_vec();
    }

    let out_len = (mono.len() as u64 * to_rate as u64).div_ceil(from_rate as u64) as usize;
    let step = from_rate as f64 / to_rate as f64;

    let mut out = Vec::with_capacity(out_len);
    for i in 0..out_len {
        let pos = i as f64 * step;
        let idx = pos as usize;
        if idx >= mono.len() - 1 {
            out.push(mono[mono.len() - 1]);
            continue;
        }
        let frac = (pos - idx as f64) as f32;
        out.push(mono[idx] + (mono[idx + 1] - mono[idx]) * frac);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stereo(left: Vec<f32>, right: Vec<f32>, rate: u32) -> AudioSample {
        AudioSample {
            channels: vec![left, right],
            sample_rate: rate,
        }
    }

    #[test]
    fn test_identity_fast_path() {
        let samples = vec![0.1, -0.2, 0.3, -0.4];
        let input = AudioSample {
            channels: vec![samples.clone()],
            sample_rate: 16000,
        };
        let out = normalize(input, 16000).unwrap();
        assert_eq!(out.samples(), samples.as_slice());
        assert_eq!(out.sample_rate(), 16000);
    }

    #[test]
    fn test_downmix_averages_channels() {
        let input = stereo(vec![1.0, 0.0, -1.0], vec![0.0, 0.0, -1.0], 16000);
        let out = normalize(input, 16000).unwrap();
        assert_eq!(out.samples(), &[0.5, 0.0, -1.0]);
    }

    #[test]
    fn test_downmix_stays_in_range() {
        let input = stereo(vec![1.0; 100], vec![-1.0; 100], 16000);
        let out = normalize(input, 16000).unwrap();
        assert!(out.samples().iter().all(|s| (-1.0..=1.0).contains(s)));
    }

    #[test]
    fn test_output_always_mono_at_target_rate() {
        for channels in 1..=6 {
            for rate in [8000u32, 22050, 44100, 48000] {
                let input = AudioSample {
                    channels: vec![vec![0.25; rate as usize]; channels],
                    sample_rate: rate,
                };
                let out = normalize(input, 16000).unwrap();
                assert_eq!(out.sample_rate(), 16000);
                assert!(!out.is_empty());
            }
        }
    }

    #[test]
    fn test_resampled_length_is_ceil() {
        // 44100 -> 16000 over 2 seconds: ceil(88200 * 16000 / 44100) = 32000
        let input = AudioSample {
            channels: vec![vec![0.0; 88200]],
            sample_rate: 44100,
        };
        let out = normalize(input, 16000).unwrap();
        assert_eq!(out.len(), 32000);

        // Non-integral ratio rounds up: ceil(1001 * 16000 / 44100) = 364
        let input = AudioSample {
            channels: vec![vec![0.0; 1001]],
            sample_rate: 44100,
        };
        assert_eq!(normalize(input, 16000).unwrap().len(), 364);
    }

    #[test]
    fn test_upsampling_interpolates() {
        let input = AudioSample {
            channels: vec![vec![0.0, 1.0]],
            sample_rate: 8000,
        };
        let out = normalize(input, 16000).unwrap();
        assert_eq!(out.len(), 4);
        assert_eq!(out.samples()[0], 0.0);
        assert!((out.samples()[1] - 0.5).abs() < 1e-6);
        assert_eq!(out.samples()[2], 1.0);
    }

    #[test]
    fn test_channel_length_mismatch_rejected() {
        let input = stereo(vec![0.0; 10], vec![0.0; 9], 16000);
        let err = normalize(input, 16000).unwrap_err();
        assert!(matches!(err, AudioError::Decode(_)));
        assert!(err.to_string().contains("mismatch"));
    }

    #[test]
    fn test_empty_buffer_rejected() {
        let input = AudioSample {
            channels: vec![],
            sample_rate: 16000,
        };
        assert!(normalize(input, 16000).is_err());

        let input = AudioSample {
            channels: vec![vec![]],
            sample_rate: 16000,
        };
        assert!(normalize(input, 16000).is_err());
    }

    #[test]
    fn test_zero_rate_rejected() {
        let input = AudioSample {
            channels: vec![vec![0.0; 10]],
            sample_rate: 0,
        };
        assert!(normalize(input, 16000).is_err());

        let input = AudioSample {
            channels: vec![vec![0.0; 10]],
            sample_rate: 16000,
        };
        assert!(normalize(input, 0).is_err());
    }

    #[test]
    fn test_sign_preserved() {
        let input = stereo(vec![-0.5, 0.5], vec![-0.25, 0.75], 16000);
        let out = normalize(input, 16000).unwrap();
        assert!(out.samples()[0] < 0.0);
        assert!(out.samples()[1] > 0.0);
    }
}
