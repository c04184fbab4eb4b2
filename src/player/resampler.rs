//! Sample rate and channel conversion using rubato.
//!
//! Decoded audio arrives at the file's rate and channel count; the output
//! device wants its own. Both conversions happen on the decoder thread.

use rubato::{FftFixedIn, Resampler as RubatoResampler};

use super::PlayerError;

const CHUNK_FRAMES: usize = 1024;

/// Converts interleaved audio to the device's rate.
pub struct Resampler {
    inner: Option<FftFixedIn<f32>>,
    input_rate: u32,
    output_rate: u32,
    channels: usize,
    /// Per-channel frames waiting for a full chunk
    pending: Vec<Vec<f32>>,
}

impl Resampler {
    /// Create a resampler. Matching rates produce a passthrough.
    pub fn new(input_rate: u32, output_rate: u32, channels: u16) -> Result<Self, PlayerError> {
        let channels = channels.max(1) as usize;

        let inner = if input_rate == output_rate {
            None
        } else {
            let fft = FftFixedIn::<f32>::new(
                input_rate as usize,
                output_rate as usize,
                CHUNK_FRAMES,
                2,
                channels,
            )
            .map_err(|e| PlayerError::AudioInit(format!("resampler: {}", e)))?;
            tracing::debug!("Resampler: {}Hz → {}Hz ({} channels)", input_rate, output_rate, channels);
            Some(fft)
        };

        Ok(Self {
            inner,
            input_rate,
            output_rate,
            channels,
            pending: vec![Vec::new(); channels],
        })
    }

    /// Drop buffered input, e.g. after the decoder jumped to a new position.
    pub fn reset(&mut self) {
        for channel in &mut self.pending {
            channel.clear();
        }
        if let Some(inner) = self.inner.as_mut() {
            inner.reset();
        }
    }

    /// Feed interleaved samples and return whatever full chunks are ready.
    pub fn process(&mut self, input: &[f32]) -> Vec<f32> {
        let Some(ref mut inner) = self.inner else {
            return input.to_vec();
        };

        for (i, sample) in input.iter().enumerate() {
            self.pending[i % self.channels].push(*sample);
        }

        let mut output = Vec::new();
        while self.pending[0].len() >= CHUNK_FRAMES {
            let chunk: Vec<Vec<f32>> = self
                .pending
                .iter_mut()
                .map(|ch| ch.drain(..CHUNK_FRAMES).collect())
                .collect();
            match inner.process(&chunk, None) {
                Ok(resampled) => interleave_into(&resampled, usize::MAX, &mut output),
                Err(e) => tracing::warn!("Resampling error: {}", e),
            }
        }
        output
    }

    /// Drain the remaining partial chunk at end of stream.
    pub fn flush(&mut self) -> Vec<f32> {
        let Some(ref mut inner) = self.inner else {
            return Vec::new();
        };

        let remaining = self.pending[0].len();
        if remaining == 0 {
            return Vec::new();
        }

        let chunk: Vec<Vec<f32>> = self
            .pending
            .iter_mut()
            .map(|ch| {
                let mut frames: Vec<f32> = ch.drain(..).collect();
                frames.resize(CHUNK_FRAMES, 0.0);
                frames
            })
            .collect();

        let mut output = Vec::new();
        let expected = (remaining as f64 * self.output_rate as f64 / self.input_rate as f64)
            .ceil() as usize;
        match inner.process(&chunk, None) {
            Ok(resampled) => interleave_into(&resampled, expected, &mut output),
            Err(e) => tracing::warn!("Resampling flush error: {}", e),
        }
        output
    }
}

fn interleave_into(planes: &[Vec<f32>], max_frames: usize, out: &mut Vec<f32>) {
    let Some(first) = planes.first() else {
        return;
    };
    let frames = first.len().min(max_frames);
    for frame in 0..frames {
        for plane in planes {
            out.push(plane[frame]);
        }
    }
}

/// Map interleaved audio from one channel count to another.
///
/// Mono is duplicated to every output channel; extra source channels are
/// dropped; missing ones repeat the last source channel.
pub fn remap_channels(input: &[f32], from: u16, to: u16) -> Vec<f32> {
    let (from, to) = (from.max(1) as usize, to.max(1) as usize);
    if from == to {
        return input.to_vec();
    }
    let mut out = Vec::with_capacity(input.len() / from * to);
    for frame in input.chunks_exact(from) {
        for ch in 0..to {
            out.push(frame[ch.min(from - 1)]);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_resampling_when_rates_match() {
        let resampler = Resampler::new(48000, 48000, 2).unwrap();
        assert!(resampler.inner.is_none());
    }

    #[test]
    fn test_resampling_needed_when_rates_differ() {
        let resampler = Resampler::new(44100, 48000, 2).unwrap();
        assert!(resampler.inner.is_some());
        assert_eq!(resampler.pending.len(), 2);
    }

    #[test]
    fn test_passthrough_when_no_resampling() {
        let mut resampler = Resampler::new(48000, 48000, 2).unwrap();
        let input = vec![0.1, 0.2, 0.3, 0.4];
        assert_eq!(resampler.process(&input), input);
        assert!(resampler.flush().is_empty());
    }

    #[test]
    fn test_resampled_output_is_whole_frames() {
        let mut resampler = Resampler::new(44100, 48000, 2).unwrap();
        let input = vec![0.0; CHUNK_FRAMES * 2 * 3 + 10];
        let mut out = resampler.process(&input);
        out.extend(resampler.flush());
        assert_eq!(out.len() % 2, 0);
        assert!(!out.is_empty());
    }

    #[test]
    fn test_reset_discards_partial_chunk() {
        let mut resampler = Resampler::new(44100, 48000, 2).unwrap();
        assert!(resampler.process(&vec![0.5; 200]).is_empty());
        resampler.reset();
        assert!(resampler.pending.iter().all(Vec::is_empty));
        assert!(resampler.flush().is_empty());
    }

    #[test]
    fn test_remap_mono_to_stereo() {
        assert_eq!(remap_channels(&[0.1, 0.2], 1, 2), vec![0.1, 0.1, 0.2, 0.2]);
    }

    #[test]
    fn test_remap_stereo_to_mono_keeps_left() {
        assert_eq!(remap_channels(&[0.1, 0.9, 0.2, 0.8], 2, 1), vec![0.1, 0.2]);
    }

    #[test]
    fn test_remap_same_count_is_identity() {
        let input = [0.5, -0.5, 0.25, -0.25];
        assert_eq!(remap_channels(&input, 2, 2), input.to_vec());
    }
}
