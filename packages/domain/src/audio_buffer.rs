//! Mono float PCM buffers produced by the model and handed to the writer.

use crate::generation_error::GenerationError;

/// A clip of mono audio, samples in `-1.0..=1.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Raw samples, one per frame
    pub samples: Vec<f32>,
}

impl AudioBuffer {
    /// Create a buffer from raw samples.
    pub fn new(sample_rate: u32, samples: Vec<f32>) -> Self {
        Self {
            sample_rate,
            samples,
        }
    }

    /// Create a buffer holding `frames` samples of silence.
    pub fn silence(sample_rate: u32, frames: usize) -> Self {
        Self::new(sample_rate, vec![0.0; frames])
    }

    /// Borrow the samples.
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if the buffer holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration of the clip in milliseconds, rounded down.
    pub fn duration_ms(&self) -> u64 {
        if self.sample_rate == 0 {
            return 0;
        }
        self.samples.len() as u64 * 1000 / self.sample_rate as u64
    }

    /// Peak absolute amplitude, `0.0` for an empty buffer.
    pub fn peak(&self) -> f32 {
        self.samples.iter().fold(0.0f32, |acc, &s| acc.max(s.abs()))
    }

    /// Convert to 16-bit PCM, clamping out-of-range samples.
    pub fn to_pcm_i16(&self) -> Vec<i16> {
        self.samples
            .iter()
            .map(|&s| (s.clamp(-1.0, 1.0) * i16::MAX as f32) as i16)
            .collect()
    }

    /// Join `pieces` end to end along the time axis.
    ///
    /// Every piece must share one sample rate. No crossfade, no trimming: the
    /// result length is the sum of the piece lengths.
    pub fn concat(pieces: &[AudioBuffer]) -> Result<AudioBuffer, GenerationError> {
        let first = pieces
            .first()
            .ok_or_else(|| GenerationError::invalid_state("cannot concatenate zero buffers"))?;

        if let Some(odd) = pieces.iter().find(|p| p.sample_rate != first.sample_rate) {
            return Err(GenerationError::invalid_state(format!(
                "sample rate mismatch: {} Hz vs {} Hz",
                first.sample_rate, odd.sample_rate
            )));
        }

        let total = pieces.iter().map(AudioBuffer::len).sum();
        let mut samples = Vec::with_capacity(total);
        for piece in pieces {
            samples.extend_from_slice(&piece.samples);
        }
        Ok(AudioBuffer::new(first.sample_rate, samples))
    }
}
