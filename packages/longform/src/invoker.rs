//! Model boundary: text plus parameters in, candidate clips plus seed out.
//!
//! The model handle is built once by the host and handed to the
//! [`Orchestrator`](crate::orchestrator::Orchestrator); nothing here is global.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

use longform_domain::{AudioBuffer, GenerationError, GenerationParameters};

use crate::config::SAMPLE_RATE;

/// What one model call produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    /// One clip per requested candidate, in candidate order
    pub clips: Vec<AudioBuffer>,
    /// Seed the model actually used, even if none was pinned
    pub seed: u64,
}

/// A text-to-speech model that can render several candidates per call.
///
/// Implementations read the voice through
/// [`GenerationParameters::voice_selection`], the pinned seed through
/// `params.seed`, and forward [`GenerationParameters::to_call_mapping`] as
/// decoding options. They must return exactly `candidates` clips or fail.
pub trait ModelInvoker {
    fn invoke(
        &self,
        text: &str,
        params: &GenerationParameters,
        candidates: usize,
    ) -> Result<Invocation, GenerationError>;
}

impl<M: ModelInvoker + ?Sized> ModelInvoker for &M {
    fn invoke(
        &self,
        text: &str,
        params: &GenerationParameters,
        candidates: usize,
    ) -> Result<Invocation, GenerationError> {
        (**self).invoke(text, params, candidates)
    }
}

impl<M: ModelInvoker + ?Sized> ModelInvoker for Box<M> {
    fn invoke(
        &self,
        text: &str,
        params: &GenerationParameters,
        candidates: usize,
    ) -> Result<Invocation, GenerationError> {
        (**self).invoke(text, params, candidates)
    }
}

/// Stand-in model that renders a short enveloped tone per candidate.
///
/// Output is a pure function of text, voice, seed and the `temperature`
/// option, which makes it useful for smoke-testing the pipeline end to end.
#[derive(Debug, Clone)]
pub struct PreviewInvoker {
    sample_rate: u32,
    /// Audio rendered per word of input
    ms_per_word: u32,
}

impl Default for PreviewInvoker {
    fn default() -> Self {
        Self::new(SAMPLE_RATE)
    }
}

impl PreviewInvoker {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            ms_per_word: 250,
        }
    }

    pub fn with_ms_per_word(mut self, ms_per_word: u32) -> Self {
        self.ms_per_word = ms_per_word;
        self
    }

    fn render(&self, rng: &mut StdRng, words: usize, temperature: f32) -> Vec<f32> {
        let frames = (words.max(1) as u64 * self.ms_per_word as u64 * self.sample_rate as u64
            / 1000) as usize;
        let pitch: f32 = rng.random_range(110.0..330.0);
        let noise = temperature.clamp(0.0, 1.0) * 0.05;
        let rate = self.sample_rate as f32;

        (0..frames)
            .map(|n| {
                let t = n as f32 / rate;
                // Raised-cosine envelope so concatenated clips do not click.
                let env = 0.5 - 0.5 * (TAU * n as f32 / frames as f32).cos();
                let tone = (TAU * pitch * t).sin() * 0.4 * env;
                tone + rng.random_range(-noise..=noise)
            })
            .collect()
    }
}

impl ModelInvoker for PreviewInvoker {
    fn invoke(
        &self,
        text: &str,
        params: &GenerationParameters,
        candidates: usize,
    ) -> Result<Invocation, GenerationError> {
        let voices = params.voice_selection()?;
        if self.sample_rate == 0 {
            return Err(GenerationError::model("preview sample rate is zero"));
        }

        let seed = params.seed.pinned().unwrap_or_else(rand::random);
        let temperature = params
            .to_call_mapping()
            .get("temperature")
            .and_then(|v| v.as_f64())
            .unwrap_or(0.8) as f32;

        // Mix the voice names in so different voices sound different under
        // one seed.
        let voice_salt = voices
            .voices()
            .iter()
            .flat_map(|v| v.id().bytes())
            .fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64));
        let mut rng = StdRng::seed_from_u64(seed ^ voice_salt);

        let words = text.split_whitespace().count();
        let clips = (0..candidates)
            .map(|_| AudioBuffer::new(self.sample_rate, self.render(&mut rng, words, temperature)))
            .collect();

        tracing::debug!(seed, candidates, words, "preview model rendered");
        Ok(Invocation { clips, seed })
    }
}
