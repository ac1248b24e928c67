//! Long-form generation: segment, fan out per candidate, stream, concatenate.
//!
//! A run is a lazy stream. Nothing happens until it is polled, each item is
//! produced synchronously on the polling task, and dropping the stream
//! abandons the run. Segments and slots are processed strictly in order
//! because segment `n + 1` must see the seed resolved by segment `n`.

use async_stream::try_stream;
use futures::{Stream, StreamExt};
use tracing::info;

use longform_domain::{
    GenerationError, GenerationParameters, OutputRecord, Phase, Seed, UpdateBatch,
};

use crate::artifacts::{ArtifactWriter, naming};
use crate::invoker::{Invocation, ModelInvoker};
use crate::segmenter;
use crate::slots::CandidateSlots;

/// Drives a model and an artifact writer through one long-form request at a
/// time.
pub struct Orchestrator<M, W> {
    invoker: M,
    writer: W,
}

impl<M, W> Orchestrator<M, W>
where
    M: ModelInvoker,
    W: ArtifactWriter,
{
    pub fn new(invoker: M, writer: W) -> Self {
        Self { invoker, writer }
    }

    pub fn invoker(&self) -> &M {
        &self.invoker
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Generate `params.text` as `candidates` parallel tracks.
    ///
    /// Yields one [`UpdateBatch`] per slot per segment as each segment
    /// completes. When the text produced more than one segment, a final
    /// batch per slot carries that slot's segments joined in order. The
    /// first error ends the stream.
    pub fn run(
        &self,
        params: GenerationParameters,
        candidates: usize,
    ) -> impl Stream<Item = Result<UpdateBatch, GenerationError>> + '_ {
        try_stream! {
            let segments = plan(&params, candidates)?;
            let total = segments.len();
            info!(total, candidates, voice = %params.voice, seed = %params.seed, "starting long-form run");

            let mut params = params;
            let mut slots = CandidateSlots::new(candidates);

            for (index, segment) in segments.iter().enumerate() {
                info!(segment = index + 1, total, "generating segment");
                let Invocation { clips, seed } = self.invoker.invoke(segment, &params, candidates)?;
                check_clip_count(clips.len(), candidates)?;

                // Later segments and the concatenation reuse the seed the
                // model actually used.
                params = params.with_seed(Seed::Fixed(seed));

                for (slot, clip) in clips.into_iter().enumerate() {
                    let artifacts = self.writer.persist(&clip, &params, candidates, &slot.to_string())?;
                    let output = OutputRecord::new(clip.clone(), &artifacts, params.seed);
                    slots.append(slot, clip)?;
                    yield UpdateBatch {
                        slot,
                        phase: Phase::Segment { index, total },
                        output,
                    };
                }
            }

            let joined = slots.segments();
            if joined > 1 {
                for slot in 0..candidates {
                    let track = slots.concatenate(slot)?;
                    info!(slot, samples = track.len(), duration_ms = track.duration_ms(), "concatenated slot");
                    let artifacts = self.writer.persist(&track, &params, candidates, &naming::long_label(slot))?;
                    yield UpdateBatch {
                        slot,
                        phase: Phase::Concatenated { segments: joined },
                        output: OutputRecord::new(track, &artifacts, params.seed),
                    };
                }
            }
        }
    }

    /// [`run`](Self::run) with one caller-supplied handle per candidate.
    ///
    /// The candidate count is `handles.len()`; every item pairs the handle of
    /// the updated slot with its new record.
    pub fn run_routed<'a, H>(
        &'a self,
        handles: &'a [H],
        params: GenerationParameters,
    ) -> impl Stream<Item = Result<(H, OutputRecord), GenerationError>> + 'a
    where
        H: Clone + 'a,
    {
        self.run(params, handles.len())
            .map(move |item| -> Result<(H, OutputRecord), GenerationError> {
                let batch = item?;
                let handle = batch
                    .route(handles)
                    .map(|(handle, _)| handle.clone())
                    .ok_or_else(|| {
                        GenerationError::invalid_state(format!(
                            "no output handle for slot {}",
                            batch.slot
                        ))
                    })?;
                Ok((handle, batch.output))
            })
    }
}

/// Validate the request and split its text.
fn plan(params: &GenerationParameters, candidates: usize) -> Result<Vec<String>, GenerationError> {
    if candidates == 0 {
        return Err(GenerationError::invalid_state(
            "at least one candidate is required",
        ));
    }
    params.validate()?;
    Ok(segmenter::split(&params.text, params.split_prompt))
}

fn check_clip_count(got: usize, candidates: usize) -> Result<(), GenerationError> {
    if got != candidates {
        return Err(GenerationError::model(format!(
            "model returned {got} clips, expected {candidates}"
        )));
    }
    Ok(())
}
