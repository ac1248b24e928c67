//! # Long-form generation
//!
//! Turns a block of text into `candidates` parallel speech tracks:
//!
//! 1. [`segmenter`] splits the text (whole text, or one segment per line);
//! 2. the [`Orchestrator`] asks a [`ModelInvoker`] for every segment's
//!    candidates, pinning the seed the first call resolved;
//! 3. each clip is written by an [`ArtifactWriter`] and streamed out as an
//!    [`UpdateBatch`];
//! 4. multi-segment runs end with each slot's clips joined into one track.
//!
//! ```no_run
//! use futures::StreamExt;
//! use longform::prelude::*;
//!
//! # async fn demo() -> Result<(), GenerationError> {
//! let orchestrator = Orchestrator::new(
//!     PreviewInvoker::default(),
//!     FsArtifactWriter::new(LongformConfig::default()),
//! );
//! let params = GenerationParameters::new("Hello.\nWorld.", "emma").with_split_prompt(true);
//! let mut updates = std::pin::pin!(orchestrator.run(params, 2));
//! while let Some(update) = updates.next().await {
//!     let update = update?;
//!     println!("slot {} -> {}", update.slot, update.output.bundle_name.display());
//! }
//! # Ok(())
//! # }
//! ```

pub mod artifacts;
pub mod config;
pub mod invoker;
pub mod orchestrator;
pub mod segmenter;
pub mod setup;
pub mod slots;

pub use artifacts::{ArtifactWriter, FsArtifactWriter};
pub use config::{LongformConfig, PlotConfig, SAMPLE_RATE};
pub use invoker::{Invocation, ModelInvoker, PreviewInvoker};
pub use orchestrator::Orchestrator;
pub use slots::CandidateSlots;

pub use longform_domain::{
    Artifacts, AudioBuffer, GenerationError, GenerationParameters, OutputRecord, Phase, Seed,
    UpdateBatch,
};

/// Prelude module containing commonly used types.
pub mod prelude {
    pub use crate::{
        ArtifactWriter, FsArtifactWriter, Invocation, LongformConfig, ModelInvoker, Orchestrator,
        PreviewInvoker,
    };
    pub use longform_domain::prelude::*;
}
