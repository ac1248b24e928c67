//! # Long-form Domain
//!
//! Shared domain objects for long-form, multi-candidate speech generation.
//!
//! These types carry no I/O; the `longform` crate drives the model and writes
//! artifacts using them.

pub mod audio_buffer;
pub mod generation_error;
pub mod generation_parameters;
pub mod seed;
pub mod update;
pub mod voice_id;

// Re-export core types
pub use audio_buffer::AudioBuffer;
pub use generation_error::{GenerationError, Result};
pub use generation_parameters::{
    DEFAULT_KIND, GenerationParameters, METADATA_VERSION, RESERVED_FIELDS,
};
pub use seed::{RANDOM_SEED_SENTINEL, Seed};
pub use update::{Artifacts, OutputRecord, Phase, UpdateBatch};
pub use voice_id::{VOICE_DELIMITER, VoiceId, VoiceSelection};

/// Prelude module containing commonly used types.
pub mod prelude {
    pub use crate::{
        Artifacts, AudioBuffer, GenerationError, GenerationParameters, OutputRecord, Phase, Seed,
        UpdateBatch, VoiceId, VoiceSelection,
    };
}
