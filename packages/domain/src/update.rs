//! Values emitted to the caller while a long-form run progresses.
//!
//! A run emits one [`UpdateBatch`] per slot per segment, then, if the text was
//! split into more than one segment, one more per slot for the concatenated
//! track.

use std::path::PathBuf;

use crate::audio_buffer::AudioBuffer;
use crate::seed::Seed;

/// Files written for one persisted result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    pub audio_path: PathBuf,
    pub image_path: PathBuf,
    pub metadata_path: PathBuf,
    /// Directory grouping the three files above
    pub bundle_dir: PathBuf,
}

/// Latest state of one output slot, as shown to a user.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputRecord {
    pub audio: AudioBuffer,
    /// Waveform plot
    pub image: PathBuf,
    /// Seed the audio was generated with
    pub seed: Seed,
    pub bundle_name: PathBuf,
    /// Whether the result may be saved to favorites
    pub save_enabled: bool,
}

impl OutputRecord {
    pub fn new(audio: AudioBuffer, artifacts: &Artifacts, seed: Seed) -> Self {
        Self {
            audio,
            image: artifacts.image_path.clone(),
            seed,
            bundle_name: artifacts.bundle_dir.clone(),
            save_enabled: true,
        }
    }
}

/// Where in the run an update comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Result of segment `index` (0-based) out of `total`
    Segment { index: usize, total: usize },
    /// All `segments` joined into one track
    Concatenated { segments: usize },
}

impl Phase {
    pub fn is_concatenated(&self) -> bool {
        matches!(self, Phase::Concatenated { .. })
    }
}

/// One streamed update: the new record for a single candidate slot.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateBatch {
    pub slot: usize,
    pub phase: Phase,
    pub output: OutputRecord,
}

impl UpdateBatch {
    /// Pair this update with the caller's handle for its slot.
    ///
    /// Returns `None` when `handles` has no entry for the slot.
    pub fn route<'h, H>(&self, handles: &'h [H]) -> Option<(&'h H, &OutputRecord)> {
        handles.get(self.slot).map(|handle| (handle, &self.output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch(slot: usize) -> UpdateBatch {
        let artifacts = Artifacts {
            audio_path: "out/a/audio.wav".into(),
            image_path: "out/a/audio.png".into(),
            metadata_path: "out/a/audio.json".into(),
            bundle_dir: "out/a".into(),
        };
        UpdateBatch {
            slot,
            phase: Phase::Segment { index: 0, total: 1 },
            output: OutputRecord::new(AudioBuffer::silence(24_000, 4), &artifacts, Seed::Fixed(9)),
        }
    }

    #[test]
    fn routes_to_handle_by_slot() {
        let handles = ["left", "right"];
        let (handle, record) = batch(1).route(&handles).map(|(h, r)| (*h, r.clone())).unwrap();
        assert_eq!(handle, "right");
        assert_eq!(record.bundle_name, PathBuf::from("out/a"));
        assert!(record.save_enabled);
        assert!(batch(2).route(&handles).is_none());
    }
}
