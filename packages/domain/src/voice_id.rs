//! Voice identifiers and `&`-joined multi-voice selections.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::generation_error::GenerationError;

/// Delimiter joining several voices in one `voice` string.
pub const VOICE_DELIMITER: char = '&';

/// Opaque voice identifier (folder name, slug, etc.).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VoiceId(pub String);

impl VoiceId {
    /// Create a new voice identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the underlying identifier string.
    pub fn id(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VoiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordered list of voices a model should blend for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceSelection(Vec<VoiceId>);

impl VoiceSelection {
    /// Parse `"emma"` or `"emma&tom"`. Pieces are trimmed and empty pieces
    /// skipped; a selection with no voices at all is rejected.
    pub fn parse(voice: &str) -> Result<Self, GenerationError> {
        let voices: Vec<VoiceId> = voice
            .split(VOICE_DELIMITER)
            .map(str::trim)
            .filter(|piece| !piece.is_empty())
            .map(VoiceId::new)
            .collect();

        if voices.is_empty() {
            return Err(GenerationError::Configuration(format!(
                "voice selection {voice:?} names no voice"
            )));
        }
        Ok(Self(voices))
    }

    pub fn voices(&self) -> &[VoiceId] {
        &self.0
    }
}
