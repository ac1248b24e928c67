//! Unified error for the long-form generation pipeline.
use thiserror::Error;

/// Top-level error covering segmentation, model calls and persistence.
///
/// Any variant surfacing from a running generation terminates the run; updates
/// that were already emitted stay valid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// An operation was requested in a state where it cannot succeed, such as
    /// concatenating a slot that holds no audio.
    #[error("invalid state: {0}")]
    InvalidState(String),
    /// The model failed or returned something other than what was requested.
    #[error("model invocation: {0}")]
    ModelInvocation(String),
    /// Writing audio, plot or metadata to disk failed.
    #[error("persistence: {0}")]
    Persistence(String),
    /// Parameters or configuration were rejected before any work started.
    #[error("configuration: {0}")]
    Configuration(String),
}

impl GenerationError {
    /// Build an [`GenerationError::InvalidState`] from anything printable.
    pub fn invalid_state(reason: impl Into<String>) -> Self {
        Self::InvalidState(reason.into())
    }

    /// Build a [`GenerationError::ModelInvocation`] from anything printable.
    pub fn model(reason: impl Into<String>) -> Self {
        Self::ModelInvocation(reason.into())
    }

    /// Build a [`GenerationError::Persistence`] from anything printable.
    pub fn persistence(reason: impl Into<String>) -> Self {
        Self::Persistence(reason.into())
    }
}

/// Result alias used across the workspace.
pub type Result<T> = std::result::Result<T, GenerationError>;
