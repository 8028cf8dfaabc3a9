/// Convenience result type used across frameline.
pub type FramelineResult<T> = Result<T, FramelineError>;

/// Top-level error taxonomy for the fallible boundary operations.
///
/// Frame evaluators never return these; they degrade to safe defaults instead. Errors only
/// surface when loading or validating compositions, building worker pools, or talking across
/// the measurement bridge.
#[derive(thiserror::Error, Debug)]
pub enum FramelineError {
    /// Invalid user-provided or composition data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while evaluating a frame range (worker pool, channel plumbing).
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Request/response bridge failures (timeouts, disconnected peers).
    #[error("bridge error: {0}")]
    Bridge(String),

    /// File I/O failures from the `from_path` loaders, carrying the path as context.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FramelineError {
    /// Build a [`FramelineError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FramelineError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`FramelineError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Build a [`FramelineError::Bridge`] value.
    pub fn bridge(msg: impl Into<String>) -> Self {
        Self::Bridge(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
