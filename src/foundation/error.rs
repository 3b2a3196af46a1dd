/// Convenience result type used across voxspin.
pub type VoxResult<T> = Result<T, VoxError>;

/// Top-level error taxonomy used by the geometry, compile and playback APIs.
#[derive(thiserror::Error, Debug)]
pub enum VoxError {
    /// Invalid physical configuration or playback input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Connect, send or close failure on the frame transport.
    #[error("transport error: {0}")]
    Transport(String),

    /// Errors when serializing or deserializing scenes, timelines or config.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl VoxError {
    /// Build a [`VoxError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`VoxError::Transport`] value.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Build a [`VoxError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Whether this error ends a playback session.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
