/// Convenience result type used across flipbook.
pub type FlipbookResult<T> = Result<T, FlipbookError>;

/// Top-level error taxonomy used by editor, playback and storage APIs.
///
/// Two failure classes never show up here: operations against a surface that is not ready yet
/// are silently ignored, and stale load results are discarded.
#[derive(thiserror::Error, Debug)]
pub enum FlipbookError {
    /// Local validation failure the user can fix by continuing to edit.
    #[error("validation error: {0}")]
    Validation(String),

    /// The storage collaborator rejected the call because the credential is absent or expired.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The storage collaborator failed (network, server or contract error).
    #[error("remote error: {0}")]
    Remote(String),

    /// Encoding or decoding a frame payload failed.
    #[error("codec error: {0}")]
    Codec(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FlipbookError {
    /// Build a [`FlipbookError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FlipbookError::Unauthorized`] value.
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    /// Build a [`FlipbookError::Remote`] value.
    pub fn remote(msg: impl Into<String>) -> Self {
        Self::Remote(msg.into())
    }

    /// Build a [`FlipbookError::Codec`] value.
    pub fn codec(msg: impl Into<String>) -> Self {
        Self::Codec(msg.into())
    }

    /// Build a [`FlipbookError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Return `true` for failures reported by the storage collaborator.
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Unauthorized(_) | Self::Remote(_))
    }
}

impl From<serde_json::Error> for FlipbookError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
