/// Convenience result type used across chartreel.
pub type ReelResult<T> = Result<T, ReelError>;

/// Top-level error taxonomy.
///
/// Every failure is fatal for a generation run; the variants only say which stage gave up.
#[derive(thiserror::Error, Debug)]
pub enum ReelError {
    /// Degenerate configuration or frame data (zero sizes, mismatched frames).
    #[error("validation error: {0}")]
    Validation(String),

    /// The rasterizer could not produce a frame.
    #[error("render error: {0}")]
    Render(String),

    /// The animated image encoder rejected the frame sequence.
    #[error("encode error: {0}")]
    Encode(String),

    /// Errors when serializing plan/config data for diagnostics.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Filesystem failures while writing the artifact.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped lower-level error carrying context.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReelError {
    /// Build a [`ReelError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ReelError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`ReelError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`ReelError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
