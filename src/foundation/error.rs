/// Convenience result type used across the crate.
pub type IndicatorResult<T> = Result<T, IndicatorError>;

/// Error taxonomy for configuration, descriptors and host tooling.
///
/// Transitions never fail; these errors only surface while building or validating inputs.
#[derive(thiserror::Error, Debug)]
pub enum IndicatorError {
    /// Invalid user-provided configuration or geometry.
    #[error("validation error: {0}")]
    Validation(String),

    /// Malformed animation descriptor.
    #[error("animation error: {0}")]
    Animation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl IndicatorError {
    /// Build an [`IndicatorError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build an [`IndicatorError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build an [`IndicatorError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
