pub type ArsnapResult<T> = Result<T, ArsnapError>;

#[derive(thiserror::Error, Debug)]
/// Errors surfaced by capture, compose, configuration, and asset loading.
///
/// Gesture handling never produces errors: out-of-range input is clamped instead.
pub enum ArsnapError {
    /// Invalid input data (geometry, configuration, scene description).
    #[error("validation error: {0}")]
    Validation(String),

    /// Image or font bytes could not be turned into a usable asset.
    #[error("decode error: {0}")]
    Decode(String),

    /// Raster backend failure (surface limits, buffer size mismatches).
    #[error("render error: {0}")]
    Render(String),

    /// JSON (de)serialization failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Context-wrapped error from I/O or a codec.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ArsnapError {
    /// Build a [`ArsnapError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ArsnapError::Decode`].
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`ArsnapError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`ArsnapError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
