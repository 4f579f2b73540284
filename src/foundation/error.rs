/// Convenience result type used across the crate.
pub type CardResult<T> = Result<T, CardError>;

/// Top-level error taxonomy used by the export pipeline.
#[derive(thiserror::Error, Debug)]
pub enum CardError {
    /// Export was requested before any source image was loaded.
    ///
    /// The editor boundary treats this as a silent no-op; the variant exists
    /// for callers that drive the pipeline directly.
    #[error("no source image loaded")]
    NoImageLoaded,

    /// The decoded source image reports a zero width or height.
    #[error("invalid image dimensions: {0}")]
    InvalidImageDimensions(String),

    /// Uploaded bytes could not be decoded as an image.
    #[error("decode error: {0}")]
    Decode(String),

    /// Invalid user-provided card data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while rasterizing or encoding the card.
    #[error("render error: {0}")]
    Render(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CardError {
    /// Build a [`CardError::InvalidImageDimensions`] value.
    pub fn invalid_dimensions(msg: impl Into<String>) -> Self {
        Self::InvalidImageDimensions(msg.into())
    }

    /// Build a [`CardError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`CardError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CardError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}
