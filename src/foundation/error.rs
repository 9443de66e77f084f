/// Result alias used throughout the crate.
pub type CountdownResult<T> = Result<T, CountdownError>;

/// Errors produced while planning, rendering, or encoding a countdown animation.
#[derive(thiserror::Error, Debug)]
pub enum CountdownError {
    /// Invalid configuration or frame geometry.
    #[error("validation error: {0}")]
    Validation(String),

    /// The font file could not be read or contained no usable face.
    #[error("font error: {0}")]
    Font(String),

    /// Text layout or rasterization failed for a frame.
    #[error("render error: {0}")]
    Render(String),

    /// Palette quantization or GIF encoding failed.
    #[error("encode error: {0}")]
    Encode(String),

    /// Any other failure, with its source chain preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CountdownError {
    /// Build a [`CountdownError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CountdownError::Font`].
    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    /// Build a [`CountdownError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`CountdownError::Encode`].
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Short, stable machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Font(_) => "font",
            Self::Render(_) => "render",
            Self::Encode(_) => "encode",
            Self::Other(_) => "internal",
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
