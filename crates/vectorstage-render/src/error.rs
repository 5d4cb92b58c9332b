//! Renderer errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Could not decode image '{key}': {source}")]
    ImageDecode {
        key: String,
        #[source]
        source: image::ImageError,
    },
    #[error("Render failed: {0}")]
    RenderFailed(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;
