use thiserror::Error;

use crate::id_generator::ElementId;

/// Result type for designer operations
pub type DesignerResult<T> = Result<T, DesignerError>;

/// Errors raised by the design-element model, the renderer and the exporter.
///
/// Only [`DesignerError::EmptyTextRejected`] and [`DesignerError::InvalidColor`]
/// are meant to reach the user. The remaining kinds are absorbed where they
/// occur and only show up in logs.
#[derive(Debug, Error)]
pub enum DesignerError {
    /// Text submission was empty or whitespace only
    #[error("Please enter some text")]
    EmptyTextRejected,

    /// An operation referenced an element that no longer exists
    #[error("Element {0} not found")]
    ElementNotFound(ElementId),

    /// A color key outside the t-shirt palette
    #[error("Unknown t-shirt color: {0:?}")]
    InvalidColor(String),

    /// A non-image file was offered for upload
    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    /// An image element whose pixels are not decoded yet
    #[error("Image for element {0} is not ready")]
    ImageNotReady(ElementId),

    #[error("Failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),

    #[error("Invalid raster dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Failed to encode PNG: {0}")]
    Encode(String),

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DesignerError {
    /// Whether this error should interrupt the user flow and be shown
    pub fn is_user_visible(&self) -> bool {
        matches!(self, Self::EmptyTextRejected | Self::InvalidColor(_))
    }
}
