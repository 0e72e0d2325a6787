use std::sync::Arc;

use egui::ColorImage;
use image::RgbaImage;
use log::{debug, info};

use crate::error::DesignerResult;

/// Decoded pixels of an uploaded image, or the state of its decode.
///
/// Decoding runs off the event thread, so an image element starts out
/// `Pending` and only becomes eligible for export once it is `Ready`.
#[derive(Clone, Default)]
pub enum ImagePayload {
    #[default]
    Pending,
    Ready(Arc<RgbaImage>),
    /// Decode failed; the element stays content-less.
    Failed,
}

// RgbaImage would dump every pixel
impl std::fmt::Debug for ImagePayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImagePayload::Pending => write!(f, "Pending"),
            ImagePayload::Ready(image) => f
                .debug_struct("Ready")
                .field("width", &image.width())
                .field("height", &image.height())
                .finish(),
            ImagePayload::Failed => write!(f, "Failed"),
        }
    }
}

impl ImagePayload {
    pub fn is_ready(&self) -> bool {
        matches!(self, ImagePayload::Ready(_))
    }

    pub fn pixels(&self) -> Option<&RgbaImage> {
        match self {
            ImagePayload::Ready(image) => Some(image),
            _ => None,
        }
    }

    /// Build an egui texture image for on-screen display
    pub fn to_color_image(&self) -> Option<ColorImage> {
        let image = self.pixels()?;
        let size = [image.width() as usize, image.height() as usize];
        Some(ColorImage::from_rgba_unmultiplied(size, image.as_raw()))
    }
}

/// Decode uploaded bytes into RGBA pixels
pub fn decode_image(bytes: &[u8]) -> DesignerResult<RgbaImage> {
    let decoded = image::load_from_memory(bytes)?;
    debug!("Decoded image: {}x{}", decoded.width(), decoded.height());
    Ok(decoded.to_rgba8())
}

/// Turn a decode result into the payload stored on the element
pub fn payload_from_result(result: DesignerResult<RgbaImage>) -> ImagePayload {
    match result {
        Ok(image) => {
            info!("🖼️ Image ready: {}x{}", image.width(), image.height());
            ImagePayload::Ready(Arc::new(image))
        }
        Err(err) => {
            log::error!("❌ Image decode failed: {}", err);
            ImagePayload::Failed
        }
    }
}
