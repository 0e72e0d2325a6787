use image::RgbaImage;
use log::{debug, info};
use tiny_skia::{ColorU8, FilterQuality, IntSize, Pixmap, PixmapPaint, Transform};

use crate::element::{DesignElement, ElementContent, ImagePayload};
use crate::error::{DesignerError, DesignerResult};
use crate::palette::ShirtColor;
use crate::renderer::{BackgroundRenderer, Raster};
use crate::text::TextPainter;

/// Flattens the t-shirt background and every element into one raster.
///
/// The output always has the background canvas's size. Elements are drawn
/// bottom to top in registry order; images that have not finished decoding
/// are left out.
#[derive(Debug, Default)]
pub struct ExportCompositor {
    background: BackgroundRenderer,
    text: TextPainter,
}

impl ExportCompositor {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            background: BackgroundRenderer::new(width, height),
            text: TextPainter::new(),
        }
    }

    pub fn background(&self) -> &BackgroundRenderer {
        &self.background
    }

    /// Compose from a palette key; unknown keys fail before anything is drawn.
    pub fn compose_key(
        &mut self,
        key: &str,
        elements: &[DesignElement],
    ) -> DesignerResult<Raster> {
        let color: ShirtColor = key.parse()?;
        self.compose(color, elements)
    }

    pub fn compose(
        &mut self,
        color: ShirtColor,
        elements: &[DesignElement],
    ) -> DesignerResult<Raster> {
        let mut raster = self.background.render(color)?;

        for element in elements {
            match self.draw_element(&mut raster, element) {
                Ok(()) => {}
                Err(err @ DesignerError::ImageNotReady(_)) => debug!("Skipped at export: {}", err),
                Err(err) => return Err(err),
            }
        }

        info!(
            "📦 Composed {} design with {} elements",
            color,
            elements.len()
        );
        Ok(raster)
    }

    fn draw_element(&mut self, raster: &mut Raster, element: &DesignElement) -> DesignerResult<()> {
        let rect = element.rect();
        let style = element.style();

        match element.content() {
            ElementContent::Image(ImagePayload::Ready(image)) => {
                let Some(source) = image_to_pixmap(image) else {
                    return Err(DesignerError::InvalidDimensions {
                        width: image.width(),
                        height: image.height(),
                    });
                };
                let paint = PixmapPaint {
                    opacity: style.opacity,
                    quality: FilterQuality::Bilinear,
                    ..PixmapPaint::default()
                };
                let transform = Transform::from_translate(rect.min.x, rect.min.y).pre_scale(
                    rect.width() / source.width() as f32,
                    rect.height() / source.height() as f32,
                );
                raster
                    .pixmap_mut()
                    .draw_pixmap(0, 0, source.as_ref(), &paint, transform, None);
            }
            ElementContent::Image(_) => return Err(DesignerError::ImageNotReady(element.id())),
            ElementContent::Text(text) => {
                self.text.draw_centered(
                    raster.pixmap_mut(),
                    text,
                    rect.center(),
                    Some(style.font_family),
                    style.font_size,
                    style.color,
                    style.opacity,
                );
            }
            ElementContent::Emoji(emoji) => {
                self.text.draw_centered(
                    raster.pixmap_mut(),
                    emoji,
                    rect.center(),
                    None,
                    style.font_size,
                    style.color,
                    style.opacity,
                );
            }
        }
        Ok(())
    }
}

/// Copy straight-alpha pixels into a premultiplied pixmap
fn image_to_pixmap(image: &RgbaImage) -> Option<Pixmap> {
    let size = IntSize::from_wh(image.width(), image.height())?;
    let mut pixmap = Pixmap::new(size.width(), size.height())?;
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(image.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    Some(pixmap)
}
