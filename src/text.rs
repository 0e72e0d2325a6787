//! Glyph shaping and rasterizing for text and emoji elements.

use cosmic_text::{
    Attrs, Buffer, Command, Family, FontSystem, Metrics, Shaping, SwashCache, SwashContent,
};
use egui::{Color32, Pos2};
use tiny_skia::{
    ColorU8, FillRule, Paint, Pixmap, PixmapPaint, PremultipliedColorU8, Transform,
};

use crate::element::FontFamily;
use crate::renderer::solid_paint;

/// Shaped width and vertical extent of a single line
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct LineMetrics {
    pub width: f32,
    pub ascent: f32,
    pub descent: f32,
}

/// Draws single lines of text as filled glyph outlines
pub struct TextPainter {
    font_system: FontSystem,
    swash_cache: SwashCache,
}

impl std::fmt::Debug for TextPainter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextPainter").finish_non_exhaustive()
    }
}

impl Default for TextPainter {
    fn default() -> Self {
        Self::new()
    }
}

impl TextPainter {
    pub fn new() -> Self {
        Self {
            font_system: FontSystem::new(),
            swash_cache: SwashCache::new(),
        }
    }

    fn shape(&mut self, text: &str, family: Option<FontFamily>, font_size: f32) -> Buffer {
        let metrics = Metrics::new(font_size, font_size * 1.2);
        let mut buffer = Buffer::new(&mut self.font_system, metrics);

        // Emoji go through the generic family so system fallback can find a glyph
        let family = match family {
            Some(family) if family.is_monospace() => Family::Monospace,
            Some(family) => Family::Name(family.name()),
            None => Family::SansSerif,
        };
        let attrs = Attrs::new().family(family);

        buffer.set_text(&mut self.font_system, text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(&mut self.font_system, false);
        buffer
    }

    #[cfg(test)]
    fn measure(&mut self, text: &str, family: Option<FontFamily>, font_size: f32) -> LineMetrics {
        let buffer = self.shape(text, family, font_size);
        line_metrics(&buffer, font_size)
    }

    /// Fill `text` so its box is centered on `center`
    pub fn draw_centered(
        &mut self,
        pixmap: &mut Pixmap,
        text: &str,
        center: Pos2,
        family: Option<FontFamily>,
        font_size: f32,
        color: Color32,
        opacity: f32,
    ) {
        let buffer = self.shape(text, family, font_size);
        let metrics = line_metrics(&buffer, font_size);

        let base_x = center.x - metrics.width / 2.0;
        let base_y = center.y + (metrics.ascent - metrics.descent) / 2.0;
        let paint = solid_paint(color, opacity);

        for run in buffer.layout_runs() {
            for glyph in run.glyphs.iter() {
                let physical = glyph.physical((base_x, base_y), 1.0);
                let glyph_x = base_x + glyph.x + glyph.font_size * glyph.x_offset;
                let glyph_y = base_y + glyph.y - glyph.font_size * glyph.y_offset;

                if let Some(commands) = self
                    .swash_cache
                    .get_outline_commands(&mut self.font_system, physical.cache_key)
                {
                    fill_outline(pixmap, commands, &paint, glyph_x, glyph_y);
                    continue;
                }

                // Bitmap-only glyphs, e.g. color emoji fonts
                let Some(image) = self
                    .swash_cache
                    .get_image(&mut self.font_system, physical.cache_key)
                else {
                    log::debug!("No outline or bitmap for glyph {}", glyph.glyph_id);
                    continue;
                };
                let placement = image.placement;
                let Some(bitmap) = glyph_bitmap(
                    image.content,
                    placement.width,
                    placement.height,
                    &image.data,
                    color,
                ) else {
                    continue;
                };
                pixmap.draw_pixmap(
                    physical.x + placement.left,
                    physical.y - placement.top,
                    bitmap.as_ref(),
                    &PixmapPaint {
                        opacity: opacity.clamp(0.0, 1.0),
                        ..PixmapPaint::default()
                    },
                    Transform::identity(),
                    None,
                );
            }
        }
    }
}

fn fill_outline(pixmap: &mut Pixmap, commands: &[Command], paint: &Paint<'_>, x: f32, y: f32) {
    // Font outlines are y-up
    let mut pb = tiny_skia::PathBuilder::new();
    for command in commands {
        match *command {
            Command::MoveTo(p) => pb.move_to(p.x, -p.y),
            Command::LineTo(p) => pb.line_to(p.x, -p.y),
            Command::QuadTo(ctrl, end) => {
                pb.quad_to(ctrl.x, -ctrl.y, end.x, -end.y)
            }
            Command::CurveTo(c1, c2, end) => {
                pb.cubic_to(c1.x, -c1.y, c2.x, -c2.y, end.x, -end.y)
            }
            Command::Close => pb.close(),
        }
    }

    if let Some(path) = pb.finish() {
        pixmap.fill_path(
            &path,
            paint,
            FillRule::Winding,
            Transform::from_translate(x, y),
            None,
        );
    }
}

/// Turn a rasterized glyph into a premultiplied pixmap.
///
/// Color bitmaps keep their own pixels; coverage masks are tinted with `color`.
fn glyph_bitmap(
    content: SwashContent,
    width: u32,
    height: u32,
    data: &[u8],
    color: Color32,
) -> Option<Pixmap> {
    let mut bitmap = Pixmap::new(width, height)?;
    let pixels = bitmap.pixels_mut();

    match content {
        SwashContent::Color => {
            for (pixel, rgba) in pixels.iter_mut().zip(data.chunks_exact(4)) {
                let [r, g, b, a] = [rgba[0], rgba[1], rgba[2], rgba[3]];
                *pixel = PremultipliedColorU8::from_rgba(r, g, b, a)
                    .unwrap_or_else(|| ColorU8::from_rgba(r, g, b, a).premultiply());
            }
        }
        SwashContent::Mask => {
            for (pixel, coverage) in pixels.iter_mut().zip(data) {
                *pixel = tinted(color, *coverage);
            }
        }
        SwashContent::SubpixelMask => {
            for (pixel, rgba) in pixels.iter_mut().zip(data.chunks_exact(4)) {
                let coverage = (u16::from(rgba[0]) + u16::from(rgba[1]) + u16::from(rgba[2])) / 3;
                *pixel = tinted(color, coverage as u8);
            }
        }
    }
    Some(bitmap)
}

fn tinted(color: Color32, coverage: u8) -> PremultipliedColorU8 {
    let alpha = (u16::from(color.a()) * u16::from(coverage) / 255) as u8;
    ColorU8::from_rgba(color.r(), color.g(), color.b(), alpha).premultiply()
}

fn line_metrics(buffer: &Buffer, font_size: f32) -> LineMetrics {
    let mut metrics = LineMetrics::default();
    for run in buffer.layout_runs() {
        metrics.width = metrics.width.max(run.line_w);
        metrics.ascent = metrics.ascent.max(run.line_y - run.line_top);
        metrics.descent = metrics
            .descent
            .max((run.line_top + run.line_height) - run.line_y);
    }
    if metrics.ascent == 0.0 && metrics.descent == 0.0 {
        metrics.ascent = font_size * 0.8;
        metrics.descent = font_size * 0.2;
    }
    metrics
}
