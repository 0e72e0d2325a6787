use egui::{Color32, ColorImage};
use log::debug;
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Stroke, Transform};

use crate::error::{DesignerError, DesignerResult};
use crate::palette::ShirtColor;

/// Size the t-shirt geometry was laid out for
pub const BASE_CANVAS_WIDTH: f32 = 400.0;
pub const BASE_CANVAS_HEIGHT: f32 = 500.0;

// T-shirt body outline, clockwise from the left sleeve
const SHIRT_OUTLINE: [(f32, f32); 14] = [
    (80.0, 80.0),
    (120.0, 60.0),
    (140.0, 60.0),
    (160.0, 40.0),
    (240.0, 40.0),
    (260.0, 60.0),
    (280.0, 60.0),
    (320.0, 80.0),
    (320.0, 120.0),
    (300.0, 120.0),
    (300.0, 450.0),
    (100.0, 450.0),
    (100.0, 120.0),
    (80.0, 120.0),
];

const NECKLINE_CENTER: (f32, f32) = (200.0, 80.0);
const NECKLINE_RADIUS: f32 = 20.0;

const BORDER_COLOR: Color32 = Color32::from_rgb(0xdd, 0xdd, 0xdd);
const BORDER_WIDTH: f32 = 2.0;

// Cubic control distance for a quarter circle
const KAPPA: f32 = 0.552_284_8;

/// A fixed-size RGBA pixel buffer (premultiplied alpha)
#[derive(Clone)]
pub struct Raster {
    pixmap: Pixmap,
}

impl std::fmt::Debug for Raster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Raster")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

impl PartialEq for Raster {
    fn eq(&self, other: &Self) -> bool {
        self.width() == other.width()
            && self.height() == other.height()
            && self.pixmap.data() == other.pixmap.data()
    }
}

impl Raster {
    /// Create a fully transparent raster
    pub fn new(width: u32, height: u32) -> DesignerResult<Self> {
        let pixmap =
            Pixmap::new(width, height).ok_or(DesignerError::InvalidDimensions { width, height })?;
        Ok(Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Raw premultiplied RGBA bytes
    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }

    /// Un-premultiplied color at a pixel, `None` when out of bounds
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color32> {
        let color = self.pixmap.pixel(x, y)?.demultiply();
        Some(Color32::from_rgba_unmultiplied(
            color.red(),
            color.green(),
            color.blue(),
            color.alpha(),
        ))
    }

    /// Encode as PNG
    pub fn encode_png(&self) -> DesignerResult<Vec<u8>> {
        self.pixmap
            .encode_png()
            .map_err(|err| DesignerError::Encode(err.to_string()))
    }

    /// Convert for upload as an egui texture
    pub fn to_color_image(&self) -> ColorImage {
        ColorImage::from_rgba_premultiplied(
            [self.width() as usize, self.height() as usize],
            self.pixmap.data(),
        )
    }

    pub(crate) fn pixmap_mut(&mut self) -> &mut Pixmap {
        &mut self.pixmap
    }
}

/// Solid paint for a color with an extra opacity factor
pub(crate) fn solid_paint(color: Color32, opacity: f32) -> Paint<'static> {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    let alpha = (a as f32 * opacity.clamp(0.0, 1.0)).round() as u8;
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, alpha);
    paint.anti_alias = true;
    paint
}

/// Draws the t-shirt silhouette.
///
/// Rendering is a pure function of the color: the same color always yields
/// the same pixels.
#[derive(Debug, Clone)]
pub struct BackgroundRenderer {
    width: u32,
    height: u32,
}

impl Default for BackgroundRenderer {
    fn default() -> Self {
        Self::new(BASE_CANVAS_WIDTH as u32, BASE_CANVAS_HEIGHT as u32)
    }
}

impl BackgroundRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Render from a palette key such as `"white"`
    pub fn render_key(&self, key: &str) -> DesignerResult<Raster> {
        let color: ShirtColor = key.parse()?;
        self.render(color)
    }

    pub fn render(&self, color: ShirtColor) -> DesignerResult<Raster> {
        debug!("Rendering {} t-shirt at {}x{}", color, self.width, self.height);
        let mut raster = Raster::new(self.width, self.height)?;

        // Geometry is laid out for 400x500; stretch it to the real canvas
        let transform = Transform::from_scale(
            self.width as f32 / BASE_CANVAS_WIDTH,
            self.height as f32 / BASE_CANVAS_HEIGHT,
        );
        let border = Stroke {
            width: BORDER_WIDTH,
            ..Stroke::default()
        };
        let border_paint = solid_paint(BORDER_COLOR, 1.0);
        let pixmap = raster.pixmap_mut();

        if let Some(body) = shirt_body_path() {
            pixmap.fill_path(
                &body,
                &solid_paint(color.fill(), 1.0),
                FillRule::Winding,
                transform,
                None,
            );
            pixmap.stroke_path(&body, &border_paint, &border, transform, None);
        }

        if let Some(neckline) = neckline_path() {
            pixmap.fill_path(
                &neckline,
                &solid_paint(color.neckline_fill(), 1.0),
                FillRule::Winding,
                transform,
                None,
            );
            pixmap.stroke_path(&neckline, &border_paint, &border, transform, None);
        }

        Ok(raster)
    }
}

fn shirt_body_path() -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    let (x, y) = SHIRT_OUTLINE[0];
    pb.move_to(x, y);
    for &(x, y) in &SHIRT_OUTLINE[1..] {
        pb.line_to(x, y);
    }
    pb.close();
    pb.finish()
}

/// Lower half of the collar circle, from the right edge through the bottom
/// to the left edge. Left open so the stroke only traces the curve.
fn neckline_path() -> Option<tiny_skia::Path> {
    let (cx, cy) = NECKLINE_CENTER;
    let r = NECKLINE_RADIUS;
    let k = KAPPA * r;

    let mut pb = PathBuilder::new();
    pb.move_to(cx + r, cy);
    pb.cubic_to(cx + r, cy + k, cx + k, cy + r, cx, cy + r);
    pb.cubic_to(cx - k, cy + r, cx - r, cy + k, cx - r, cy);
    pb.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_fixed_size() {
        let raster = BackgroundRenderer::default().render(ShirtColor::White).unwrap();
        assert_eq!((raster.width(), raster.height()), (400, 500));
    }

    #[test]
    fn test_render_fills_body_and_leaves_outside_clear() {
        let raster = BackgroundRenderer::default().render(ShirtColor::Red).unwrap();
        // Middle of the torso
        assert_eq!(raster.pixel(200, 300), Some(ShirtColor::Red.fill()));
        // Corner of the canvas is outside the silhouette
        assert_eq!(raster.pixel(5, 5), Some(Color32::TRANSPARENT));
    }

    #[test]
    fn test_white_neckline_is_lighter_shade() {
        let raster = BackgroundRenderer::default().render(ShirtColor::White).unwrap();
        // Inside the collar, just below its center
        assert_eq!(raster.pixel(200, 88), Some(ShirtColor::White.neckline_fill()));
        assert_eq!(raster.pixel(200, 300), Some(Color32::WHITE));
    }

    #[test]
    fn test_render_is_deterministic() {
        let renderer = BackgroundRenderer::default();
        let a = renderer.render(ShirtColor::Blue).unwrap();
        let b = renderer.render(ShirtColor::Blue).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, renderer.render(ShirtColor::Green).unwrap());
    }

    #[test]
    fn test_render_unknown_key() {
        let err = BackgroundRenderer::default().render_key("purple").unwrap_err();
        assert!(matches!(err, DesignerError::InvalidColor(_)));
    }

    #[test]
    fn test_png_signature() {
        let png = BackgroundRenderer::default()
            .render(ShirtColor::Black)
            .unwrap()
            .encode_png()
            .unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }
}
