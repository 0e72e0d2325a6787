use egui::{Color32, vec2};
use rstest::rstest;
use tshirt_designer::compositor::ExportCompositor;
use tshirt_designer::element::{DesignElement, ImagePayload, TextOptions, factory};
use tshirt_designer::error::DesignerError;
use tshirt_designer::id_generator::IdGenerator;
use tshirt_designer::palette::ShirtColor;
use tshirt_designer::renderer::{BackgroundRenderer, Raster};

const SURFACE: egui::Vec2 = vec2(400.0, 500.0);

fn text_element(text: &str, color: Color32) -> DesignElement {
    let options = TextOptions {
        font_size: 48.0,
        color,
        ..TextOptions::default()
    };
    factory::create_text(IdGenerator::new().generate_id(), text, options, SURFACE).unwrap()
}

// Pixels where `raster` differs from the plain shirt of `color`
fn changed_pixels(raster: &Raster, color: ShirtColor) -> Vec<(u32, u32, Color32)> {
    let background = BackgroundRenderer::default().render(color).unwrap();
    let mut changed = Vec::new();
    for y in 0..raster.height() {
        for x in 0..raster.width() {
            let pixel = raster.pixel(x, y);
            if pixel != background.pixel(x, y) {
                changed.push((x, y, pixel.unwrap()));
            }
        }
    }
    changed
}

fn image_element(payload: ImagePayload) -> DesignElement {
    let mut element = factory::create_image(IdGenerator::new().generate_id(), SURFACE);
    element.set_image(payload);
    element
}

#[test]
fn test_empty_design_equals_background() {
    let mut compositor = ExportCompositor::default();
    let composed = compositor.compose(ShirtColor::White, &[]).unwrap();
    let background = BackgroundRenderer::default().render(ShirtColor::White).unwrap();
    assert_eq!(composed, background);
}

#[rstest]
#[case("purple")]
#[case("")]
#[case("WHITE")]
fn test_unknown_color_fails(#[case] key: &str) {
    let mut compositor = ExportCompositor::default();
    let err = compositor.compose_key(key, &[]).unwrap_err();
    assert!(matches!(err, DesignerError::InvalidColor(_)));
}

#[rstest]
#[case(ShirtColor::White)]
#[case(ShirtColor::Black)]
#[case(ShirtColor::Red)]
#[case(ShirtColor::Blue)]
#[case(ShirtColor::Green)]
fn test_body_takes_palette_fill(#[case] color: ShirtColor) {
    let mut compositor = ExportCompositor::default();
    let raster = compositor.compose_key(color.key(), &[]).unwrap();

    assert_eq!((raster.width(), raster.height()), (400, 500));
    assert_eq!(raster.pixel(200, 300), Some(color.fill()));
    // Outside the shirt stays transparent
    assert_eq!(raster.pixel(5, 5), Some(Color32::TRANSPARENT));
}

#[test]
fn test_pending_and_failed_images_are_skipped() {
    let mut compositor = ExportCompositor::default();
    let elements = [
        image_element(ImagePayload::Pending),
        image_element(ImagePayload::Failed),
    ];

    let composed = compositor.compose(ShirtColor::Blue, &elements).unwrap();
    let background = BackgroundRenderer::default().render(ShirtColor::Blue).unwrap();
    assert_eq!(composed, background);
}

#[test]
fn test_ready_image_is_drawn_into_its_rect() {
    let pixels = image::RgbaImage::from_pixel(10, 10, image::Rgba([255, 0, 0, 255]));
    let mut element = image_element(ImagePayload::Ready(pixels.into()));
    element.set_size(100.0);

    let mut compositor = ExportCompositor::default();
    let raster = compositor.compose(ShirtColor::White, &[element]).unwrap();

    // Element spans 150..250 x 200..300
    assert_eq!(raster.pixel(200, 250), Some(Color32::from_rgb(255, 0, 0)));
    assert_eq!(raster.pixel(160, 210), Some(Color32::from_rgb(255, 0, 0)));
    // Just outside is still the shirt body
    assert_eq!(raster.pixel(200, 320), Some(Color32::WHITE));
}

#[test]
fn test_image_opacity_blends_with_background() {
    let pixels = image::RgbaImage::from_pixel(4, 4, image::Rgba([0, 0, 0, 255]));
    let mut element = image_element(ImagePayload::Ready(pixels.into()));
    element.set_opacity(0.5);

    let mut compositor = ExportCompositor::default();
    let raster = compositor.compose(ShirtColor::White, &[element]).unwrap();

    let pixel = raster.pixel(200, 250).unwrap();
    assert_eq!(pixel.a(), 255);
    assert!((100..=155).contains(&pixel.r()), "got {:?}", pixel);
}

#[test]
fn test_output_size_is_fixed() {
    let mut emoji = factory::create_emoji(IdGenerator::new().generate_id(), "🦄", SURFACE);
    emoji.set_position(egui::pos2(380.0, 480.0));

    let mut compositor = ExportCompositor::default();
    let raster = compositor.compose(ShirtColor::Green, &[emoji]).unwrap();
    assert_eq!((raster.width(), raster.height()), (400, 500));
}

#[test]
fn test_text_is_drawn_inside_its_rect() {
    let element = text_element("Hi", Color32::BLACK);
    let rect = element.rect().expand(4.0);

    let mut compositor = ExportCompositor::default();
    let raster = compositor.compose(ShirtColor::White, &[element]).unwrap();
    let changed = changed_pixels(&raster, ShirtColor::White);

    assert!(!changed.is_empty());
    for (x, y, _) in changed {
        assert!(
            rect.contains(egui::pos2(x as f32, y as f32)),
            "({}, {}) is outside {:?}",
            x,
            y,
            rect
        );
    }
}

#[test]
fn test_text_takes_its_color() {
    let element = text_element("Hi", Color32::from_rgb(255, 0, 0));

    let mut compositor = ExportCompositor::default();
    let raster = compositor.compose(ShirtColor::White, &[element]).unwrap();
    let changed = changed_pixels(&raster, ShirtColor::White);

    // Glyph interiors are solid; edges blend toward the white body
    assert!(changed.iter().any(|(_, _, p)| p.r() >= 240 && p.g() <= 40 && p.b() <= 40));
    assert!(changed.iter().all(|(_, _, p)| p.r() >= p.g() && p.r() >= p.b()));
}

#[test]
fn test_emoji_is_drawn_near_its_center() {
    let emoji = factory::create_emoji(IdGenerator::new().generate_id(), "🔥", SURFACE);
    let center = emoji.rect().center();

    let mut compositor = ExportCompositor::default();
    let raster = compositor.compose(ShirtColor::White, &[emoji]).unwrap();
    let changed = changed_pixels(&raster, ShirtColor::White);

    let near_center = changed
        .iter()
        .filter(|(x, y, _)| {
            (*x as f32 - center.x).abs() < 30.0 && (*y as f32 - center.y).abs() < 30.0
        })
        .count();
    assert!(near_center > 0);
}
