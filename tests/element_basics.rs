use egui::{Pos2, Vec2, pos2, vec2};
use rstest::rstest;
use tshirt_designer::element::{self, DesignElement, ElementKind, TextOptions};
use tshirt_designer::id_generator::IdGenerator;

const SURFACE: Vec2 = vec2(400.0, 500.0);

fn create_test_emoji() -> DesignElement {
    let id = IdGenerator::new().generate_id();
    element::factory::create_emoji(id, "🚀", SURFACE)
}

fn create_test_text(text: &str) -> DesignElement {
    let id = IdGenerator::new().generate_id();
    element::factory::create_text(id, text, TextOptions::default(), SURFACE).unwrap()
}

fn approx_eq(a: Pos2, b: Pos2) -> bool {
    (a - b).length() < 0.001
}

#[test]
fn test_emoji_defaults() {
    let emoji = create_test_emoji();

    assert_eq!(emoji.kind(), ElementKind::Emoji);
    assert_eq!(emoji.size(), vec2(60.0, 60.0));
    assert_eq!(emoji.position(), pos2(170.0, 220.0));
    assert_eq!(emoji.style().font_size, 48.0);
    assert_eq!(emoji.style().opacity, 1.0);
    assert_eq!(emoji.text(), Some("🚀"));
}

#[rstest]
#[case(500.0, 200.0)]
#[case(-10.0, 20.0)]
#[case(120.0, 120.0)]
#[case(f32::NAN, 20.0)]
fn test_set_size_clamps(#[case] requested: f32, #[case] expected: f32) {
    let mut emoji = create_test_emoji();
    emoji.set_size(requested);
    assert_eq!(emoji.size(), Vec2::splat(expected));
}

#[test]
fn test_set_size_is_noop_on_text() {
    let mut text = create_test_text("Hello");
    let before = text.size();
    text.set_size(150.0);
    assert_eq!(text.size(), before);
}

#[rstest]
#[case(5.0, 12.0)]
#[case(100.0, 72.0)]
#[case(30.0, 30.0)]
fn test_set_font_size_clamps(#[case] requested: f32, #[case] expected: f32) {
    let mut text = create_test_text("Hello");
    text.set_font_size(requested);
    assert_eq!(text.style().font_size, expected);
}

#[rstest]
#[case(1.5, 1.0)]
#[case(-0.2, 0.0)]
#[case(0.4, 0.4)]
fn test_set_opacity_clamps(#[case] requested: f32, #[case] expected: f32) {
    let mut emoji = create_test_emoji();
    emoji.set_opacity(requested);
    assert_eq!(emoji.style().opacity, expected);
}

#[test]
fn test_text_size_follows_font_size_and_content() {
    let mut text = create_test_text("Hi");
    let size = text.size();
    assert!((size.x - 2.0 * 0.6 * 24.0).abs() < 0.001);
    assert!((size.y - 1.2 * 24.0).abs() < 0.001);

    text.set_font_size(48.0);
    assert!((text.size().x - 2.0 * size.x).abs() < 0.001);

    text.set_text("Hiya");
    assert!((text.size().x - 4.0 * size.x).abs() < 0.001);
}

#[test]
fn test_text_only_setters_ignore_emoji() {
    let mut emoji = create_test_emoji();
    let style = *emoji.style();

    emoji.set_font_size(20.0);
    emoji.set_color(egui::Color32::RED);
    emoji.set_text("changed");

    assert_eq!(*emoji.style(), style);
    assert_eq!(emoji.text(), Some("🚀"));
}

#[test]
fn test_rect_and_hit_test() {
    let mut emoji = create_test_emoji();
    emoji.set_position(pos2(10.0, 20.0));

    let rect = emoji.rect();
    assert!(approx_eq(rect.min, pos2(10.0, 20.0)));
    assert!(approx_eq(rect.max, pos2(70.0, 80.0)));

    assert!(emoji.hit_test(pos2(40.0, 50.0)));
    assert!(!emoji.hit_test(pos2(5.0, 50.0)));
    assert!(!emoji.hit_test(pos2(40.0, 90.0)));
}

#[test]
fn test_image_payload_only_applies_to_images() {
    let mut emoji = create_test_emoji();
    emoji.set_image(element::ImagePayload::Failed);
    assert!(emoji.image().is_none());
}
