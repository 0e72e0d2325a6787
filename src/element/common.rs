use egui::{Pos2, Vec2};

// Clamp ranges enforced by every property edit
pub const MIN_ELEMENT_SIZE: f32 = 20.0;
pub const MAX_ELEMENT_SIZE: f32 = 200.0;
pub const DEFAULT_ELEMENT_SIZE: f32 = 60.0;

pub const MIN_FONT_SIZE: f32 = 12.0;
pub const MAX_FONT_SIZE: f32 = 72.0;
pub const DEFAULT_FONT_SIZE: f32 = 24.0;
pub const EMOJI_FONT_SIZE: f32 = 48.0;

// Rough glyph box used to size text elements
pub const TEXT_ADVANCE_RATIO: f32 = 0.6;
pub const TEXT_LINE_HEIGHT_RATIO: f32 = 1.2;

pub(crate) fn clamp_element_size(size: f32) -> f32 {
    if size.is_nan() {
        return MIN_ELEMENT_SIZE;
    }
    size.clamp(MIN_ELEMENT_SIZE, MAX_ELEMENT_SIZE)
}

pub(crate) fn clamp_font_size(size: f32) -> f32 {
    if size.is_nan() {
        return MIN_FONT_SIZE;
    }
    size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE)
}

pub(crate) fn clamp_opacity(opacity: f32) -> f32 {
    if opacity.is_nan() {
        return 1.0;
    }
    opacity.clamp(0.0, 1.0)
}

/// Bounding box of a single line of text at the given font size
pub(crate) fn text_box_size(content: &str, font_size: f32) -> Vec2 {
    let chars = content.chars().count().max(1) as f32;
    Vec2::new(
        chars * font_size * TEXT_ADVANCE_RATIO,
        font_size * TEXT_LINE_HEIGHT_RATIO,
    )
}

/// Top-left corner that centers a box of `size` inside a surface of `surface`
pub(crate) fn centered_position(surface: Vec2, size: Vec2) -> Pos2 {
    ((surface - size) * 0.5).to_pos2()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamps() {
        assert_eq!(clamp_element_size(500.0), MAX_ELEMENT_SIZE);
        assert_eq!(clamp_element_size(-10.0), MIN_ELEMENT_SIZE);
        assert_eq!(clamp_font_size(100.0), MAX_FONT_SIZE);
        assert_eq!(clamp_font_size(f32::NAN), MIN_FONT_SIZE);
        assert_eq!(clamp_opacity(1.5), 1.0);
        assert_eq!(clamp_opacity(-0.5), 0.0);
    }

    #[test]
    fn test_centered_position() {
        let pos = centered_position(Vec2::new(400.0, 500.0), Vec2::splat(60.0));
        assert_eq!(pos, Pos2::new(170.0, 220.0));
    }
}
