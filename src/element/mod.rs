use std::fmt;

use egui::{Color32, Pos2, Rect, Vec2};

mod common;
pub(crate) mod image;

pub use common::{
    DEFAULT_ELEMENT_SIZE, DEFAULT_FONT_SIZE, EMOJI_FONT_SIZE, MAX_ELEMENT_SIZE, MAX_FONT_SIZE,
    MIN_ELEMENT_SIZE, MIN_FONT_SIZE,
};
pub use self::image::{ImagePayload, decode_image, payload_from_result};

use crate::error::{DesignerError, DesignerResult};
use crate::id_generator::ElementId;

/// The three kinds of placeable design elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Text,
    Emoji,
    Image,
}

impl ElementKind {
    pub fn label(self) -> &'static str {
        match self {
            ElementKind::Text => "Text",
            ElementKind::Emoji => "Emoji",
            ElementKind::Image => "Image",
        }
    }

    /// Emoji and images share the single size control
    pub fn is_resizable(self) -> bool {
        matches!(self, ElementKind::Emoji | ElementKind::Image)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Font families offered for text elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontFamily {
    #[default]
    Arial,
    Helvetica,
    TimesNewRoman,
    CourierNew,
    Georgia,
    Verdana,
    Impact,
    ComicSansMs,
}

impl FontFamily {
    pub const ALL: [FontFamily; 8] = [
        FontFamily::Arial,
        FontFamily::Helvetica,
        FontFamily::TimesNewRoman,
        FontFamily::CourierNew,
        FontFamily::Georgia,
        FontFamily::Verdana,
        FontFamily::Impact,
        FontFamily::ComicSansMs,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FontFamily::Arial => "Arial",
            FontFamily::Helvetica => "Helvetica",
            FontFamily::TimesNewRoman => "Times New Roman",
            FontFamily::CourierNew => "Courier New",
            FontFamily::Georgia => "Georgia",
            FontFamily::Verdana => "Verdana",
            FontFamily::Impact => "Impact",
            FontFamily::ComicSansMs => "Comic Sans MS",
        }
    }

    pub fn is_monospace(self) -> bool {
        matches!(self, FontFamily::CourierNew)
    }
}

/// Visual style of an element.
///
/// Font family, size and color only matter for text (emoji keep their font
/// size for drawing); opacity applies to every kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementStyle {
    pub font_family: FontFamily,
    pub font_size: f32,
    pub color: Color32,
    pub opacity: f32,
}

impl Default for ElementStyle {
    fn default() -> Self {
        Self {
            font_family: FontFamily::default(),
            font_size: DEFAULT_FONT_SIZE,
            color: Color32::BLACK,
            opacity: 1.0,
        }
    }
}

/// Kind-dependent payload of an element
#[derive(Debug, Clone)]
pub enum ElementContent {
    Text(String),
    Emoji(String),
    Image(ImagePayload),
}

/// A single placed item on the design surface
#[derive(Debug, Clone)]
pub struct DesignElement {
    id: ElementId,
    position: Pos2,
    // Only meaningful for emoji and images
    size: Vec2,
    content: ElementContent,
    style: ElementStyle,
}

impl DesignElement {
    pub fn id(&self) -> ElementId {
        self.id
    }

    /// The kind follows the content variant, which never changes after creation.
    pub fn kind(&self) -> ElementKind {
        match self.content {
            ElementContent::Text(_) => ElementKind::Text,
            ElementContent::Emoji(_) => ElementKind::Emoji,
            ElementContent::Image(_) => ElementKind::Image,
        }
    }

    pub fn content(&self) -> &ElementContent {
        &self.content
    }

    pub fn style(&self) -> &ElementStyle {
        &self.style
    }

    pub fn position(&self) -> Pos2 {
        self.position
    }

    pub fn set_position(&mut self, position: Pos2) {
        self.position = position;
    }

    /// Current size; for text this is derived from font size and content
    pub fn size(&self) -> Vec2 {
        match &self.content {
            ElementContent::Text(text) => common::text_box_size(text, self.style.font_size),
            _ => self.size,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_min_size(self.position, self.size())
    }

    pub fn hit_test(&self, pos: Pos2) -> bool {
        self.rect().contains(pos)
    }

    /// String drawn for text and emoji elements
    pub fn text(&self) -> Option<&str> {
        match &self.content {
            ElementContent::Text(text) | ElementContent::Emoji(text) => Some(text),
            ElementContent::Image(_) => None,
        }
    }

    pub fn image(&self) -> Option<&ImagePayload> {
        match &self.content {
            ElementContent::Image(payload) => Some(payload),
            _ => None,
        }
    }

    /// Store a finished decode. Ignored for non-image elements.
    pub fn set_image(&mut self, payload: ImagePayload) {
        if let ElementContent::Image(current) = &mut self.content {
            *current = payload;
        }
    }

    /// Set width and height together, clamped to the allowed range.
    /// Text has no independent size, so this is a no-op there.
    pub fn set_size(&mut self, size: f32) {
        if self.kind().is_resizable() {
            self.size = Vec2::splat(common::clamp_element_size(size));
        }
    }

    pub fn set_font_size(&mut self, font_size: f32) {
        if self.kind() == ElementKind::Text {
            self.style.font_size = common::clamp_font_size(font_size);
        }
    }

    pub fn set_font_family(&mut self, font_family: FontFamily) {
        if self.kind() == ElementKind::Text {
            self.style.font_family = font_family;
        }
    }

    pub fn set_color(&mut self, color: Color32) {
        if self.kind() == ElementKind::Text {
            self.style.color = color;
        }
    }

    pub fn set_opacity(&mut self, opacity: f32) {
        self.style.opacity = common::clamp_opacity(opacity);
    }

    /// Live edit of text content from the property panel
    pub fn set_text(&mut self, text: &str) {
        if let ElementContent::Text(current) = &mut self.content {
            *current = text.to_owned();
        }
    }
}

/// Style choices delivered with a text submission
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextOptions {
    pub font_family: FontFamily,
    pub font_size: f32,
    pub color: Color32,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            font_family: FontFamily::default(),
            font_size: DEFAULT_FONT_SIZE,
            color: Color32::BLACK,
        }
    }
}

/// Factory functions for creating elements centered on a design surface
pub mod factory {
    use super::*;

    /// Create a text element; rejects empty or whitespace-only content.
    pub fn create_text(
        id: ElementId,
        text: &str,
        options: TextOptions,
        surface: Vec2,
    ) -> DesignerResult<DesignElement> {
        let text = text.trim();
        if text.is_empty() {
            return Err(DesignerError::EmptyTextRejected);
        }

        let style = ElementStyle {
            font_family: options.font_family,
            font_size: common::clamp_font_size(options.font_size),
            color: options.color,
            opacity: 1.0,
        };
        let size = common::text_box_size(text, style.font_size);

        Ok(DesignElement {
            id,
            position: common::centered_position(surface, size),
            size,
            content: ElementContent::Text(text.to_owned()),
            style,
        })
    }

    pub fn create_emoji(id: ElementId, emoji: &str, surface: Vec2) -> DesignElement {
        let size = Vec2::splat(DEFAULT_ELEMENT_SIZE);
        DesignElement {
            id,
            position: common::centered_position(surface, size),
            size,
            content: ElementContent::Emoji(emoji.to_owned()),
            style: ElementStyle {
                font_size: EMOJI_FONT_SIZE,
                ..ElementStyle::default()
            },
        }
    }

    /// Create an image element whose pixels arrive later
    pub fn create_image(id: ElementId, surface: Vec2) -> DesignElement {
        let size = Vec2::splat(DEFAULT_ELEMENT_SIZE);
        DesignElement {
            id,
            position: common::centered_position(surface, size),
            size,
            content: ElementContent::Image(ImagePayload::Pending),
            style: ElementStyle::default(),
        }
    }
}
