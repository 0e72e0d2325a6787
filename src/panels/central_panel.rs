use egui::{Align2, Color32, FontId, Painter, Rect, Sense, Stroke, pos2};

use crate::DesignerApp;
use crate::command::Command;
use crate::element::{DesignElement, ElementContent, ImagePayload};
use crate::input::InputEvent;
use crate::texture_manager::{TextureGenerationError, TextureKey, TextureManager};

const SELECTION_COLOR: Color32 = Color32::from_rgb(37, 99, 235);
const FULL_UV: Rect = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));

/// The design surface: t-shirt mockup plus every element, topmost last.
pub fn central_panel(app: &mut DesignerApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let available = ui.available_rect_before_wrap();
        let rect = Rect::from_center_size(available.center(), app.editor.surface_size());
        let response = ui.allocate_rect(rect, Sense::hover());
        app.input.set_canvas_rect(rect);

        let mut commands = Vec::new();
        if let Some(emoji) = response.dnd_release_payload::<String>() {
            commands.push(Command::AddEmoji {
                emoji: emoji.as_ref().clone(),
            });
        }

        for event in app.input.process_input(ctx) {
            // Pointer-downs under a popup or panel are not meant for the surface
            if matches!(event, InputEvent::PointerDown { .. }) && !response.hovered() {
                continue;
            }
            if let Some(command) = app.input.to_command(&event) {
                commands.push(command);
            }
        }
        for command in commands {
            app.execute_command(command);
        }

        let registry = app.editor.registry();
        app.textures.retain_elements(|id| registry.contains(id));

        let painter = ui.painter_at(rect);
        let color = app.editor.shirt_color();
        let compositor = &app.compositor;
        match app.textures.get_or_create_texture(
            TextureKey::Background(color),
            || Ok(compositor.background().render(color)?.to_color_image()),
            ctx,
        ) {
            Ok(texture) => {
                painter.image(texture, rect, FULL_UV, Color32::WHITE);
            }
            Err(err) => log::error!("Background for {} failed: {}", color, err),
        }

        let raised = app.editor.state().dragged_element();
        let selected = registry.selected_id();
        for element in registry.paint_order(raised) {
            let origin = app.input.viewport_position(element.position());
            let element_rect = Rect::from_min_size(origin, element.size());
            paint_element(&painter, &mut app.textures, ctx, element, element_rect);
            if selected == Some(element.id()) {
                let stroke = Stroke::new(2.0, SELECTION_COLOR);
                painter.rect_stroke(element_rect.expand(2.0), 2.0, stroke);
            }
        }
    });
}

fn paint_element(
    painter: &Painter,
    textures: &mut TextureManager,
    ctx: &egui::Context,
    element: &DesignElement,
    rect: Rect,
) {
    let style = element.style();
    match element.content() {
        ElementContent::Text(text) | ElementContent::Emoji(text) => {
            let family = if matches!(element.content(), ElementContent::Text(_))
                && style.font_family.is_monospace()
            {
                egui::FontFamily::Monospace
            } else {
                egui::FontFamily::Proportional
            };
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                text,
                FontId::new(style.font_size, family),
                style.color.gamma_multiply(style.opacity),
            );
        }
        ElementContent::Image(payload @ ImagePayload::Ready(_)) => {
            let texture = textures.get_or_create_texture(
                TextureKey::Element(element.id()),
                || payload.to_color_image().ok_or(TextureGenerationError::NotReady),
                ctx,
            );
            match texture {
                Ok(texture) => {
                    painter.image(
                        texture,
                        rect,
                        FULL_UV,
                        Color32::WHITE.gamma_multiply(style.opacity),
                    );
                }
                Err(err) => log::error!("Texture for {} failed: {}", element.id(), err),
            }
        }
        ElementContent::Image(ImagePayload::Pending) => {
            painter.rect_filled(rect, 4.0, Color32::from_gray(220));
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "…",
                FontId::proportional(18.0),
                Color32::DARK_GRAY,
            );
        }
        ElementContent::Image(ImagePayload::Failed) => {
            painter.rect_stroke(rect, 4.0, Stroke::new(1.0, Color32::from_gray(160)));
        }
    }
}
