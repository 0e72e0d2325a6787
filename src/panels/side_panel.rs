use egui::{Color32, ComboBox, Slider};

use crate::DesignerApp;
use crate::command::Command;
use crate::id_generator::ElementId;
use crate::element::{
    DesignElement, ElementKind, FontFamily, MAX_ELEMENT_SIZE, MAX_FONT_SIZE, MIN_ELEMENT_SIZE,
    MIN_FONT_SIZE,
};

/// Properties of the selected element, then the layer list
pub fn side_panel(app: &mut DesignerApp, ctx: &egui::Context) {
    let mut commands = Vec::new();

    egui::SidePanel::right("side_panel")
        .resizable(true)
        .default_width(220.0)
        .show(ctx, |ui| {
            ui.heading("Properties");
            match app.editor.registry().selected() {
                Some(element) => properties(ui, element, &mut commands),
                None => {
                    ui.label("Select an element to edit it.");
                }
            }
            ui.separator();

            ui.heading("Layers");
            let layers = app.editor.registry().list();
            if layers.is_empty() {
                ui.label("No elements yet.");
            }
            for layer in layers {
                ui.horizontal(|ui| {
                    if ui.selectable_label(layer.selected, &layer.label).clicked() {
                        commands.push(Command::SelectElement { id: layer.id });
                    }
                    if ui.small_button("🗑").on_hover_text("Delete").clicked() {
                        commands.push(Command::DeleteElement { id: layer.id });
                    }
                });
            }
        });

    for command in commands {
        app.execute_command(command);
    }
}

/// Editable values of the selected element, as the widgets see them
#[derive(Debug, Clone, PartialEq)]
struct PropertyValues {
    /// Only text elements carry text controls
    text: Option<TextProperties>,
    /// Only resizable kinds get a size slider
    size: Option<f32>,
    opacity: f32,
}

#[derive(Debug, Clone, PartialEq)]
struct TextProperties {
    content: String,
    font_family: FontFamily,
    font_size: f32,
    color: Color32,
}

impl PropertyValues {
    fn of(element: &DesignElement) -> Self {
        let style = element.style();
        let text = match (element.kind(), element.text()) {
            (ElementKind::Text, Some(content)) => Some(TextProperties {
                content: content.to_owned(),
                font_family: style.font_family,
                font_size: style.font_size,
                color: style.color,
            }),
            _ => None,
        };
        Self {
            text,
            size: element.kind().is_resizable().then(|| element.size().x),
            opacity: style.opacity,
        }
    }

    /// Commands turning `self` into `edited`
    fn commands_to(&self, id: ElementId, edited: &Self) -> Vec<Command> {
        let mut commands = Vec::new();

        if let (Some(before), Some(after)) = (&self.text, &edited.text) {
            if before.content != after.content {
                commands.push(Command::SetText {
                    id,
                    text: after.content.clone(),
                });
            }
            if before.font_family != after.font_family {
                commands.push(Command::SetFontFamily {
                    id,
                    font_family: after.font_family,
                });
            }
            if before.font_size != after.font_size {
                commands.push(Command::SetFontSize {
                    id,
                    font_size: after.font_size,
                });
            }
            if before.color != after.color {
                commands.push(Command::SetTextColor {
                    id,
                    color: after.color,
                });
            }
        }

        if let (Some(before), Some(size)) = (self.size, edited.size) {
            if before != size {
                commands.push(Command::SetSize { id, size });
            }
        }

        if self.opacity != edited.opacity {
            commands.push(Command::SetOpacity {
                id,
                opacity: edited.opacity,
            });
        }
        commands
    }
}

fn properties(ui: &mut egui::Ui, element: &DesignElement, commands: &mut Vec<Command>) {
    let id = element.id();
    let current = PropertyValues::of(element);
    let mut edited = current.clone();

    if let Some(text) = &mut edited.text {
        ui.text_edit_singleline(&mut text.content);
        ComboBox::from_label("Font")
            .selected_text(text.font_family.name())
            .show_ui(ui, |ui| {
                for family in FontFamily::ALL {
                    ui.selectable_value(&mut text.font_family, family, family.name());
                }
            });
        ui.add(Slider::new(&mut text.font_size, MIN_FONT_SIZE..=MAX_FONT_SIZE).text("Font size"));
        ui.horizontal(|ui| {
            ui.label("Color");
            ui.color_edit_button_srgba(&mut text.color);
        });
    }

    if let Some(size) = &mut edited.size {
        ui.add(Slider::new(size, MIN_ELEMENT_SIZE..=MAX_ELEMENT_SIZE).text("Size"));
    }

    ui.add(Slider::new(&mut edited.opacity, 0.0..=1.0).text("Opacity"));

    if element.kind() == ElementKind::Image && !element.image().is_some_and(|p| p.is_ready()) {
        ui.weak("Image is still loading or could not be decoded.");
    }

    commands.extend(current.commands_to(id, &edited));

    if ui.button("Delete").clicked() {
        commands.push(Command::DeleteElement { id });
    }
}
