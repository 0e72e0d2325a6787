use egui::{Button, ComboBox, RichText, Sense, Slider, vec2};

use crate::DesignerApp;
use crate::command::Command;
use crate::element::{FontFamily, MAX_FONT_SIZE, MIN_FONT_SIZE};
use crate::palette::ShirtColor;

/// Emoji offered in the designs grid, with their tooltips
pub const PREDEFINED_DESIGNS: [(&str, &str); 8] = [
    ("🚀", "Rocket"),
    ("⚡", "Lightning"),
    ("🎵", "Music"),
    ("🌟", "Star"),
    ("🔥", "Fire"),
    ("💎", "Diamond"),
    ("🦄", "Unicorn"),
    ("🌈", "Rainbow"),
];

pub fn tools_panel(app: &mut DesignerApp, ctx: &egui::Context) {
    let mut commands = Vec::new();
    let mut submit_text = false;

    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(220.0)
        .show(ctx, |ui| {
            ui.heading("T-Shirt Color");
            ui.horizontal_wrapped(|ui| {
                let current = app.editor.shirt_color();
                for color in ShirtColor::ALL {
                    let swatch = Button::new("")
                        .fill(color.fill())
                        .min_size(vec2(28.0, 28.0))
                        .selected(color == current);
                    if ui.add(swatch).on_hover_text(color.key()).clicked() {
                        commands.push(Command::ChangeColor {
                            color: color.key().to_owned(),
                        });
                    }
                }
            });
            ui.separator();

            ui.heading("Upload Image");
            ui.label("Drop image files onto the window.");
            ui.separator();

            ui.heading("Add Text");
            let form = &mut app.text_form;
            let response = ui.text_edit_singleline(&mut form.text);
            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                submit_text = true;
            }
            ComboBox::from_label("Font")
                .selected_text(form.options.font_family.name())
                .show_ui(ui, |ui| {
                    for family in FontFamily::ALL {
                        ui.selectable_value(&mut form.options.font_family, family, family.name());
                    }
                });
            ui.add(
                Slider::new(&mut form.options.font_size, MIN_FONT_SIZE..=MAX_FONT_SIZE)
                    .text("Size"),
            );
            ui.horizontal(|ui| {
                ui.label("Color");
                ui.color_edit_button_srgba(&mut form.options.color);
            });
            if ui.button("Add Text").clicked() {
                submit_text = true;
            }
            ui.separator();

            ui.heading("Designs");
            ui.horizontal_wrapped(|ui| {
                for (emoji, name) in PREDEFINED_DESIGNS {
                    let button = Button::new(RichText::new(emoji).size(24.0))
                        .min_size(vec2(40.0, 40.0))
                        .sense(Sense::click_and_drag());
                    let response = ui.add(button).on_hover_text(name);
                    // Dropped on the design surface, the payload places the emoji
                    response.dnd_set_drag_payload(emoji.to_owned());
                    if response.clicked() {
                        commands.push(Command::AddEmoji {
                            emoji: emoji.to_owned(),
                        });
                    }
                }
            });
            ui.separator();

            if ui.button("💾 Save Design").clicked() {
                commands.push(Command::Export);
            }

            if let Some(status) = app.status.as_deref() {
                ui.separator();
                ui.label(status);
            }
        });

    if submit_text {
        app.submit_text();
    }
    for command in commands {
        app.execute_command(command);
    }
}
