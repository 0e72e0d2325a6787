use egui::{Color32, Pos2};
use log::{debug, info};

use super::{CommandContext, CommandOutcome, CommandResult, ExportedDesign};
use crate::element::{DesignElement, FontFamily, ImagePayload, TextOptions};
use crate::error::DesignerError;
use crate::id_generator::ElementId;
use crate::palette::ShirtColor;
use crate::util::time;

/// Discrete editor inputs, each consumed by one handler.
///
/// Pointer positions are in design-surface coordinates.
#[derive(Debug, Clone)]
pub enum Command {
    /// Submit text from the text control
    AddText { text: String, options: TextOptions },

    /// Place a predefined emoji (click or drop)
    AddEmoji { emoji: String },

    /// Place an uploaded image; its pixels follow with `CompleteImage`
    AddImage,

    /// Deliver the result of an image decode
    CompleteImage { id: ElementId, payload: ImagePayload },

    /// Select an element, e.g. from the layer list
    SelectElement { id: ElementId },

    /// Delete an element, e.g. from the layer list
    DeleteElement { id: ElementId },

    /// Keyboard delete
    DeleteSelected,

    /// Keyboard cancel
    ClearSelection,

    /// Pointer pressed over the design surface
    BeginDrag { pos: Pos2 },

    /// Pointer moved
    DragTo { pos: Pos2 },

    /// Pointer released
    EndDrag,

    /// Palette selection by key
    ChangeColor { color: String },

    SetText { id: ElementId, text: String },

    SetFontFamily { id: ElementId, font_family: FontFamily },

    SetFontSize { id: ElementId, font_size: f32 },

    SetTextColor { id: ElementId, color: Color32 },

    SetOpacity { id: ElementId, opacity: f32 },

    /// Shared width/height control of emoji and images
    SetSize { id: ElementId, size: f32 },

    /// Flatten and encode the design
    Export,
}

impl Command {
    /// Execute the command with the given context
    pub fn execute(&self, ctx: &mut CommandContext<'_>) -> CommandResult {
        match self {
            Command::AddText { text, options } => {
                let id = ctx.editor.add_text(text, *options)?;
                Ok(CommandOutcome::Added(id))
            }

            Command::AddEmoji { emoji } => Ok(CommandOutcome::Added(ctx.editor.add_emoji(emoji))),

            Command::AddImage => Ok(CommandOutcome::Added(ctx.editor.add_pending_image())),

            Command::CompleteImage { id, payload } => {
                ctx.editor.complete_image(*id, payload.clone());
                Ok(CommandOutcome::Done)
            }

            Command::SelectElement { id } => {
                ctx.editor.select(*id);
                Ok(CommandOutcome::Done)
            }

            Command::DeleteElement { id } => {
                ctx.editor.delete(*id);
                Ok(CommandOutcome::Done)
            }

            Command::DeleteSelected => {
                ctx.editor.delete_selected();
                Ok(CommandOutcome::Done)
            }

            Command::ClearSelection => {
                ctx.editor.cancel_selection();
                Ok(CommandOutcome::Done)
            }

            Command::BeginDrag { pos } => {
                ctx.editor.begin_drag(*pos);
                Ok(CommandOutcome::Done)
            }

            Command::DragTo { pos } => {
                ctx.editor.drag_to(*pos);
                Ok(CommandOutcome::Done)
            }

            Command::EndDrag => {
                ctx.editor.end_drag();
                Ok(CommandOutcome::Done)
            }

            Command::ChangeColor { color } => {
                let color: ShirtColor = color.parse()?;
                ctx.editor.set_shirt_color(color);
                Ok(CommandOutcome::Done)
            }

            Command::SetText { id, text } => {
                edit_element(ctx, *id, |element| element.set_text(text));
                Ok(CommandOutcome::Done)
            }

            Command::SetFontFamily { id, font_family } => {
                edit_element(ctx, *id, |element| element.set_font_family(*font_family));
                Ok(CommandOutcome::Done)
            }

            Command::SetFontSize { id, font_size } => {
                edit_element(ctx, *id, |element| element.set_font_size(*font_size));
                Ok(CommandOutcome::Done)
            }

            Command::SetTextColor { id, color } => {
                edit_element(ctx, *id, |element| element.set_color(*color));
                Ok(CommandOutcome::Done)
            }

            Command::SetOpacity { id, opacity } => {
                edit_element(ctx, *id, |element| element.set_opacity(*opacity));
                Ok(CommandOutcome::Done)
            }

            Command::SetSize { id, size } => {
                edit_element(ctx, *id, |element| element.set_size(*size));
                Ok(CommandOutcome::Done)
            }

            Command::Export => {
                let editor = &*ctx.editor;
                let raster = ctx
                    .compositor
                    .compose(editor.shirt_color(), editor.registry().elements())?;
                let png = raster.encode_png()?;
                let file_name = editor.config().export_file_name(time::timestamp_millis());
                info!("💾 Exported {} ({} bytes)", file_name, png.len());
                Ok(CommandOutcome::Exported(ExportedDesign { file_name, png }))
            }
        }
    }
}

/// Apply a property edit; stale ids are ignored.
fn edit_element(
    ctx: &mut CommandContext<'_>,
    id: ElementId,
    edit: impl FnOnce(&mut DesignElement),
) {
    match ctx.editor.registry_mut().get_mut(id) {
        Some(element) => edit(element),
        None => debug!("edit ignored: {}", DesignerError::ElementNotFound(id)),
    }
}
