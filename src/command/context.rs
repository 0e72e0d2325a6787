use crate::compositor::ExportCompositor;
use crate::state::EditorContext;

/// Context for command execution, providing access to the editing session
/// and the exporter.
#[derive(Debug)]
pub struct CommandContext<'a> {
    /// The editing session
    pub editor: &'a mut EditorContext,
    /// Flattens the design on export
    pub compositor: &'a mut ExportCompositor,
}

impl<'a> CommandContext<'a> {
    /// Create a new command context
    pub fn new(editor: &'a mut EditorContext, compositor: &'a mut ExportCompositor) -> Self {
        Self { editor, compositor }
    }
}
