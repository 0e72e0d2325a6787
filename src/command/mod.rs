mod commands;
mod context;

use thiserror::Error;

use crate::error::DesignerError;
use crate::id_generator::ElementId;

pub use commands::Command;
pub use context::CommandContext;

/// Result type for command operations
pub type CommandResult = Result<CommandOutcome, CommandError>;

/// Errors that can occur during command execution
#[derive(Debug, Error)]
pub enum CommandError {
    /// The command failed in the design model, renderer or exporter
    #[error(transparent)]
    Designer(#[from] DesignerError),
}

impl CommandError {
    /// Whether the failure should be shown to the user
    pub fn is_user_visible(&self) -> bool {
        match self {
            CommandError::Designer(err) => err.is_user_visible(),
        }
    }
}

/// What a successfully executed command produced
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CommandOutcome {
    #[default]
    Done,
    /// A new element was placed
    Added(ElementId),
    /// The design was flattened and encoded
    Exported(ExportedDesign),
}

/// An encoded export ready to be offered for download
#[derive(Clone, PartialEq)]
pub struct ExportedDesign {
    pub file_name: String,
    pub png: Vec<u8>,
}

impl std::fmt::Debug for ExportedDesign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportedDesign")
            .field("file_name", &self.file_name)
            .field("png_len", &self.png.len())
            .finish()
    }
}
