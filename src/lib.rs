#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod command;
pub mod compositor;
pub mod config;
pub mod element;
pub mod error;
pub mod file_handler;
pub mod id_generator;
pub mod input;
pub mod layer;
pub mod palette;
pub mod panels;
pub mod registry;
pub mod renderer;
pub mod state;
pub mod text;
pub mod texture_manager;
pub mod util;

pub use app::DesignerApp;
pub use command::{Command, CommandContext, CommandError, CommandOutcome, CommandResult};
pub use compositor::ExportCompositor;
pub use config::EditorConfig;
pub use element::{DesignElement, ElementKind, FontFamily, TextOptions};
pub use error::{DesignerError, DesignerResult};
pub use id_generator::ElementId;
pub use input::{InputEvent, InputHandler, InputLocation};
pub use layer::LayerEntry;
pub use palette::ShirtColor;
pub use registry::ElementRegistry;
pub use renderer::{BackgroundRenderer, Raster};
pub use state::{EditorContext, EditorState};
