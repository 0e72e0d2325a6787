use crate::command::{Command, CommandContext, CommandOutcome, ExportedDesign};
use crate::compositor::ExportCompositor;
use crate::config::EditorConfig;
use crate::element::TextOptions;
use crate::file_handler::{FileHandler, ImageLoader, ImageUpload};
use crate::input::InputHandler;
use crate::panels;
use crate::state::EditorContext;
use crate::texture_manager::TextureManager;

/// Contents of the "add text" form
#[derive(Debug, Clone, Default)]
pub struct TextForm {
    pub text: String,
    pub options: TextOptions,
}

/// The designer window: the editing session plus everything that connects
/// it to egui.
pub struct DesignerApp {
    pub(crate) editor: EditorContext,
    pub(crate) compositor: ExportCompositor,
    pub(crate) file_handler: FileHandler,
    pub(crate) image_loader: ImageLoader,
    pub(crate) textures: TextureManager,
    pub(crate) input: InputHandler,
    pub(crate) text_form: TextForm,
    /// Last message shown to the user
    pub(crate) status: Option<String>,
}

impl DesignerApp {
    /// Called once before the first frame.
    pub fn new(_cc: &eframe::CreationContext<'_>, config: EditorConfig) -> Self {
        Self::with_config(config)
    }

    pub fn with_config(config: EditorConfig) -> Self {
        let compositor = ExportCompositor::new(config.canvas_width, config.canvas_height);
        let surface = egui::Rect::from_min_size(egui::Pos2::ZERO, config.surface_size());
        Self {
            editor: EditorContext::new(config),
            compositor,
            file_handler: FileHandler::new(),
            image_loader: ImageLoader::new(),
            textures: TextureManager::default(),
            input: InputHandler::new(surface),
            text_form: TextForm::default(),
            status: None,
        }
    }

    pub fn editor(&self) -> &EditorContext {
        &self.editor
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Run a command against the session and react to its outcome.
    ///
    /// Failures the user caused are shown in the status line; the rest are
    /// only logged.
    pub fn execute_command(&mut self, command: Command) -> Option<CommandOutcome> {
        let mut ctx = CommandContext::new(&mut self.editor, &mut self.compositor);
        match command.execute(&mut ctx) {
            Ok(outcome) => {
                if let CommandOutcome::Exported(design) = &outcome {
                    self.save_export(design);
                }
                Some(outcome)
            }
            Err(err) if err.is_user_visible() => {
                log::info!("Rejected {:?}: {}", command, err);
                self.status = Some(err.to_string());
                None
            }
            Err(err) => {
                log::error!("Command {:?} failed: {}", command, err);
                None
            }
        }
    }

    /// Place an image element per upload and start decoding it
    pub fn add_uploads(&mut self, uploads: Vec<ImageUpload>, ctx: &egui::Context) {
        for upload in uploads {
            if let Some(CommandOutcome::Added(id)) = self.execute_command(Command::AddImage) {
                log::info!("Decoding {} for {}", upload.name, id);
                self.image_loader
                    .dispatch(id, upload.bytes, Some(ctx.clone()));
            }
        }
    }

    /// Submit the text form; the form is cleared only on success
    pub fn submit_text(&mut self) {
        let command = Command::AddText {
            text: self.text_form.text.clone(),
            options: self.text_form.options,
        };
        if let Some(CommandOutcome::Added(_)) = self.execute_command(command) {
            self.text_form.text.clear();
            self.status = None;
        }
    }

    fn apply_completed_decodes(&mut self) {
        for completion in self.image_loader.poll_completions() {
            self.execute_command(Command::CompleteImage {
                id: completion.id,
                payload: completion.payload,
            });
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn save_export(&mut self, design: &ExportedDesign) {
        let path = self.editor.config().export_dir.join(&design.file_name);
        match std::fs::write(&path, &design.png) {
            Ok(()) => {
                log::info!("Saved design to {}", path.display());
                self.status = Some(format!("Saved {}", path.display()));
            }
            Err(err) => {
                log::error!("Failed to write {}: {}", path.display(), err);
                self.status = Some(format!("Could not save {}", design.file_name));
            }
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn save_export(&mut self, design: &ExportedDesign) {
        match offer_download(design) {
            Ok(()) => self.status = Some(format!("Downloaded {}", design.file_name)),
            Err(err) => {
                log::error!("Download of {} failed: {:?}", design.file_name, err);
                self.status = Some(format!("Could not download {}", design.file_name));
            }
        }
    }
}

/// Hand the PNG to the browser as a file download
#[cfg(target_arch = "wasm32")]
fn offer_download(design: &ExportedDesign) -> Result<(), eframe::wasm_bindgen::JsValue> {
    use eframe::wasm_bindgen::{JsCast, JsValue};

    let bytes = js_sys::Uint8Array::from(design.png.as_slice());
    let parts = js_sys::Array::new();
    parts.push(&bytes.buffer());

    let options = web_sys::BlobPropertyBag::new();
    options.set_type("image/png");
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)?;

    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let anchor = document
        .create_element("a")?
        .dyn_into::<web_sys::HtmlAnchorElement>()?;
    anchor.set_href(&url);
    anchor.set_download(&design.file_name);
    anchor.click();

    web_sys::Url::revoke_object_url(&url)
}

impl eframe::App for DesignerApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.textures.begin_frame();
        self.apply_completed_decodes();

        let uploads = self.file_handler.take_dropped_uploads(ctx);
        if !uploads.is_empty() {
            self.add_uploads(uploads, ctx);
        }

        panels::tools_panel(self, ctx);
        panels::side_panel(self, ctx);
        panels::central_panel(self, ctx);

        self.file_handler.preview_files_being_dropped(ctx);
    }
}
