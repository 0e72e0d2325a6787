use eframe::egui;
use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::element::{ImagePayload, decode_image, payload_from_result};
use crate::error::{DesignerError, DesignerResult};
use crate::id_generator::ElementId;

const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "gif", "webp", "bmp"];

/// Raw bytes of a file the user offered as an image
#[derive(Clone)]
pub struct ImageUpload {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageUpload")
            .field("name", &self.name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Check if a file is an image based on MIME type or extension
pub fn is_image_file(name: &str, mime: &str) -> bool {
    if !mime.is_empty() {
        return mime.starts_with("image/");
    }
    std::path::Path::new(name)
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

/// Turn a dropped or opened file into an upload.
///
/// Non-image files fail with `UnsupportedFileType`; callers log and skip them.
pub fn upload_from_dropped(file: &egui::DroppedFile) -> DesignerResult<ImageUpload> {
    let name = if let Some(path) = &file.path {
        path.display().to_string()
    } else if !file.name.is_empty() {
        file.name.clone()
    } else {
        "unknown".to_owned()
    };

    if !is_image_file(&name, &file.mime) {
        return Err(DesignerError::UnsupportedFileType(name));
    }

    if let Some(bytes) = &file.bytes {
        log::info!("Processing image from memory: {} ({} bytes)", name, bytes.len());
        return Ok(ImageUpload {
            name,
            bytes: bytes.to_vec(),
        });
    }

    // For native platforms, we can load the file from the path
    #[cfg(not(target_arch = "wasm32"))]
    if let Some(path) = &file.path {
        log::info!("Processing image from path: {}", path.display());
        let bytes = std::fs::read(path)?;
        return Ok(ImageUpload { name, bytes });
    }

    log::warn!("Dropped file has no accessible data: {}", name);
    Err(DesignerError::UnsupportedFileType(name))
}

/// Collects files dropped on the window this frame
#[derive(Debug, Default)]
pub struct FileHandler;

impl FileHandler {
    pub fn new() -> Self {
        Self
    }

    /// Image uploads dropped since the last frame; other files are skipped.
    pub fn take_dropped_uploads(&self, ctx: &egui::Context) -> Vec<ImageUpload> {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());

        dropped
            .iter()
            .filter_map(|file| match upload_from_dropped(file) {
                Ok(upload) => Some(upload),
                Err(err) => {
                    log::warn!("Ignoring dropped file: {}", err);
                    None
                }
            })
            .collect()
    }

    /// Preview files being dragged over the application
    pub fn preview_files_being_dropped(&self, ctx: &egui::Context) {
        use egui::{Align2, Color32, Id, LayerId, Order, TextStyle};

        if ctx.input(|i| i.raw.hovered_files.is_empty()) {
            return;
        }

        let painter =
            ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("file_drop_target")));
        let screen_rect = ctx.screen_rect();
        painter.rect_filled(screen_rect, 0.0, Color32::from_black_alpha(192));
        painter.text(
            screen_rect.center(),
            Align2::CENTER_CENTER,
            "Drop images to add them to the design",
            TextStyle::Heading.resolve(&ctx.style()),
            Color32::WHITE,
        );
    }
}

/// A finished decode, delivered back to the event thread
#[derive(Debug)]
pub struct DecodeCompletion {
    pub id: ElementId,
    pub payload: ImagePayload,
}

/// Decodes uploaded images off the event thread.
///
/// Completions are queued on a channel and drained once per frame, so they
/// are applied in between other events. There is no cancellation: a decode
/// for an element deleted in the meantime still runs and is then ignored.
#[derive(Debug)]
pub struct ImageLoader {
    sender: UnboundedSender<DecodeCompletion>,
    receiver: UnboundedReceiver<DecodeCompletion>,
}

impl Default for ImageLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageLoader {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded();
        Self { sender, receiver }
    }

    /// Start decoding `bytes` for element `id`; `repaint` is woken on completion.
    pub fn dispatch(&self, id: ElementId, bytes: Vec<u8>, repaint: Option<egui::Context>) {
        let sender = self.sender.clone();
        let task = move || {
            let payload = payload_from_result(decode_image(&bytes));
            if sender
                .unbounded_send(DecodeCompletion { id, payload })
                .is_err()
            {
                log::debug!("Loader dropped before decode of {} finished", id);
            }
            if let Some(ctx) = repaint {
                ctx.request_repaint();
            }
        };

        #[cfg(not(target_arch = "wasm32"))]
        std::thread::spawn(task);

        #[cfg(target_arch = "wasm32")]
        wasm_bindgen_futures::spawn_local(async move { task() });
    }

    /// Completions that arrived since the last call
    pub fn poll_completions(&mut self) -> Vec<DecodeCompletion> {
        let mut completions = Vec::new();
        while let Ok(completion) = self.receiver.try_recv() {
            completions.push(completion);
        }
        completions
    }
}
