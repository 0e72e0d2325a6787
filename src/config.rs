use std::path::{Path, PathBuf};

use egui::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::DesignerResult;

/// Environment variable naming a JSON config file
pub const CONFIG_ENV_VAR: &str = "TSHIRT_DESIGNER_CONFIG";

/// Editor settings.
///
/// Missing fields fall back to their defaults, so a config file only needs
/// to name what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Canvas (and design surface) width in pixels
    pub canvas_width: u32,
    /// Canvas (and design surface) height in pixels
    pub canvas_height: u32,
    /// Where the native build writes exported PNGs
    pub export_dir: PathBuf,
    /// File name prefix for exports
    pub export_prefix: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas_width: 400,
            canvas_height: 500,
            export_dir: PathBuf::from("."),
            export_prefix: "tshirt-design".to_owned(),
        }
    }
}

impl EditorConfig {
    pub fn surface_size(&self) -> Vec2 {
        Vec2::new(self.canvas_width as f32, self.canvas_height as f32)
    }

    pub fn from_json(json: &str) -> DesignerResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> DesignerResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load from the file named by [`CONFIG_ENV_VAR`], or use defaults
    pub fn from_env() -> Self {
        let Some(path) = std::env::var_os(CONFIG_ENV_VAR) else {
            return Self::default();
        };
        let path = PathBuf::from(path);
        match Self::load(&path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(err) => {
                log::error!("Failed to load config {}: {}", path.display(), err);
                Self::default()
            }
        }
    }

    /// `<prefix>-<unix millis>.png`
    pub fn export_file_name(&self, timestamp_ms: u64) -> String {
        format!("{}-{}.png", self.export_prefix, timestamp_ms)
    }
}
