use std::collections::HashMap;

use egui::{ColorImage, Context, TextureHandle, TextureId, TextureOptions};
use thiserror::Error;

use crate::error::DesignerError;
use crate::id_generator::ElementId;
use crate::palette::ShirtColor;

/// Errors that can occur during texture generation
#[derive(Error, Debug)]
pub enum TextureGenerationError {
    /// The image element has no decoded pixels yet
    #[error("Image pixels are not available")]
    NotReady,
    #[error("Failed to generate texture: {0}")]
    Render(#[from] DesignerError),
}

/// What a cached texture shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureKey {
    /// The rendered t-shirt mockup in one palette color
    Background(ShirtColor),
    /// The decoded pixels of an image element
    Element(ElementId),
}

impl TextureKey {
    fn name(self) -> String {
        match self {
            TextureKey::Background(color) => format!("background_{}", color.key()),
            TextureKey::Element(id) => format!("{}", id),
        }
    }
}

/// Uploads rasters to the GPU once and hands out their texture ids.
///
/// Least recently used entries are evicted past `max_cache_size`.
pub struct TextureManager {
    texture_cache: HashMap<TextureKey, TextureHandle>,
    /// Tracks when each texture was last used
    last_used: HashMap<TextureKey, u64>,
    current_frame: u64,
    max_cache_size: usize,
}

impl Default for TextureManager {
    fn default() -> Self {
        Self::new(64)
    }
}

impl TextureManager {
    /// Creates a new texture manager with the specified cache size
    pub fn new(max_cache_size: usize) -> Self {
        Self {
            texture_cache: HashMap::new(),
            last_used: HashMap::new(),
            current_frame: 0,
            max_cache_size,
        }
    }

    /// Increments the frame counter, should be called at the start of each frame
    pub fn begin_frame(&mut self) {
        self.current_frame += 1;
    }

    /// Gets or creates the texture for `key`
    pub fn get_or_create_texture<F>(
        &mut self,
        key: TextureKey,
        generator: F,
        ctx: &Context,
    ) -> Result<TextureId, TextureGenerationError>
    where
        F: FnOnce() -> Result<ColorImage, TextureGenerationError>,
    {
        if let Some(handle) = self.texture_cache.get(&key) {
            self.last_used.insert(key, self.current_frame);
            return Ok(handle.id());
        }

        let image = generator()?;
        let handle = ctx.load_texture(key.name(), image, TextureOptions::LINEAR);
        let id = handle.id();

        self.texture_cache.insert(key, handle);
        self.last_used.insert(key, self.current_frame);
        self.prune_cache_if_needed();

        Ok(id)
    }

    /// Drops the texture of a deleted element
    pub fn invalidate_element(&mut self, element_id: ElementId) {
        let key = TextureKey::Element(element_id);
        self.texture_cache.remove(&key);
        self.last_used.remove(&key);
    }

    /// Drops element textures whose element no longer exists
    pub fn retain_elements(&mut self, is_live: impl Fn(ElementId) -> bool) {
        let stale: Vec<ElementId> = self
            .texture_cache
            .keys()
            .filter_map(|key| match key {
                TextureKey::Element(id) if !is_live(*id) => Some(*id),
                _ => None,
            })
            .collect();

        for id in stale {
            self.invalidate_element(id);
        }
    }

    fn prune_cache_if_needed(&mut self) {
        if self.texture_cache.len() <= self.max_cache_size {
            return;
        }

        let mut entries: Vec<(TextureKey, u64)> =
            self.last_used.iter().map(|(k, v)| (*k, *v)).collect();

        // Oldest first
        entries.sort_by_key(|(_, frame)| *frame);

        let to_remove = entries.len() - self.max_cache_size;
        for (key, _) in entries.iter().take(to_remove) {
            self.texture_cache.remove(key);
            self.last_used.remove(key);
        }
    }

    /// Returns the number of textures currently in the cache
    pub fn cache_size(&self) -> usize {
        self.texture_cache.len()
    }

    #[cfg(test)]
    fn get_texture(&self, key: TextureKey) -> Option<&TextureHandle> {
        self.texture_cache.get(&key)
    }
}
