use egui::{Pos2, Vec2};
use log::{debug, info};
use thiserror::Error;

use super::EditorState;
use crate::config::EditorConfig;
use crate::element::{ImagePayload, TextOptions, factory};
use crate::error::DesignerResult;
use crate::id_generator::{ElementId, IdGenerator};
use crate::palette::ShirtColor;
use crate::registry::ElementRegistry;

/// Errors that can occur during state transitions.
#[derive(Debug, Error, PartialEq)]
pub enum StateTransitionError {
    /// The requested state transition is not allowed from the current state
    #[error("Cannot transition from {from} to {to}")]
    InvalidTransition {
        from: &'static str,
        to: &'static str,
    },
}

/// The editing session: everything the editor mutates lives here.
///
/// `EditorContext` owns the element registry (and with it the selection),
/// the id counter, the t-shirt color, the pointer state machine and the
/// configuration. A fresh context has an empty registry, nothing selected,
/// a white shirt and an idle pointer.
///
/// All mutation happens on the event thread, one event at a time.
///
/// # Example
///
/// ```rust
/// use tshirt_designer::state::EditorContext;
///
/// let mut context = EditorContext::default();
/// let id = context.add_emoji("🚀");
///
/// // Pick the emoji up at its center and drag it 10px to the right
/// let center = context.registry().get(id).unwrap().rect().center();
/// assert!(context.begin_drag(center));
/// context.drag_to(center + egui::vec2(10.0, 0.0));
/// context.end_drag();
/// assert!(context.state().is_idle());
/// ```
#[derive(Debug, Default)]
pub struct EditorContext {
    state: EditorState,
    registry: ElementRegistry,
    ids: IdGenerator,
    shirt_color: ShirtColor,
    config: EditorConfig,
}

impl EditorContext {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn registry(&self) -> &ElementRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ElementRegistry {
        &mut self.registry
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn shirt_color(&self) -> ShirtColor {
        self.shirt_color
    }

    pub fn set_shirt_color(&mut self, color: ShirtColor) {
        info!("👕 T-shirt color: {} -> {}", self.shirt_color, color);
        self.shirt_color = color;
    }

    pub fn surface_size(&self) -> Vec2 {
        self.config.surface_size()
    }

    /// Validate and perform a state transition.
    pub fn transition_to(&mut self, new_state: EditorState) -> Result<(), StateTransitionError> {
        if !self.state.can_transition_to(&new_state) {
            return Err(StateTransitionError::InvalidTransition {
                from: self.state.name(),
                to: new_state.name(),
            });
        }
        debug!("State: {} -> {}", self.state.name(), new_state.name());
        self.state = new_state;
        Ok(())
    }

    // --- Element creation ---

    /// Submit text; whitespace-only input creates nothing.
    pub fn add_text(&mut self, text: &str, options: TextOptions) -> DesignerResult<ElementId> {
        // A rejected submission burns its id; ids only need to be unique
        let id = self.ids.generate_id();
        let element = factory::create_text(id, text, options, self.surface_size())?;
        self.registry.add(element);
        Ok(id)
    }

    pub fn add_emoji(&mut self, emoji: &str) -> ElementId {
        let id = self.ids.generate_id();
        self.registry
            .add(factory::create_emoji(id, emoji, self.surface_size()));
        id
    }

    /// Place an image whose pixels are still being decoded
    pub fn add_pending_image(&mut self) -> ElementId {
        let id = self.ids.generate_id();
        self.registry
            .add(factory::create_image(id, self.surface_size()));
        id
    }

    /// Deliver a finished decode. Returns false when the element is gone.
    pub fn complete_image(&mut self, id: ElementId, payload: ImagePayload) -> bool {
        match self.registry.get_mut(id) {
            Some(element) => {
                element.set_image(payload);
                true
            }
            None => {
                debug!("Decode finished for deleted {}", id);
                false
            }
        }
    }

    // --- Selection and deletion ---

    pub fn select(&mut self, id: ElementId) {
        self.registry.select(id);
    }

    /// Delete an element; a drag on it ends with it.
    pub fn delete(&mut self, id: ElementId) {
        if self.registry.remove(id).is_some() && self.state.dragged_element() == Some(id) {
            self.state = EditorState::Idle;
        }
    }

    /// Keyboard delete: remove the selected element, if any
    pub fn delete_selected(&mut self) {
        if let Some(id) = self.registry.selected_id() {
            self.delete(id);
        }
    }

    /// Keyboard cancel: drop the selection without deleting anything
    pub fn cancel_selection(&mut self) {
        self.registry.clear_selection();
    }

    // --- Dragging ---

    /// Pointer-down at `pos` (design-surface coordinates).
    ///
    /// Picks up the topmost element under the pointer and selects it.
    /// Returns false, changing nothing, when the pointer is over empty space.
    pub fn begin_drag(&mut self, pos: Pos2) -> bool {
        if !self.state.is_idle() {
            return false;
        }
        let Some(element) = self.registry.element_at(pos) else {
            return false;
        };
        let id = element.id();
        let offset = pos - element.position();

        self.registry.select(id);
        self.transition_to(EditorState::Dragging {
            element: id,
            offset,
        })
        .is_ok()
    }

    /// Pointer-move: the dragged element follows the pointer, unclamped.
    pub fn drag_to(&mut self, pos: Pos2) {
        let EditorState::Dragging { element, offset } = self.state else {
            return;
        };
        if let Some(element) = self.registry.get_mut(element) {
            element.set_position(pos - offset);
        }
    }

    /// Pointer-up: position is already applied, only the stacking resets.
    pub fn end_drag(&mut self) {
        if self.state.is_dragging() {
            // Dragging -> Idle is always valid
            let _ = self.transition_to(EditorState::Idle);
        }
    }
}
