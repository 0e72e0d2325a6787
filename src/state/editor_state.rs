//! The pointer-interaction state machine of the editor.
//!
//! ```text
//! ┌──────────┐  pointer-down on element  ┌────────────┐
//! │          ├──────────────────────────►│            │
//! │   Idle   │                           │  Dragging  ├──┐ pointer-move
//! │          │◄──────────────────────────┤            │◄─┘
//! └──────────┘        pointer-up         └────────────┘
//! ```
//!
//! Pointer-down on empty space, and pointer-move/up while idle, leave the
//! machine where it is.

use egui::Vec2;

use crate::id_generator::ElementId;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum EditorState {
    /// No pointer interaction in progress
    #[default]
    Idle,
    /// An element follows the pointer
    Dragging {
        element: ElementId,
        /// Pointer position minus the element's top-left corner at pickup
        offset: Vec2,
    },
}

impl EditorState {
    /// Validates whether a transition to the new state is allowed
    pub fn can_transition_to(&self, new_state: &EditorState) -> bool {
        matches!(
            (self, new_state),
            (EditorState::Idle, EditorState::Dragging { .. })
                | (EditorState::Dragging { .. }, EditorState::Idle)
        )
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, EditorState::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, EditorState::Dragging { .. })
    }

    /// The element being dragged, which is painted above its siblings
    pub fn dragged_element(&self) -> Option<ElementId> {
        match self {
            EditorState::Dragging { element, .. } => Some(*element),
            EditorState::Idle => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EditorState::Idle => "Idle",
            EditorState::Dragging { .. } => "Dragging",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id_generator::IdGenerator;

    #[test]
    fn test_transitions() {
        let element = IdGenerator::new().generate_id();
        let dragging = EditorState::Dragging {
            element,
            offset: Vec2::ZERO,
        };

        assert!(EditorState::Idle.can_transition_to(&dragging));
        assert!(dragging.can_transition_to(&EditorState::Idle));
        assert!(!dragging.can_transition_to(&dragging));
        assert!(!EditorState::Idle.can_transition_to(&EditorState::Idle));
        assert_eq!(dragging.dragged_element(), Some(element));
    }
}
