use egui::{Context, Key, PointerButton, Pos2, Rect};

use crate::command::Command;

/// Represents the location where an input event occurred
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputLocation {
    /// The position in viewport coordinates
    pub position: Pos2,
    /// Whether this position is within the design surface
    pub is_in_canvas: bool,
}

/// Raw input the editor reacts to, before it becomes a `Command`
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Primary button was pressed
    PointerDown { location: InputLocation },
    /// Pointer moved
    PointerMove { location: InputLocation },
    /// Primary button was released
    PointerUp { location: InputLocation },
    /// Key was pressed
    KeyDown { key: Key },
}

impl InputEvent {
    /// Helper to check if an input event occurred within the design surface
    pub fn is_in_canvas(&self) -> bool {
        match self {
            InputEvent::PointerDown { location }
            | InputEvent::PointerMove { location }
            | InputEvent::PointerUp { location } => location.is_in_canvas,
            InputEvent::KeyDown { .. } => false,
        }
    }
}

/// Converts egui input into `InputEvent`s and those into `Command`s.
///
/// Pointer positions are translated from the viewport into design-surface
/// coordinates by subtracting the surface origin.
#[derive(Debug)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    canvas_rect: Rect,
}

impl InputHandler {
    pub fn new(canvas_rect: Rect) -> Self {
        Self {
            last_pointer_pos: None,
            canvas_rect,
        }
    }

    /// Update the surface rectangle (e.g. if the window is resized)
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    fn make_location(&self, pos: Pos2) -> InputLocation {
        InputLocation {
            position: pos,
            is_in_canvas: self.canvas_rect.contains(pos),
        }
    }

    /// Viewport position to design-surface position
    pub fn surface_position(&self, pos: Pos2) -> Pos2 {
        (pos - self.canvas_rect.min).to_pos2()
    }

    /// Surface position back to the viewport, for painting
    pub fn viewport_position(&self, pos: Pos2) -> Pos2 {
        self.canvas_rect.min + pos.to_vec2()
    }

    /// Process raw egui input and generate our InputEvents.
    ///
    /// Keyboard events are skipped while a text field has focus.
    pub fn process_input(&mut self, ctx: &Context) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let wants_keyboard = ctx.wants_keyboard_input();

        ctx.input(|input| {
            let hover = input.pointer.hover_pos();

            if input.pointer.button_pressed(PointerButton::Primary) {
                if let Some(pos) = hover {
                    events.push(InputEvent::PointerDown {
                        location: self.make_location(pos),
                    });
                }
            }

            if let Some(pos) = hover {
                if Some(pos) != self.last_pointer_pos {
                    events.push(InputEvent::PointerMove {
                        location: self.make_location(pos),
                    });
                }
            }

            if input.pointer.button_released(PointerButton::Primary) {
                let pos = hover.or(self.last_pointer_pos).unwrap_or(self.canvas_rect.min);
                events.push(InputEvent::PointerUp {
                    location: self.make_location(pos),
                });
            }

            if hover.is_some() {
                self.last_pointer_pos = hover;
            }

            if !wants_keyboard {
                for key in [Key::Delete, Key::Escape] {
                    if input.key_pressed(key) {
                        events.push(InputEvent::KeyDown { key });
                    }
                }
            }
        });

        events
    }

    /// Map an input event to the command it triggers, if any
    pub fn to_command(&self, event: &InputEvent) -> Option<Command> {
        match event {
            InputEvent::PointerDown { location } if event.is_in_canvas() => {
                Some(Command::BeginDrag {
                    pos: self.surface_position(location.position),
                })
            }
            InputEvent::PointerDown { .. } => None,
            // Moves and releases outside the surface still drive an ongoing drag
            InputEvent::PointerMove { location } => Some(Command::DragTo {
                pos: self.surface_position(location.position),
            }),
            InputEvent::PointerUp { .. } => Some(Command::EndDrag),
            InputEvent::KeyDown { key: Key::Delete } => Some(Command::DeleteSelected),
            InputEvent::KeyDown { key: Key::Escape } => Some(Command::ClearSelection),
            InputEvent::KeyDown { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};

    fn handler() -> InputHandler {
        InputHandler::new(Rect::from_min_size(pos2(100.0, 50.0), vec2(400.0, 500.0)))
    }

    fn location(handler: &InputHandler, x: f32, y: f32) -> InputLocation {
        handler.make_location(pos2(x, y))
    }

    #[test]
    fn test_surface_position_subtracts_origin() {
        let handler = handler();
        assert_eq!(handler.surface_position(pos2(150.0, 60.0)), pos2(50.0, 10.0));
        assert_eq!(handler.viewport_position(pos2(50.0, 10.0)), pos2(150.0, 60.0));
    }

    #[test]
    fn test_pointer_down_outside_surface_is_ignored() {
        let handler = handler();
        let event = InputEvent::PointerDown {
            location: location(&handler, 10.0, 10.0),
        };
        assert!(!event.is_in_canvas());
        assert!(handler.to_command(&event).is_none());
    }

    #[test]
    fn test_pointer_events_map_to_drag_commands() {
        let handler = handler();
        let down = InputEvent::PointerDown {
            location: location(&handler, 300.0, 300.0),
        };
        assert!(matches!(
            handler.to_command(&down),
            Some(Command::BeginDrag { pos }) if pos == pos2(200.0, 250.0)
        ));

        // Outside the surface, moves still translate
        let moved = InputEvent::PointerMove {
            location: location(&handler, 20.0, 40.0),
        };
        assert!(matches!(
            handler.to_command(&moved),
            Some(Command::DragTo { pos }) if pos == pos2(-80.0, -10.0)
        ));

        let up = InputEvent::PointerUp {
            location: location(&handler, 20.0, 40.0),
        };
        assert!(matches!(handler.to_command(&up), Some(Command::EndDrag)));
    }

    #[test]
    fn test_keys_map_to_commands() {
        let handler = handler();
        assert!(matches!(
            handler.to_command(&InputEvent::KeyDown { key: Key::Delete }),
            Some(Command::DeleteSelected)
        ));
        assert!(matches!(
            handler.to_command(&InputEvent::KeyDown { key: Key::Escape }),
            Some(Command::ClearSelection)
        ));
        assert!(handler.to_command(&InputEvent::KeyDown { key: Key::A }).is_none());
    }
}
