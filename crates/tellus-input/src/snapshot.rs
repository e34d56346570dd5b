//! Per-tick input snapshot.
//!
//! The frame loop never reads the event trackers directly. Instead it takes
//! one [`InputSnapshot`] at the top of each tick, which makes the loop's
//! behavior a pure function of the snapshot and keeps it testable without a
//! window or event queue.

use glam::Vec2;
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::keyboard::KeyboardState;
use crate::mouse::MouseState;

/// The physical key that toggles camera auto-rotation.
pub const AUTO_ROTATE_KEY: PhysicalKey = PhysicalKey::Code(KeyCode::Space);

/// Everything the frame loop needs to know about input for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    /// The auto-rotate toggle key was pressed this tick.
    pub toggle_auto_rotate: bool,
    /// Cursor movement while the left button was held, in logical pixels.
    pub drag_delta: Vec2,
    /// Scroll wheel lines accumulated this tick.
    pub scroll_delta: f32,
    /// Whether a drag is in progress.
    pub dragging: bool,
}

impl InputSnapshot {
    /// Capture a snapshot from the frame-coherent trackers.
    ///
    /// Does not clear the trackers; call `clear_transients` on both after the
    /// tick has consumed the snapshot.
    #[must_use]
    pub fn capture(keyboard: &KeyboardState, mouse: &MouseState) -> Self {
        let dragging = mouse.is_left_pressed();
        Self {
            toggle_auto_rotate: keyboard.just_pressed(AUTO_ROTATE_KEY),
            drag_delta: if dragging { mouse.delta() } else { Vec2::ZERO },
            scroll_delta: mouse.scroll(),
            dragging,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::event::{ElementState, MouseButton, MouseScrollDelta};

    use crate::keyboard::RawKeyEvent;

    #[test]
    fn test_empty_snapshot() {
        let snapshot = InputSnapshot::capture(&KeyboardState::new(), &MouseState::new());
        assert_eq!(snapshot, InputSnapshot::default());
    }

    #[test]
    fn test_toggle_captured_from_space_press() {
        let mut kb = KeyboardState::new();
        kb.process_raw(RawKeyEvent {
            key: AUTO_ROTATE_KEY,
            state: ElementState::Pressed,
            repeat: false,
        });
        let snapshot = InputSnapshot::capture(&kb, &MouseState::new());
        assert!(snapshot.toggle_auto_rotate);

        kb.clear_transients();
        let snapshot = InputSnapshot::capture(&kb, &MouseState::new());
        assert!(!snapshot.toggle_auto_rotate, "toggle must fire once per press");
    }

    #[test]
    fn test_drag_delta_only_while_button_held() {
        let mut ms = MouseState::new();
        ms.on_cursor_moved(10.0, 0.0);
        let snapshot = InputSnapshot::capture(&KeyboardState::new(), &ms);
        assert_eq!(snapshot.drag_delta, Vec2::ZERO);
        assert!(!snapshot.dragging);

        ms.on_button(MouseButton::Left, ElementState::Pressed);
        ms.on_cursor_moved(25.0, 5.0);
        let snapshot = InputSnapshot::capture(&KeyboardState::new(), &ms);
        assert!(snapshot.dragging);
        assert_eq!(snapshot.drag_delta, Vec2::new(15.0, 5.0));
    }

    #[test]
    fn test_scroll_captured() {
        let mut ms = MouseState::new();
        ms.on_scroll(MouseScrollDelta::LineDelta(0.0, -2.0));
        let snapshot = InputSnapshot::capture(&KeyboardState::new(), &ms);
        assert!((snapshot.scroll_delta - (-2.0)).abs() < f32::EPSILON);
    }
}
