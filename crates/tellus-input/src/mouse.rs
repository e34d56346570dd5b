//! Frame-coherent mouse state tracker.
//!
//! [`MouseState`] accumulates winit mouse events during a frame and exposes
//! the cursor position, drag delta, left-button state, and scroll wheel
//! accumulation that the orbit controller consumes each tick.

use glam::Vec2;
use winit::event::{ElementState, MouseButton, MouseScrollDelta};

/// Frame-coherent mouse state.
///
/// Forward winit events via the `on_*` methods during event collection,
/// query state with the accessors, and call
/// [`clear_transients`](Self::clear_transients) at end of frame.
#[derive(Debug, Clone, Default)]
pub struct MouseState {
    position: Vec2,
    delta: Vec2,
    left_pressed: bool,
    scroll: f32,
}

impl MouseState {
    /// Creates a new `MouseState` with all fields zeroed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a `CursorMoved` event.
    pub fn on_cursor_moved(&mut self, x: f64, y: f64) {
        let new_pos = Vec2::new(x as f32, y as f32);
        self.delta += new_pos - self.position;
        self.position = new_pos;
    }

    /// Process a `MouseInput` event. Only the left button orbits the camera.
    pub fn on_button(&mut self, button: MouseButton, state: ElementState) {
        if button == MouseButton::Left {
            self.left_pressed = state == ElementState::Pressed;
            if self.left_pressed {
                // A fresh press must not inherit the delta accumulated while
                // the cursor moved unpressed.
                self.delta = Vec2::ZERO;
            }
        }
    }

    /// Process a `MouseWheel` event.
    pub fn on_scroll(&mut self, delta: MouseScrollDelta) {
        match delta {
            MouseScrollDelta::LineDelta(_x, y) => {
                self.scroll += y;
            }
            MouseScrollDelta::PixelDelta(pos) => {
                // Normalize pixel delta: ~40 pixels per line.
                self.scroll += (pos.y / 40.0) as f32;
            }
        }
    }

    /// Clears per-frame transients: delta and scroll.
    pub fn clear_transients(&mut self) {
        self.delta = Vec2::ZERO;
        self.scroll = 0.0;
    }

    /// Current cursor position in window-logical coordinates.
    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Movement delta accumulated since the last frame clear.
    #[must_use]
    pub fn delta(&self) -> Vec2 {
        self.delta
    }

    /// Whether the left mouse button is currently held.
    #[must_use]
    pub fn is_left_pressed(&self) -> bool {
        self.left_pressed
    }

    /// Scroll wheel delta accumulated this frame (positive = scroll up).
    #[must_use]
    pub fn scroll(&self) -> f32 {
        self.scroll
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_updates_on_move() {
        let mut ms = MouseState::new();
        ms.on_cursor_moved(100.0, 200.0);
        assert_eq!(ms.position(), Vec2::new(100.0, 200.0));
    }

    #[test]
    fn test_delta_accumulates_within_frame() {
        let mut ms = MouseState::new();
        ms.on_cursor_moved(100.0, 200.0);
        ms.clear_transients();
        ms.on_cursor_moved(110.0, 195.0);
        ms.on_cursor_moved(115.0, 195.0);
        let d = ms.delta();
        assert!((d.x - 15.0).abs() < f32::EPSILON);
        assert!((d.y - (-5.0)).abs() < f32::EPSILON);
    }

    #[test]
    fn test_fresh_press_resets_delta() {
        let mut ms = MouseState::new();
        ms.on_cursor_moved(100.0, 100.0);
        ms.on_button(MouseButton::Left, ElementState::Pressed);
        assert_eq!(ms.delta(), Vec2::ZERO);
        assert!(ms.is_left_pressed());
    }

    #[test]
    fn test_release_clears_button() {
        let mut ms = MouseState::new();
        ms.on_button(MouseButton::Left, ElementState::Pressed);
        ms.on_button(MouseButton::Left, ElementState::Released);
        assert!(!ms.is_left_pressed());
    }

    #[test]
    fn test_right_button_ignored() {
        let mut ms = MouseState::new();
        ms.on_button(MouseButton::Right, ElementState::Pressed);
        assert!(!ms.is_left_pressed());
    }

    #[test]
    fn test_scroll_accumulates_and_resets() {
        let mut ms = MouseState::new();
        ms.on_scroll(MouseScrollDelta::LineDelta(0.0, 1.0));
        ms.on_scroll(MouseScrollDelta::LineDelta(0.0, 0.5));
        assert!((ms.scroll() - 1.5).abs() < f32::EPSILON);
        ms.clear_transients();
        assert!(ms.scroll().abs() < f32::EPSILON);
    }

    #[test]
    fn test_pixel_scroll_normalized() {
        let mut ms = MouseState::new();
        ms.on_scroll(MouseScrollDelta::PixelDelta(
            winit::dpi::PhysicalPosition::new(0.0, 80.0),
        ));
        assert!((ms.scroll() - 2.0).abs() < 1e-6);
    }
}
