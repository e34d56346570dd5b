//! Input abstraction: frame-coherent keyboard and mouse trackers, condensed
//! into an explicit per-tick snapshot for the frame loop.

pub mod keyboard;
pub mod mouse;
pub mod snapshot;

pub use keyboard::{KeyboardState, RawKeyEvent};
pub use mouse::MouseState;
pub use snapshot::{AUTO_ROTATE_KEY, InputSnapshot};
