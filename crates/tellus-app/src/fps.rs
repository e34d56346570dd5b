//! Frame rate counter over a fixed one-second window.

/// Measurement window in milliseconds.
pub const FPS_WINDOW_MS: u64 = 1000;

/// Counts frames and reports FPS once per window.
///
/// Takes explicit timestamps rather than reading the clock, so the windowing
/// behavior is testable.
#[derive(Debug, Clone, Copy)]
pub struct FpsCounter {
    frames: u32,
    window_start_ms: u64,
}

impl FpsCounter {
    /// Create a counter with its window starting at `now_ms`.
    pub fn new(now_ms: u64) -> Self {
        Self {
            frames: 0,
            window_start_ms: now_ms,
        }
    }

    /// Record one frame. Once at least a full window has elapsed, returns
    /// the raw frame count for that window and resets; `None` otherwise.
    /// The count is not normalized to the actual elapsed time.
    pub fn sample(&mut self, now_ms: u64) -> Option<u32> {
        self.frames += 1;
        let elapsed = now_ms.saturating_sub(self.window_start_ms);
        if elapsed >= FPS_WINDOW_MS {
            let fps = self.frames;
            self.frames = 0;
            self.window_start_ms = now_ms;
            Some(fps)
        } else {
            None
        }
    }
}
