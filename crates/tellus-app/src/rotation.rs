//! Per-frame rotation state for the three spinning layers.

use std::f32::consts::TAU;

/// Surface spin per frame, in radians.
pub const GLOBE_STEP: f32 = 0.001;
/// Cloud shell spin per frame. Half the surface rate, so clouds drift
/// westward relative to the ground.
pub const CLOUD_STEP: f32 = 0.0005;
/// Starfield spin per frame. Barely perceptible.
pub const STAR_STEP: f32 = 0.0001;

/// Accumulated Y-axis rotation angles, advanced once per rendered frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RotationState {
    /// Surface angle in radians.
    pub globe: f32,
    /// Cloud shell angle in radians.
    pub clouds: f32,
    /// Starfield angle in radians.
    pub stars: f32,
}

impl RotationState {
    /// Advance all three layers by one frame.
    pub fn advance(&mut self) {
        self.globe = (self.globe + GLOBE_STEP) % TAU;
        self.clouds = (self.clouds + CLOUD_STEP) % TAU;
        self.stars = (self.stars + STAR_STEP) % TAU;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_frame_increments() {
        let mut rot = RotationState::default();
        rot.advance();
        assert!((rot.globe - 0.001).abs() < 1e-9);
        assert!((rot.clouds - 0.0005).abs() < 1e-9);
        assert!((rot.stars - 0.0001).abs() < 1e-9);
    }

    #[test]
    fn test_k_frames_accumulate_linearly() {
        let mut rot = RotationState::default();
        for _ in 0..250 {
            rot.advance();
        }
        assert!((rot.globe - 0.25).abs() < 1e-4);
        assert!((rot.clouds - 0.125).abs() < 1e-4);
        assert!((rot.stars - 0.025).abs() < 1e-4);
    }

    #[test]
    fn test_layer_rate_ratios() {
        // Clouds run at half the surface rate, stars at a tenth.
        assert!((CLOUD_STEP - GLOBE_STEP / 2.0).abs() < 1e-9);
        assert!((STAR_STEP - GLOBE_STEP / 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_angles_stay_bounded() {
        let mut rot = RotationState::default();
        for _ in 0..10_000 {
            rot.advance();
        }
        assert!(rot.globe >= 0.0 && rot.globe < TAU);
        assert!(rot.clouds >= 0.0 && rot.clouds < TAU);
        assert!(rot.stars >= 0.0 && rot.stars < TAU);
    }
}
