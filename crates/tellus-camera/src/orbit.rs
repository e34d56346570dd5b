//! Orbit camera controller: spherical coordinates around the globe center
//! with damped drag input, scroll zoom, and toggleable auto-rotation.

use glam::{Vec2, Vec3};
use tellus_config::OrbitConfig;
use tellus_input::InputSnapshot;
use tellus_render::Camera;

/// Keep the camera off the poles so look-at never degenerates.
const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

/// Damped orbit controller. The camera orbits the origin; drags accumulate
/// into a pending rotation that bleeds into the orbit angles a fraction per
/// update, giving the glide-to-a-stop feel.
#[derive(Debug, Clone)]
pub struct OrbitController {
    /// Azimuth around the Y axis in radians. Zero faces +Z.
    pub yaw: f32,
    /// Elevation from the equatorial plane in radians.
    pub pitch: f32,
    /// Distance from the globe center in globe radii.
    pub distance: f32,
    /// Whether the camera drifts on its own.
    pub auto_rotate: bool,
    pending_rotation: Vec2,
    pending_zoom: f32,
    config: OrbitConfig,
}

impl OrbitController {
    /// Create a controller at the configured start distance, facing +Z.
    /// The globe sits still until auto-rotation is toggled on.
    pub fn new(config: OrbitConfig) -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            distance: config.start_distance,
            auto_rotate: false,
            pending_rotation: Vec2::ZERO,
            pending_zoom: 0.0,
            config,
        }
    }

    /// Feed one tick's input into the controller.
    pub fn consume(&mut self, snapshot: &InputSnapshot) {
        if snapshot.toggle_auto_rotate {
            self.auto_rotate = !self.auto_rotate;
            log::debug!("Auto-rotate toggled: {}", self.auto_rotate);
        }
        self.pending_rotation += snapshot.drag_delta * self.config.rotate_sensitivity;
        self.pending_zoom += snapshot.scroll_delta;
    }

    /// Advance the orbit by one update tick.
    pub fn update(&mut self) {
        if self.auto_rotate {
            // Speed 2.0 is one revolution per 30 seconds at 60 updates
            // per second.
            self.yaw += std::f32::consts::TAU / 60.0 / 60.0 * self.config.auto_rotate_speed;
        }

        // Dragging right moves the camera the opposite way around the globe,
        // dragging up tilts over the top.
        let applied = self.pending_rotation * self.config.damping_factor;
        self.yaw -= applied.x;
        self.pitch += applied.y;
        self.pending_rotation *= 1.0 - self.config.damping_factor;

        self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.yaw = self.yaw.rem_euclid(std::f32::consts::TAU);

        // Zoom is immediate, not damped.
        if self.pending_zoom != 0.0 {
            self.distance *= 1.0 - self.pending_zoom * self.config.zoom_sensitivity;
            self.pending_zoom = 0.0;
        }
        self.distance = self
            .distance
            .clamp(self.config.min_distance, self.config.max_distance);
    }

    /// Current camera position on the orbit sphere.
    pub fn position(&self) -> Vec3 {
        Vec3::new(
            self.distance * self.pitch.cos() * self.yaw.sin(),
            self.distance * self.pitch.sin(),
            self.distance * self.pitch.cos() * self.yaw.cos(),
        )
    }

    /// Move the camera to the orbit position, aimed at the globe center.
    pub fn apply(&self, camera: &mut Camera) {
        camera.position = self.position();
        camera.look_at(Vec3::ZERO);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> OrbitController {
        OrbitController::new(OrbitConfig::default())
    }

    fn drag(x: f32, y: f32) -> InputSnapshot {
        InputSnapshot {
            drag_delta: Vec2::new(x, y),
            dragging: true,
            ..InputSnapshot::default()
        }
    }

    fn toggle() -> InputSnapshot {
        InputSnapshot {
            toggle_auto_rotate: true,
            ..InputSnapshot::default()
        }
    }

    #[test]
    fn test_starts_facing_positive_z_at_start_distance() {
        let ctl = controller();
        let pos = ctl.position();
        assert!((pos - Vec3::new(0.0, 0.0, 3.0)).length() < 1e-5);
        assert!(!ctl.auto_rotate, "globe must be still until toggled");
    }

    #[test]
    fn test_still_until_toggled() {
        let mut ctl = controller();
        let before = ctl.yaw;
        ctl.update();
        assert!((ctl.yaw - before).abs() < 1e-7);
    }

    #[test]
    fn test_toggle_starts_auto_rotation() {
        let mut ctl = controller();
        ctl.consume(&toggle());
        assert!(ctl.auto_rotate);

        let before = ctl.yaw;
        ctl.update();
        let per_update = std::f32::consts::TAU / 60.0 / 60.0 * 0.5;
        assert!((ctl.yaw - before - per_update).abs() < 1e-7);
    }

    #[test]
    fn test_second_toggle_stops_auto_rotation() {
        let mut ctl = controller();
        ctl.consume(&toggle());
        ctl.consume(&toggle());
        assert!(!ctl.auto_rotate);

        let before = ctl.yaw;
        ctl.update();
        assert!((ctl.yaw - before).abs() < 1e-7);
    }

    #[test]
    fn test_drag_applies_damped_fraction() {
        let mut ctl = controller();
        ctl.auto_rotate = false;
        ctl.consume(&drag(100.0, 0.0));

        let before = ctl.yaw;
        ctl.update();
        // 100 px * 0.005 rad/px * 0.05 damping, opposite the drag direction.
        let expected = 100.0 * 0.005 * 0.05;
        assert!(((before - ctl.yaw).rem_euclid(std::f32::consts::TAU) - expected).abs() < 1e-5);
    }

    #[test]
    fn test_pending_rotation_decays_across_updates() {
        let mut ctl = controller();
        ctl.auto_rotate = false;
        ctl.consume(&drag(0.0, 100.0));

        ctl.update();
        let first_step = ctl.pitch;
        ctl.update();
        let second_step = ctl.pitch - first_step;

        assert!(first_step > 0.0);
        assert!(second_step > 0.0);
        assert!(
            second_step < first_step,
            "Damped input must shrink each update: {first_step} then {second_step}"
        );
    }

    #[test]
    fn test_pitch_clamped_off_poles() {
        let mut ctl = controller();
        ctl.auto_rotate = false;
        for _ in 0..500 {
            ctl.consume(&drag(0.0, 10_000.0));
            ctl.update();
        }
        assert!(ctl.pitch <= PITCH_LIMIT);
        // The camera never flips over the top.
        assert!(ctl.position().y < ctl.distance);
    }

    #[test]
    fn test_zoom_clamped_to_configured_range() {
        let mut ctl = controller();
        ctl.auto_rotate = false;

        for _ in 0..100 {
            ctl.consume(&InputSnapshot {
                scroll_delta: 5.0,
                ..InputSnapshot::default()
            });
            ctl.update();
        }
        assert!((ctl.distance - 1.5).abs() < 1e-5, "zoom-in stops at 1.5");

        for _ in 0..100 {
            ctl.consume(&InputSnapshot {
                scroll_delta: -5.0,
                ..InputSnapshot::default()
            });
            ctl.update();
        }
        assert!((ctl.distance - 10.0).abs() < 1e-5, "zoom-out stops at 10");
    }

    #[test]
    fn test_apply_aims_camera_at_origin() {
        let mut ctl = controller();
        ctl.yaw = 1.0;
        ctl.pitch = 0.5;

        let mut camera = Camera::default();
        ctl.apply(&mut camera);

        let expected_forward = (Vec3::ZERO - camera.position).normalize();
        assert!((camera.forward() - expected_forward).length() < 1e-5);
        assert!((camera.position.length() - ctl.distance).abs() < 1e-5);
    }
}
