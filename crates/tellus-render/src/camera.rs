//! Camera system for view and projection matrix generation.

use bytemuck::{Pod, Zeroable};
use glam::{Mat3, Mat4, Quat, Vec3};

/// Uniform buffer layout shared by every pipeline: view-projection matrix
/// plus the camera's world position.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub camera_pos: [f32; 4],
}

/// A camera that generates view and projection matrices for rendering.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Position in world space.
    pub position: Vec3,
    /// Rotation as a unit quaternion.
    pub rotation: Quat,
    /// Projection parameters.
    pub projection: Projection,
    /// Near clip plane distance (always positive).
    pub near: f32,
    /// Far clip plane distance (always positive, > near).
    pub far: f32,
}

/// Projection type for the camera.
#[derive(Debug, Clone)]
pub enum Projection {
    /// Perspective projection for 3D scenes.
    Perspective {
        /// Vertical field of view in radians.
        fov_y: f32,
        /// Width / height.
        aspect_ratio: f32,
    },
}

impl Camera {
    /// Compute the view matrix (inverse of camera transform).
    pub fn view_matrix(&self) -> Mat4 {
        let rotation_matrix = Mat4::from_quat(self.rotation);
        let translation_matrix = Mat4::from_translation(self.position);
        (translation_matrix * rotation_matrix).inverse()
    }

    /// Compute the projection matrix with reverse-Z.
    pub fn projection_matrix(&self) -> Mat4 {
        match &self.projection {
            Projection::Perspective {
                fov_y,
                aspect_ratio,
            } => {
                // Reverse-Z: near plane maps to z=1, far plane maps to z=0,
                // handled by swapping near/far in the projection matrix.
                Mat4::perspective_rh(*fov_y, *aspect_ratio, self.far, self.near)
            }
        }
    }

    /// Compute the combined view-projection matrix.
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// The forward direction vector (-Z in camera space).
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    /// The up direction vector (+Y in camera space).
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// The right direction vector (+X in camera space).
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Aim the camera at a world-space target, keeping +Y as world up.
    ///
    /// Falls back to the current rotation when the target coincides with the
    /// camera position or lies along the vertical axis.
    pub fn look_at(&mut self, target: Vec3) {
        let forward = target - self.position;
        if forward.length_squared() < 1e-12 {
            return;
        }
        let forward = forward.normalize();
        let right = forward.cross(Vec3::Y);
        if right.length_squared() < 1e-12 {
            return;
        }
        let right = right.normalize();
        let up = right.cross(forward);
        // Camera space: +X right, +Y up, -Z forward.
        self.rotation = Quat::from_mat3(&Mat3::from_cols(right, up, -forward));
    }

    /// Update the aspect ratio for perspective projection.
    pub fn set_aspect_ratio(&mut self, width: f32, height: f32) {
        let Projection::Perspective { aspect_ratio, .. } = &mut self.projection;
        *aspect_ratio = width / height.max(1.0);
    }

    /// Convert the camera to a uniform suitable for GPU upload.
    pub fn to_uniform(&self) -> CameraUniform {
        CameraUniform {
            view_proj: self.view_projection_matrix().to_cols_array_2d(),
            camera_pos: [self.position.x, self.position.y, self.position.z, 0.0],
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 3.0),
            rotation: Quat::IDENTITY,
            projection: Projection::Perspective {
                fov_y: std::f32::consts::FRAC_PI_4, // 45 degrees
                aspect_ratio: 16.0 / 9.0,
            },
            near: 0.1,
            far: 1000.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_4;

    #[test]
    fn test_identity_camera_looks_down_neg_z() {
        let camera = Camera::default();
        let forward = camera.forward();
        assert!((forward.x).abs() < 1e-6);
        assert!((forward.y).abs() < 1e-6);
        assert!((forward.z + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_default_scene_setup() {
        let camera = Camera::default();
        // 45 degree FOV, camera three radii out on +Z.
        let Projection::Perspective { fov_y, .. } = camera.projection;
        assert!((fov_y - FRAC_PI_4).abs() < 1e-6);
        assert_eq!(camera.position, Vec3::new(0.0, 0.0, 3.0));
        assert!((camera.near - 0.1).abs() < 1e-6);
        assert!((camera.far - 1000.0).abs() < 1e-6);
    }

    #[test]
    fn test_projection_matrix_aspect_ratio() {
        let mut camera = Camera::default();
        camera.set_aspect_ratio(1920.0, 1080.0);
        let Projection::Perspective { aspect_ratio, .. } = camera.projection;
        assert!((aspect_ratio - 16.0 / 9.0).abs() < 1e-6);
    }

    #[test]
    fn test_look_at_origin_from_positive_z() {
        let mut camera = Camera::default();
        camera.look_at(Vec3::ZERO);
        let forward = camera.forward();
        assert!((forward - Vec3::NEG_Z).length() < 1e-5);
    }

    #[test]
    fn test_look_at_keeps_world_up() {
        let mut camera = Camera {
            position: Vec3::new(2.0, 1.0, 2.0),
            ..Camera::default()
        };
        camera.look_at(Vec3::ZERO);
        let forward = camera.forward();
        let expected = (Vec3::ZERO - camera.position).normalize();
        assert!((forward - expected).length() < 1e-5);
        // Up stays in the upper hemisphere: no roll introduced.
        assert!(camera.up().y > 0.0);
    }

    #[test]
    fn test_look_at_degenerate_target_is_noop() {
        let mut camera = Camera::default();
        let before = camera.rotation;
        camera.look_at(camera.position);
        assert_eq!(camera.rotation, before);
    }

    #[test]
    fn test_view_matrix_inverse_is_camera_transform() {
        let camera = Camera {
            position: Vec3::new(10.0, 20.0, 30.0),
            rotation: Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
            ..Camera::default()
        };
        let view = camera.view_matrix();
        let inv_view = view.inverse();
        let reconstructed_pos = inv_view.col(3).truncate();
        assert!((reconstructed_pos - camera.position).length() < 1e-4);
    }

    #[test]
    fn test_up_right_forward_orthogonal() {
        let mut camera = Camera {
            position: Vec3::new(1.0, 2.0, 3.0),
            ..Camera::default()
        };
        camera.look_at(Vec3::ZERO);
        let f = camera.forward();
        let u = camera.up();
        let r = camera.right();

        assert!((f.length() - 1.0).abs() < 1e-5);
        assert!((u.length() - 1.0).abs() < 1e-5);
        assert!((r.length() - 1.0).abs() < 1e-5);

        assert!(f.dot(u).abs() < 1e-5);
        assert!(f.dot(r).abs() < 1e-5);
        assert!(u.dot(r).abs() < 1e-5);
    }

    #[test]
    fn test_camera_uniform_size() {
        // mat4x4 (64 bytes) + vec4 (16 bytes).
        assert_eq!(std::mem::size_of::<CameraUniform>(), 80);
    }
}
