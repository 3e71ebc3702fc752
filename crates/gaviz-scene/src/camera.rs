//! Orbit camera
//!
//! Z-up orbit camera for the expression scene. The continuous render driver
//! and its input handling live outside this crate; they read the matrices
//! from here each frame.

use glam::{Mat4, Vec3};

/// Z-up orbiting perspective camera
#[derive(Debug, Clone, Copy)]
pub struct OrbitCamera {
    /// Point the camera orbits around.
    pub target: Vec3,
    /// Distance from the target.
    pub distance: f32,
    /// Azimuth, radians.
    pub yaw: f32,
    /// Elevation, radians.
    pub pitch: f32,
    /// Vertical field of view, degrees.
    pub fov: f32,
    /// Viewport aspect ratio.
    pub aspect_ratio: f32,
    /// Near clip plane.
    pub near: f32,
    /// Far clip plane.
    pub far: f32,
    /// Zoom limits.
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        // home view roughly matching the original scene's (5, -20, 15) eye
        Self {
            target: Vec3::ZERO,
            distance: 25.5,
            yaw: -76.0f32.to_radians(),
            pitch: 36.0f32.to_radians(),
            fov: 45.0,
            aspect_ratio: 1.0,
            near: 0.1,
            far: 1000.0,
            min_distance: 2.0,
            max_distance: 200.0,
        }
    }
}

impl OrbitCamera {
    /// A camera orbiting `target` at `distance`
    pub fn new(target: Vec3, distance: f32) -> Self {
        Self {
            target,
            distance,
            ..Default::default()
        }
    }

    /// Update for a resized viewport
    pub fn update_aspect_ratio(&mut self, width: f32, height: f32) {
        if height > 0.0 {
            self.aspect_ratio = width / height;
        }
    }

    /// Orbit by yaw/pitch deltas; pitch clamped away from the poles
    pub fn orbit(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw += delta_yaw;
        let limit = 89.0f32.to_radians();
        self.pitch = (self.pitch + delta_pitch).clamp(-limit, limit);
    }

    /// Zoom toward/away from the target, clamped
    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance - delta).clamp(self.min_distance, self.max_distance);
    }

    /// Pan the target in screen space
    pub fn pan(&mut self, delta_x: f32, delta_y: f32) {
        let forward = (self.target - self.eye_position()).normalize();
        // singularity guard when looking straight up or down
        let world_up = if forward.cross(Vec3::Z).length_squared() < 0.001 {
            Vec3::Y
        } else {
            Vec3::Z
        };
        let right = forward.cross(world_up).normalize();
        let up = right.cross(forward).normalize();

        let scale = self.distance * 0.001;
        self.target -= right * delta_x * scale;
        self.target += up * delta_y * scale;
    }

    /// The eye position implied by target/yaw/pitch/distance
    pub fn eye_position(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        let offset = Vec3::new(cos_pitch * cos_yaw, cos_pitch * sin_yaw, sin_pitch) * self.distance;
        self.target + offset
    }

    /// Right-handed look-at view matrix
    pub fn view_matrix(&self) -> Mat4 {
        let eye = self.eye_position();
        let forward = (self.target - eye).normalize();
        let up = if forward.cross(Vec3::Z).length_squared() < 0.001 {
            Vec3::Y
        } else {
            Vec3::Z
        };
        Mat4::look_at_rh(eye, self.target, up)
    }

    /// Perspective projection matrix
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov.to_radians(), self.aspect_ratio, self.near, self.far)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_clamps_to_limits() {
        let mut camera = OrbitCamera::default();
        camera.zoom(1e6);
        assert_eq!(camera.distance, camera.min_distance);
        camera.zoom(-1e6);
        assert_eq!(camera.distance, camera.max_distance);
    }

    #[test]
    fn test_orbit_clamps_pitch() {
        let mut camera = OrbitCamera::default();
        camera.orbit(0.0, 10.0);
        assert!(camera.pitch <= 89.0f32.to_radians());
        camera.orbit(0.0, -20.0);
        assert!(camera.pitch >= -89.0f32.to_radians());
    }

    #[test]
    fn test_eye_respects_distance() {
        let camera = OrbitCamera::new(Vec3::ZERO, 10.0);
        let eye = camera.eye_position();
        assert!((eye.length() - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_aspect_ratio_ignores_zero_height() {
        let mut camera = OrbitCamera::default();
        camera.update_aspect_ratio(800.0, 600.0);
        let ratio = camera.aspect_ratio;
        camera.update_aspect_ratio(800.0, 0.0);
        assert_eq!(camera.aspect_ratio, ratio);
    }
}
