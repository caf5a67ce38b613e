//! Stationary viewer camera with a resizable perspective projection.

use glam::{Mat4, Vec3};

use crate::params::{CameraPreset, RenderConfig};

/// Viewer camera; the eye never moves, only the viewport can change
pub struct CameraSystem {
    preset: CameraPreset,
    fov_degrees: f32,
    near_plane_m: f32,
    far_plane_m: f32,
    aspect_ratio: f32,
}

impl CameraSystem {
    /// Create camera system with specified preset and projection settings
    pub fn new(preset: CameraPreset, render_config: &RenderConfig) -> Self {
        Self {
            preset,
            fov_degrees: render_config.fov_degrees,
            near_plane_m: render_config.near_plane_m,
            far_plane_m: render_config.far_plane_m,
            aspect_ratio: render_config.aspect_ratio(),
        }
    }

    /// Camera position and look-at target
    pub fn position_and_target(&self) -> (Vec3, Vec3) {
        let camera = self.preset.camera();
        (
            Vec3::from_array(camera.position),
            Vec3::from_array(camera.target),
        )
    }

    pub fn eye(&self) -> Vec3 {
        self.position_and_target().0
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    /// Adapt the projection to a new viewport; the view is unchanged
    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect_ratio = width as f32 / height.max(1) as f32;
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fov_degrees.to_radians(),
            self.aspect_ratio,
            self.near_plane_m,
            self.far_plane_m,
        )
    }

    /// Create view-projection matrix for rendering
    pub fn view_proj(&self) -> Mat4 {
        let (eye, target) = self.position_and_target();

        // Always keep Y as up vector (camera never rolls)
        let view = Mat4::look_at_rh(eye, target, Vec3::Y);
        self.projection() * view
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_desktop_eye_position() {
        let camera = CameraSystem::new(CameraPreset::default(), &RenderConfig::default());
        assert_eq!(camera.eye(), Vec3::new(0.0, 10.0, 0.0));
    }

    #[test]
    fn test_head_mounted_eye_height() {
        let camera = CameraSystem::new(CameraPreset::head_mounted(), &RenderConfig::default());
        assert_eq!(camera.eye().y, 1.6);
    }

    #[test]
    fn test_view_proj_matrix_generation() {
        let camera = CameraSystem::new(CameraPreset::default(), &RenderConfig::default());
        let view_proj = camera.view_proj();

        // Matrix should not be identity or zero
        assert_ne!(view_proj, Mat4::IDENTITY);
        assert_ne!(view_proj, Mat4::ZERO);

        // A point straight ahead lands in the middle of the viewport
        let clip = view_proj * Vec3::new(0.0, 10.0, -100.0).extend(1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-4 && ndc.y.abs() < 1e-4);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn test_resize_only_changes_projection() {
        let mut camera = CameraSystem::new(CameraPreset::default(), &RenderConfig::default());
        let before = camera.position_and_target();
        let proj = camera.projection();

        camera.resize(800, 800);
        assert_eq!(camera.aspect_ratio(), 1.0);
        assert_eq!(camera.position_and_target(), before);
        assert_ne!(camera.projection(), proj);
    }
}
