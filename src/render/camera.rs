//! Camera controller for the trajectory viewport

use glam::{Mat4, Vec3};

/// Orbital camera that rotates around a target point (Earth center by default).
#[derive(Debug, Clone)]
pub struct Camera {
    /// Point the camera looks at
    pub target: Vec3,
    /// Distance from target, in Earth radii
    pub distance: f32,
    /// Rotation around the Y axis, radians
    pub azimuth: f32,
    /// Angle above/below the XZ plane, radians
    pub elevation: f32,
    /// Vertical field of view, radians
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            distance: 4.0,
            azimuth: 0.0,
            elevation: 0.3,
            fov: 45.0_f32.to_radians(),
            near: 0.01,
            far: 100.0,
        }
    }
}

impl Camera {
    /// Camera position in world space
    pub fn position(&self) -> Vec3 {
        let x = self.distance * self.elevation.cos() * self.azimuth.sin();
        let y = self.distance * self.elevation.sin();
        let z = self.distance * self.elevation.cos() * self.azimuth.cos();
        self.target + Vec3::new(x, y, z)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self, aspect_ratio: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov, aspect_ratio, self.near, self.far)
    }

    pub fn view_projection_matrix(&self, aspect_ratio: f32) -> Mat4 {
        self.projection_matrix(aspect_ratio) * self.view_matrix()
    }

    /// Orbit around the target (mouse drag)
    pub fn orbit(&mut self, delta_x: f32, delta_y: f32) {
        self.azimuth += delta_x * 0.01;
        self.elevation = (self.elevation + delta_y * 0.01).clamp(
            -std::f32::consts::FRAC_PI_2 + 0.01,
            std::f32::consts::FRAC_PI_2 - 0.01,
        );
    }

    /// Zoom toward/away from the target (mouse wheel)
    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance * (1.0 - delta * 0.1)).clamp(1.1, 50.0);
    }

    /// Pan the target point (shift + mouse drag)
    pub fn pan(&mut self, delta_x: f32, delta_y: f32) {
        let right = Vec3::new(self.azimuth.cos(), 0.0, -self.azimuth.sin());
        self.target += right * delta_x * 0.01 * self.distance;
        self.target += Vec3::Y * delta_y * 0.01 * self.distance;
    }

    /// Recenter on Earth at the default viewing distance
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
