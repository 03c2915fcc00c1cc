use glam::{Mat4, Vec3};
use orrery_render::Viewport;

/// Perspective camera orbiting a center point.
///
/// Orbit state (yaw/pitch/distance) comes from the input controller each
/// frame; projection state comes from the viewport at resize time. The
/// camera itself holds no damping and no input.
pub struct OrbitCamera {
    pub center: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            center: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            distance: 5.0,
            fov: 75.0_f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl OrbitCamera {
    /// Adopt the controller's damped orbit for this frame.
    pub fn set_orbit(&mut self, yaw: f32, pitch: f32, distance: f32) {
        self.yaw = yaw;
        self.pitch = pitch;
        self.distance = distance;
    }

    /// Adopt a viewport snapshot: aspect follows width/height exactly.
    /// The projection matrix reflects it on the next query.
    pub fn set_viewport(&mut self, viewport: &Viewport) {
        self.aspect = viewport.aspect();
    }

    pub fn eye(&self) -> Vec3 {
        let dir = Vec3::new(
            self.pitch.cos() * self.yaw.sin(),
            self.pitch.sin(),
            self.pitch.cos() * self.yaw.cos(),
        );
        self.center + dir * self.distance
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.center, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_camera_sits_on_positive_z() {
        let cam = OrbitCamera::default();
        assert!((cam.eye() - Vec3::new(0.0, 0.0, 5.0)).length() < 1e-5);
        let vp = cam.view_projection();
        assert!(!vp.col(0).x.is_nan());
    }

    #[test]
    fn viewport_sets_aspect_exactly() {
        let mut cam = OrbitCamera::default();
        let viewport = Viewport::new(1024, 768, 1.0);
        cam.set_viewport(&viewport);
        assert_eq!(cam.aspect, 1024.0 / 768.0);
    }

    #[test]
    fn repeated_viewport_application_is_idempotent() {
        let mut cam = OrbitCamera::default();
        let viewport = Viewport::new(800, 600, 2.0);
        cam.set_viewport(&viewport);
        let first = cam.projection_matrix();
        cam.set_viewport(&viewport);
        assert_eq!(cam.projection_matrix(), first);
    }

    #[test]
    fn latest_viewport_wins() {
        let mut cam = OrbitCamera::default();
        cam.set_viewport(&Viewport::new(640, 480, 1.0));
        cam.set_viewport(&Viewport::new(1920, 1080, 1.0));
        assert_eq!(cam.aspect, 1920.0 / 1080.0);
    }

    #[test]
    fn orbit_moves_the_eye() {
        let mut cam = OrbitCamera::default();
        cam.set_orbit(std::f32::consts::FRAC_PI_2, 0.0, 5.0);
        let eye = cam.eye();
        assert!((eye.x - 5.0).abs() < 1e-4);
        assert!(eye.z.abs() < 1e-4);
    }
}
