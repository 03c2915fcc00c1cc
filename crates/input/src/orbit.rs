use glam::Vec3;

/// Damped orbit-drag camera controller.
///
/// Pointer drags and wheel ticks move a *target* orbit; `update` eases the
/// current orbit toward it by a fixed fraction per frame, smoothing input
/// over several frames instead of applying it instantaneously. Orbit motion
/// is not part of the deterministic scene tick.
#[derive(Debug, Clone)]
pub struct OrbitController {
    yaw: f32,
    pitch: f32,
    distance: f32,
    target_yaw: f32,
    target_pitch: f32,
    target_distance: f32,
    /// Fraction of the remaining gap closed per `update`.
    damping: f32,
    rotate_sensitivity: f32,
    zoom_sensitivity: f32,
    min_distance: f32,
    max_distance: f32,
}

impl Default for OrbitController {
    fn default() -> Self {
        let distance = 5.0;
        Self {
            yaw: 0.0,
            pitch: 0.0,
            distance,
            target_yaw: 0.0,
            target_pitch: 0.0,
            target_distance: distance,
            damping: 0.05,
            rotate_sensitivity: 0.005,
            zoom_sensitivity: 0.5,
            min_distance: 1.0,
            max_distance: 100.0,
        }
    }
}

const PITCH_LIMIT: f32 = 1.55; // just shy of straight up/down

impl OrbitController {
    pub fn new(distance: f32) -> Self {
        Self {
            distance,
            target_distance: distance,
            ..Self::default()
        }
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Accumulate a pointer drag in pixels. Only the target moves here.
    pub fn apply_drag(&mut self, dx: f32, dy: f32) {
        self.target_yaw -= dx * self.rotate_sensitivity;
        self.target_pitch =
            (self.target_pitch + dy * self.rotate_sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        tracing::trace!(
            yaw = self.target_yaw,
            pitch = self.target_pitch,
            "orbit drag"
        );
    }

    /// Accumulate a wheel tick. Positive scroll moves the camera closer.
    pub fn apply_zoom(&mut self, scroll: f32) {
        self.target_distance =
            (self.target_distance - scroll * self.zoom_sensitivity)
                .clamp(self.min_distance, self.max_distance);
    }

    /// Advance the damped state one step. Called once per frame; a no-op
    /// when no input is pending.
    pub fn update(&mut self) {
        self.yaw += (self.target_yaw - self.yaw) * self.damping;
        self.pitch += (self.target_pitch - self.pitch) * self.damping;
        self.distance += (self.target_distance - self.distance) * self.damping;
    }

    /// Camera position for the current orbit around `center`.
    pub fn eye(&self, center: Vec3) -> Vec3 {
        let dir = Vec3::new(
            self.pitch.cos() * self.yaw.sin(),
            self.pitch.sin(),
            self.pitch.cos() * self.yaw.cos(),
        );
        center + dir * self.distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_orbit_looks_down_z() {
        let c = OrbitController::default();
        let eye = c.eye(Vec3::ZERO);
        assert!((eye - Vec3::new(0.0, 0.0, 5.0)).length() < 1e-5);
    }

    #[test]
    fn update_without_input_is_a_noop() {
        let mut c = OrbitController::default();
        let before = (c.yaw(), c.pitch(), c.distance());
        for _ in 0..10 {
            c.update();
        }
        assert_eq!(before, (c.yaw(), c.pitch(), c.distance()));
    }

    #[test]
    fn drag_is_smoothed_over_frames() {
        let mut c = OrbitController::default();
        c.apply_drag(100.0, 0.0);
        c.update();
        let after_one = c.yaw();
        // One step covers only the damping fraction of the gap.
        assert!(after_one.abs() > 0.0);
        assert!(after_one.abs() < (100.0 * 0.005) * 0.5);

        for _ in 0..500 {
            c.update();
        }
        assert!((c.yaw() - -0.5).abs() < 1e-3);
    }

    #[test]
    fn pitch_is_clamped_short_of_the_poles() {
        let mut c = OrbitController::default();
        c.apply_drag(0.0, 1e6);
        for _ in 0..2000 {
            c.update();
        }
        assert!(c.pitch() <= PITCH_LIMIT + 1e-6);
        // The eye never flips over the top.
        let eye = c.eye(Vec3::ZERO);
        assert!(eye.y < c.distance());
    }

    #[test]
    fn zoom_respects_distance_bounds() {
        let mut c = OrbitController::default();
        c.apply_zoom(1e6);
        for _ in 0..2000 {
            c.update();
        }
        assert!(c.distance() >= 1.0 - 1e-4);

        c.apply_zoom(-1e9);
        for _ in 0..5000 {
            c.update();
        }
        assert!(c.distance() <= 100.0 + 1e-3);
    }
}
