//! Canned scene content. The sun-and-moon scene is the demo the binary
//! ships; tests use it as a known configuration.

use glam::Vec3;
use orrery_common::{BodyId, Color, Transform};

use crate::animate::{PositionTween, ScheduledAction, Spin};
use crate::scene::{AmbientLight, Material, Scene};

/// Fixed rotation applied to the sun each tick.
pub const SUN_SPIN_RADIANS_PER_TICK: f32 = 0.01;
/// One full moon crossing, left to right.
pub const MOON_TWEEN_SECONDS: f32 = 15.0;
/// Scene time at which the sun's base color shifts to red.
pub const SUN_COLOR_DELAY_SECONDS: f32 = 3.0;

const SUN_BASE: u32 = 0xfdb813;
const SUN_EMISSIVE: u32 = 0xffdd00;
const SUN_SHIFTED: u32 = 0xff0000;

/// Handles into the preset scene.
#[derive(Debug, Clone, Copy)]
pub struct SunMoonHandles {
    pub sun: BodyId,
    pub moon: BodyId,
}

/// Build the demo scene: a glowing sun spinning in place, a dark moon
/// tweening across it, dim ambient light, and a one-shot color shift on the
/// sun. Both bodies are tagged into the base and bloom passes.
pub fn sun_and_moon() -> (Scene, SunMoonHandles) {
    let mut scene = Scene::new();
    scene.set_ambient(AmbientLight {
        color: Color::WHITE,
        intensity: 0.1,
    });

    let sun = scene.spawn(
        Transform::at(Vec3::new(0.0, 2.0, -5.0), 1.0),
        Material::emissive(
            Color::from_srgb_hex(SUN_BASE),
            Color::from_srgb_hex(SUN_EMISSIVE),
            2.0,
        ),
    );
    let moon = scene.spawn(
        Transform::at(Vec3::new(-3.0, 1.0, 0.0), 0.52),
        Material::basic(Color::BLACK),
    );
    scene.passes_mut().tag_all(sun);
    scene.passes_mut().tag_all(moon);

    // Registration order is application order: spin before tween, as the
    // frame loop contract lists them.
    scene
        .add_spin(Spin::about_y(sun, SUN_SPIN_RADIANS_PER_TICK))
        .expect("sun exists");
    scene
        .add_tween(PositionTween::looping(
            moon,
            Vec3::new(-3.0, 1.0, 0.0),
            Vec3::new(3.0, 1.0, 0.0),
            MOON_TWEEN_SECONDS,
        ))
        .expect("moon exists");
    scene
        .arm_timer(
            SUN_COLOR_DELAY_SECONDS,
            ScheduledAction::SetBaseColor {
                body: sun,
                color: Color::from_srgb_hex(SUN_SHIFTED),
            },
        )
        .expect("sun exists");

    (scene, SunMoonHandles { sun, moon })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneEvent;

    #[test]
    fn preset_has_two_bodies_in_both_passes() {
        let (scene, handles) = sun_and_moon();
        assert_eq!(scene.body_count(), 2);
        for id in [handles.sun, handles.moon] {
            assert!(scene.passes().in_base(id));
            assert!(scene.passes().in_bloom(id));
        }
    }

    #[test]
    fn sun_angle_after_one_hundred_frames() {
        let (mut scene, handles) = sun_and_moon();
        for _ in 0..100 {
            scene.advance(1.0 / 60.0);
        }
        let (_, angle) = scene
            .body(handles.sun)
            .unwrap()
            .transform
            .rotation
            .to_axis_angle();
        assert!((angle - 100.0 * SUN_SPIN_RADIANS_PER_TICK).abs() < 1e-4);
    }

    #[test]
    fn moon_tracks_the_tween_curve() {
        let (mut scene, handles) = sun_and_moon();
        let dt = 1.0 / 60.0;
        for _ in 0..100 {
            scene.advance(dt);
        }
        let t = 100.0 * dt / MOON_TWEEN_SECONDS;
        let expected_x = -3.0 + 6.0 * crate::animate::Ease::default().sample(t);
        let pos = scene.body(handles.moon).unwrap().transform.position;
        assert!((pos.x - expected_x).abs() < 1e-4);
        assert_eq!(pos.y, 1.0);
        assert_eq!(pos.z, 0.0);
    }

    #[test]
    fn sun_shifts_red_exactly_once() {
        let (mut scene, handles) = sun_and_moon();
        let original = scene.body(handles.sun).unwrap().material.base_color;

        // A 64 Hz cadence keeps accumulated scene time exact in f32, so the
        // crossing tick is exact too: 3 s of 1/64 s frames is tick 192.
        let mut fired_at_tick = None;
        for frame in 0..3600u64 {
            scene.advance(1.0 / 64.0);
            if fired_at_tick.is_none()
                && scene
                    .events()
                    .iter()
                    .any(|e| matches!(e, SceneEvent::TimerFired { .. }))
            {
                fired_at_tick = Some(frame + 1);
            }
        }

        let fired: Vec<_> = scene
            .events()
            .iter()
            .filter(|e| matches!(e, SceneEvent::TimerFired { .. }))
            .collect();
        assert_eq!(fired.len(), 1);
        assert_eq!(fired_at_tick, Some(192));

        let shifted = scene.body(handles.sun).unwrap().material.base_color;
        assert_ne!(shifted, original);
        assert_eq!(shifted, Color::from_srgb_hex(0xff0000));
    }

    #[test]
    fn moon_returns_near_start_after_full_cycle() {
        let (mut scene, handles) = sun_and_moon();
        // One full 15 s cycle at 10 Hz plus one extra frame.
        for _ in 0..151 {
            scene.advance(0.1);
        }
        let pos = scene.body(handles.moon).unwrap().transform.position;
        assert!(pos.x < -2.5, "expected wrap to the left edge, got {}", pos.x);
    }
}
