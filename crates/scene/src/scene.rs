use std::collections::BTreeMap;

use orrery_common::{BodyId, Color, Transform};

use crate::animate::{OneShot, PositionTween, ScheduledAction, Spin, Track};
use crate::passes::PassMembership;

/// Surface appearance of a body.
///
/// The shading model is `base_color * ambient + emissive *
/// emissive_intensity`. A basic material has no emissive term and therefore
/// never contributes to bloom on its own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub base_color: Color,
    pub emissive: Color,
    pub emissive_intensity: f32,
}

impl Material {
    /// Unlit flat color.
    pub fn basic(base_color: Color) -> Self {
        Self {
            base_color,
            emissive: Color::BLACK,
            emissive_intensity: 0.0,
        }
    }

    /// Color plus a self-illumination term that survives the bloom threshold.
    pub fn emissive(base_color: Color, emissive: Color, emissive_intensity: f32) -> Self {
        Self {
            base_color,
            emissive,
            emissive_intensity,
        }
    }
}

/// Scene-wide ambient illumination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    pub color: Color,
    pub intensity: f32,
}

impl Default for AmbientLight {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            intensity: 1.0,
        }
    }
}

/// A renderable body: transform plus material. Mesh shape is implicit
/// (the renderer draws every body as a unit sphere scaled by the transform).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub transform: Transform,
    pub material: Material,
}

/// An event record produced by discrete scene happenings.
///
/// Continuous per-tick mutation (tracks) is not logged; the log stays
/// bounded over an arbitrarily long run.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneEvent {
    /// Body was added to the scene.
    BodySpawned { id: BodyId },
    /// Body was removed from the scene.
    BodyRemoved { id: BodyId },
    /// A one-shot timer fired. Carries the index returned by `arm_timer`.
    TimerFired { timer: usize },
}

/// Errors from scene operations.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("body {0:?} not found")]
    UnknownBody(BodyId),
}

/// The scene context: every subsystem handle the frame loop touches, owned
/// in one place instead of process-wide singletons.
///
/// All animated state flows through `advance`, which applies tracks in
/// registration order and then fires due one-shot timers. The host run loop
/// calls `advance` once per frame and renders afterwards, so a render never
/// observes a half-applied tick. `advance` needs no display and no clock of
/// its own, which is what makes the loop unit-testable.
#[derive(Debug, Default)]
pub struct Scene {
    bodies: BTreeMap<BodyId, Body>,
    ambient: AmbientLight,
    passes: PassMembership,
    tracks: Vec<Track>,
    timers: Vec<OneShot>,
    tick: u64,
    time: f32,
    event_log: Vec<SceneEvent>,
}

impl Scene {
    /// Create an empty scene at tick 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of completed `advance` calls.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Accumulated scene time in seconds. Monotone; timers compare against
    /// this, never against a wall clock.
    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Read-only access to all bodies (BTreeMap for deterministic iteration).
    pub fn bodies(&self) -> &BTreeMap<BodyId, Body> {
        &self.bodies
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(&id)
    }

    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.get_mut(&id)
    }

    pub fn ambient(&self) -> AmbientLight {
        self.ambient
    }

    pub fn set_ambient(&mut self, light: AmbientLight) {
        self.ambient = light;
    }

    /// Per-pass body membership consumed by the renderer.
    pub fn passes(&self) -> &PassMembership {
        &self.passes
    }

    pub fn passes_mut(&mut self) -> &mut PassMembership {
        &mut self.passes
    }

    /// Armed timers, in arming order.
    pub fn timers(&self) -> &[OneShot] {
        &self.timers
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.event_log)
    }

    /// Read-only access to the event log.
    pub fn events(&self) -> &[SceneEvent] {
        &self.event_log
    }

    /// Add a body to the scene. Returns its id. The body belongs to no
    /// render pass until tagged via `passes_mut`.
    pub fn spawn(&mut self, transform: Transform, material: Material) -> BodyId {
        let id = BodyId::new();
        self.bodies.insert(
            id,
            Body {
                transform,
                material,
            },
        );
        self.event_log.push(SceneEvent::BodySpawned { id });
        id
    }

    /// Remove a body and its pass membership. Tracks and timers that named
    /// the body become no-ops. Returns the body if it existed.
    pub fn remove(&mut self, id: BodyId) -> Option<Body> {
        let removed = self.bodies.remove(&id);
        if removed.is_some() {
            self.passes.untag(id);
            self.event_log.push(SceneEvent::BodyRemoved { id });
        }
        removed
    }

    /// Register a constant-rate spin track for a body. The rotation advances
    /// a fixed angle per tick, matching a per-frame increment rather than a
    /// per-second rate.
    pub fn add_spin(&mut self, spin: Spin) -> Result<(), SceneError> {
        if !self.bodies.contains_key(&spin.body()) {
            return Err(SceneError::UnknownBody(spin.body()));
        }
        self.tracks.push(Track::Spin(spin));
        Ok(())
    }

    /// Register an eased position tween for a body, advanced on scene time.
    pub fn add_tween(&mut self, tween: PositionTween) -> Result<(), SceneError> {
        if !self.bodies.contains_key(&tween.body()) {
            return Err(SceneError::UnknownBody(tween.body()));
        }
        self.tracks.push(Track::Position(tween));
        Ok(())
    }

    /// Arm a one-shot timer that fires on the first `advance` at or past
    /// `delay_seconds` of scene time, then never again. Returns the timer's
    /// index, echoed by the `TimerFired` event.
    pub fn arm_timer(
        &mut self,
        delay_seconds: f32,
        action: ScheduledAction,
    ) -> Result<usize, SceneError> {
        let target = action.body();
        if !self.bodies.contains_key(&target) {
            return Err(SceneError::UnknownBody(target));
        }
        self.timers.push(OneShot::new(delay_seconds, action));
        Ok(self.timers.len() - 1)
    }

    /// Advance the scene by one tick.
    ///
    /// Order within a tick: tracks in registration order, then due timers.
    /// Spin tracks consume the tick itself (fixed increment per call);
    /// position tweens and timers consume `dt` (accumulated scene time).
    /// Negative `dt` is treated as zero so scene time stays monotone.
    pub fn advance(&mut self, dt: f32) {
        let dt = dt.max(0.0);
        self.tick += 1;
        self.time += dt;

        for track in &mut self.tracks {
            track.apply(&mut self.bodies, dt);
        }

        for (index, timer) in self.timers.iter_mut().enumerate() {
            if timer.due(self.time) {
                timer.fire(&mut self.bodies);
                self.event_log.push(SceneEvent::TimerFired { timer: index });
                tracing::debug!(timer = index, "one-shot timer fired");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animate::Ease;
    use glam::Vec3;

    fn gray() -> Material {
        Material::basic(Color::new(0.5, 0.5, 0.5))
    }

    #[test]
    fn scene_starts_empty() {
        let s = Scene::new();
        assert_eq!(s.tick(), 0);
        assert_eq!(s.time(), 0.0);
        assert_eq!(s.body_count(), 0);
    }

    #[test]
    fn spawn_and_remove() {
        let mut s = Scene::new();
        let id = s.spawn(Transform::default(), gray());
        assert_eq!(s.body_count(), 1);
        assert!(s.body(id).is_some());

        let body = s.remove(id);
        assert!(body.is_some());
        assert_eq!(s.body_count(), 0);
        assert_eq!(s.events().len(), 2);
    }

    #[test]
    fn remove_clears_pass_membership() {
        let mut s = Scene::new();
        let id = s.spawn(Transform::default(), gray());
        s.passes_mut().tag_all(id);
        assert!(s.remove(id).is_some());
        assert!(!s.passes().in_base(id));
        assert!(!s.passes().in_bloom(id));
    }

    #[test]
    fn advance_increments_tick_exactly_once_per_call() {
        let mut s = Scene::new();
        for _ in 0..7 {
            s.advance(1.0 / 60.0);
        }
        assert_eq!(s.tick(), 7);
    }

    #[test]
    fn advance_is_cadence_independent() {
        // Irregular and zero-length frames still count one tick each.
        let mut s = Scene::new();
        for dt in [0.016, 0.200, 0.0, 0.033, 1.5] {
            s.advance(dt);
        }
        assert_eq!(s.tick(), 5);
        assert!((s.time() - 1.749).abs() < 1e-5);
    }

    #[test]
    fn negative_dt_does_not_rewind_time() {
        let mut s = Scene::new();
        s.advance(0.5);
        s.advance(-1.0);
        assert_eq!(s.time(), 0.5);
        assert_eq!(s.tick(), 2);
    }

    #[test]
    fn spin_accumulates_fixed_increment_per_tick() {
        let mut s = Scene::new();
        let id = s.spawn(Transform::default(), gray());
        s.add_spin(Spin::about_y(id, 0.01)).unwrap();

        for _ in 0..100 {
            s.advance(0.016);
        }

        let rotation = s.body(id).unwrap().transform.rotation;
        let (axis, angle) = rotation.to_axis_angle();
        assert!((angle - 1.0).abs() < 1e-4);
        assert!((axis - Vec3::Y).length() < 1e-4);
    }

    #[test]
    fn spin_ignores_dt() {
        // The spin is a per-frame increment, not a per-second rate: the
        // same tick count yields the same angle at any cadence.
        let mut fast = Scene::new();
        let mut slow = Scene::new();
        let a = fast.spawn(Transform::default(), gray());
        let b = slow.spawn(Transform::default(), gray());
        fast.add_spin(Spin::about_y(a, 0.01)).unwrap();
        slow.add_spin(Spin::about_y(b, 0.01)).unwrap();

        for _ in 0..50 {
            fast.advance(0.001);
            slow.advance(0.1);
        }
        assert_eq!(
            fast.body(a).unwrap().transform.rotation,
            slow.body(b).unwrap().transform.rotation
        );
    }

    #[test]
    fn tween_follows_ease_curve_not_per_tick_steps() {
        let mut s = Scene::new();
        let id = s.spawn(Transform::at(Vec3::new(-3.0, 1.0, 0.0), 0.52), gray());
        s.add_tween(PositionTween::looping(
            id,
            Vec3::new(-3.0, 1.0, 0.0),
            Vec3::new(3.0, 1.0, 0.0),
            15.0,
        ))
        .unwrap();

        for _ in 0..100 {
            s.advance(0.016);
        }

        let t = (100.0 * 0.016) / 15.0_f32;
        let expected_x = -3.0 + 6.0 * Ease::default().sample(t);
        let pos = s.body(id).unwrap().transform.position;
        assert!((pos.x - expected_x).abs() < 1e-4);
        assert_eq!(pos.y, 1.0);
    }

    #[test]
    fn tween_loops_back_to_start() {
        let mut s = Scene::new();
        let id = s.spawn(Transform::default(), gray());
        s.add_tween(PositionTween::looping(
            id,
            Vec3::new(-3.0, 0.0, 0.0),
            Vec3::new(3.0, 0.0, 0.0),
            2.0,
        ))
        .unwrap();

        // 2.5 s into a 2 s loop sits half a second into the second cycle.
        for _ in 0..25 {
            s.advance(0.1);
        }
        let expected_x = -3.0 + 6.0 * Ease::default().sample(0.5 / 2.0);
        let pos = s.body(id).unwrap().transform.position;
        assert!((pos.x - expected_x).abs() < 1e-4);
    }

    #[test]
    fn track_on_unknown_body_is_rejected() {
        let mut s = Scene::new();
        let ghost = BodyId::new();
        assert!(matches!(
            s.add_spin(Spin::about_y(ghost, 0.01)),
            Err(SceneError::UnknownBody(_))
        ));
    }

    #[test]
    fn timer_fires_exactly_once() {
        let mut s = Scene::new();
        let id = s.spawn(Transform::default(), gray());
        s.arm_timer(
            0.3,
            ScheduledAction::SetBaseColor {
                body: id,
                color: Color::new(1.0, 0.0, 0.0),
            },
        )
        .unwrap();

        for _ in 0..100 {
            s.advance(0.1);
        }

        let fired: Vec<_> = s
            .events()
            .iter()
            .filter(|e| matches!(e, SceneEvent::TimerFired { .. }))
            .collect();
        assert_eq!(fired.len(), 1);
        assert!(s.timers()[0].has_fired());
    }

    #[test]
    fn timer_mutation_visible_at_the_firing_tick() {
        let mut s = Scene::new();
        let original = Color::new(0.9, 0.7, 0.1);
        let shifted = Color::new(1.0, 0.0, 0.0);
        let id = s.spawn(Transform::default(), Material::basic(original));
        s.arm_timer(
            0.25,
            ScheduledAction::SetBaseColor {
                body: id,
                color: shifted,
            },
        )
        .unwrap();

        // Strictly before the delay: original color.
        s.advance(0.1);
        s.advance(0.1);
        assert_eq!(s.body(id).unwrap().material.base_color, original);

        // The advance that reaches the delay applies the change before
        // returning, so the very next render sees it.
        s.advance(0.1);
        assert_eq!(s.body(id).unwrap().material.base_color, shifted);
    }

    #[test]
    fn timer_on_unknown_body_is_rejected() {
        let mut s = Scene::new();
        let ghost = BodyId::new();
        let result = s.arm_timer(
            1.0,
            ScheduledAction::SetBaseColor {
                body: ghost,
                color: Color::BLACK,
            },
        );
        assert!(matches!(result, Err(SceneError::UnknownBody(_))));
    }

    #[test]
    fn drain_events_clears_log() {
        let mut s = Scene::new();
        s.spawn(Transform::default(), gray());
        let events = s.drain_events();
        assert_eq!(events.len(), 1);
        assert!(s.events().is_empty());
    }

    #[test]
    fn btreemap_gives_deterministic_iteration() {
        let mut s = Scene::new();
        for _ in 0..50 {
            s.spawn(Transform::default(), gray());
        }
        let keys: Vec<BodyId> = s.bodies().keys().copied().collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }
}
