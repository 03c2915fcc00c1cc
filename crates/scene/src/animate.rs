use std::collections::BTreeMap;

use glam::{Quat, Vec3};
use orrery_common::{BodyId, Color};

use crate::scene::Body;

/// Interpolation curve for position tweens. `QuadOut` is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ease {
    Linear,
    #[default]
    QuadOut,
    QuadInOut,
}

impl Ease {
    /// Map a normalized phase in [0, 1] through the curve. Out-of-range
    /// input is clamped.
    pub fn sample(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::QuadOut => t * (2.0 - t),
            Self::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u / 2.0
                }
            }
        }
    }
}

/// Constant-rate rotation about a fixed axis.
///
/// Advances a fixed angle per tick. The angle accumulates without explicit
/// wraparound; the quaternion representation wraps it implicitly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spin {
    body: BodyId,
    axis: Vec3,
    radians_per_tick: f32,
    angle: f32,
}

impl Spin {
    pub fn new(body: BodyId, axis: Vec3, radians_per_tick: f32) -> Self {
        Self {
            body,
            axis: axis.normalize_or_zero(),
            radians_per_tick,
            angle: 0.0,
        }
    }

    /// Spin about the world Y axis, the common case for planetary bodies.
    pub fn about_y(body: BodyId, radians_per_tick: f32) -> Self {
        Self::new(body, Vec3::Y, radians_per_tick)
    }

    pub fn body(&self) -> BodyId {
        self.body
    }

    /// Accumulated rotation angle in radians.
    pub fn angle(&self) -> f32 {
        self.angle
    }

    fn apply(&mut self, bodies: &mut BTreeMap<BodyId, Body>) {
        self.angle += self.radians_per_tick;
        if let Some(body) = bodies.get_mut(&self.body) {
            body.transform.rotation = Quat::from_axis_angle(self.axis, self.angle);
        }
    }
}

/// Eased interpolation of a body's position between two points, advanced on
/// scene time. A looping tween restarts from `from` each cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionTween {
    body: BodyId,
    from: Vec3,
    to: Vec3,
    duration: f32,
    ease: Ease,
    looping: bool,
    elapsed: f32,
}

impl PositionTween {
    /// One-shot tween; holds at `to` once the duration elapses.
    /// Durations are clamped to a small positive minimum.
    pub fn new(body: BodyId, from: Vec3, to: Vec3, duration_seconds: f32) -> Self {
        Self {
            body,
            from,
            to,
            duration: duration_seconds.max(1e-6),
            ease: Ease::default(),
            looping: false,
            elapsed: 0.0,
        }
    }

    /// Tween that repeats forever, restarting from `from` each cycle.
    pub fn looping(body: BodyId, from: Vec3, to: Vec3, duration_seconds: f32) -> Self {
        Self {
            looping: true,
            ..Self::new(body, from, to, duration_seconds)
        }
    }

    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn body(&self) -> BodyId {
        self.body
    }

    fn apply(&mut self, bodies: &mut BTreeMap<BodyId, Body>, dt: f32) {
        self.elapsed += dt;
        let phase = if self.looping {
            self.elapsed.rem_euclid(self.duration)
        } else {
            self.elapsed.min(self.duration)
        };
        let t = self.ease.sample(phase / self.duration);
        if let Some(body) = bodies.get_mut(&self.body) {
            body.transform.position = self.from.lerp(self.to, t);
        }
    }
}

/// An animation track registered with the scene and advanced by its tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Track {
    Spin(Spin),
    Position(PositionTween),
}

impl Track {
    pub(crate) fn apply(&mut self, bodies: &mut BTreeMap<BodyId, Body>, dt: f32) {
        match self {
            Self::Spin(spin) => spin.apply(bodies),
            Self::Position(tween) => tween.apply(bodies, dt),
        }
    }
}

/// Deferred mutation applied when a one-shot timer fires.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScheduledAction {
    /// Replace a material's base color.
    SetBaseColor { body: BodyId, color: Color },
}

impl ScheduledAction {
    /// The body this action targets.
    pub fn body(&self) -> BodyId {
        match self {
            Self::SetBaseColor { body, .. } => *body,
        }
    }

    fn apply(&self, bodies: &mut BTreeMap<BodyId, Body>) {
        match self {
            Self::SetBaseColor { body, color } => {
                if let Some(body) = bodies.get_mut(body) {
                    body.material.base_color = *color;
                }
            }
        }
    }
}

/// A timer armed once, firing on the first tick whose accumulated scene time
/// reaches the delay, and never re-arming.
///
/// Firing happens inside `Scene::advance`, so the mutation is always visible
/// to the very next render. The comparison is against scene time, not a wall
/// clock: under host throttling the timer fires late, never twice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OneShot {
    delay: f32,
    action: ScheduledAction,
    fired: bool,
}

impl OneShot {
    pub(crate) fn new(delay: f32, action: ScheduledAction) -> Self {
        Self {
            delay,
            action,
            fired: false,
        }
    }

    pub fn delay(&self) -> f32 {
        self.delay
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }

    pub(crate) fn due(&self, now: f32) -> bool {
        !self.fired && now >= self.delay
    }

    pub(crate) fn fire(&mut self, bodies: &mut BTreeMap<BodyId, Body>) {
        self.fired = true;
        self.action.apply(bodies);
    }
}
