//! Scene kernel: the explicit context object owning all animated state,
//! advanced one tick at a time by the host run loop.
//!
//! # Invariants
//! - `Scene::advance` is the only writer of body transforms and the only
//!   path through which timers mutate materials.
//! - Tracks apply in registration order, then due timers fire; all mutation
//!   for a tick completes before the caller renders.
//! - Body iteration order is deterministic (BTreeMap).

pub mod animate;
pub mod passes;
pub mod presets;
pub mod scene;

pub use animate::{Ease, OneShot, PositionTween, ScheduledAction, Spin, Track};
pub use passes::PassMembership;
pub use scene::{AmbientLight, Body, Material, Scene, SceneError, SceneEvent};
