//! Rendering interface: renderer-agnostic types and the renderer trait.
//!
//! # Invariants
//! - Renderers read scene state; they never mutate it.
//! - A `Viewport` is a value: every consumer updated from the same value
//!   observes the same width, height, and pixel ratio.

mod renderer;
mod viewport;

pub use renderer::{DebugTextRenderer, RenderView, SceneRenderer};
pub use viewport::{BloomSettings, Viewport};
