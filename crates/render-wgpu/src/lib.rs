//! wgpu render backend for the orrery demo.
//!
//! Draws scene bodies as instanced spheres through a composed pipeline:
//! a base color pass, a glow pass restricted to bloom-tagged bodies, a
//! bright-extract, a separable blur, and an additive composite to the
//! surface.
//!
//! # Invariants
//! - The renderer never mutates scene state.
//! - One composed render per `BloomComposer::render` call, one queue submit.
//! - `resize` updates every internal target from a single `Viewport`
//!   snapshot before returning; no pass ever runs against mixed sizes.

mod camera;
mod composer;
mod mesh;
mod shaders;

pub use camera::OrbitCamera;
pub use composer::BloomComposer;
