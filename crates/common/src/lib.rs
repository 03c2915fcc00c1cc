//! Shared leaf types for the orrery demo: body identity, spatial transform,
//! and color.
//!
//! # Invariants
//! - Types here are plain values with no behavior tied to any subsystem.
//! - `Color` stores linear RGB; conversion from sRGB happens at construction.

pub mod types;

pub use types::{BodyId, Color, Transform};
