//! Pointer input mapped to damped camera orbit state.
//!
//! # Invariants
//! - Raw input only accumulates targets; the orbit state moves during
//!   `update`, called exactly once per frame by the run loop.
//! - `update` with no pending input leaves the state unchanged.

pub mod orbit;

pub use orbit::OrbitController;
