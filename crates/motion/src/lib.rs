//! Pixcam Motion Controllers
//!
//! Numerical building blocks driven by the camera on every update:
//! - **Trackers:** per-update camera displacement towards a target
//! - **Zoomers:** per-update zoom level change
//! - **Shakers:** screen shake offsets for a fade level
//! - **Spring:** closed-form damped oscillator shared by all three
//!
//! This crate is pure computation: resolution, zoom and update rate come
//! in through an explicit [`Environment`], and randomness through a
//! swappable [`RandomSource`](random::RandomSource).

pub mod env;
pub mod interp;
pub mod random;
pub mod shaker;
pub mod spring;
pub mod tracker;
pub mod zoomer;

pub use env::Environment;
pub use shaker::{build_shaker, BoxedShaker, Shaker};
pub use spring::Spring;
pub use tracker::{build_tracker, BoxedTracker, Tracker};
pub use zoomer::{build_zoomer, BoxedZoomer, Zoomer};
