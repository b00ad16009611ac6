//! Pixcam Common Utilities
//!
//! Shared infrastructure for all pixcam crates:
//! - Error types and result aliases
//! - Tick clock and tick durations
//! - Geometry primitives (points, integer and exact areas)
//! - Tracing/logging initialization
//! - Configuration loading

pub mod clock;
pub mod config;
pub mod error;
pub mod geometry;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;
pub use geometry::*;
