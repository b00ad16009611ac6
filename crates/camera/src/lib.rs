//! Pixcam Camera Controller
//!
//! Drives a logical (low-resolution) viewport over a game world:
//! - **Tracking:** smoothly follows a target position
//! - **Zoom:** animated transitions between zoom levels
//! - **Shake:** tick-based fade envelope feeding a shaker
//! - **Projection:** draw plans and view-culled high-resolution placements
//! - **Redraws:** optional dirty tracking so static frames skip projection
//!
//! Strategies come from `pixcam-motion`; the renderer, window and game
//! loop belong to the host.

pub mod controller;
pub mod convert;
pub mod projection;
mod redraw;
pub mod shake;

pub use controller::{Camera, Phase, MAX_COORDINATE, MAX_ZOOM, MIN_ZOOM};
pub use convert::Margins;
pub use projection::{DrawPlan, Placement, Quad};
pub use shake::ShakeEnvelope;
