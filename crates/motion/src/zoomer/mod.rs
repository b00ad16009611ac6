//! Zoom level controllers.
//!
//! A zoomer receives the current and target zoom levels and returns the
//! zoom change for a single update. `reset` is called when the camera
//! jumps to a zoom level instantly, so any in-flight motion is dropped.
//!
//! Avoid driving cameras to very low zoom levels (around 0.1 and below):
//! overshoot from bouncy zoomers becomes proportionally huge there. The
//! camera keeps zooms within `[0.005, 500]`: overshooting an edge target
//! lands on the edge and calls `reset`, anything else leaving the band
//! is an error.

mod constant;
mod linear;
mod quadratic;
mod spring;

pub use constant::Constant;
pub use linear::{RoughLinear, SmoothLinear};
pub use quadratic::Quadratic;
pub use spring::SpringZoomer;

use pixcam_common::ZoomerKind;

use crate::env::Environment;

/// Computes the per-update zoom change.
pub trait Zoomer {
    /// Re-anchor internal state at `current_zoom`.
    fn reset(&mut self, current_zoom: f64);

    fn update(&mut self, env: &Environment, current: f64, target: f64) -> f64;
}

/// Owned zoomer as stored by the camera.
pub type BoxedZoomer = Box<dyn Zoomer>;

/// Build a zoomer with default parameters for the given kind.
pub fn build_zoomer(kind: ZoomerKind) -> BoxedZoomer {
    tracing::debug!(?kind, "Building default zoomer");
    match kind {
        ZoomerKind::Constant => Box::new(Constant::default()),
        ZoomerKind::Quadratic => Box::new(Quadratic::default()),
        ZoomerKind::SmoothLinear => Box::new(SmoothLinear::default()),
        ZoomerKind::RoughLinear => Box::new(RoughLinear::default()),
        ZoomerKind::Spring => Box::new(SpringZoomer::default()),
    }
}
