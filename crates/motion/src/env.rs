//! Read-only view of the camera environment passed to every controller.
//!
//! Trackers, zoomers and shakers express their speeds relative to the
//! logical resolution and scale them by the update delta, so they need the
//! resolution, the current zoom and the update rate on every step. The
//! camera builds a fresh `Environment` for each step of a flush.

/// Resolution, zoom and update-rate snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Environment {
    /// Logical resolution width, in pixels.
    pub logical_width: u32,
    /// Logical resolution height, in pixels.
    pub logical_height: u32,
    /// Current zoom level (> 0).
    pub zoom: f64,
    /// Host updates per second (> 0).
    pub updates_per_second: u32,
    /// Ticks advanced per update, in `[1, 256]`.
    pub ticks_per_update: u32,
}

impl Environment {
    /// Environment at zoom 1.0, 60 updates per second and one tick per update.
    pub fn new(logical_width: u32, logical_height: u32) -> Self {
        Self {
            logical_width,
            logical_height,
            zoom: 1.0,
            updates_per_second: 60,
            ticks_per_update: 1,
        }
    }

    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = zoom;
        self
    }

    pub fn with_updates_per_second(mut self, updates_per_second: u32) -> Self {
        self.updates_per_second = updates_per_second;
        self
    }

    pub fn with_ticks_per_update(mut self, ticks_per_update: u32) -> Self {
        self.ticks_per_update = ticks_per_update;
        self
    }

    /// Seconds elapsed per update.
    pub fn update_delta(&self) -> f64 {
        1.0 / f64::from(self.updates_per_second)
    }

    /// Ticks per second of simulated time.
    pub fn ticks_per_second(&self) -> f64 {
        f64::from(self.updates_per_second) * f64::from(self.ticks_per_update)
    }

    pub fn width(&self) -> f64 {
        f64::from(self.logical_width)
    }

    pub fn height(&self) -> f64 {
        f64::from(self.logical_height)
    }

    /// Length of the shorter resolution axis.
    pub fn shortest_axis(&self) -> f64 {
        f64::from(self.logical_width.min(self.logical_height))
    }

    /// Width and height of the visible area at the current zoom.
    pub fn zoomed_size(&self) -> (f64, f64) {
        (self.width() / self.zoom, self.height() / self.zoom)
    }

    /// Zoom blended towards 1.0, where `compensation` 0 means no zoom
    /// influence and 1 means full influence.
    pub fn compensated_zoom(&self, compensation: f64) -> f64 {
        1.0 + (self.zoom - 1.0) * compensation
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new(320, 180)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_helpers() {
        let env = Environment::new(320, 180)
            .with_zoom(2.0)
            .with_updates_per_second(120)
            .with_ticks_per_update(2);
        assert!((env.update_delta() - 1.0 / 120.0).abs() < 1e-15);
        assert_eq!(env.ticks_per_second(), 240.0);
        assert_eq!(env.shortest_axis(), 180.0);
        assert_eq!(env.zoomed_size(), (160.0, 90.0));
        assert_eq!(env.compensated_zoom(0.0), 1.0);
        assert_eq!(env.compensated_zoom(0.5), 1.5);
    }
}
