use pixcam_common::{ensure, Point2D, PixcamResult};

use crate::env::Environment;

/// Detects sustained constant-speed motion.
///
/// The follower engages once the tracked speed has stayed within a small
/// margin of the previous update's speed for the engage time, and
/// disengages once the camera has been (almost) still for the disengage
/// time. Speeds are compared in screens per second.
#[derive(Debug, Clone)]
pub struct Follower {
    engage_secs: f64,
    disengage_secs: f64,
    match_margin: f64,
    elapsed_match: f64,
    elapsed_halt: f64,
    engaged: bool,
}

impl Default for Follower {
    fn default() -> Self {
        Self {
            engage_secs: 1.0,
            disengage_secs: 0.5,
            match_margin: 0.05,
            elapsed_match: 0.0,
            elapsed_halt: 0.0,
            engaged: false,
        }
    }
}

impl Follower {
    /// Set the engage and disengage times in seconds. The engage time
    /// can't be shorter than the disengage time.
    pub fn set_times(&mut self, engage_secs: f64, disengage_secs: f64) -> PixcamResult<()> {
        ensure(
            disengage_secs >= 0.0,
            format!("disengage time can't be negative, got {disengage_secs}"),
        )?;
        ensure(
            engage_secs >= disengage_secs,
            format!("engage time ({engage_secs}) must be >= disengage time ({disengage_secs})"),
        )?;
        self.engage_secs = engage_secs;
        self.disengage_secs = disengage_secs;
        Ok(())
    }

    pub fn is_engaged(&self) -> bool {
        self.engaged
    }

    /// Feed this update's change and the previous update's change, both
    /// in logical pixels per update.
    pub fn update(&mut self, env: &Environment, change: Point2D, prev_change: Point2D) {
        let delta = env.update_delta();
        let (norm_width, norm_height) = env.zoomed_size();
        let speed_x = (change.x / delta).abs();
        let speed_y = (change.y / delta).abs();

        if speed_x / norm_width <= self.match_margin && speed_y / norm_height <= self.match_margin {
            self.elapsed_halt += delta;
        } else {
            self.elapsed_halt = 0.0;
        }
        let halted = self.elapsed_halt >= self.disengage_secs;

        if halted {
            self.elapsed_match = 0.0;
        } else if self.elapsed_match < self.engage_secs {
            let prev_speed_x = (prev_change.x / delta).abs();
            let prev_speed_y = (prev_change.y / delta).abs();
            let diff_x = (speed_x - prev_speed_x).abs() / norm_width;
            let diff_y = (speed_y - prev_speed_y).abs() / norm_height;
            if diff_x <= self.match_margin && diff_y <= self.match_margin {
                self.elapsed_match += delta;
            } else {
                self.elapsed_match = 0.0;
            }
        }

        self.engaged = !halted && self.elapsed_match >= self.engage_secs;
    }
}
