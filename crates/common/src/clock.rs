//! Tick clock utilities.
//!
//! The camera counts time in ticks. Each host update advances the clock
//! by the tick rate, so a game can keep a fixed 240 ticks per second clock
//! while updating at 60, 120 or 240 updates per second:
//! - `updates_per_second * tick_rate` is the number of ticks per second
//! - speeds and spring steps are scaled by `1 / updates_per_second`
//! - tick durations (fades, transitions) advance by `tick_rate` per update

use crate::error::{PixcamError, PixcamResult};

/// Durations expressed in ticks.
pub type TicksDuration = u32;

/// Highest accepted tick rate.
pub const MAX_TICK_RATE: u32 = 256;

/// Monotonic tick counter driven by host updates.
#[derive(Debug, Clone)]
pub struct TickClock {
    current_tick: u64,
    tick_rate: u32,
}

impl TickClock {
    /// Create a clock at tick zero advancing by `tick_rate` per update.
    pub fn new(tick_rate: u32) -> PixcamResult<Self> {
        let mut clock = Self {
            current_tick: 0,
            tick_rate: 1,
        };
        clock.set_rate(tick_rate)?;
        Ok(clock)
    }

    /// Current tick.
    pub fn now(&self) -> u64 {
        self.current_tick
    }

    /// Ticks advanced on each update.
    pub fn rate(&self) -> u32 {
        self.tick_rate
    }

    /// Change the tick rate. Must be within `[1, 256]`.
    pub fn set_rate(&mut self, tick_rate: u32) -> PixcamResult<()> {
        if !(1..=MAX_TICK_RATE).contains(&tick_rate) {
            return Err(PixcamError::invalid_parameter(format!(
                "tick rate must be within [1, {MAX_TICK_RATE}], got {tick_rate}"
            )));
        }
        self.tick_rate = tick_rate;
        Ok(())
    }

    /// Advance the clock by one update and return the new tick.
    pub fn advance(&mut self) -> u64 {
        self.current_tick += u64::from(self.tick_rate);
        self.current_tick
    }
}

impl Default for TickClock {
    fn default() -> Self {
        Self {
            current_tick: 0,
            tick_rate: 1,
        }
    }
}

/// Convert a duration in seconds to ticks at the given ticks per second,
/// never returning less than one tick.
pub fn secs_to_ticks(secs: f64, ticks_per_second: f64) -> TicksDuration {
    ((secs * ticks_per_second) as TicksDuration).max(1)
}
