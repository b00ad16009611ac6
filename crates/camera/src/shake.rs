//! Shake envelope: fade in, steady interval and fade out, in ticks.

use pixcam_common::TicksDuration;

/// Duration used by continuous shakes until `end` is called.
pub const INDEFINITE: TicksDuration = TicksDuration::MAX;

/// Tick-based fade envelope driving the shaker level.
///
/// `start` and `end` preserve the current activity, so a shake that is
/// restarted while fading out (or ended while fading in) resumes from
/// the level it had instead of jumping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShakeEnvelope {
    elapsed: TicksDuration,
    fade_in: TicksDuration,
    duration: TicksDuration,
    fade_out: TicksDuration,
}

impl ShakeEnvelope {
    /// Start a continuous shake reaching full strength after `fade_in` ticks.
    pub fn start(&mut self, fade_in: TicksDuration) {
        let activity = self.activity();
        self.fade_in = fade_in;
        self.duration = INDEFINITE;
        self.fade_out = 0;
        self.elapsed = (f64::from(fade_in) * activity) as TicksDuration;
    }

    /// Stop the current shake, fading out over `fade_out` ticks.
    pub fn end(&mut self, fade_out: TicksDuration) {
        let activity = self.activity();
        self.duration = self.elapsed.saturating_sub(self.fade_in);
        self.fade_out = fade_out;
        let skipped = (f64::from(fade_out) * (1.0 - activity)) as TicksDuration;
        self.elapsed = self
            .fade_in
            .saturating_add(self.duration)
            .saturating_add(skipped);
    }

    /// Start a shake with a fixed duration.
    pub fn trigger(&mut self, fade_in: TicksDuration, duration: TicksDuration, fade_out: TicksDuration) {
        self.start(fade_in);
        self.duration = duration;
        self.fade_out = fade_out;
    }

    pub fn is_shaking(&self) -> bool {
        u64::from(self.elapsed) < self.total()
    }

    /// Shake level in `[0, 1]`.
    pub fn activity(&self) -> f64 {
        if self.elapsed == 0 || !self.is_shaking() {
            return 0.0;
        }
        if self.elapsed < self.fade_in {
            return f64::from(self.elapsed) / f64::from(self.fade_in);
        }

        let mut elapsed = u64::from(self.elapsed - self.fade_in);
        if elapsed <= u64::from(self.duration) {
            return 1.0;
        }
        elapsed -= u64::from(self.duration);
        if elapsed >= u64::from(self.fade_out) {
            return 0.0;
        }
        1.0 - elapsed as f64 / f64::from(self.fade_out)
    }

    /// Advance the envelope by `ticks`.
    pub fn advance(&mut self, ticks: u32) {
        self.elapsed = self.elapsed.saturating_add(ticks);
    }

    pub fn elapsed(&self) -> TicksDuration {
        self.elapsed
    }

    /// Ticks left in the steady interval, `INDEFINITE` for continuous shakes.
    pub fn duration(&self) -> TicksDuration {
        self.duration
    }

    fn total(&self) -> u64 {
        u64::from(self.fade_in) + u64::from(self.duration) + u64::from(self.fade_out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(envelope: &mut ShakeEnvelope, ticks: usize) -> Vec<f64> {
        (0..ticks)
            .map(|_| {
                let level = envelope.activity();
                envelope.advance(1);
                level
            })
            .collect()
    }

    #[test]
    fn test_idle_envelope() {
        let envelope = ShakeEnvelope::default();
        assert!(!envelope.is_shaking());
        assert_eq!(envelope.activity(), 0.0);
    }

    #[test]
    fn test_fade_in_is_linear() {
        let mut envelope = ShakeEnvelope::default();
        envelope.start(30);
        let levels = run(&mut envelope, 40);
        for (tick, level) in levels.iter().enumerate().take(31) {
            assert!((level - tick as f64 / 30.0).abs() < 1e-12, "tick {tick}: {level}");
        }
        assert!(levels[31..].iter().all(|&level| level == 1.0));
        assert!(envelope.is_shaking());
    }

    #[test]
    fn test_trigger_runs_full_envelope() {
        let mut envelope = ShakeEnvelope::default();
        envelope.trigger(4, 10, 5);
        let levels = run(&mut envelope, 25);
        assert_eq!(levels[0], 0.0);
        assert_eq!(levels[2], 0.5);
        assert_eq!(levels[4], 1.0);
        assert_eq!(levels[14], 1.0);
        assert!((levels[16] - 0.6).abs() < 1e-12);
        assert_eq!(levels[19], 0.0);
        assert!(!envelope.is_shaking());
        assert_eq!(envelope.activity(), 0.0);
    }

    #[test]
    fn test_end_preserves_activity() {
        let mut envelope = ShakeEnvelope::default();
        envelope.start(10);
        run(&mut envelope, 5);
        assert_eq!(envelope.activity(), 0.5);

        envelope.end(20);
        assert_eq!(envelope.activity(), 0.5);
        let levels = run(&mut envelope, 12);
        assert!(levels.windows(2).all(|pair| pair[1] <= pair[0]));
        assert!(!envelope.is_shaking());
    }

    #[test]
    fn test_restart_while_fading_out() {
        let mut envelope = ShakeEnvelope::default();
        envelope.start(0);
        run(&mut envelope, 3);
        envelope.end(8);
        run(&mut envelope, 2);
        assert_eq!(envelope.activity(), 0.75);

        envelope.start(8);
        assert_eq!(envelope.activity(), 0.75);
        assert_eq!(envelope.duration(), INDEFINITE);
    }

    #[test]
    fn test_end_without_shake_stays_idle() {
        let mut envelope = ShakeEnvelope::default();
        envelope.end(30);
        assert!(!envelope.is_shaking());
        assert_eq!(envelope.activity(), 0.0);
    }

    #[test]
    fn test_advance_saturates() {
        let mut envelope = ShakeEnvelope::default();
        envelope.start(0);
        envelope.advance(u32::MAX);
        envelope.advance(5);
        assert_eq!(envelope.elapsed(), u32::MAX);
        assert!(!envelope.is_shaking());
    }
}
