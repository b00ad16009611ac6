use pixcam_common::Point2D;

use super::{within, Tracker};
use crate::env::Environment;
use crate::interp::{lerp, t_at};

/// Distance-proportional tracking with fixed tuning.
///
/// The advance per update grows linearly with the remaining distance up
/// to two zoomed screens, where it reaches six zoomed screens per second.
/// A small minimum advance keeps the camera from crawling forever.
#[derive(Debug, Clone, Copy, Default)]
pub struct Linear;

impl Tracker for Linear {
    fn update(&mut self, env: &Environment, current: Point2D, target: Point2D, _: Point2D) -> Point2D {
        if within(current, target, 0.001) {
            return target - current;
        }

        let (zoomed_width, zoomed_height) = env.zoomed_size();
        let delta = env.update_delta();
        let min_advance = 0.01 * delta;

        let x = advance_component(
            current.x,
            target.x,
            min_advance,
            6.0 * env.zoom * zoomed_width * delta,
            2.0 * zoomed_width,
        );
        let y = advance_component(
            current.y,
            target.y,
            min_advance,
            6.0 * env.zoom * zoomed_height * delta,
            2.0 * zoomed_height,
        );
        Point2D::new(x, y)
    }
}

fn advance_component(current: f64, target: f64, min_advance: f64, max_advance: f64, ref_max_dist: f64) -> f64 {
    let direction = if target > current { 1.0 } else { -1.0 };
    let dist = (target - current).abs().min(ref_max_dist);
    let advance = lerp(0.0, max_advance, t_at(dist, 0.0, ref_max_dist));
    if advance >= min_advance {
        direction * advance
    } else {
        direction * min_advance.min(dist)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::tests::drive;

    #[test]
    fn test_first_step_is_max_advance() {
        let env = Environment::new(320, 180);
        let change = Linear.update(&env, Point2D::ZERO, Point2D::new(1000.0, 0.0), Point2D::ZERO);
        assert!((change.x - 32.0).abs() < 1e-9);
        assert_eq!(change.y, 0.0);
    }

    #[test]
    fn test_moves_left_and_up() {
        let env = Environment::new(320, 180);
        let change = Linear.update(&env, Point2D::ZERO, Point2D::new(-10.0, -10.0), Point2D::ZERO);
        assert!(change.x < 0.0 && change.y < 0.0);
        assert!(change.x > -10.0 && change.y > -10.0);
    }

    #[test]
    fn test_never_overshoots() {
        let env = Environment::new(320, 180).with_zoom(2.5);
        let target = Point2D::new(333.3, -41.7);
        let mut current = Point2D::ZERO;
        for _ in 0..2000 {
            current += Linear.update(&env, current, target, Point2D::ZERO);
            assert!(current.x <= target.x + 1e-9);
            assert!(current.y >= target.y - 1e-9);
        }
        assert_eq!(current, target);
    }

    #[test]
    fn test_reaches_far_target() {
        let env = Environment::new(320, 180);
        let target = Point2D::new(1000.0, 0.0);
        let end = drive(&mut Linear, &env, Point2D::ZERO, target, 500);
        assert!((end.x - 1000.0).abs() < 0.01);
    }
}
