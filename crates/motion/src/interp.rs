//! Interpolation and easing helpers shared by every controller.
//!
//! All functions are pure. Easing functions clamp `t` to `[0, 1]` first.

/// Clamp `x` to `[a, b]`.
pub fn clamp(x: f64, a: f64, b: f64) -> f64 {
    if x <= a {
        return a;
    }
    if x >= b {
        return b;
    }
    x
}

/// Clamp `x` so it never goes past `reference` away from zero.
pub fn clamp_towards_zero(x: f64, reference: f64) -> f64 {
    if reference > 0.0 {
        x.min(reference)
    } else {
        x.max(reference)
    }
}

pub fn abs(x: f64) -> f64 {
    if x >= 0.0 {
        x
    } else {
        -x
    }
}

/// Sign of `x`, with `sign(0.0) == 1.0`.
pub fn sign(x: f64) -> f64 {
    if x >= 0.0 {
        1.0
    } else {
        -1.0
    }
}

/// Linear interpolation, unclamped.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Inverse of `lerp`, clamped to `[0, 1]`.
///
/// When `a > b` the sense is reversed: `x <= b` gives 1 and `x >= a` gives 0.
pub fn t_at(x: f64, a: f64, b: f64) -> f64 {
    if a < b {
        if x < a {
            return 0.0;
        }
        if x >= b {
            return 1.0;
        }
    } else {
        if x < b {
            return 1.0;
        }
        if x >= a {
            return 0.0;
        }
    }
    (x - a) / (b - a)
}

/// Cubic smoothstep interpolation between `a` and `b`.
pub fn smoothstep(a: f64, b: f64, t: f64) -> f64 {
    let t = clamp(t, 0.0, 1.0);
    lerp(a, b, t * t * (3.0 - 2.0 * t))
}

/// Quadratic ease-in/out.
pub fn quad_in_out(t: f64) -> f64 {
    let t = clamp(t, 0.0, 1.0);
    if t < 0.5 {
        return 2.0 * t * t;
    }
    let t = 2.0 * t - 1.0;
    -0.5 * (t * (t - 2.0) - 1.0)
}

pub fn quad_in_out_interp(a: f64, b: f64, t: f64) -> f64 {
    lerp(a, b, quad_in_out(t))
}

pub fn ease_in_quad(t: f64) -> f64 {
    let t = clamp(t, 0.0, 1.0);
    t * t
}

pub fn ease_out_quad(t: f64) -> f64 {
    let t = clamp(t, 0.0, 1.0);
    let omt = 1.0 - t;
    1.0 - omt * omt
}

pub fn ease_out_cubic(t: f64) -> f64 {
    let t = clamp(t, 0.0, 1.0);
    let omt = 1.0 - t;
    1.0 - omt * omt * omt
}
