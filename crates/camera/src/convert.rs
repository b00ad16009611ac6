//! Screen, relative and logical coordinate conversions.
//!
//! Unless stretching is enabled, the high-resolution display keeps the
//! logical aspect ratio: the extra space becomes symmetric margins
//! (pillarbox or letterbox) that belong to no logical pixel.

use pixcam_common::{AreaF64, Point2D, Rect};
use pixcam_motion::interp::clamp;

/// Integer margins on each side of the active display area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Margins {
    pub x: i32,
    pub y: i32,
}

impl Margins {
    pub const NONE: Margins = Margins { x: 0, y: 0 };

    /// Margins needed to fit `logical` inside `display` without distortion.
    pub fn fit(display: (u32, u32), logical: (u32, u32)) -> Self {
        let (display_w, display_h) = (f64::from(display.0), f64::from(display.1));
        if display.0 == 0 || display.1 == 0 || logical.0 == 0 || logical.1 == 0 {
            return Self::NONE;
        }

        let hi_aspect = display_w / display_h;
        let lo_aspect = f64::from(logical.0) / f64::from(logical.1);
        if hi_aspect > lo_aspect {
            Margins {
                x: ((display_w - lo_aspect * display_h) / 2.0) as i32,
                y: 0,
            }
        } else if lo_aspect > hi_aspect {
            Margins {
                x: 0,
                y: ((display_h - display_w / lo_aspect) / 2.0) as i32,
            }
        } else {
            Self::NONE
        }
    }

    /// Display area left once the margins are cropped.
    pub fn active_rect(&self, display: (u32, u32)) -> Rect {
        let (w, h) = (to_i32(display.0), to_i32(display.1));
        Rect::new(self.x, self.y, w - self.x, h - self.y)
    }
}

/// Screen coordinates to the `[0, 1]²` space of the active area.
pub fn to_relative(x: i32, y: i32, display: (u32, u32), margins: Margins) -> Point2D {
    let active = margins.active_rect(display);
    Point2D::new(
        relative_axis(x, margins.x, active.width()),
        relative_axis(y, margins.y, active.height()),
    )
}

/// Relative coordinates to logical world coordinates within `area`.
pub fn to_logical(relative: Point2D, area: &AreaF64) -> Point2D {
    Point2D::new(
        area.min_x + relative.x * area.width(),
        area.min_y + relative.y * area.height(),
    )
}

fn relative_axis(coord: i32, margin: i32, extent: i32) -> f64 {
    if extent <= 0 {
        return 0.0;
    }
    clamp((f64::from(coord) - f64::from(margin)) / f64::from(extent), 0.0, 1.0)
}

fn to_i32(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}
