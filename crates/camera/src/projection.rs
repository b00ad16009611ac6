//! Projection planning: what the renderer has to draw and where.
//!
//! The camera never touches pixels. Each draw it hands the renderer a
//! [`DrawPlan`] describing how the logical canvas maps onto the display,
//! and high-resolution sprites are placed through [`Placement`] values.

use pixcam_common::{AreaF64, Point2D, Rect, ScalingFilter};

/// Axis-aligned quad in pixel coordinates. `left > right` means the
/// quad is horizontally flipped.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Quad {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Quad {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn is_flipped(&self) -> bool {
        self.left > self.right
    }
}

/// Instructions for a single draw.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawPlan {
    /// Size of the logical canvas the game draws into (the integer
    /// camera area).
    pub logical_canvas: (u32, u32),

    /// Region of the display canvas the logical canvas is projected to.
    pub active: Rect,

    /// Region of the logical canvas to sample, with the fractional
    /// camera offsets cropped away.
    pub source: Quad,

    /// Size of a source texel relative to a display pixel.
    pub texel_unit: Point2D,

    pub filter: ScalingFilter,

    /// Clear both canvases before drawing.
    pub clear: bool,

    /// Project the logical canvas onto the display. False when redraws
    /// are managed and nothing changed.
    pub project: bool,
}

/// Where to draw a sprite directly on a high-resolution target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub destination: Quad,
    pub source: Quad,
    pub texel_unit: Point2D,
}

/// Source quad for the logical canvas covering `area`.
pub(crate) fn source_quad(area: &AreaF64, canvas: (u32, u32)) -> Quad {
    let fract_min_x = area.min_x - area.min_x.floor();
    let fract_min_y = area.min_y - area.min_y.floor();
    let fract_max_x = uncovered(area.max_x);
    let fract_max_y = uncovered(area.max_y);
    Quad::new(
        fract_min_x,
        fract_min_y,
        f64::from(canvas.0) - fract_max_x,
        f64::from(canvas.1) - fract_max_y,
    )
}

/// Part of the last covering pixel that lies beyond `max`.
fn uncovered(max: f64) -> f64 {
    let fract = max - max.floor();
    if fract != 0.0 {
        1.0 - fract
    } else {
        0.0
    }
}

pub(crate) fn texel_unit(source: (f64, f64), destination: (f64, f64)) -> Point2D {
    if destination.0 <= 0.0 || destination.1 <= 0.0 {
        return Point2D::ZERO;
    }
    Point2D::new(source.0 / destination.0, source.1 / destination.1)
}

/// Logical-space sprite geometry for [`place`].
#[derive(Debug, Clone, Copy)]
pub(crate) struct Sprite {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub flip: bool,
}

/// Project a sprite at logical `(x, y)` onto `target`, or `None` when it
/// falls outside the camera area.
pub(crate) fn place(
    area: &AreaF64,
    zoom: f64,
    logical: (u32, u32),
    target: Rect,
    sprite: Sprite,
) -> Option<Placement> {
    if !area.overlaps(sprite.x, sprite.y, sprite.width, sprite.height) {
        return None;
    }

    let target_w = f64::from(target.width());
    let target_h = f64::from(target.height());
    let (logical_w, logical_h) = (f64::from(logical.0), f64::from(logical.1));
    let x_factor = zoom * target_w / logical_w;
    let y_factor = zoom * target_h / logical_h;

    let min_x = f64::from(target.min_x) + (sprite.x - area.min_x) * x_factor;
    let min_y = f64::from(target.min_y) + (sprite.y - area.min_y) * y_factor;
    let max_x = min_x + sprite.width * x_factor;
    let max_y = min_y + sprite.height * y_factor;
    let (left, right) = if sprite.flip {
        (max_x, min_x)
    } else {
        (min_x, max_x)
    };

    Some(Placement {
        destination: Quad::new(left, min_y, right, max_y),
        source: Quad::new(0.0, 0.0, sprite.width, sprite.height),
        texel_unit: texel_unit((logical_w, logical_h), (target_w, target_h)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sprite(x: f64, y: f64, flip: bool) -> Sprite {
        Sprite {
            x,
            y,
            width: 16.0,
            height: 8.0,
            flip,
        }
    }

    #[test]
    fn test_source_quad_crops_fractions() {
        let area = AreaF64::centered(Point2D::new(170.25, 90.5), 320.0, 180.0);
        let canvas = area.covering_rect().unwrap();
        assert_eq!((canvas.width(), canvas.height()), (321, 181));

        let source = source_quad(&area, (321, 181));
        assert_eq!(source, Quad::new(0.25, 0.5, 320.25, 180.5));
        assert_eq!(source.width(), 320.0);
        assert_eq!(source.height(), 180.0);
    }

    #[test]
    fn test_source_quad_on_integer_area() {
        let area = AreaF64::centered(Point2D::new(160.0, 90.0), 320.0, 180.0);
        assert_eq!(source_quad(&area, (320, 180)), Quad::new(0.0, 0.0, 320.0, 180.0));
    }

    #[test]
    fn test_texel_unit() {
        assert_eq!(texel_unit((320.0, 180.0), (1280.0, 720.0)), Point2D::new(0.25, 0.25));
        assert_eq!(texel_unit((320.0, 180.0), (0.0, 720.0)), Point2D::ZERO);
    }

    #[test]
    fn test_place_scales_with_zoom_and_target() {
        let area = AreaF64::centered(Point2D::new(160.0, 90.0), 160.0, 90.0);
        let target = Rect::new(0, 75, 1280, 795);
        let placement = place(&area, 2.0, (320, 180), target, sprite(100.0, 60.0, false)).unwrap();
        // each logical pixel spans 8 display pixels at zoom 2
        assert_eq!(placement.destination, Quad::new(160.0, 195.0, 288.0, 259.0));
        assert_eq!(placement.source, Quad::new(0.0, 0.0, 16.0, 8.0));
        assert_eq!(placement.texel_unit, Point2D::new(0.25, 0.25));
    }

    #[test]
    fn test_place_flip_swaps_edges() {
        let area = AreaF64::centered(Point2D::new(160.0, 90.0), 320.0, 180.0);
        let target = Rect::from_size(320, 180);
        let plain = place(&area, 1.0, (320, 180), target, sprite(10.0, 10.0, false)).unwrap();
        let flipped = place(&area, 1.0, (320, 180), target, sprite(10.0, 10.0, true)).unwrap();
        assert!(!plain.destination.is_flipped());
        assert!(flipped.destination.is_flipped());
        assert_eq!(flipped.destination.left, plain.destination.right);
        assert_eq!(flipped.destination.right, plain.destination.left);
    }

    #[test]
    fn test_place_culls_outside_sprites() {
        let area = AreaF64::centered(Point2D::new(160.0, 90.0), 320.0, 180.0);
        let target = Rect::from_size(320, 180);
        assert!(place(&area, 1.0, (320, 180), target, sprite(-17.0, 0.0, false)).is_none());
        assert!(place(&area, 1.0, (320, 180), target, sprite(0.0, 181.0, false)).is_none());
        assert!(place(&area, 1.0, (320, 180), target, sprite(-16.0, -8.0, false)).is_some());
        assert!(place(&area, 1.0, (320, 180), target, sprite(320.0, 180.0, false)).is_some());
    }
}
