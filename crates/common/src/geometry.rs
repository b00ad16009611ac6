//! Geometry primitives shared by the motion controllers and the camera.
//!
//! All values are in logical (low-resolution) pixels unless noted otherwise.

use serde::{Deserialize, Serialize};

/// A 2D point or displacement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub const ZERO: Point2D = Point2D { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point2D) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// Whether both components are exactly zero.
    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Whether both components are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl std::ops::Add for Point2D {
    type Output = Point2D;

    fn add(self, rhs: Point2D) -> Point2D {
        Point2D::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::AddAssign for Point2D {
    fn add_assign(&mut self, rhs: Point2D) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl std::ops::Sub for Point2D {
    type Output = Point2D;

    fn sub(self, rhs: Point2D) -> Point2D {
        Point2D::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// An integer rectangle with exclusive max bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl Rect {
    pub fn new(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Rectangle anchored at the origin.
    pub fn from_size(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height)
    }

    pub fn width(&self) -> i32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> i32 {
        self.max_y - self.min_y
    }

    pub fn is_empty(&self) -> bool {
        self.min_x >= self.max_x || self.min_y >= self.max_y
    }
}

/// Exact (non-rounded) camera area in logical coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AreaF64 {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl AreaF64 {
    /// Area of the given size centered at `center`.
    pub fn centered(center: Point2D, width: f64, height: f64) -> Self {
        let min_x = center.x - width / 2.0;
        let min_y = center.y - height / 2.0;
        Self {
            min_x,
            min_y,
            max_x: min_x + width,
            max_y: min_y + height,
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Point2D {
        Point2D::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Smallest integer rectangle fully covering this area (floor on the
    /// mins, ceil on the maxes), or `None` when it doesn't fit in `i32`.
    pub fn covering_rect(&self) -> Option<Rect> {
        let bounds = [
            self.min_x.floor(),
            self.min_y.floor(),
            self.max_x.ceil(),
            self.max_y.ceil(),
        ];
        let representable = f64::from(i32::MIN)..=f64::from(i32::MAX);
        if !bounds.iter().all(|bound| representable.contains(bound)) {
            return None;
        }
        let [min_x, min_y, max_x, max_y] = bounds.map(|bound| bound as i32);
        Some(Rect::new(min_x, min_y, max_x, max_y))
    }

    /// Whether a box starting at `(x, y)` with the given size overlaps the area.
    pub fn overlaps(&self, x: f64, y: f64, width: f64, height: f64) -> bool {
        x <= self.max_x && y <= self.max_y && x + width >= self.min_x && y + height >= self.min_y
    }
}
