//! Core geometry types: points, coordinate frames, closed outlines.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A 2D point with x,y coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Distance to another point.
    #[inline]
    pub fn distance(&self, other: Point) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// Squared distance to another point (no sqrt - cheaper for comparisons).
    #[inline]
    pub fn distance_squared(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// An axis-aligned coordinate extent `(x_min, y_min, x_max, y_max)`.
///
/// Two frames appear in practice: the drawing's own viewBox, and an
/// optional caller-supplied frame in dataset coordinates (geographic,
/// chart axes, ...). The `Display` impl renders the four values the way a
/// viewBox attribute would, which is what error messages want.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl Frame {
    #[inline]
    pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Self {
        Self { x_min, y_min, x_max, y_max }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Length of the corner-to-corner diagonal.
    #[inline]
    pub fn diagonal(&self) -> f64 {
        Point::new(self.x_min, self.y_min).distance(Point::new(self.x_max, self.y_max))
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {} {} {})", self.x_min, self.y_min, self.x_max, self.y_max)
    }
}

/// One closed polygonal boundary.
///
/// The closing edge from the last point back to the first is implied.
/// Degenerate outlines (fewer than 3 points) are allowed to exist - a
/// sloppy source can produce them - but they never contain any point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outline {
    pub points: Vec<Point>,
}

impl Outline {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Vertex centroid (arithmetic mean of the points).
    pub fn centroid(&self) -> Point {
        if self.points.is_empty() {
            return Point::new(0.0, 0.0);
        }
        let sum_x: f64 = self.points.iter().map(|p| p.x).sum();
        let sum_y: f64 = self.points.iter().map(|p| p.y).sum();
        let n = self.points.len() as f64;
        Point::new(sum_x / n, sum_y / n)
    }
}

/// Distance from a point to the closest point of the segment `a`-`b`.
///
/// The projection parameter is clamped to the segment, so endpoints win
/// when the perpendicular foot falls outside it.
pub fn distance_to_segment(point: Point, a: Point, b: Point) -> f64 {
    let l2 = a.distance_squared(b);
    if l2 == 0.0 {
        return point.distance(a);
    }
    let t = (((point.x - a.x) * (b.x - a.x) + (point.y - a.y) * (b.y - a.y)) / l2).clamp(0.0, 1.0);
    point.distance(Point::new(a.x + t * (b.x - a.x), a.y + t * (b.y - a.y)))
}
