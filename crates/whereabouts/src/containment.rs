//! Point containment and boundary distance - the hot path.
//!
//! A batch query runs these predicates once per outline per point, so
//! everything here stays allocation-free.

use crate::geometry::{Outline, Point, distance_to_segment};

/// Test if a point is inside a polygon using ray casting.
///
/// Casts a ray to the right and counts edge crossings.
/// Odd crossings = inside, even = outside.
#[inline]
pub fn point_in_polygon(px: f64, py: f64, polygon: &[Point]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;

    for i in 0..n {
        let (xi, yi) = (polygon[i].x, polygon[i].y);
        let (xj, yj) = (polygon[j].x, polygon[j].y);

        if ((yi > py) != (yj > py)) && (px < (xj - xi) * (py - yi) / (yj - yi) + xi) {
            inside = !inside;
        }

        j = i;
    }

    inside
}

/// Minimum distance from a point to a polygon's closed boundary.
///
/// The closing edge (last vertex back to the first) counts. An empty
/// polygon is infinitely far away; a single vertex is just a point.
pub fn polygon_boundary_distance(px: f64, py: f64, polygon: &[Point]) -> f64 {
    let n = polygon.len();
    let point = Point::new(px, py);
    match n {
        0 => f64::INFINITY,
        1 => point.distance(polygon[0]),
        _ => {
            let mut min_distance = f64::INFINITY;
            for i in 0..n {
                let j = (i + 1) % n;
                min_distance = min_distance.min(distance_to_segment(point, polygon[i], polygon[j]));
            }
            min_distance
        }
    }
}

impl Outline {
    /// True if the point falls inside this outline.
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point_in_polygon(point.x, point.y, &self.points)
    }

    /// Distance from the point to this outline's closed boundary.
    #[inline]
    pub fn boundary_distance(&self, point: Point) -> f64 {
        polygon_boundary_distance(point.x, point.y, &self.points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Outline {
        Outline::new(vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ])
    }

    #[test]
    fn point_inside_square() {
        let sq = square();
        assert!(point_in_polygon(5.0, 5.0, &sq.points));
        assert!(!point_in_polygon(15.0, 5.0, &sq.points));
        assert!(!point_in_polygon(-1.0, 5.0, &sq.points));
    }

    #[test]
    fn point_inside_concave_polygon() {
        // A "U" shape - the notch is outside even though the bounding box
        // contains it.
        let u = Outline::new(vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(7.0, 10.0),
            Point::new(7.0, 3.0),
            Point::new(3.0, 3.0),
            Point::new(3.0, 10.0),
            Point::new(0.0, 10.0),
        ]);
        assert!(u.contains(Point::new(1.5, 5.0)));
        assert!(u.contains(Point::new(8.5, 5.0)));
        assert!(!u.contains(Point::new(5.0, 8.0))); // in the notch
    }

    #[test]
    fn degenerate_outlines_contain_nothing() {
        assert!(!Outline::new(vec![]).contains(Point::new(0.0, 0.0)));
        let dot = Outline::new(vec![Point::new(1.0, 1.0)]);
        assert!(!dot.contains(Point::new(1.0, 1.0)));
        let edge = Outline::new(vec![Point::new(0.0, 0.0), Point::new(2.0, 0.0)]);
        assert!(!edge.contains(Point::new(1.0, 0.0)));
    }

    #[test]
    fn boundary_distance_outside_edge() {
        let sq = square();
        // Straight out from the middle of the right edge
        let d = sq.boundary_distance(Point::new(13.0, 5.0));
        assert!((d - 3.0).abs() < 1e-12);
    }

    #[test]
    fn boundary_distance_outside_corner() {
        let sq = square();
        let d = sq.boundary_distance(Point::new(-3.0, -4.0));
        assert!((d - 5.0).abs() < 1e-12);
    }

    #[test]
    fn boundary_distance_uses_closing_edge() {
        // Triangle whose closing edge is the left side, from (0,10) back
        // to (0,0). A point just left of that edge must measure against
        // it, not against the far vertices.
        let tri = Outline::new(vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 5.0),
            Point::new(0.0, 10.0),
        ]);
        let d = tri.boundary_distance(Point::new(-2.0, 5.0));
        assert!((d - 2.0).abs() < 1e-12);
    }

    #[test]
    fn boundary_distance_degenerates() {
        assert_eq!(
            polygon_boundary_distance(0.0, 0.0, &[]),
            f64::INFINITY
        );
        let d = polygon_boundary_distance(3.0, 4.0, &[Point::new(0.0, 0.0)]);
        assert_eq!(d, 5.0);
    }
}
