//! Point operations and path points with curve control points.

use super::Matrix;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// In-place transforms and geometric queries on a [`kurbo::Point`].
pub trait PointExt {
    /// Move by x/y deltas.
    fn move_by(&mut self, dx: f64, dy: f64);
    /// Move `dist` along `angle`; angle 0 points toward +y.
    fn move_dir(&mut self, dist: f64, angle: f64);
    /// Apply a matrix transform.
    fn matrix_transform(&mut self, m: &Matrix);
    /// Rotate around `pivot` (radians).
    fn rotate(&mut self, angle: f64, pivot: Point);
    /// Scale relative to `pivot`.
    fn scale(&mut self, sx: f64, sy: f64, pivot: Point);
    /// Euclidean distance.
    fn dist_to(&self, to: Point) -> f64;
    /// Angle of the vector from `to` to this point.
    fn angle_to(&self, to: Point) -> f64;
    fn is_left_to(&self, to: Point) -> bool;
    fn is_right_to(&self, to: Point) -> bool;
    fn is_up_to(&self, to: Point) -> bool;
    fn is_down_to(&self, to: Point) -> bool;
}

impl PointExt for Point {
    fn move_by(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
    }

    fn move_dir(&mut self, dist: f64, angle: f64) {
        self.x += dist * angle.sin();
        self.y += dist * angle.cos();
    }

    fn matrix_transform(&mut self, m: &Matrix) {
        *self = m.transform_point(*self);
    }

    fn rotate(&mut self, angle: f64, pivot: Point) {
        let (sin, cos) = angle.sin_cos();
        let dx = self.x - pivot.x;
        let dy = self.y - pivot.y;
        self.x = dx * cos - dy * sin + pivot.x;
        self.y = dx * sin + dy * cos + pivot.y;
    }

    fn scale(&mut self, sx: f64, sy: f64, pivot: Point) {
        let dx = self.x - pivot.x;
        let dy = self.y - pivot.y;
        self.x += sx * dx - dx;
        self.y += sy * dy - dy;
    }

    fn dist_to(&self, to: Point) -> f64 {
        let dx = self.x - to.x;
        let dy = self.y - to.y;
        (dx * dx + dy * dy).sqrt()
    }

    fn angle_to(&self, to: Point) -> f64 {
        (self.y - to.y).atan2(self.x - to.x)
    }

    fn is_left_to(&self, to: Point) -> bool {
        self.x < to.x
    }

    fn is_right_to(&self, to: Point) -> bool {
        self.x > to.x
    }

    fn is_up_to(&self, to: Point) -> bool {
        self.y < to.y
    }

    fn is_down_to(&self, to: Point) -> bool {
        self.y > to.y
    }
}

/// A path vertex with optional curve control points.
///
/// `prev` shapes the segment arriving at this point, `next` the segment
/// leaving it. `mv` starts a new sub-path without a segment to this point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathPoint {
    pub pos: Point,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev: Option<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<Point>,
    #[serde(default)]
    pub mv: bool,
}

impl PathPoint {
    /// Create a plain vertex.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            pos: Point::new(x, y),
            prev: None,
            next: None,
            mv: false,
        }
    }

    /// Create a vertex that starts a new sub-path.
    pub fn move_to(x: f64, y: f64) -> Self {
        Self {
            mv: true,
            ..Self::new(x, y)
        }
    }

    /// Set the incoming control point.
    pub fn with_prev(mut self, x: f64, y: f64) -> Self {
        self.prev = Some(Point::new(x, y));
        self
    }

    /// Set the outgoing control point.
    pub fn with_next(mut self, x: f64, y: f64) -> Self {
        self.next = Some(Point::new(x, y));
        self
    }

    /// Apply `f` to the vertex and each control point present.
    pub fn for_each_point_mut(&mut self, mut f: impl FnMut(&mut Point)) {
        f(&mut self.pos);
        if let Some(prev) = self.prev.as_mut() {
            f(prev);
        }
        if let Some(next) = self.next.as_mut() {
            f(next);
        }
    }
}

impl From<Point> for PathPoint {
    fn from(p: Point) -> Self {
        Self::new(p.x, p.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    const EPS: f64 = 1e-9;

    #[test]
    fn test_move_dir_zero_points_down() {
        let mut p = Point::new(0.0, 0.0);
        p.move_dir(10.0, 0.0);
        assert!(p.x.abs() < EPS);
        assert!((p.y - 10.0).abs() < EPS);

        let mut q = Point::new(0.0, 0.0);
        q.move_dir(10.0, FRAC_PI_2);
        assert!((q.x - 10.0).abs() < EPS);
        assert!(q.y.abs() < EPS);
    }

    #[test]
    fn test_rotate_about_pivot() {
        let mut p = Point::new(2.0, 1.0);
        p.rotate(PI, Point::new(1.0, 1.0));
        assert!((p.x - 0.0).abs() < EPS);
        assert!((p.y - 1.0).abs() < EPS);
    }

    #[test]
    fn test_scale_about_pivot() {
        let mut p = Point::new(3.0, 5.0);
        p.scale(2.0, -1.0, Point::new(1.0, 1.0));
        assert!((p.x - 5.0).abs() < EPS);
        assert!((p.y + 3.0).abs() < EPS);
    }

    #[test]
    fn test_queries() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((a.dist_to(b) - 5.0).abs() < EPS);
        assert!(a.is_left_to(b) && a.is_up_to(b));
        assert!(b.is_right_to(a) && b.is_down_to(a));
        assert!(!a.is_left_to(a) && !a.is_right_to(a));
        assert!((b.angle_to(a) - 4.0f64.atan2(3.0)).abs() < EPS);
    }

    #[test]
    fn test_matrix_transform_matches_matrix() {
        let mut m = Matrix::new();
        m.rotate(0.7, Point::new(2.0, 2.0));
        let mut p = Point::new(4.0, -1.0);
        let expected = m.transform_point(p);
        p.matrix_transform(&m);
        assert!((p.x - expected.x).abs() < EPS);
        assert!((p.y - expected.y).abs() < EPS);
    }

    #[test]
    fn test_for_each_point_mut_touches_controls() {
        let mut pp = PathPoint::new(1.0, 1.0).with_prev(0.0, 0.0).with_next(2.0, 2.0);
        pp.for_each_point_mut(|p| p.move_by(1.0, 0.0));
        assert!((pp.pos.x - 2.0).abs() < EPS);
        assert!((pp.prev.unwrap().x - 1.0).abs() < EPS);
        assert!((pp.next.unwrap().x - 3.0).abs() < EPS);
    }
}
