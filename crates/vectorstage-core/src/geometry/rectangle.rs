//! Two-corner rectangle.

use super::{Geometry, Matrix, Path, PathPoint, PointExt, Transformable};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// A rectangle given by two corners.
///
/// The corners are not required to be ordered; [`Rectangle::normalize`]
/// swaps them so `from` is the top-left one.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rectangle {
    pub from: Point,
    pub to: Point,
}

impl Rectangle {
    pub fn new(from: Point, to: Point) -> Self {
        Self { from, to }
    }

    /// The square `pt ± dist`.
    pub fn around_point(pt: Point, dist: f64) -> Self {
        Self::new(
            Point::new(pt.x - dist, pt.y - dist),
            Point::new(pt.x + dist, pt.y + dist),
        )
    }

    /// Reposition as the square `pt ± dist`.
    pub fn place_around_point(&mut self, pt: Point, dist: f64) -> &mut Self {
        *self = Self::around_point(pt, dist);
        self
    }

    pub fn width(&self) -> f64 {
        (self.to.x - self.from.x).abs()
    }

    pub fn height(&self) -> f64 {
        (self.to.y - self.from.y).abs()
    }

    pub fn center(&self) -> Point {
        self.from.midpoint(self.to)
    }

    pub fn top_right(&self) -> Point {
        Point::new(self.to.x, self.from.y)
    }

    pub fn bot_left(&self) -> Point {
        Point::new(self.from.x, self.to.y)
    }

    /// Order the corners so `from` is top-left.
    pub fn normalize(&mut self) -> &mut Self {
        if self.from.x > self.to.x {
            std::mem::swap(&mut self.from.x, &mut self.to.x);
        }
        if self.from.y > self.to.y {
            std::mem::swap(&mut self.from.y, &mut self.to.y);
        }
        self
    }

    /// Normalized copy.
    pub fn normalized(&self) -> Self {
        let mut r = *self;
        r.normalize();
        r
    }

    /// Inclusive containment test; assumes a normalized rectangle.
    pub fn has_point(&self, pt: Point) -> bool {
        self.from.x <= pt.x && pt.x <= self.to.x && self.from.y <= pt.y && pt.y <= self.to.y
    }

    /// Bounding boxes overlap (center-distance test, touching counts).
    pub fn intersect_bounds(&self, other: &Rectangle) -> bool {
        let w = (self.width() + other.width()) / 2.0;
        let h = (self.height() + other.height()) / 2.0;
        let c1 = self.center();
        let c2 = other.center();
        (c1.x - c2.x).abs() <= w && (c1.y - c2.y).abs() <= h
    }

    /// Smallest rectangle containing both.
    pub fn union(&self, other: &Rectangle) -> Rectangle {
        Rectangle::from(self.to_rect().union(other.to_rect()))
    }

    /// Normalized kurbo rect.
    pub fn to_rect(&self) -> Rect {
        Rect::from_points(self.from, self.to)
    }
}

impl From<Rect> for Rectangle {
    fn from(r: Rect) -> Self {
        Self::new(Point::new(r.x0, r.y0), Point::new(r.x1, r.y1))
    }
}

impl Transformable for Rectangle {
    fn move_by(&mut self, dx: f64, dy: f64) {
        self.from.move_by(dx, dy);
        self.to.move_by(dx, dy);
    }

    fn rotate(&mut self, angle: f64, pivot: Point) {
        self.from.rotate(angle, pivot);
        self.to.rotate(angle, pivot);
    }

    fn scale(&mut self, sx: f64, sy: f64, pivot: Point) {
        PointExt::scale(&mut self.from, sx, sy, pivot);
        PointExt::scale(&mut self.to, sx, sy, pivot);
    }

    fn matrix_transform(&mut self, m: &Matrix) {
        self.from.matrix_transform(m);
        self.to.matrix_transform(m);
    }

    fn bound_rect(&self) -> Option<Rectangle> {
        Some(self.normalized())
    }
}

impl Geometry for Rectangle {
    /// Closed path: from, top-right, to, bottom-left.
    fn to_path(&self) -> Path {
        Path::new(
            vec![
                PathPoint::from(self.from),
                PathPoint::from(self.top_right()),
                PathPoint::from(self.to),
                PathPoint::from(self.bot_left()),
            ],
            true,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Orientation;

    #[test]
    fn test_normalize() {
        let mut r = Rectangle::new(Point::new(50.0, 30.0), Point::new(10.0, 10.0));
        r.normalize();
        assert!((r.from.x - 10.0).abs() < f64::EPSILON);
        assert!((r.from.y - 10.0).abs() < f64::EPSILON);
        assert!((r.to.x - 50.0).abs() < f64::EPSILON);
        assert!((r.to.y - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_extents_ignore_corner_order() {
        let r = Rectangle::new(Point::new(50.0, 30.0), Point::new(10.0, 10.0));
        assert!((r.width() - 40.0).abs() < f64::EPSILON);
        assert!((r.height() - 20.0).abs() < f64::EPSILON);
        let c = r.center();
        assert!((c.x - 30.0).abs() < f64::EPSILON);
        assert!((c.y - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_mirrored_rect_places_into_target() {
        let mut r = Rectangle::new(Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        r.mirror(Orientation::Horizontal);
        let b = r.bound_rect().unwrap();
        assert!(b.from.x < b.to.x);

        r.place_into_rect(Rectangle::new(Point::new(100.0, 100.0), Point::new(120.0, 110.0)));
        let n = r.normalized();
        assert!((n.from.x - 100.0).abs() < 1e-9);
        assert!((n.from.y - 100.0).abs() < 1e-9);
        assert!((n.to.x - 120.0).abs() < 1e-9);
        assert!((n.to.y - 110.0).abs() < 1e-9);
    }

    #[test]
    fn test_has_point_inclusive() {
        let r = Rectangle::new(Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        assert!(r.has_point(Point::new(0.0, 10.0)));
        assert!(r.has_point(Point::new(5.0, 5.0)));
        assert!(!r.has_point(Point::new(10.5, 5.0)));
    }

    #[test]
    fn test_intersect_bounds() {
        let a = Rectangle::new(Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        let b = Rectangle::new(Point::new(10.0, 5.0), Point::new(20.0, 15.0));
        let c = Rectangle::new(Point::new(11.0, 0.0), Point::new(20.0, 10.0));
        assert!(a.intersect_bounds(&b));
        assert!(!a.intersect_bounds(&c));
    }

    #[test]
    fn test_to_path_corner_order() {
        let r = Rectangle::new(Point::new(1.0, 2.0), Point::new(3.0, 4.0));
        let path = r.to_path();
        assert!(path.closed);
        let pts: Vec<Point> = path.points.iter().map(|p| p.pos).collect();
        assert_eq!(
            pts,
            vec![
                Point::new(1.0, 2.0),
                Point::new(3.0, 2.0),
                Point::new(3.0, 4.0),
                Point::new(1.0, 4.0)
            ]
        );
    }

    #[test]
    fn test_place_around_point() {
        let mut r = Rectangle::default();
        r.place_around_point(Point::new(5.0, 5.0), 3.0);
        assert!((r.from.x - 2.0).abs() < f64::EPSILON);
        assert!((r.to.y - 8.0).abs() < f64::EPSILON);
    }
}
