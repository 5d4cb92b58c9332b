//! Geometry primitives: matrices, points, paths and rectangles.
//!
//! Everything that can be moved around implements [`Transformable`]; the
//! placement operations (align, mirror, fit into a rectangle) are provided
//! on top of the four primitive transforms and the bounding rectangle, so
//! paths, rectangles and scene objects share one implementation.

mod hit;
mod matrix;
mod path;
mod point;
mod rectangle;

pub use hit::{FLATTEN_TOLERANCE, contains, winding};
pub use matrix::{Matrix, SINGULAR_EPSILON};
pub use path::{Path, Segment};
pub use point::{PathPoint, PointExt};
pub use rectangle::Rectangle;

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Mirror axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Flip left to right.
    Horizontal,
    /// Flip top to bottom.
    Vertical,
}

/// Alignment base used by [`Transformable::align`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlignBase {
    Left,
    Right,
    /// Horizontal center.
    Center,
    Top,
    Bottom,
    /// Vertical center.
    Vert,
}

/// Objects that can be moved, rotated, scaled and matrix-transformed.
pub trait Transformable {
    /// Move by x/y deltas.
    fn move_by(&mut self, dx: f64, dy: f64);

    /// Rotate around `pivot` (radians).
    fn rotate(&mut self, angle: f64, pivot: Point);

    /// Scale relative to `pivot`.
    fn scale(&mut self, sx: f64, sy: f64, pivot: Point);

    /// Apply a matrix transform.
    fn matrix_transform(&mut self, m: &Matrix);

    /// Axis-aligned bounding rectangle, `None` when there is no geometry.
    fn bound_rect(&self) -> Option<Rectangle>;

    /// Move `dist` along `angle` (angle 0 points toward +y).
    fn move_dir(&mut self, dist: f64, angle: f64) {
        self.move_by(dist * angle.sin(), dist * angle.cos());
    }

    /// Center of the bounding rectangle.
    fn center(&self) -> Option<Point> {
        self.bound_rect().map(|r| r.center())
    }

    fn width(&self) -> f64 {
        self.bound_rect().map_or(0.0, |r| r.width())
    }

    fn height(&self) -> f64 {
        self.bound_rect().map_or(0.0, |r| r.height())
    }

    /// Reflect about the own center.
    fn mirror(&mut self, orientation: Orientation) {
        let Some(c) = self.center() else {
            return;
        };
        match orientation {
            Orientation::Horizontal => self.scale(-1.0, 1.0, c),
            Orientation::Vertical => self.scale(1.0, -1.0, c),
        }
    }

    /// Move so the bounding box edge or center matches the one of `rect`.
    fn align(&mut self, base: AlignBase, rect: &Rectangle) {
        let Some(or) = self.bound_rect() else {
            return;
        };
        let (dx, dy) = match base {
            AlignBase::Left => (rect.from.x - or.from.x, 0.0),
            AlignBase::Right => (rect.to.x - or.to.x, 0.0),
            AlignBase::Center => ((rect.from.x + rect.to.x - (or.from.x + or.to.x)) / 2.0, 0.0),
            AlignBase::Top => (0.0, rect.from.y - or.from.y),
            AlignBase::Bottom => (0.0, rect.to.y - or.to.y),
            AlignBase::Vert => (0.0, (rect.from.y + rect.to.y - (or.from.y + or.to.y)) / 2.0),
        };
        self.move_by(dx, dy);
    }

    /// Fit into `target`.
    ///
    /// An inverted target (from right of / below to) mirrors the object
    /// first, which is how resize handles flip a shape dragged past its
    /// opposite edge. Zero extents scale against 1.
    fn place_into_rect(&mut self, target: Rectangle) {
        if target.from.x > target.to.x {
            self.mirror(Orientation::Horizontal);
        }
        if target.from.y > target.to.y {
            self.mirror(Orientation::Vertical);
        }

        let Some(or) = self.bound_rect() else {
            return;
        };
        let tr = target.normalized();
        self.move_by(tr.from.x - or.from.x, tr.from.y - or.from.y);

        let non_zero = |v: f64| if v == 0.0 { 1.0 } else { v };
        let sx = non_zero(tr.width()) / non_zero(or.width());
        let sy = non_zero(tr.height()) / non_zero(or.height());
        self.scale(sx, sy, tr.from);
    }

    /// Fit into the square `pt ± dist`.
    fn place_around_point(&mut self, pt: Point, dist: f64) {
        self.place_into_rect(Rectangle::around_point(pt, dist));
    }
}

/// Shapes expressible as a [`Path`]: paths, polygons, polylines, rectangles.
pub trait Geometry: Transformable {
    /// Path representation of the geometry.
    fn to_path(&self) -> Path;

    /// Point-in-shape test (nonzero winding).
    fn contains(&self, p: Point) -> bool {
        self.to_path().contains(p)
    }
}
