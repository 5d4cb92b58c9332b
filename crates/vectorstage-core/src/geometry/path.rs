//! Paths of points with optional curve control points.

use super::{Geometry, Matrix, PathPoint, PointExt, Rectangle, Transformable, hit};
use kurbo::{BezPath, PathEl, Point};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// One drawing command produced by replaying a [`Path`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    MoveTo(Point),
    LineTo(Point),
    QuadTo(Point, Point),
    CurveTo(Point, Point, Point),
}

impl Segment {
    /// Segment arriving at `p`, shaped by the leaving control point of the
    /// previous vertex and the arriving control point of `p`.
    fn arriving(p: &PathPoint, c1: Option<Point>, c2: Option<Point>) -> Self {
        if p.mv {
            return Segment::MoveTo(p.pos);
        }
        match (c1, c2) {
            (Some(a), Some(b)) => Segment::CurveTo(a, b, p.pos),
            (Some(c), None) | (None, Some(c)) => Segment::QuadTo(c, p.pos),
            (None, None) => Segment::LineTo(p.pos),
        }
    }

    pub fn to_path_el(&self) -> PathEl {
        match *self {
            Segment::MoveTo(p) => PathEl::MoveTo(p),
            Segment::LineTo(p) => PathEl::LineTo(p),
            Segment::QuadTo(c, p) => PathEl::QuadTo(c, p),
            Segment::CurveTo(a, b, p) => PathEl::CurveTo(a, b, p),
        }
    }
}

/// An ordered sequence of points, optionally closed back to the first one.
///
/// Rectangles, polygons and polylines are all plain paths built by the
/// factory functions below.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Path {
    pub points: Vec<PathPoint>,
    pub closed: bool,
}

impl Path {
    pub fn new(points: Vec<PathPoint>, closed: bool) -> Self {
        Self { points, closed }
    }

    /// Closed straight-edged loop.
    pub fn polygon(points: &[Point]) -> Self {
        Self::new(points.iter().copied().map(PathPoint::from).collect(), true)
    }

    /// Open straight-edged chain.
    pub fn polyline(points: &[Point]) -> Self {
        Self::new(points.iter().copied().map(PathPoint::from).collect(), false)
    }

    /// Single line segment.
    pub fn line(from: Point, to: Point) -> Self {
        Self::polyline(&[from, to])
    }

    /// Ellipse made of four cubic arcs; control points sit at half radius.
    pub fn ellipse(center: Point, rx: f64, ry: f64) -> Self {
        let (x, y) = (center.x, center.y);
        let (hx, hy) = (rx / 2.0, ry / 2.0);
        let points = vec![
            PathPoint::new(x, y - ry)
                .with_prev(x - hx, y - ry)
                .with_next(x + hx, y - ry),
            PathPoint::new(x + rx, y)
                .with_prev(x + rx, y - hy)
                .with_next(x + rx, y + hy),
            PathPoint::new(x, y + ry)
                .with_prev(x + hx, y + ry)
                .with_next(x - hx, y + ry),
            PathPoint::new(x - rx, y)
                .with_prev(x - rx, y + hy)
                .with_next(x - rx, y - hy),
        ];
        Self::new(points, true)
    }

    /// Star with `vertices` outer points on radius `r1` and inner points on
    /// `r2`, inner points rotated by `offset`.
    pub fn star(center: Point, r1: f64, r2: f64, vertices: usize, offset: f64) -> Self {
        let count = vertices * 2;
        let step = 2.0 * PI / count as f64;
        let points = (0..count)
            .map(|i| {
                let alfa = step * i as f64;
                let (r, angle) = if i % 2 == 0 { (r1, alfa) } else { (r2, alfa + offset) };
                PathPoint::new(center.x + r * angle.sin(), center.y + r * angle.cos())
            })
            .collect();
        Self::new(points, true)
    }

    /// Convert kurbo path elements; a trailing close marks the path closed.
    pub fn from_bez_path(bez: &BezPath) -> Self {
        let mut path = Path::default();
        for el in bez.elements() {
            match *el {
                PathEl::MoveTo(p) => {
                    let mut pp = PathPoint::from(p);
                    pp.mv = !path.points.is_empty();
                    path.points.push(pp);
                }
                PathEl::LineTo(p) => path.points.push(PathPoint::from(p)),
                PathEl::QuadTo(c, p) => {
                    path.points.push(PathPoint::from(p).with_prev(c.x, c.y));
                }
                PathEl::CurveTo(a, b, p) => {
                    if let Some(last) = path.points.last_mut() {
                        last.next = Some(a);
                    }
                    path.points.push(PathPoint::from(p).with_prev(b.x, b.y));
                }
                PathEl::ClosePath => path.closed = true,
            }
        }
        path
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Replay into drawing segments.
    ///
    /// Paths with fewer than two points produce nothing. A closed path gets a
    /// final segment back to the first point, shaped like any other.
    pub fn segments(&self) -> Vec<Segment> {
        let pts = &self.points;
        if pts.len() < 2 {
            return Vec::new();
        }

        let mut out = Vec::with_capacity(pts.len() + 1);
        out.push(Segment::MoveTo(pts[0].pos));
        for pair in pts.windows(2) {
            out.push(Segment::arriving(&pair[1], pair[0].next, pair[1].prev));
        }
        if self.closed {
            let last = &pts[pts.len() - 1];
            out.push(Segment::arriving(&pts[0], last.next, pts[0].prev));
        }
        out
    }

    /// kurbo representation used by renderers.
    pub fn to_bez_path(&self) -> BezPath {
        let mut bez = BezPath::new();
        for seg in self.segments() {
            bez.push(seg.to_path_el());
        }
        if self.closed && !bez.elements().is_empty() {
            bez.close_path();
        }
        bez
    }

    fn for_each_point_mut(&mut self, mut f: impl FnMut(&mut Point)) {
        for p in &mut self.points {
            p.for_each_point_mut(&mut f);
        }
    }
}

impl Transformable for Path {
    fn move_by(&mut self, dx: f64, dy: f64) {
        self.for_each_point_mut(|p| p.move_by(dx, dy));
    }

    fn rotate(&mut self, angle: f64, pivot: Point) {
        self.for_each_point_mut(|p| p.rotate(angle, pivot));
    }

    fn scale(&mut self, sx: f64, sy: f64, pivot: Point) {
        self.for_each_point_mut(|p| PointExt::scale(p, sx, sy, pivot));
    }

    fn matrix_transform(&mut self, m: &Matrix) {
        self.for_each_point_mut(|p| p.matrix_transform(m));
    }

    /// Bounds over the points plus a cheap curve correction.
    ///
    /// Curves are not solved for their extrema: a cubic segment contributes
    /// the four midpoints of one de Casteljau subdivision step, a quadratic
    /// one its two control-leg midpoints. The result can be slightly larger
    /// or smaller than the exact curve bounds.
    fn bound_rect(&self) -> Option<Rectangle> {
        let pts = &self.points;
        let first = pts.first()?;
        let mut min = first.pos;
        let mut max = first.pos;
        let mut include = |q: Point| {
            min.x = min.x.min(q.x);
            min.y = min.y.min(q.y);
            max.x = max.x.max(q.x);
            max.y = max.y.max(q.y);
        };

        for (i, p) in pts.iter().enumerate() {
            include(p.pos);
            let end = &pts[(i + 1) % pts.len()];
            match (p.next, end.prev) {
                (Some(c1), Some(c2)) => {
                    let m1 = p.pos.midpoint(c1);
                    let m3 = c1.midpoint(c2);
                    let m2 = m1.midpoint(m3);
                    let m5 = c2.midpoint(end.pos);
                    let m4 = m3.midpoint(m5);
                    for q in [m1, m2, m4, m5] {
                        include(q);
                    }
                }
                (Some(c), None) | (None, Some(c)) => {
                    include(p.pos.midpoint(c));
                    include(c.midpoint(end.pos));
                }
                (None, None) => {}
            }
        }

        Some(Rectangle::new(min, max))
    }
}

impl Geometry for Path {
    fn to_path(&self) -> Path {
        self.clone()
    }

    fn contains(&self, p: Point) -> bool {
        hit::contains(&self.segments(), p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{AlignBase, Orientation};

    const EPS: f64 = 1e-9;

    fn unit_square() -> Path {
        Path::polygon(&[
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ])
    }

    fn assert_rect(r: Rectangle, x0: f64, y0: f64, x1: f64, y1: f64) {
        assert!((r.from.x - x0).abs() < EPS, "from.x {} != {}", r.from.x, x0);
        assert!((r.from.y - y0).abs() < EPS, "from.y {} != {}", r.from.y, y0);
        assert!((r.to.x - x1).abs() < EPS, "to.x {} != {}", r.to.x, x1);
        assert!((r.to.y - y1).abs() < EPS, "to.y {} != {}", r.to.y, y1);
    }

    #[test]
    fn test_unit_square_bounds() {
        let r = unit_square().bound_rect().unwrap();
        assert_rect(r, 0.0, 0.0, 1.0, 1.0);
    }

    #[test]
    fn test_empty_path_has_no_bounds() {
        assert!(Path::default().bound_rect().is_none());
        assert!(Path::default().center().is_none());
    }

    #[test]
    fn test_place_unit_polygon_into_rect() {
        let mut p = unit_square();
        let target = Rectangle::new(Point::new(10.0, 10.0), Point::new(50.0, 30.0));
        p.place_into_rect(target);
        assert_rect(p.bound_rect().unwrap(), 10.0, 10.0, 50.0, 30.0);
    }

    #[test]
    fn test_place_into_rect_idempotent() {
        let mut p = Path::star(Point::new(3.0, 4.0), 10.0, 4.0, 5, 0.0);
        let target = Rectangle::new(Point::new(40.0, 25.0), Point::new(-5.0, 5.0));
        p.place_into_rect(target);
        assert_rect(p.bound_rect().unwrap(), -5.0, 5.0, 40.0, 25.0);
        p.place_into_rect(target);
        assert_rect(p.bound_rect().unwrap(), -5.0, 5.0, 40.0, 25.0);
    }

    #[test]
    fn test_place_into_inverted_rect_mirrors() {
        // A right triangle with its right angle at the top-left.
        let mut p = Path::polygon(&[
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(0.0, 10.0),
        ]);
        p.place_into_rect(Rectangle::new(Point::new(10.0, 0.0), Point::new(0.0, 10.0)));
        // Right angle now at the top-right.
        assert!((p.points[0].pos.x - 10.0).abs() < EPS);
        assert!(p.points[0].pos.y.abs() < EPS);
    }

    #[test]
    fn test_place_into_zero_width_rect() {
        let mut p = unit_square();
        p.place_into_rect(Rectangle::new(Point::new(5.0, 5.0), Point::new(5.0, 9.0)));
        let r = p.bound_rect().unwrap();
        assert!((r.from.x - 5.0).abs() < EPS);
        assert!((r.width() - 1.0).abs() < EPS);
        assert!((r.height() - 4.0).abs() < EPS);
    }

    #[test]
    fn test_mirror_involution() {
        let original = Path::star(Point::new(7.0, -2.0), 6.0, 3.0, 4, 0.2);
        let mut p = original.clone();
        p.mirror(Orientation::Horizontal);
        p.mirror(Orientation::Horizontal);
        for (a, b) in p.points.iter().zip(&original.points) {
            assert!((a.pos.x - b.pos.x).abs() < EPS);
            assert!((a.pos.y - b.pos.y).abs() < EPS);
        }
    }

    #[test]
    fn test_align() {
        let rect = Rectangle::new(Point::new(0.0, 0.0), Point::new(100.0, 50.0));
        let mut p = unit_square();
        p.move_by(20.0, 20.0);

        p.align(AlignBase::Right, &rect);
        assert_rect(p.bound_rect().unwrap(), 99.0, 20.0, 100.0, 21.0);
        p.align(AlignBase::Center, &rect);
        assert_rect(p.bound_rect().unwrap(), 49.5, 20.0, 50.5, 21.0);
        p.align(AlignBase::Bottom, &rect);
        assert_rect(p.bound_rect().unwrap(), 49.5, 49.0, 50.5, 50.0);
        p.align(AlignBase::Vert, &rect);
        assert_rect(p.bound_rect().unwrap(), 49.5, 24.5, 50.5, 25.5);
        p.align(AlignBase::Left, &rect);
        p.align(AlignBase::Top, &rect);
        assert_rect(p.bound_rect().unwrap(), 0.0, 0.0, 1.0, 1.0);
    }

    #[test]
    fn test_cubic_bounds_use_midpoints() {
        let p = Path::new(
            vec![
                PathPoint::new(0.0, 0.0).with_next(0.0, 8.0),
                PathPoint::new(10.0, 0.0).with_prev(10.0, 8.0),
            ],
            false,
        );
        let r = p.bound_rect().unwrap();
        // m1 = (0,4), m3 = (5,8), m2 = (2.5,6): max y comes from the subdivision.
        assert!((r.to.y - 6.0).abs() < EPS);
        assert!((r.from.x - 0.0).abs() < EPS);
        assert!((r.to.x - 10.0).abs() < EPS);
    }

    #[test]
    fn test_quadratic_bounds_use_leg_midpoints() {
        let p = Path::new(
            vec![
                PathPoint::new(0.0, 0.0),
                PathPoint::new(10.0, 0.0).with_prev(5.0, -10.0),
            ],
            false,
        );
        let r = p.bound_rect().unwrap();
        assert!((r.from.y + 5.0).abs() < EPS);
    }

    #[test]
    fn test_segments_replay() {
        let p = Path::new(
            vec![
                PathPoint::new(0.0, 0.0).with_next(1.0, 0.0),
                PathPoint::new(2.0, 0.0).with_prev(2.0, 1.0),
                PathPoint::new(2.0, 2.0).with_prev(1.0, 2.0),
                PathPoint::new(0.0, 2.0),
                PathPoint::move_to(5.0, 5.0),
                PathPoint::new(6.0, 5.0),
            ],
            true,
        );
        let segs = p.segments();
        assert_eq!(segs.len(), 7);
        assert_eq!(segs[0], Segment::MoveTo(Point::new(0.0, 0.0)));
        assert_eq!(
            segs[1],
            Segment::CurveTo(Point::new(1.0, 0.0), Point::new(2.0, 1.0), Point::new(2.0, 0.0))
        );
        assert_eq!(segs[2], Segment::QuadTo(Point::new(1.0, 2.0), Point::new(2.0, 2.0)));
        assert_eq!(segs[3], Segment::LineTo(Point::new(0.0, 2.0)));
        assert_eq!(segs[4], Segment::MoveTo(Point::new(5.0, 5.0)));
        assert_eq!(segs[5], Segment::LineTo(Point::new(6.0, 5.0)));
        assert_eq!(segs[6], Segment::LineTo(Point::new(0.0, 0.0)));
    }

    #[test]
    fn test_single_point_has_no_segments() {
        let p = Path::polygon(&[Point::new(1.0, 1.0)]);
        assert!(p.segments().is_empty());
        assert!(!p.contains(Point::new(1.0, 1.0)));
    }

    #[test]
    fn test_transform_moves_control_points() {
        let mut p = Path::ellipse(Point::new(0.0, 0.0), 4.0, 2.0);
        p.move_by(10.0, 0.0);
        let top = p.points[0];
        assert!((top.pos.x - 10.0).abs() < EPS);
        assert!((top.prev.unwrap().x - 8.0).abs() < EPS);
        assert!((top.next.unwrap().x - 12.0).abs() < EPS);
    }

    #[test]
    fn test_ellipse_hit_test() {
        let p = Path::ellipse(Point::new(50.0, 50.0), 20.0, 10.0);
        assert!(p.contains(Point::new(50.0, 50.0)));
        assert!(p.contains(Point::new(65.0, 50.0)));
        assert!(!p.contains(Point::new(50.0, 65.0)));
        assert!(!p.contains(Point::new(72.0, 50.0)));
    }

    #[test]
    fn test_star_vertices() {
        let p = Path::star(Point::new(0.0, 0.0), 10.0, 5.0, 5, 0.0);
        assert_eq!(p.len(), 10);
        assert!(p.closed);
        // First outer vertex points toward +y.
        assert!(p.points[0].pos.x.abs() < EPS);
        assert!((p.points[0].pos.y - 10.0).abs() < EPS);
        assert!((p.points[1].pos.dist_to(Point::ORIGIN) - 5.0).abs() < EPS);
    }

    #[test]
    fn test_from_bez_path() {
        let mut bez = BezPath::new();
        bez.move_to((0.0, 0.0));
        bez.curve_to((1.0, 0.0), (2.0, 1.0), (2.0, 2.0));
        bez.line_to((0.0, 2.0));
        bez.close_path();
        bez.move_to((5.0, 5.0));
        bez.quad_to((6.0, 4.0), (7.0, 5.0));

        let p = Path::from_bez_path(&bez);
        assert!(p.closed);
        assert_eq!(p.len(), 5);
        assert!(!p.points[0].mv);
        assert_eq!(p.points[0].next, Some(Point::new(1.0, 0.0)));
        assert_eq!(p.points[1].prev, Some(Point::new(2.0, 1.0)));
        assert!(p.points[3].mv);
        assert_eq!(p.points[4].prev, Some(Point::new(6.0, 4.0)));
    }

    #[test]
    fn test_to_bez_path_closes() {
        let bez = unit_square().to_bez_path();
        let els = bez.elements();
        assert_eq!(els.len(), 6);
        assert_eq!(els[5], PathEl::ClosePath);
    }
}
