//! Point-in-path testing.
//!
//! Curves are flattened into polylines and every sub-path is closed
//! implicitly, matching how a 2D canvas fills an open path.

use super::Segment;
use kurbo::{PathEl, Point};

/// Flattening tolerance used for hit testing.
pub const FLATTEN_TOLERANCE: f64 = 0.1;

/// Nonzero winding test of `p` against the given segments.
pub fn contains(segments: &[Segment], p: Point) -> bool {
    winding(segments, p) != 0
}

/// Winding number of the flattened segments around `p`.
pub fn winding(segments: &[Segment], p: Point) -> i32 {
    let mut total = 0;
    let mut start: Option<Point> = None;
    let mut last: Option<Point> = None;

    kurbo::flatten(
        segments.iter().map(Segment::to_path_el),
        FLATTEN_TOLERANCE,
        |el| match el {
            PathEl::MoveTo(q) => {
                if let (Some(s), Some(l)) = (start, last) {
                    total += edge_winding(l, s, p);
                }
                start = Some(q);
                last = Some(q);
            }
            PathEl::LineTo(q) => {
                if let Some(l) = last {
                    total += edge_winding(l, q, p);
                }
                last = Some(q);
            }
            PathEl::ClosePath => {
                if let (Some(s), Some(l)) = (start, last) {
                    total += edge_winding(l, s, p);
                }
                last = start;
            }
            _ => {}
        },
    );

    if let (Some(s), Some(l)) = (start, last) {
        total += edge_winding(l, s, p);
    }
    total
}

/// Signed crossing of edge `a -> b` with the ray from `p` toward +x.
fn edge_winding(a: Point, b: Point, p: Point) -> i32 {
    let cross = (b.x - a.x) * (p.y - a.y) - (p.x - a.x) * (b.y - a.y);
    if a.y <= p.y {
        if b.y > p.y && cross > 0.0 {
            return 1;
        }
    } else if b.y <= p.y && cross < 0.0 {
        return -1;
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x0: f64, y0: f64, size: f64) -> Vec<Segment> {
        vec![
            Segment::MoveTo(Point::new(x0, y0)),
            Segment::LineTo(Point::new(x0 + size, y0)),
            Segment::LineTo(Point::new(x0 + size, y0 + size)),
            Segment::LineTo(Point::new(x0, y0 + size)),
        ]
    }

    #[test]
    fn test_open_subpath_is_closed_implicitly() {
        let segs = square(0.0, 0.0, 10.0);
        assert!(contains(&segs, Point::new(5.0, 5.0)));
        assert!(!contains(&segs, Point::new(15.0, 5.0)));
        assert!(!contains(&segs, Point::new(5.0, -1.0)));
    }

    #[test]
    fn test_nonzero_same_direction_overlap() {
        let mut segs = square(0.0, 0.0, 10.0);
        segs.extend(square(2.0, 2.0, 4.0));
        assert_eq!(winding(&segs, Point::new(3.0, 3.0)).abs(), 2);
        assert!(contains(&segs, Point::new(3.0, 3.0)));
    }

    #[test]
    fn test_opposite_direction_hole() {
        let mut segs = square(0.0, 0.0, 10.0);
        segs.extend([
            Segment::MoveTo(Point::new(2.0, 2.0)),
            Segment::LineTo(Point::new(2.0, 6.0)),
            Segment::LineTo(Point::new(6.0, 6.0)),
            Segment::LineTo(Point::new(6.0, 2.0)),
        ]);
        assert!(!contains(&segs, Point::new(3.0, 3.0)));
        assert!(contains(&segs, Point::new(8.0, 8.0)));
    }

    #[test]
    fn test_curve_is_flattened() {
        // Quadratic bulge to the right of the x = 0 chord.
        let segs = vec![
            Segment::MoveTo(Point::new(0.0, 0.0)),
            Segment::QuadTo(Point::new(20.0, 5.0), Point::new(0.0, 10.0)),
        ];
        assert!(contains(&segs, Point::new(5.0, 5.0)));
        assert!(!contains(&segs, Point::new(11.0, 5.0)));
    }

    #[test]
    fn test_empty_contains_nothing() {
        assert!(!contains(&[], Point::new(0.0, 0.0)));
    }
}
