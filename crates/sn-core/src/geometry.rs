//! Planar geometry for pipe polylines.
//!
//! Only what inline splitting needs: polyline length, point projection and
//! splitting a polyline at a projected point. Coordinates are projected
//! (planar) meters; no geodesy happens here.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Real;

/// A position in projected coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: Real,
    pub y: Real,
}

impl Point {
    pub fn new(x: Real, y: Real) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> Real {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Closest point on a polyline to some query point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Foot point on the polyline.
    pub point: Point,
    /// Distance from the query point to `point`.
    pub distance: Real,
    /// Index of the segment `[segment, segment + 1]` holding `point`.
    pub segment: usize,
    /// Length along the polyline from its first vertex to `point`.
    pub chainage: Real,
}

/// Total length of a polyline.
pub fn polyline_length(points: &[Point]) -> Real {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}

/// Project `query` onto the polyline. Returns `None` for fewer than two vertices.
///
/// Ties go to the earliest segment, which keeps the result deterministic.
pub fn project(points: &[Point], query: Point) -> Option<Projection> {
    let mut best: Option<Projection> = None;
    let mut walked = 0.0;

    for (segment, w) in points.windows(2).enumerate() {
        let (a, b) = (w[0], w[1]);
        let dx = b.x - a.x;
        let dy = b.y - a.y;
        let seg_len_sq = dx * dx + dy * dy;
        let t = if seg_len_sq > 0.0 {
            (((query.x - a.x) * dx + (query.y - a.y) * dy) / seg_len_sq).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let foot = Point::new(a.x + t * dx, a.y + t * dy);
        let seg_len = seg_len_sq.sqrt();
        let candidate = Projection {
            point: foot,
            distance: foot.distance(query),
            segment,
            chainage: walked + t * seg_len,
        };
        if best.is_none_or(|b| candidate.distance < b.distance) {
            best = Some(candidate);
        }
        walked += seg_len;
    }

    best
}

/// Split a polyline at a projection obtained from [`project`] on the same polyline.
///
/// Returns the part before and the part after the split point; both contain the
/// split point as a vertex.
pub fn split(points: &[Point], at: &Projection) -> (Vec<Point>, Vec<Point>) {
    let mut head: Vec<Point> = points[..=at.segment].to_vec();
    if head.last() != Some(&at.point) {
        head.push(at.point);
    }

    let mut tail = vec![at.point];
    for &p in &points[at.segment + 1..] {
        if tail.last() != Some(&p) {
            tail.push(p);
        }
    }

    (head, tail)
}
