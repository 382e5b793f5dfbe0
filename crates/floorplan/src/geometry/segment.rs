//! Segment predicates and canonical ordering.

use std::cmp::Ordering;

use super::cfg::{DET_EPS, POINT_EPS};
use super::types::{Point, SegmentIntersection};

/// Coordinate-wise equality under `POINT_EPS`.
#[inline]
pub fn same_points(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < POINT_EPS && (a.y - b.y).abs() < POINT_EPS
}

#[inline]
pub fn points_distance(a: Point, b: Point) -> f64 {
    (b - a).norm()
}

/// z-component of the 3D cross product of two plane vectors.
#[inline]
pub fn cross(a: Point, b: Point) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Lexicographic comparison (x, then y) with `POINT_EPS` ties on x.
fn lexicographic(a: Point, b: Point) -> Ordering {
    if (a.x - b.x).abs() >= POINT_EPS {
        a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal)
    } else {
        a.y.partial_cmp(&b.y).unwrap_or(Ordering::Equal)
    }
}

/// The canonical lower endpoint of the unordered pair `{a, b}`.
#[inline]
pub fn min_vertex(a: Point, b: Point) -> Point {
    if lexicographic(a, b) == Ordering::Greater {
        b
    } else {
        a
    }
}

/// `(lower, upper)` in canonical order.
#[inline]
pub fn order_vertices(a: Point, b: Point) -> (Point, Point) {
    if lexicographic(a, b) == Ordering::Greater {
        (b, a)
    } else {
        (a, b)
    }
}

/// Parametric offset of the projection of `point` onto the line `p0 → p1`.
///
/// 0 at `p0`, 1 at `p1`; values outside `[0, 1]` are beyond the segment.
/// A zero-length segment yields 0.
pub fn point_position_on_segment(p0: Point, p1: Point, point: Point) -> f64 {
    let d = p1 - p0;
    let len2 = d.norm_squared();
    if len2 <= POINT_EPS * POINT_EPS {
        return 0.0;
    }
    (point - p0).dot(&d) / len2
}

/// Point at parameter `t` along `p0 → p1`.
#[inline]
pub fn point_at(p0: Point, p1: Point, t: f64) -> Point {
    p0 + (p1 - p0) * t
}

/// True when `point` lies on the closed segment within `POINT_EPS`.
pub fn is_point_on_segment(p0: Point, p1: Point, point: Point) -> bool {
    let d = p1 - p0;
    let len = d.norm();
    if len <= POINT_EPS {
        return same_points(p0, point);
    }
    let t = point_position_on_segment(p0, p1, point);
    let tol = POINT_EPS / len;
    if t < -tol || t > 1.0 + tol {
        return false;
    }
    cross(d, point - p0).abs() / len <= POINT_EPS
}

/// Classify segment `p0p1` against `q0q1`.
///
/// Crossing points within `POINT_EPS` of any endpoint are snapped onto that
/// endpoint so downstream vertex deduplication sees exact coordinates.
pub fn classify_segments(p0: Point, p1: Point, q0: Point, q1: Point) -> SegmentIntersection {
    let r = p1 - p0;
    let s = q1 - q0;
    let r_len = r.norm();
    let s_len = s.norm();
    if r_len <= POINT_EPS || s_len <= POINT_EPS {
        return SegmentIntersection::None;
    }
    let qp = q0 - p0;
    let denom = cross(r, s);

    if denom.abs() <= DET_EPS * r_len * s_len {
        // parallel: same infinite line?
        if cross(r, qp).abs() / r_len > POINT_EPS {
            return SegmentIntersection::None;
        }
        let rr = r_len * r_len;
        let t0 = qp.dot(&r) / rr;
        let t1 = (q1 - p0).dot(&r) / rr;
        let (lo, hi) = if t0 <= t1 { (t0, t1) } else { (t1, t0) };
        let tol = POINT_EPS / r_len;
        if hi < -tol || lo > 1.0 + tol {
            return SegmentIntersection::None;
        }
        return SegmentIntersection::Colinear;
    }

    let t = cross(qp, s) / denom;
    let u = cross(qp, r) / denom;
    let tol_t = POINT_EPS / r_len;
    let tol_u = POINT_EPS / s_len;
    if t < -tol_t || t > 1.0 + tol_t || u < -tol_u || u > 1.0 + tol_u {
        return SegmentIntersection::None;
    }
    let hit = point_at(p0, p1, t);
    let snapped = [p0, p1, q0, q1]
        .into_iter()
        .find(|e| same_points(*e, hit))
        .unwrap_or(hit);
    SegmentIntersection::Point(snapped)
}

/// Shoelace signed area; positive for counterclockwise rings.
pub fn polygon_signed_area(ring: &[Point]) -> f64 {
    let n = ring.len();
    if n < 3 {
        return 0.0;
    }
    let mut acc = 0.0;
    for i in 0..n {
        acc += cross(ring[i], ring[(i + 1) % n]);
    }
    0.5 * acc
}
