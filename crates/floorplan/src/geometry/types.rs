//! Basic geometry types.

use nalgebra::Vector2;

/// A point (or direction) in the drawing plane.
pub type Point = Vector2<f64>;

/// Outcome of classifying two closed segments against each other.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SegmentIntersection {
    /// Disjoint, or parallel on distinct lines.
    None,
    /// A single crossing or touching point.
    Point(Point),
    /// Both segments lie on one infinite line and their ranges overlap
    /// (touching at an endpoint counts).
    Colinear,
}

impl SegmentIntersection {
    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, SegmentIntersection::None)
    }
    #[inline]
    pub fn point(self) -> Option<Point> {
        if let SegmentIntersection::Point(p) = self {
            Some(p)
        } else {
            None
        }
    }
}
