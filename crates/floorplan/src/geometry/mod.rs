//! Planar geometry kernel for wall graphs.
//!
//! Purpose
//! - Pure numeric predicates used by every structural edit: tolerant point
//!   equality, segment/segment classification, parametric offsets along a
//!   segment, and the canonical ordering of segment endpoints.
//! - No state. Everything takes `Point`s (nalgebra `Vector2<f64>`).
//!
//! Conventions
//! - Tolerances are the fixed constants in `cfg`; callers never pass epsilons.
//! - The canonical ("lower") endpoint of a segment is the lexicographic minimum
//!   by x, then y. Hole offsets are measured from it.
//!
//! Code cross-refs: `ops::intersect` (classification), `model::Layer::hole_position`.

pub mod cfg;
mod segment;
mod types;

pub use segment::{
    classify_segments, cross, is_point_on_segment, min_vertex, order_vertices, point_at,
    point_position_on_segment, points_distance, polygon_signed_area, same_points,
};
pub use types::{Point, SegmentIntersection};

#[cfg(test)]
mod tests;
