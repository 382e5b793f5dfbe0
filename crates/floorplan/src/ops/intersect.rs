//! Intersection-aware line insertion.
//!
//! A new wall never crosses or overlaps an existing one: crossed walls are
//! split at the crossing, colinear overlapping walls are absorbed into the
//! new wall, and the new wall itself is cut at every split point.
//!
//! Walls absorbed this way hand their holes over as `CarriedHole`s, which are
//! re-seated on the resulting pieces by absolute position.

use tracing::{debug, warn};

use crate::error::{PlanError, PlanResult};
use crate::geometry::{
    classify_segments, is_point_on_segment, min_vertex, order_vertices,
    point_position_on_segment, same_points, Point, SegmentIntersection,
};
use crate::ids::LineId;
use crate::model::{Batch, Properties};

/// A hole detached from a removed wall, waiting to be placed again.
#[derive(Clone, Debug, PartialEq)]
pub struct CarriedHole {
    pub kind: String,
    pub properties: Properties,
    pub position: Point,
}

impl Batch<'_> {
    /// Insert the wall `from → to` without creating crossings.
    ///
    /// Returns the lines created for the new wall in canonical order, from the
    /// lower (x, then y) end to the upper end regardless of the direction of
    /// `from → to`; each line is stored lower endpoint first.
    pub fn add_line_avoiding_intersections(
        &mut self,
        kind: &str,
        from: Point,
        to: Point,
        properties: &Properties,
        carried: Vec<CarriedHole>,
    ) -> PlanResult<Vec<LineId>> {
        if same_points(from, to) {
            return Err(PlanError::DegenerateGeometry(format!(
                "wall endpoints coincide at ({}, {})",
                from.x, from.y
            )));
        }
        let mut points = vec![from, to];
        let mut carried = carried;
        let existing: Vec<LineId> = self.layer.lines.keys().copied().collect();
        for line_id in existing {
            if !self.layer.lines.contains_key(&line_id) {
                continue;
            }
            let (v0, v1) = self.layer.line_points(line_id)?;
            match classify_segments(from, to, v0, v1) {
                SegmentIntersection::None => {}
                SegmentIntersection::Colinear => {
                    carried.extend(self.carry_holes(line_id)?);
                    self.remove_line(line_id)?;
                    points.push(v0);
                    points.push(v1);
                }
                SegmentIntersection::Point(p) => {
                    let shared_end = [from, to]
                        .iter()
                        .any(|&e| same_points(e, v0) || same_points(e, v1));
                    if shared_end {
                        continue;
                    }
                    // a crossing through an endpoint of the old wall needs no split
                    if !same_points(p, v0) && !same_points(p, v1) {
                        self.split_line(line_id, p)?;
                    }
                    points.push(p);
                }
            }
        }
        let lines = self.add_lines_from_points(kind, points, properties, carried)?;
        debug!(kind, pieces = lines.len(), "wall inserted");
        Ok(lines)
    }

    /// Chain colinear points into consecutive lines and re-seat `carried`.
    ///
    /// Points are sorted from the lower canonical end, so the lines come back
    /// in that order, each stored lower endpoint first.
    pub fn add_lines_from_points(
        &mut self,
        kind: &str,
        points: Vec<Point>,
        properties: &Properties,
        carried: Vec<CarriedHole>,
    ) -> PlanResult<Vec<LineId>> {
        let Some(&first) = points.first() else {
            return Ok(Vec::new());
        };
        let lo = points.iter().fold(first, |m, &p| min_vertex(m, p));
        let hi = points.iter().fold(first, |m, &p| order_vertices(m, p).1);
        let dir = hi - lo;
        let mut points = points;
        points.sort_by(|a, b| {
            let ta = (a - lo).dot(&dir);
            let tb = (b - lo).dot(&dir);
            ta.partial_cmp(&tb).unwrap_or(std::cmp::Ordering::Equal)
        });
        points.dedup_by(|a, b| same_points(*a, *b));

        let mut lines = Vec::with_capacity(points.len().saturating_sub(1));
        for pair in points.windows(2) {
            lines.push(self.add_line(kind, pair[0], pair[1], properties)?);
        }

        for hole in carried {
            let mut seat = None;
            for &line in &lines {
                let (a, b) = self.layer.line_points_ordered(line)?;
                if is_point_on_segment(a, b, hole.position) {
                    let t = point_position_on_segment(a, b, hole.position).clamp(0.0, 1.0);
                    seat = Some((line, t));
                    break;
                }
            }
            match seat {
                Some((line, t)) => {
                    self.add_hole(&hole.kind, line, t, &hole.properties)?;
                }
                None => warn!(
                    kind = %hole.kind,
                    x = hole.position.x,
                    y = hole.position.y,
                    "carried hole fits no new wall, dropped"
                ),
            }
        }
        Ok(lines)
    }

    /// Snapshot the holes of a line before the line is removed.
    fn carry_holes(&self, line: LineId) -> PlanResult<Vec<CarriedHole>> {
        self.layer
            .line(line)?
            .holes
            .iter()
            .map(|&h| {
                let hole = self.layer.hole(h)?;
                Ok(CarriedHole {
                    kind: hole.kind.clone(),
                    properties: hole.properties.clone(),
                    position: self.layer.hole_position(h)?,
                })
            })
            .collect()
    }
}
