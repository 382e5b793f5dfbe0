//! Line creation, removal, endpoint replacement and splitting.

use tracing::debug;

use crate::error::{PlanError, PlanResult};
use crate::geometry::{is_point_on_segment, point_position_on_segment, same_points, Point};
use crate::ids::{HoleId, LineId, VertexId};
use crate::model::{insert_unique, Batch, Category, ElementRef, Line, Properties, Related};

impl Batch<'_> {
    /// New line of `kind` from `from` to `to`, reusing vertices at either end.
    pub fn add_line(
        &mut self,
        kind: &str,
        from: Point,
        to: Point,
        properties: &Properties,
    ) -> PlanResult<LineId> {
        if same_points(from, to) {
            return Err(PlanError::DegenerateGeometry(format!(
                "line endpoints coincide at ({}, {})",
                from.x, from.y
            )));
        }
        let properties = self.factory(Category::Lines, kind, properties)?;
        let id = LineId(self.acquire_id());
        let v0 = self.attach_vertex(from, Related::Line(id));
        let v1 = self.attach_vertex(to, Related::Line(id));
        let line = Line {
            id,
            kind: kind.to_string(),
            vertices: [v0, v1],
            holes: Vec::new(),
            properties,
            selected: false,
        };
        insert_unique(&mut self.layer.lines, id, line);
        Ok(id)
    }

    /// Remove a line with its holes; endpoints lose one reference each.
    pub fn remove_line(&mut self, id: LineId) -> PlanResult<()> {
        let line = self.layer.line(id)?.clone();
        for hole in &line.holes {
            self.remove_hole(*hole)?;
        }
        let mut ends = line.vertices.to_vec();
        ends.dedup();
        for v in ends {
            self.remove_vertex(v, Related::Line(id))?;
        }
        self.layer.lines.remove(&id);
        self.layer.selected.remove(ElementRef::Line(id));
        Ok(())
    }

    /// Move endpoint `endpoint` (0 or 1) of a line to `to`.
    ///
    /// The new vertex is attached before the old one is released, so a vertex
    /// shared with other lines survives. Holes keep their relative offsets.
    pub fn replace_line_vertex(
        &mut self,
        line_id: LineId,
        endpoint: usize,
        to: Point,
    ) -> PlanResult<VertexId> {
        if endpoint > 1 {
            return Err(PlanError::ConstraintViolation(format!(
                "line endpoint index {endpoint} is not 0 or 1"
            )));
        }
        let line = self.layer.line(line_id)?;
        let old = line.vertices[endpoint];
        let other = self.layer.vertex(line.vertices[1 - endpoint])?.point();
        if same_points(other, to) {
            return Err(PlanError::DegenerateGeometry(format!(
                "moving an endpoint of {line_id} onto its other endpoint"
            )));
        }
        let new = self.attach_vertex(to, Related::Line(line_id));
        if new != old {
            if let Some(line) = self.layer.lines.get_mut(&line_id) {
                line.vertices[endpoint] = new;
            }
            self.remove_vertex(old, Related::Line(line_id))?;
        }
        Ok(new)
    }

    /// Split a line at an interior point into `(v0 → at, v1 → at)`.
    ///
    /// Both halves keep the kind and properties of the original. Holes keep
    /// their IDs and absolute positions; a hole exactly at `at` stays on the
    /// first half.
    pub fn split_line(&mut self, line_id: LineId, at: Point) -> PlanResult<(LineId, LineId)> {
        let line = self.layer.line(line_id)?.clone();
        let (p0, p1) = self.layer.line_points(line_id)?;
        if same_points(at, p0) || same_points(at, p1) {
            return Err(PlanError::DegenerateGeometry(format!(
                "split point ({}, {}) is an endpoint of {line_id}",
                at.x, at.y
            )));
        }
        if !is_point_on_segment(p0, p1, at) {
            return Err(PlanError::ConstraintViolation(format!(
                "split point ({}, {}) is not on {line_id}",
                at.x, at.y
            )));
        }
        let positions = line
            .holes
            .iter()
            .map(|&h| Ok((h, self.layer.hole_position(h)?)))
            .collect::<PlanResult<Vec<(HoleId, Point)>>>()?;

        let first = self.add_line(&line.kind, p0, at, &line.properties)?;
        let second = self.add_line(&line.kind, p1, at, &line.properties)?;
        for (hole, position) in positions {
            let (lo, hi) = self.layer.line_points_ordered(first)?;
            let target = if is_point_on_segment(lo, hi, position) {
                (first, point_position_on_segment(lo, hi, position))
            } else {
                let (lo, hi) = self.layer.line_points_ordered(second)?;
                (second, point_position_on_segment(lo, hi, position))
            };
            self.rebind_hole(hole, target.0, target.1.clamp(0.0, 1.0))?;
        }
        self.remove_line(line_id)?;
        debug!(line = %line_id, %first, %second, "split line");
        Ok((first, second))
    }
}
