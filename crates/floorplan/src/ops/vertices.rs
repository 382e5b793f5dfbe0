//! Vertex creation, detachment and coincident-vertex merging.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::error::{PlanError, PlanResult};
use crate::geometry::{same_points, Point};
use crate::ids::{LineId, VertexId};
use crate::model::{insert_unique, Batch, ElementRef, Related, Vertex};

impl Batch<'_> {
    /// The vertex at `at`, created with empty adjacency if none exists.
    pub fn add_vertex(&mut self, at: Point) -> VertexId {
        if let Some(id) = self.layer.find_vertex_at(at) {
            return id;
        }
        let id = VertexId(self.acquire_id());
        let vertex = Vertex {
            id,
            x: at.x,
            y: at.y,
            lines: BTreeSet::new(),
            areas: BTreeSet::new(),
            selected: false,
        };
        insert_unique(&mut self.layer.vertices, id, vertex);
        id
    }

    /// `add_vertex` plus a back-reference from `related`.
    pub fn attach_vertex(&mut self, at: Point, related: Related) -> VertexId {
        let id = self.add_vertex(at);
        if let Some(v) = self.layer.vertices.get_mut(&id) {
            match related {
                Related::Line(l) => {
                    v.lines.insert(l);
                }
                Related::Area(a) => {
                    v.areas.insert(a);
                }
            }
        }
        id
    }

    /// Drop one reference; the vertex goes away with its last reference.
    pub fn remove_vertex(&mut self, id: VertexId, related: Related) -> PlanResult<()> {
        let v = self
            .layer
            .vertices
            .get_mut(&id)
            .ok_or_else(|| PlanError::not_found("vertex", id))?;
        match related {
            Related::Line(l) => {
                v.lines.remove(&l);
            }
            Related::Area(a) => {
                v.areas.remove(&a);
            }
        }
        if v.is_orphan() {
            self.layer.vertices.remove(&id);
            self.layer.selected.remove(ElementRef::Vertex(id));
        }
        Ok(())
    }

    /// Fold every other vertex at the position of `id` into `id`.
    ///
    /// Lines and areas of a duplicate are re-pointed at the survivor. A line
    /// whose two endpoints end up on the survivor is removed, and lines of the
    /// survivor that join the same vertex pair are folded into one. Returns
    /// the IDs of the merged duplicates (empty when there were none).
    pub fn merge_equal_vertices(&mut self, id: VertexId) -> PlanResult<Vec<VertexId>> {
        let at = self.layer.vertex(id)?.point();
        let doubles: Vec<VertexId> = self
            .layer
            .vertices
            .values()
            .filter(|v| v.id != id && same_points(v.point(), at))
            .map(|v| v.id)
            .collect();
        if doubles.is_empty() {
            self.fold_duplicate_lines(id)?;
            return Ok(doubles);
        }

        let mut collapsed: Vec<LineId> = Vec::new();
        for dup in &doubles {
            let Some(double) = self.layer.vertices.remove(dup) else {
                continue;
            };
            self.layer.selected.remove(ElementRef::Vertex(*dup));
            for line_id in &double.lines {
                if let Some(line) = self.layer.lines.get_mut(line_id) {
                    for v in line.vertices.iter_mut().filter(|v| **v == *dup) {
                        *v = id;
                    }
                    if line.vertices[0] == line.vertices[1] {
                        collapsed.push(*line_id);
                    }
                }
            }
            for area_id in &double.areas {
                if let Some(area) = self.layer.areas.get_mut(area_id) {
                    for v in area.vertices.iter_mut().filter(|v| **v == *dup) {
                        *v = id;
                    }
                    area.vertices.dedup();
                    if area.vertices.len() > 1 && area.vertices.first() == area.vertices.last() {
                        area.vertices.pop();
                    }
                }
            }
            if let Some(survivor) = self.layer.vertices.get_mut(&id) {
                survivor.lines.extend(double.lines.iter().copied());
                survivor.areas.extend(double.areas.iter().copied());
            }
        }
        for line_id in collapsed {
            self.remove_line(line_id)?;
        }
        self.fold_duplicate_lines(id)?;
        debug!(vertex = %id, merged = doubles.len(), "merged coincident vertices");
        Ok(doubles)
    }

    /// Lines at `at` joining the same vertex pair collapse onto the lowest
    /// line ID, which takes over their holes.
    fn fold_duplicate_lines(&mut self, at: VertexId) -> PlanResult<Vec<LineId>> {
        let Some(vertex) = self.layer.vertices.get(&at) else {
            return Ok(Vec::new());
        };
        let mut keepers: BTreeMap<(VertexId, VertexId), LineId> = BTreeMap::new();
        let mut doubles: Vec<(LineId, LineId)> = Vec::new();
        for &line_id in &vertex.lines {
            let [a, b] = self.layer.line(line_id)?.vertices;
            let pair = (a.min(b), a.max(b));
            match keepers.get(&pair) {
                Some(&keeper) => doubles.push((line_id, keeper)),
                None => {
                    keepers.insert(pair, line_id);
                }
            }
        }
        let mut folded = Vec::with_capacity(doubles.len());
        for (double, keeper) in doubles {
            // same vertex pair, same lower endpoint: offsets carry over as is
            let holes = self.layer.line(double)?.holes.clone();
            for hole in holes {
                let offset = self.layer.hole(hole)?.offset;
                self.rebind_hole(hole, keeper, offset)?;
            }
            self.remove_line(double)?;
            debug!(line = %double, into = %keeper, "folded duplicate line");
            folded.push(double);
        }
        Ok(folded)
    }
}
