//! Consistency checks for a layer at rest.
//!
//! Covers the model invariants: unique vertex positions, exact vertex
//! back-references with no orphans, one line per vertex pair, hole/line
//! binding, areas matching faces of the wall graph, and selection flags
//! mirroring the selection index.

use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;

use crate::faces::inner_cycles;
use crate::geometry::{same_points, Point};
use crate::ids::{AreaId, HoleId, LineId, VertexId};

use super::layer::Layer;
use super::types::ElementRef;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("vertices {0} and {1} share a position")]
    CoincidentVertices(VertexId, VertexId),
    #[error("vertex {0} back-references disagree with lines/areas")]
    BackReferenceMismatch(VertexId),
    #[error("vertex {0} is referenced by nothing")]
    OrphanVertex(VertexId),
    #[error("line {0} references a missing vertex")]
    LineDanglingVertex(LineId),
    #[error("line {0} has coincident endpoints")]
    DegenerateLine(LineId),
    #[error("line {0} joins the same vertices as line {1}")]
    DuplicateLine(LineId, LineId),
    #[error("hole {0} is not bound to its line exactly once")]
    HoleBinding(HoleId),
    #[error("hole {0} offset {1} outside [0, 1]")]
    HoleOffset(HoleId, f64),
    #[error("area {0} is not a closed cycle of distinct existing vertices")]
    MalformedArea(AreaId),
    #[error("area {0} is not a face of the wall graph")]
    StaleArea(AreaId),
    #[error("a face of the wall graph has no area")]
    MissingArea,
    #[error("selection flag of {0:?} disagrees with the selection index")]
    SelectionMismatch(ElementRef),
}

/// Collected violations.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn add(&mut self, e: ValidationError) {
        self.errors.push(e);
    }
}

impl Layer {
    /// Check every model invariant.
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::default();
        self.validate_vertices(&mut report);
        self.validate_lines(&mut report);
        self.validate_holes(&mut report);
        self.validate_areas(&mut report);
        self.validate_selection(&mut report);
        report
    }

    fn validate_vertices(&self, report: &mut ValidationReport) {
        let mut line_refs: BTreeMap<VertexId, BTreeSet<LineId>> = BTreeMap::new();
        for line in self.lines.values() {
            for v in line.vertices {
                line_refs.entry(v).or_default().insert(line.id);
            }
        }
        let mut area_refs: BTreeMap<VertexId, BTreeSet<AreaId>> = BTreeMap::new();
        for area in self.areas.values() {
            for &v in &area.vertices {
                area_refs.entry(v).or_default().insert(area.id);
            }
        }
        let empty_l = BTreeSet::new();
        let empty_a = BTreeSet::new();
        for v in self.vertices.values() {
            if v.is_orphan() {
                report.add(ValidationError::OrphanVertex(v.id));
            }
            let lines = line_refs.get(&v.id).unwrap_or(&empty_l);
            let areas = area_refs.get(&v.id).unwrap_or(&empty_a);
            if &v.lines != lines || &v.areas != areas {
                report.add(ValidationError::BackReferenceMismatch(v.id));
            }
        }
        let all: Vec<_> = self.vertices.values().collect();
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                if same_points(a.point(), b.point()) {
                    report.add(ValidationError::CoincidentVertices(a.id, b.id));
                }
            }
        }
    }

    fn validate_lines(&self, report: &mut ValidationReport) {
        let mut pairs: BTreeMap<(VertexId, VertexId), LineId> = BTreeMap::new();
        for line in self.lines.values() {
            let [a, b] = line.vertices;
            if let Some(&first) = pairs.get(&(a.min(b), a.max(b))) {
                report.add(ValidationError::DuplicateLine(line.id, first));
            } else {
                pairs.insert((a.min(b), a.max(b)), line.id);
            }
            match (self.vertices.get(&a), self.vertices.get(&b)) {
                (Some(va), Some(vb)) => {
                    if a == b || same_points(va.point(), vb.point()) {
                        report.add(ValidationError::DegenerateLine(line.id));
                    }
                }
                _ => report.add(ValidationError::LineDanglingVertex(line.id)),
            }
        }
    }

    fn validate_holes(&self, report: &mut ValidationReport) {
        for hole in self.holes.values() {
            let bound = self
                .lines
                .get(&hole.line)
                .map(|l| l.holes.iter().filter(|&&h| h == hole.id).count() == 1)
                .unwrap_or(false);
            if !bound {
                report.add(ValidationError::HoleBinding(hole.id));
            }
            if !(0.0..=1.0).contains(&hole.offset) {
                report.add(ValidationError::HoleOffset(hole.id, hole.offset));
            }
        }
        for line in self.lines.values() {
            for h in &line.holes {
                if self.holes.get(h).map(|hole| hole.line) != Some(line.id) {
                    report.add(ValidationError::HoleBinding(*h));
                }
            }
        }
    }

    fn validate_areas(&self, report: &mut ValidationReport) {
        for area in self.areas.values() {
            let distinct = area.vertex_set();
            let exists = area.vertices.iter().all(|v| self.vertices.contains_key(v));
            if area.vertices.len() < 3 || distinct.len() != area.vertices.len() || !exists {
                report.add(ValidationError::MalformedArea(area.id));
            }
        }
        let faces = self.face_vertex_sets();
        for area in self.areas.values() {
            if !faces.contains(&area.vertex_set()) {
                report.add(ValidationError::StaleArea(area.id));
            }
        }
        let existing: BTreeSet<_> = self.areas.values().map(|a| a.vertex_set()).collect();
        for face in &faces {
            if !existing.contains(face) {
                report.add(ValidationError::MissingArea);
            }
        }
    }

    fn validate_selection(&self, report: &mut ValidationReport) {
        let flagged = self
            .vertices
            .values()
            .map(|e| (ElementRef::Vertex(e.id), e.selected))
            .chain(self.lines.values().map(|e| (ElementRef::Line(e.id), e.selected)))
            .chain(self.holes.values().map(|e| (ElementRef::Hole(e.id), e.selected)))
            .chain(self.areas.values().map(|e| (ElementRef::Area(e.id), e.selected)))
            .chain(self.items.values().map(|e| (ElementRef::Item(e.id), e.selected)));
        for (element, selected) in flagged {
            if selected != self.selected.contains(element) {
                report.add(ValidationError::SelectionMismatch(element));
            }
        }
        for element in self.selected.elements() {
            if !self.contains(element) {
                report.add(ValidationError::SelectionMismatch(element));
            }
        }
    }

    /// Vertex sets of the bounded faces of the current wall graph.
    pub(crate) fn face_vertex_sets(&self) -> BTreeSet<BTreeSet<VertexId>> {
        let (ids, cycles) = self.face_cycles();
        cycles
            .into_iter()
            .map(|c| c.into_iter().map(|i| ids[i]).collect())
            .collect()
    }

    /// Planar-graph view of the layer: vertex IDs by index, and the face cycles.
    pub(crate) fn face_cycles(&self) -> (Vec<VertexId>, Vec<Vec<usize>>) {
        let ids: Vec<VertexId> = self.vertices.keys().copied().collect();
        let index: BTreeMap<VertexId, usize> =
            ids.iter().enumerate().map(|(i, &v)| (v, i)).collect();
        let points: Vec<Point> = self.vertices.values().map(|v| v.point()).collect();
        let edges: Vec<(usize, usize)> = self
            .lines
            .values()
            .filter_map(|l| Some((*index.get(&l.vertices[0])?, *index.get(&l.vertices[1])?)))
            .collect();
        (ids, inner_cycles(&points, &edges))
    }
}
