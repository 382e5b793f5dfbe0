//! Areas: explicit creation and re-derivation from the wall graph.

use std::collections::BTreeSet;

use tracing::debug;

use crate::error::{PlanError, PlanResult};
use crate::geometry::{same_points, Point};
use crate::ids::{AreaId, VertexId};
use crate::model::{insert_unique, Area, Batch, Category, ElementRef, Properties, Related};

/// Type given to areas found by `detect_and_update_areas`.
pub const DEFAULT_AREA_KIND: &str = "area";

/// Outcome of one area detection pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AreaDiff {
    pub added: Vec<AreaId>,
    pub removed: Vec<AreaId>,
}

impl AreaDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

impl Batch<'_> {
    /// New area bounded by the cycle `ring`; vertices are found or created.
    pub fn add_area(
        &mut self,
        kind: &str,
        ring: &[Point],
        properties: &Properties,
    ) -> PlanResult<AreaId> {
        if ring.len() < 3 {
            return Err(PlanError::ConstraintViolation(format!(
                "an area needs at least 3 vertices, got {}",
                ring.len()
            )));
        }
        for (i, a) in ring.iter().enumerate() {
            if ring[i + 1..].iter().any(|b| same_points(*a, *b)) {
                return Err(PlanError::DegenerateGeometry(format!(
                    "area vertex ({}, {}) repeats",
                    a.x, a.y
                )));
            }
        }
        let properties = self.factory(Category::Areas, kind, properties)?;
        let id = AreaId(self.acquire_id());
        let vertices: Vec<VertexId> = ring
            .iter()
            .map(|&p| self.attach_vertex(p, Related::Area(id)))
            .collect();
        let distinct: BTreeSet<VertexId> = vertices.iter().copied().collect();
        if distinct.len() != vertices.len() {
            return Err(PlanError::DegenerateGeometry(
                "area vertices resolve to the same stored vertex".to_string(),
            ));
        }
        self.insert_area(id, kind, vertices, properties);
        Ok(id)
    }

    pub fn remove_area(&mut self, id: AreaId) -> PlanResult<()> {
        let area = self.layer.area(id)?;
        for v in area.vertex_set() {
            self.remove_vertex(v, Related::Area(id))?;
        }
        self.layer.areas.remove(&id);
        self.layer.selected.remove(ElementRef::Area(id));
        Ok(())
    }

    /// Make the areas equal to the bounded faces of the wall graph.
    ///
    /// Areas whose vertex set is still a face are kept untouched (ID and
    /// properties included). Stale areas are removed and each new face gets
    /// an area of `DEFAULT_AREA_KIND`.
    pub fn detect_and_update_areas(&mut self) -> PlanResult<AreaDiff> {
        let (ids, cycles) = self.layer.face_cycles();
        let faces: Vec<Vec<VertexId>> = cycles
            .into_iter()
            .map(|c| c.into_iter().map(|i| ids[i]).collect())
            .collect();
        let face_sets: Vec<BTreeSet<VertexId>> = faces
            .iter()
            .map(|f| f.iter().copied().collect())
            .collect();

        let removed: Vec<AreaId> = self
            .layer
            .areas
            .values()
            .filter(|a| !face_sets.contains(&a.vertex_set()))
            .map(|a| a.id)
            .collect();
        for id in &removed {
            self.remove_area(*id)?;
        }

        let mut seen: BTreeSet<BTreeSet<VertexId>> =
            self.layer.areas.values().map(|a| a.vertex_set()).collect();
        let mut added = Vec::new();
        for (face, set) in faces.into_iter().zip(face_sets) {
            if !seen.insert(set) {
                continue;
            }
            let properties = self.factory(Category::Areas, DEFAULT_AREA_KIND, &Properties::new())?;
            let id = AreaId(self.acquire_id());
            for &v in &face {
                if let Some(vertex) = self.layer.vertices.get_mut(&v) {
                    vertex.areas.insert(id);
                }
            }
            self.insert_area(id, DEFAULT_AREA_KIND, face, properties);
            added.push(id);
        }
        if !added.is_empty() || !removed.is_empty() {
            debug!(added = added.len(), removed = removed.len(), "areas updated");
        }
        Ok(AreaDiff { added, removed })
    }

    fn insert_area(
        &mut self,
        id: AreaId,
        kind: &str,
        vertices: Vec<VertexId>,
        properties: Properties,
    ) {
        let area = Area {
            id,
            kind: kind.to_string(),
            vertices,
            properties,
            selected: false,
        };
        insert_unique(&mut self.layer.areas, id, area);
    }
}
