//! The element store of one drawing layer.
//!
//! A `Layer` is the authoritative snapshot that renderers and persistence
//! read. It is only mutated through `Layer::batch` (see `batch.rs`), which
//! either replaces the snapshot as a whole or leaves it untouched.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{PlanError, PlanResult};
use crate::geometry::{order_vertices, point_at, polygon_signed_area, same_points, Point};
use crate::ids::{AreaId, HoleId, ItemId, LayerId, LineId, SequentialIds, VertexId};

use super::types::{Area, ElementRef, Hole, Item, Line, Selection, Vertex};

fn default_visible() -> bool {
    true
}

fn default_opacity() -> f64 {
    1.0
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub id: LayerId,
    pub name: String,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    #[serde(default)]
    pub(crate) vertices: BTreeMap<VertexId, Vertex>,
    #[serde(default)]
    pub(crate) lines: BTreeMap<LineId, Line>,
    #[serde(default)]
    pub(crate) holes: BTreeMap<HoleId, Hole>,
    #[serde(default)]
    pub(crate) areas: BTreeMap<AreaId, Area>,
    #[serde(default)]
    pub(crate) items: BTreeMap<ItemId, Item>,
    #[serde(default)]
    pub(crate) selected: Selection,
    #[serde(default)]
    pub(crate) ids: SequentialIds,
}

/// Borrowed view of any element, returned by `Layer::element`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Element<'a> {
    Vertex(&'a Vertex),
    Line(&'a Line),
    Hole(&'a Hole),
    Area(&'a Area),
    Item(&'a Item),
}

impl Layer {
    pub fn new(id: LayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            visible: true,
            opacity: 1.0,
            vertices: BTreeMap::new(),
            lines: BTreeMap::new(),
            holes: BTreeMap::new(),
            areas: BTreeMap::new(),
            items: BTreeMap::new(),
            selected: Selection::default(),
            ids: SequentialIds::default(),
        }
    }

    pub fn vertex(&self, id: VertexId) -> PlanResult<&Vertex> {
        self.vertices
            .get(&id)
            .ok_or_else(|| PlanError::not_found("vertex", id))
    }

    pub fn line(&self, id: LineId) -> PlanResult<&Line> {
        self.lines
            .get(&id)
            .ok_or_else(|| PlanError::not_found("line", id))
    }

    pub fn hole(&self, id: HoleId) -> PlanResult<&Hole> {
        self.holes
            .get(&id)
            .ok_or_else(|| PlanError::not_found("hole", id))
    }

    pub fn area(&self, id: AreaId) -> PlanResult<&Area> {
        self.areas
            .get(&id)
            .ok_or_else(|| PlanError::not_found("area", id))
    }

    pub fn item(&self, id: ItemId) -> PlanResult<&Item> {
        self.items
            .get(&id)
            .ok_or_else(|| PlanError::not_found("item", id))
    }

    /// Lookup by category and ID.
    pub fn element(&self, element: ElementRef) -> Option<Element<'_>> {
        match element {
            ElementRef::Vertex(id) => self.vertices.get(&id).map(Element::Vertex),
            ElementRef::Line(id) => self.lines.get(&id).map(Element::Line),
            ElementRef::Hole(id) => self.holes.get(&id).map(Element::Hole),
            ElementRef::Area(id) => self.areas.get(&id).map(Element::Area),
            ElementRef::Item(id) => self.items.get(&id).map(Element::Item),
        }
    }

    #[inline]
    pub fn contains(&self, element: ElementRef) -> bool {
        self.element(element).is_some()
    }

    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> + '_ {
        self.vertices.values()
    }

    pub fn lines(&self) -> impl Iterator<Item = &Line> + '_ {
        self.lines.values()
    }

    pub fn holes(&self) -> impl Iterator<Item = &Hole> + '_ {
        self.holes.values()
    }

    pub fn areas(&self) -> impl Iterator<Item = &Area> + '_ {
        self.areas.values()
    }

    pub fn items(&self) -> impl Iterator<Item = &Item> + '_ {
        self.items.values()
    }

    pub fn selection(&self) -> &Selection {
        &self.selected
    }

    /// True when the layer holds no elements at all.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
            && self.lines.is_empty()
            && self.holes.is_empty()
            && self.areas.is_empty()
            && self.items.is_empty()
    }

    /// The vertex at `p` (within tolerance), if any.
    pub fn find_vertex_at(&self, p: Point) -> Option<VertexId> {
        self.vertices
            .values()
            .find(|v| same_points(v.point(), p))
            .map(|v| v.id)
    }

    /// Endpoint coordinates of a line, in stored order.
    pub fn line_points(&self, id: LineId) -> PlanResult<(Point, Point)> {
        let line = self.line(id)?;
        let a = self.vertex(line.vertices[0])?.point();
        let b = self.vertex(line.vertices[1])?.point();
        Ok((a, b))
    }

    /// Endpoint coordinates of a line, lower endpoint first.
    pub fn line_points_ordered(&self, id: LineId) -> PlanResult<(Point, Point)> {
        let (a, b) = self.line_points(id)?;
        Ok(order_vertices(a, b))
    }

    pub fn line_length(&self, id: LineId) -> PlanResult<f64> {
        let (a, b) = self.line_points(id)?;
        Ok((b - a).norm())
    }

    /// Absolute position of a hole on its line.
    pub fn hole_position(&self, id: HoleId) -> PlanResult<Point> {
        let hole = self.hole(id)?;
        let (lo, hi) = self.line_points_ordered(hole.line)?;
        Ok(point_at(lo, hi, hole.offset))
    }

    /// Coordinates of an area's vertex cycle.
    pub fn area_points(&self, id: AreaId) -> PlanResult<Vec<Point>> {
        self.area(id)?
            .vertices
            .iter()
            .map(|&v| self.vertex(v).map(|v| v.point()))
            .collect()
    }

    /// Enclosed surface of an area (square units).
    pub fn area_size(&self, id: AreaId) -> PlanResult<f64> {
        Ok(polygon_signed_area(&self.area_points(id)?).abs())
    }

    /// Largest ID in use in any category.
    pub(crate) fn max_id(&self) -> Option<u64> {
        let v = self.vertices.keys().map(|k| k.0).max();
        let l = self.lines.keys().map(|k| k.0).max();
        let h = self.holes.keys().map(|k| k.0).max();
        let a = self.areas.keys().map(|k| k.0).max();
        let i = self.items.keys().map(|k| k.0).max();
        [v, l, h, a, i].into_iter().flatten().max()
    }
}
