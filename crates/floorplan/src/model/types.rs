//! Entity records of a plan layer.
//!
//! Relationships are ID lookups into the per-category maps of `Layer`; no
//! entity owns another. Back-references (`Vertex::lines`, `Vertex::areas`) are
//! maintained by the mutation ops.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::Point;
use crate::ids::{AreaId, HoleId, ItemId, LineId, VertexId};

/// Free-form element properties (catalog defaults merged with overrides).
pub type Properties = serde_json::Map<String, serde_json::Value>;

/// Element categories, in the order the renderer draws them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Vertices,
    Lines,
    Holes,
    Areas,
    Items,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Category::Vertices => "vertex",
            Category::Lines => "line",
            Category::Holes => "hole",
            Category::Areas => "area",
            Category::Items => "item",
        };
        f.write_str(s)
    }
}

/// Typed reference to one element of a layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "category", content = "id", rename_all = "lowercase")]
pub enum ElementRef {
    Vertex(VertexId),
    Line(LineId),
    Hole(HoleId),
    Area(AreaId),
    Item(ItemId),
}

impl ElementRef {
    pub fn category(&self) -> Category {
        match self {
            ElementRef::Vertex(_) => Category::Vertices,
            ElementRef::Line(_) => Category::Lines,
            ElementRef::Hole(_) => Category::Holes,
            ElementRef::Area(_) => Category::Areas,
            ElementRef::Item(_) => Category::Items,
        }
    }
}

/// The element that holds a reference on a vertex.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Related {
    Line(LineId),
    Area(AreaId),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub id: VertexId,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub lines: BTreeSet<LineId>,
    #[serde(default)]
    pub areas: BTreeSet<AreaId>,
    #[serde(default)]
    pub selected: bool,
}

impl Vertex {
    #[inline]
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Number of lines and areas referencing this vertex.
    #[inline]
    pub fn reference_count(&self) -> usize {
        self.lines.len() + self.areas.len()
    }

    #[inline]
    pub fn is_orphan(&self) -> bool {
        self.lines.is_empty() && self.areas.is_empty()
    }
}

/// Wall segment between two distinct vertices.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub id: LineId,
    #[serde(rename = "type")]
    pub kind: String,
    pub vertices: [VertexId; 2],
    #[serde(default)]
    pub holes: Vec<HoleId>,
    #[serde(default)]
    pub properties: Properties,
    #[serde(default)]
    pub selected: bool,
}

/// Opening at `offset` along its line, measured from the line's lower endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hole {
    pub id: HoleId,
    #[serde(rename = "type")]
    pub kind: String,
    pub line: LineId,
    pub offset: f64,
    #[serde(default)]
    pub properties: Properties,
    #[serde(default)]
    pub selected: bool,
}

/// Room bounded by a closed vertex cycle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Area {
    pub id: AreaId,
    #[serde(rename = "type")]
    pub kind: String,
    pub vertices: Vec<VertexId>,
    #[serde(default)]
    pub properties: Properties,
    #[serde(default)]
    pub selected: bool,
}

impl Area {
    pub fn vertex_set(&self) -> BTreeSet<VertexId> {
        self.vertices.iter().copied().collect()
    }
}

/// Free-standing object; not part of the wall graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    #[serde(rename = "type")]
    pub kind: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rotation: f64,
    #[serde(default)]
    pub properties: Properties,
    #[serde(default)]
    pub selected: bool,
}

/// Selected IDs per category; mirrors the `selected` flags.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    #[serde(default)]
    pub vertices: BTreeSet<VertexId>,
    #[serde(default)]
    pub lines: BTreeSet<LineId>,
    #[serde(default)]
    pub holes: BTreeSet<HoleId>,
    #[serde(default)]
    pub areas: BTreeSet<AreaId>,
    #[serde(default)]
    pub items: BTreeSet<ItemId>,
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
            && self.lines.is_empty()
            && self.holes.is_empty()
            && self.areas.is_empty()
            && self.items.is_empty()
    }

    pub fn contains(&self, element: ElementRef) -> bool {
        match element {
            ElementRef::Vertex(id) => self.vertices.contains(&id),
            ElementRef::Line(id) => self.lines.contains(&id),
            ElementRef::Hole(id) => self.holes.contains(&id),
            ElementRef::Area(id) => self.areas.contains(&id),
            ElementRef::Item(id) => self.items.contains(&id),
        }
    }

    pub(crate) fn insert(&mut self, element: ElementRef) {
        match element {
            ElementRef::Vertex(id) => self.vertices.insert(id),
            ElementRef::Line(id) => self.lines.insert(id),
            ElementRef::Hole(id) => self.holes.insert(id),
            ElementRef::Area(id) => self.areas.insert(id),
            ElementRef::Item(id) => self.items.insert(id),
        };
    }

    pub(crate) fn remove(&mut self, element: ElementRef) {
        match element {
            ElementRef::Vertex(id) => self.vertices.remove(&id),
            ElementRef::Line(id) => self.lines.remove(&id),
            ElementRef::Hole(id) => self.holes.remove(&id),
            ElementRef::Area(id) => self.areas.remove(&id),
            ElementRef::Item(id) => self.items.remove(&id),
        };
    }

    /// All selected elements, vertices first.
    pub fn elements(&self) -> Vec<ElementRef> {
        let mut out = Vec::new();
        out.extend(self.vertices.iter().map(|&id| ElementRef::Vertex(id)));
        out.extend(self.lines.iter().map(|&id| ElementRef::Line(id)));
        out.extend(self.holes.iter().map(|&id| ElementRef::Hole(id)));
        out.extend(self.areas.iter().map(|&id| ElementRef::Area(id)));
        out.extend(self.items.iter().map(|&id| ElementRef::Item(id)));
        out
    }
}
