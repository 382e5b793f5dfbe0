//! Selection state and bulk edits of the selected elements.

use tracing::debug;

use crate::error::{PlanError, PlanResult};
use crate::geometry::{same_points, Point};
use crate::model::{Batch, ElementRef, Properties};

/// New endpoint coordinates for selected lines.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineAttributes {
    pub vertex_one: Point,
    pub vertex_two: Point,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HoleAttributes {
    pub offset: f64,
}

/// Item placement fields; `None` leaves a field as it is.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ItemAttributes {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub rotation: Option<f64>,
}

/// Geometric attributes applied per category by `set_attributes_on_selected`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Attributes {
    pub line: Option<LineAttributes>,
    pub hole: Option<HoleAttributes>,
    pub item: Option<ItemAttributes>,
}

impl Batch<'_> {
    /// Set the element's flag; false when the element does not exist.
    fn set_selected_flag(&mut self, element: ElementRef, selected: bool) -> bool {
        let layer = &mut self.layer;
        let flag = match element {
            ElementRef::Vertex(id) => layer.vertices.get_mut(&id).map(|e| &mut e.selected),
            ElementRef::Line(id) => layer.lines.get_mut(&id).map(|e| &mut e.selected),
            ElementRef::Hole(id) => layer.holes.get_mut(&id).map(|e| &mut e.selected),
            ElementRef::Area(id) => layer.areas.get_mut(&id).map(|e| &mut e.selected),
            ElementRef::Item(id) => layer.items.get_mut(&id).map(|e| &mut e.selected),
        };
        match flag {
            Some(f) => {
                *f = selected;
                true
            }
            None => false,
        }
    }

    pub fn select(&mut self, element: ElementRef) -> PlanResult<()> {
        if !self.set_selected_flag(element, true) {
            return Err(PlanError::NotFound {
                what: "element",
                id: format!("{element:?}"),
            });
        }
        self.layer.selected.insert(element);
        Ok(())
    }

    /// Unselecting an element that is not selected does nothing.
    pub fn unselect(&mut self, element: ElementRef) {
        if !self.layer.selected.contains(element) {
            return;
        }
        self.set_selected_flag(element, false);
        self.layer.selected.remove(element);
    }

    /// Clear the selection index and every selection flag.
    pub fn unselect_all(&mut self) {
        for element in self.layer.selected.elements() {
            self.unselect(element);
        }
        let layer = &mut self.layer;
        layer.vertices.values_mut().for_each(|e| e.selected = false);
        layer.lines.values_mut().for_each(|e| e.selected = false);
        layer.holes.values_mut().for_each(|e| e.selected = false);
        layer.areas.values_mut().for_each(|e| e.selected = false);
        layer.items.values_mut().for_each(|e| e.selected = false);
    }

    /// Merge `properties` into every selected line, hole, area and item.
    pub fn set_properties_on_selected(&mut self, properties: &Properties) {
        let merge = |target: &mut Properties| {
            for (k, v) in properties {
                target.insert(k.clone(), v.clone());
            }
        };
        let layer = &mut self.layer;
        let sel = &layer.selected;
        for id in &sel.lines {
            if let Some(e) = layer.lines.get_mut(id) {
                merge(&mut e.properties);
            }
        }
        for id in &sel.holes {
            if let Some(e) = layer.holes.get_mut(id) {
                merge(&mut e.properties);
            }
        }
        for id in &sel.areas {
            if let Some(e) = layer.areas.get_mut(id) {
                merge(&mut e.properties);
            }
        }
        for id in &sel.items {
            if let Some(e) = layer.items.get_mut(id) {
                merge(&mut e.properties);
            }
        }
    }

    /// Apply geometric attributes to the selected elements.
    ///
    /// Selected lines get both endpoint vertices moved (a vertex shared with
    /// another line moves that line too), coincident vertices are merged and
    /// areas are re-derived.
    pub fn set_attributes_on_selected(&mut self, attributes: &Attributes) -> PlanResult<()> {
        if let Some(line) = attributes.line {
            self.move_selected_lines(line)?;
        }
        if let Some(hole) = attributes.hole {
            let holes: Vec<_> = self.layer.selected.holes.iter().copied().collect();
            for id in holes {
                self.set_hole_offset(id, hole.offset)?;
            }
        }
        if let Some(item) = attributes.item {
            let layer = &mut self.layer;
            for id in &layer.selected.items {
                let Some(e) = layer.items.get_mut(id) else {
                    continue;
                };
                e.x = item.x.unwrap_or(e.x);
                e.y = item.y.unwrap_or(e.y);
                e.width = item.width.unwrap_or(e.width);
                e.height = item.height.unwrap_or(e.height);
                e.rotation = item.rotation.unwrap_or(e.rotation);
            }
        }
        Ok(())
    }

    fn move_selected_lines(&mut self, attrs: LineAttributes) -> PlanResult<()> {
        if same_points(attrs.vertex_one, attrs.vertex_two) {
            return Err(PlanError::DegenerateGeometry(
                "line attributes put both endpoints on one point".to_string(),
            ));
        }
        let lines: Vec<_> = self.layer.selected.lines.iter().copied().collect();
        if lines.is_empty() {
            return Ok(());
        }
        for id in lines {
            let Ok(line) = self.layer.line(id) else {
                // merged away by an earlier line of this loop
                continue;
            };
            let [a, b] = line.vertices;
            for (v, to) in [(a, attrs.vertex_one), (b, attrs.vertex_two)] {
                if let Some(vertex) = self.layer.vertices.get_mut(&v) {
                    vertex.x = to.x;
                    vertex.y = to.y;
                }
            }
            for v in [a, b] {
                if self.layer.vertices.contains_key(&v) {
                    self.merge_equal_vertices(v)?;
                }
            }
            debug!(line = %id, "moved line endpoints");
        }
        self.detect_and_update_areas()?;
        Ok(())
    }
}
