//! User-level edits of a layer.
//!
//! Each command opens exactly one batch. Commands that change wall geometry
//! end with vertex merging and area detection (`settle`), so a committed layer
//! always has its rooms in sync with its walls.

use tracing::info;

use crate::catalog::ElementFactory;
use crate::error::PlanResult;
use crate::geometry::Point;
use crate::ids::{HoleId, ItemId, LineId, VertexId};
use crate::model::{Batch, ElementRef, Layer, Properties};
use crate::ops::{AreaDiff, Attributes};

/// Placement of a new item; rotation in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemPlacement {
    pub at: Point,
    pub width: f64,
    pub height: f64,
    pub rotation: f64,
}

fn settle(b: &mut Batch<'_>, moved: &[VertexId]) -> PlanResult<AreaDiff> {
    for &v in moved {
        if b.vertex(v).is_ok() {
            b.merge_equal_vertices(v)?;
        }
    }
    b.detect_and_update_areas()
}

impl Layer {
    /// Draw a wall, resolving crossings and overlaps.
    ///
    /// Returns the pieces in canonical order, from the lower (x, then y)
    /// endpoint to the upper one, whichever way `from → to` points. Each
    /// piece is stored lower endpoint first.
    pub fn draw_wall(
        &mut self,
        catalog: &dyn ElementFactory,
        kind: &str,
        from: Point,
        to: Point,
        properties: &Properties,
    ) -> PlanResult<Vec<LineId>> {
        let pieces = self.batch(catalog, |b| {
            let pieces = b.add_line_avoiding_intersections(kind, from, to, properties, Vec::new())?;
            let mut ends = Vec::with_capacity(pieces.len() * 2);
            for &line in &pieces {
                ends.extend(b.line(line)?.vertices);
            }
            ends.dedup();
            settle(b, &ends)?;
            Ok(pieces)
        })?;
        info!(layer = %self.id, kind, pieces = pieces.len(), "wall drawn");
        Ok(pieces)
    }

    pub fn remove_wall(&mut self, catalog: &dyn ElementFactory, line: LineId) -> PlanResult<AreaDiff> {
        self.batch(catalog, |b| {
            b.remove_line(line)?;
            b.detect_and_update_areas()
        })
    }

    /// Move one endpoint of a wall; coincident vertices are merged afterwards.
    pub fn move_line_endpoint(
        &mut self,
        catalog: &dyn ElementFactory,
        line: LineId,
        endpoint: usize,
        to: Point,
    ) -> PlanResult<AreaDiff> {
        self.batch(catalog, |b| {
            let v = b.replace_line_vertex(line, endpoint, to)?;
            settle(b, &[v])
        })
    }

    pub fn split_wall(
        &mut self,
        catalog: &dyn ElementFactory,
        line: LineId,
        at: Point,
    ) -> PlanResult<(LineId, LineId)> {
        self.batch(catalog, |b| {
            let halves = b.split_line(line, at)?;
            let joint = b.line(halves.0)?.vertices[1];
            settle(b, &[joint])?;
            Ok(halves)
        })
    }

    pub fn place_hole(
        &mut self,
        catalog: &dyn ElementFactory,
        kind: &str,
        line: LineId,
        offset: f64,
        properties: &Properties,
    ) -> PlanResult<HoleId> {
        self.batch(catalog, |b| b.add_hole(kind, line, offset, properties))
    }

    pub fn remove_opening(&mut self, catalog: &dyn ElementFactory, hole: HoleId) -> PlanResult<()> {
        self.batch(catalog, |b| b.remove_hole(hole))
    }

    pub fn place_item(
        &mut self,
        catalog: &dyn ElementFactory,
        kind: &str,
        placement: ItemPlacement,
        properties: &Properties,
    ) -> PlanResult<ItemId> {
        self.batch(catalog, |b| {
            b.add_item(
                kind,
                placement.at,
                placement.width,
                placement.height,
                placement.rotation,
                properties,
            )
        })
    }

    pub fn remove_placed_item(&mut self, catalog: &dyn ElementFactory, item: ItemId) -> PlanResult<()> {
        self.batch(catalog, |b| b.remove_item(item))
    }

    pub fn select_element(&mut self, catalog: &dyn ElementFactory, element: ElementRef) -> PlanResult<()> {
        self.batch(catalog, |b| b.select(element))
    }

    pub fn unselect_element(&mut self, catalog: &dyn ElementFactory, element: ElementRef) -> PlanResult<()> {
        self.batch(catalog, |b| {
            b.unselect(element);
            Ok(())
        })
    }

    pub fn clear_selection(&mut self, catalog: &dyn ElementFactory) -> PlanResult<()> {
        self.batch(catalog, |b| {
            b.unselect_all();
            Ok(())
        })
    }

    pub fn update_selected_properties(
        &mut self,
        catalog: &dyn ElementFactory,
        properties: &Properties,
    ) -> PlanResult<()> {
        self.batch(catalog, |b| {
            b.set_properties_on_selected(properties);
            Ok(())
        })
    }

    pub fn update_selected_attributes(
        &mut self,
        catalog: &dyn ElementFactory,
        attributes: &Attributes,
    ) -> PlanResult<()> {
        self.batch(catalog, |b| b.set_attributes_on_selected(attributes))
    }

    /// Re-derive rooms from the current walls.
    pub fn refresh_areas(&mut self, catalog: &dyn ElementFactory) -> PlanResult<AreaDiff> {
        self.batch(catalog, |b| b.detect_and_update_areas())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::error::PlanError;
    use crate::ids::LayerId;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn room(layer: &mut Layer, cat: &Catalog) -> Vec<LineId> {
        let corners = [p(0.0, 0.0), p(400.0, 0.0), p(400.0, 300.0), p(0.0, 300.0)];
        let mut lines = Vec::new();
        for i in 0..4 {
            let pieces = layer
                .draw_wall(cat, "wall", corners[i], corners[(i + 1) % 4], &Properties::new())
                .unwrap();
            lines.extend(pieces);
        }
        lines
    }

    #[test]
    fn drawing_a_closed_room_creates_its_area() {
        let cat = Catalog::standard();
        let mut layer = Layer::new(LayerId(1), "ground");
        room(&mut layer, &cat);
        assert_eq!(layer.areas().count(), 1);
        assert!(layer.validate().is_valid());
    }

    #[test]
    fn removing_a_wall_opens_the_room() {
        let cat = Catalog::standard();
        let mut layer = Layer::new(LayerId(1), "ground");
        let lines = room(&mut layer, &cat);
        let diff = layer.remove_wall(&cat, lines[0]).unwrap();
        assert_eq!(diff.removed.len(), 1);
        assert_eq!(layer.areas().count(), 0);
        assert!(layer.validate().is_valid());
    }

    fn endpoint_at(layer: &Layer, line: LineId, at: Point) -> usize {
        let ends = layer.line(line).unwrap().vertices;
        ends.iter()
            .position(|&v| layer.vertex(v).unwrap().point() == at)
            .unwrap()
    }

    #[test]
    fn drawn_pieces_are_stored_lower_endpoint_first() {
        let cat = Catalog::standard();
        let mut layer = Layer::new(LayerId(1), "ground");
        let pieces = layer
            .draw_wall(&cat, "wall", p(0.0, 300.0), p(0.0, 0.0), &Properties::new())
            .unwrap();
        let (a, b) = layer.line_points(pieces[0]).unwrap();
        assert_eq!((a, b), (p(0.0, 0.0), p(0.0, 300.0)));
    }

    #[test]
    fn closing_a_gap_by_moving_an_endpoint() {
        let cat = Catalog::standard();
        let mut layer = Layer::new(LayerId(1), "ground");
        let lines = room(&mut layer, &cat);
        // pull the west wall away from the origin, then snap it back
        let corner = endpoint_at(&layer, lines[3], p(0.0, 0.0));
        let diff = layer
            .move_line_endpoint(&cat, lines[3], corner, p(0.0, 50.0))
            .unwrap();
        assert_eq!(diff.removed.len(), 1);
        assert_eq!(layer.areas().count(), 0);
        assert_eq!(layer.vertices().count(), 5);

        let diff = layer
            .move_line_endpoint(&cat, lines[3], corner, p(0.0, 0.0))
            .unwrap();
        assert_eq!(diff.added.len(), 1);
        assert_eq!(layer.areas().count(), 1);
        assert_eq!(layer.areas().next().unwrap().vertices.len(), 4);
        assert_eq!(layer.vertices().count(), 4);
        assert!(layer.validate().is_valid());
    }

    #[test]
    fn moving_an_endpoint_onto_a_neighbour_leaves_one_wall() {
        let cat = Catalog::standard();
        let mut layer = Layer::new(LayerId(1), "ground");
        let south = layer
            .draw_wall(&cat, "wall", p(0.0, 0.0), p(10.0, 0.0), &Properties::new())
            .unwrap()[0];
        layer
            .draw_wall(&cat, "wall", p(10.0, 0.0), p(10.0, 10.0), &Properties::new())
            .unwrap();
        let free = endpoint_at(&layer, south, p(0.0, 0.0));
        layer
            .move_line_endpoint(&cat, south, free, p(10.0, 10.0))
            .unwrap();
        assert_eq!(layer.lines().count(), 1);
        assert_eq!(layer.vertices().count(), 2);
        assert!(layer.validate().is_valid());
    }

    #[test]
    fn failed_command_leaves_layer_untouched() {
        let cat = Catalog::standard();
        let mut layer = Layer::new(LayerId(1), "ground");
        let lines = room(&mut layer, &cat);
        let before = layer.clone();
        let err = layer
            .place_hole(&cat, "door", lines[0], 1.2, &Properties::new())
            .unwrap_err();
        assert!(matches!(err, PlanError::ConstraintViolation(_)));
        let err = layer
            .draw_wall(&cat, "balcony", p(0.0, 0.0), p(0.0, -100.0), &Properties::new())
            .unwrap_err();
        assert!(matches!(err, PlanError::UnknownType { .. }));
        assert_eq!(layer, before);
    }

    #[test]
    fn split_wall_keeps_the_room() {
        let cat = Catalog::standard();
        let mut layer = Layer::new(LayerId(1), "ground");
        let lines = room(&mut layer, &cat);
        let area = layer.areas().next().unwrap().id;
        layer.split_wall(&cat, lines[0], p(100.0, 0.0)).unwrap();
        // the split point joins the room outline, so the room is re-detected
        let areas: Vec<_> = layer.areas().collect();
        assert_eq!(areas.len(), 1);
        assert_ne!(areas[0].id, area);
        assert_eq!(areas[0].vertices.len(), 5);
        assert!(layer.validate().is_valid());
    }

    #[test]
    fn items_and_openings_round_trip() {
        let cat = Catalog::standard();
        let mut layer = Layer::new(LayerId(1), "ground");
        let lines = room(&mut layer, &cat);
        let door = layer
            .place_hole(&cat, "door", lines[0], 0.5, &Properties::new())
            .unwrap();
        let sofa = layer
            .place_item(
                &cat,
                "sofa",
                ItemPlacement {
                    at: p(200.0, 150.0),
                    width: 210.0,
                    height: 90.0,
                    rotation: 0.0,
                },
                &Properties::new(),
            )
            .unwrap();
        layer.select_element(&cat, ElementRef::Item(sofa)).unwrap();
        layer.clear_selection(&cat).unwrap();
        assert!(layer.selection().is_empty());
        layer.remove_opening(&cat, door).unwrap();
        layer.remove_placed_item(&cat, sofa).unwrap();
        assert_eq!(layer.holes().count() + layer.items().count(), 0);
        assert!(layer.refresh_areas(&cat).unwrap().is_empty());
    }
}
