//! Curated API for the CLI, benches and embedding editors (UNSTABLE).
//!
//! Prefer these re-exports over reaching into submodules; breaking changes are
//! allowed and expected.

// Geometry kernel
pub use crate::geometry::{
    classify_segments, is_point_on_segment, min_vertex, order_vertices, point_position_on_segment,
    polygon_signed_area, same_points, Point, SegmentIntersection,
};
// Element graph
pub use crate::model::{
    Area, Batch, Category, Element, ElementRef, Hole, Item, Layer, Line, Properties, Related,
    Selection, ValidationError, ValidationReport, Vertex,
};
// Mutations
pub use crate::commands::ItemPlacement;
pub use crate::ops::{
    AreaDiff, Attributes, CarriedHole, HoleAttributes, ItemAttributes, LineAttributes,
    DEFAULT_AREA_KIND,
};
// Catalog, errors, identifiers
pub use crate::catalog::{into_properties, Catalog, ElementFactory, Prototype};
pub use crate::error::{PlanError, PlanResult};
pub use crate::ids::{AreaId, HoleId, IdGenerator, ItemId, LayerId, LineId, SequentialIds, VertexId};
// Faces and layouts
pub use crate::faces::inner_cycles;
pub use crate::random::{
    draw_wall_grid, room_grid, ReplayToken as WallGridReplay, WallGridCfg,
};
pub use crate::scene::Scene;
