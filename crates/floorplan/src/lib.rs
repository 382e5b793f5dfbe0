//! Planar wall-graph core of a floor-plan editor.
//!
//! Walls (lines) connect vertices; openings (holes) sit on walls at a
//! fractional offset; rooms (areas) are the bounded faces of the wall graph;
//! items are free-standing objects. Every edit runs inside a batch on a layer
//! and either commits as a whole or leaves the layer untouched.
//!
//! Layout
//! - `geometry`: tolerant predicates and segment classification.
//! - `model`: entity records, the per-layer arena, batches and validation.
//! - `ops`: mutations, intersection resolution, vertex merging, area detection.
//! - `faces`: bounded-face enumeration of a planar straight-line graph.
//! - `commands`, `scene`: user-level edits, layers and JSON persistence.
//!
//! API Policy
//! - No stable public API yet; `api` is the curated surface for the CLI and
//!   benches, and it moves with the code.

pub mod api;
pub mod catalog;
pub mod commands;
pub mod error;
pub mod faces;
pub mod geometry;
pub mod ids;
pub mod model;
pub mod ops;
pub mod random;
pub mod scene;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::catalog::{Catalog, ElementFactory};
    pub use crate::commands::ItemPlacement;
    pub use crate::error::{PlanError, PlanResult};
    pub use crate::geometry::Point;
    pub use crate::ids::{AreaId, HoleId, ItemId, LayerId, LineId, VertexId};
    pub use crate::model::{Category, ElementRef, Layer, Properties};
    pub use crate::scene::Scene;
}
