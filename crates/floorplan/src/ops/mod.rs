//! Mutation operations on a `Batch`.
//!
//! Purpose
//! - CRUD on the element graph with referential integrity: vertices are
//!   deduplicated by position, back-references are kept exact, and a vertex
//!   that loses its last reference is deleted.
//! - Structural algorithms built on top: line splitting, intersection-aware
//!   line insertion (`intersect`), coincident-vertex merging, and re-deriving
//!   rooms from the wall graph (`areas`).
//!
//! Every op runs inside a batch, so a failing op discards the whole command.
//!
//! Code cross-refs: `model::Batch`, `geometry`, `faces::inner_cycles`.

mod areas;
mod holes;
mod intersect;
mod items;
mod lines;
mod selection;
mod vertices;

pub use areas::{AreaDiff, DEFAULT_AREA_KIND};
pub use intersect::CarriedHole;
pub use selection::{Attributes, HoleAttributes, ItemAttributes, LineAttributes};
