//! In-memory element graph of a floor plan.
//!
//! Purpose
//! - Hold vertices, lines, holes, areas and items of one layer in ID-keyed
//!   maps (an arena: no owning pointers between entities, only ID lookups).
//! - Expose read accessors for renderers and persistence, and scoped mutation
//!   batches (`Layer::batch`) that commit or discard a working copy atomically.
//!
//! Code cross-refs: `ops` (mutations on `Batch`), `scene::Scene` (layers).

mod batch;
mod layer;
mod types;
mod validate;

pub use batch::Batch;
pub(crate) use batch::insert_unique;
pub use layer::{Element, Layer};
pub use types::{
    Area, Category, ElementRef, Hole, Item, Line, Properties, Related, Selection, Vertex,
};
pub use validate::{ValidationError, ValidationReport};
