//! Element identifiers and the ID generator collaborator.
//!
//! IDs are small integers wrapped in one newtype per category, so a line ID
//! can never be passed where a vertex ID is expected. All categories draw from
//! one generator, which makes IDs unique across the whole layer lifetime.

use serde::{Deserialize, Serialize};

macro_rules! element_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

element_id!(
    /// Graph node.
    VertexId,
    "v"
);
element_id!(
    /// Wall segment.
    LineId,
    "l"
);
element_id!(
    /// Opening embedded in a line.
    HoleId,
    "h"
);
element_id!(
    /// Detected room.
    AreaId,
    "a"
);
element_id!(
    /// Free-standing object.
    ItemId,
    "i"
);
element_id!(
    /// Layer of a scene.
    LayerId,
    "layer-"
);

/// Source of fresh IDs. Implementations must never hand out an ID twice.
///
/// Each layer persists a `SequentialIds`; `Layer::batch_with_ids` plugs in
/// any other generator, e.g. one shared by several layers.
pub trait IdGenerator {
    fn acquire_id(&mut self) -> u64;
}

/// Monotonic counter; the state is persisted with the layer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequentialIds {
    next: u64,
}

impl SequentialIds {
    /// Make sure every future ID is strictly greater than `used`.
    pub fn reserve_above(&mut self, used: u64) {
        if self.next <= used {
            self.next = used + 1;
        }
    }
}

impl IdGenerator for SequentialIds {
    fn acquire_id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }
}
