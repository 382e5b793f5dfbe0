//! Error kinds surfaced by plan mutations.
//!
//! Every mutation either commits or fails with one of these and leaves the
//! layer untouched (see `model::batch`).

use thiserror::Error;

use crate::model::Category;

/// Result type for plan operations.
pub type PlanResult<T> = Result<T, PlanError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanError {
    /// A referenced element does not exist.
    #[error("{what} {id} not found")]
    NotFound { what: &'static str, id: String },

    /// The catalog has no prototype for this type name.
    #[error("unknown {category} type `{kind}`")]
    UnknownType { category: Category, kind: String },

    /// Zero-length segment, coincident area vertices and similar.
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// Offset outside `[0, 1]`, malformed vertex cycle and similar.
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    /// Input data could not be decoded or failed validation on load.
    #[error("persistence: {0}")]
    Persistence(String),
}

impl PlanError {
    pub(crate) fn not_found(what: &'static str, id: impl ToString) -> Self {
        PlanError::NotFound {
            what,
            id: id.to_string(),
        }
    }
}
