//! Network construction and validation errors.

use bf_core::{Coord, PartId};

pub type GraphResult<T> = Result<T, GraphError>;

/// Network construction and validation errors.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphError {
    /// Two parts share the same id.
    DuplicatePart { id: PartId },

    /// A part has an empty id (position in input order).
    EmptyPartId { index: usize },

    /// A route declares a negative or non-finite friction.
    InvalidFriction {
        part: PartId,
        entry: Coord,
        value: f64,
    },

    /// A route declares a non-finite pressure.
    NonFinitePressure {
        part: PartId,
        entry: Coord,
        value: f64,
    },

    /// Lookup by id failed.
    PartNotFound { id: PartId },
}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphError::DuplicatePart { id } => write!(f, "Duplicate part id '{}'", id),
            GraphError::EmptyPartId { index } => {
                write!(f, "Part at position {} has an empty id", index)
            }
            GraphError::InvalidFriction { part, entry, value } => write!(
                f,
                "Part '{}' has a route from {} with invalid friction {} (must be finite and >= 0)",
                part, entry, value
            ),
            GraphError::NonFinitePressure { part, entry, value } => write!(
                f,
                "Part '{}' has a route from {} with non-finite pressure {}",
                part, entry, value
            ),
            GraphError::PartNotFound { id } => write!(f, "Part '{}' not found", id),
        }
    }
}

impl std::error::Error for GraphError {}
