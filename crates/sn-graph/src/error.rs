//! Graph-specific error types.

use sn_core::SnError;

pub type GraphResult<T> = Result<T, GraphError>;

/// Network construction errors.
///
/// Only input that cannot be represented at all ends up here. Dangling
/// references are legal in a `Network` and are repaired by normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphError {
    /// Two nodes share an id.
    DuplicateNodeId { id: String },

    /// Two links share an id.
    DuplicateLinkId { id: String },

    /// A link length is zero, negative or not finite.
    InvalidLength { link: String, value: f64 },

    /// A node carries a NaN or infinite elevation.
    NonFiniteElevation { node: String, what: &'static str },

    /// A coordinate of a node position or link vertex is not finite.
    NonFiniteCoordinate { owner: String },
}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphError::DuplicateNodeId { id } => write!(f, "Duplicate node id '{}'", id),
            GraphError::DuplicateLinkId { id } => write!(f, "Duplicate link id '{}'", id),
            GraphError::InvalidLength { link, value } => {
                write!(f, "Link '{}' has invalid length {} (must be > 0)", link, value)
            }
            GraphError::NonFiniteElevation { node, what } => {
                write!(f, "Node '{}' has a non-finite {}", node, what)
            }
            GraphError::NonFiniteCoordinate { owner } => {
                write!(f, "Geometry of '{}' has a non-finite coordinate", owner)
            }
        }
    }
}

impl std::error::Error for GraphError {}

impl From<GraphError> for SnError {
    fn from(err: GraphError) -> Self {
        SnError::Invariant {
            what: err.to_string(),
        }
    }
}
