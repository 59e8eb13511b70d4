use num_bigint::BigInt;
use thiserror::Error;

/// Errors surfaced by flow network construction, introspection and bounded solving.
///
/// Broken internal invariants during augmentation are not represented here; those panic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("vertex {vertex} is out of range for a graph with {vertex_count} vertices")]
    InvalidVertex { vertex: usize, vertex_count: usize },

    #[error("edge capacity must be non-negative, got {0}")]
    NegativeCapacity(BigInt),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("edge {0} does not belong to this network")]
    EdgeNotFound(usize),

    #[error("flow invariant violated: {0}")]
    InvariantViolation(String),

    #[error("stopped after {augmentations} augmentations with flow {flow}")]
    AugmentationLimit { augmentations: usize, flow: BigInt },

    #[error("time limit reached after {augmentations} augmentations with flow {flow}")]
    TimeLimit { augmentations: usize, flow: BigInt },
}

impl GraphError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        GraphError::InvalidInput(msg.into())
    }

    pub(crate) fn invariant(msg: impl Into<String>) -> Self {
        GraphError::InvariantViolation(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, GraphError>;
