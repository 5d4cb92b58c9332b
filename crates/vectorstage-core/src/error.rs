//! Error types for geometry and scene operations.

use thiserror::Error;
use uuid::Uuid;

/// Geometry errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("Matrix is not invertible (determinant {det})")]
    SingularMatrix { det: f64 },
}

/// Stage and layer errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StageError {
    #[error("Unknown layer: {0}")]
    UnknownLayer(Uuid),
    #[error("Unknown object: {0}")]
    UnknownObject(Uuid),
    #[error("Index {index} out of bounds (len {len})")]
    IndexOutOfBounds { index: usize, len: usize },
}

/// Result type for geometry operations.
pub type GeometryResult<T> = Result<T, GeometryError>;

/// Result type for stage operations.
pub type StageResult<T> = Result<T, StageError>;
