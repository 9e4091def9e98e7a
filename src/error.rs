use thiserror::Error;

use crate::plan::RoomId;

/// Top-level error type for the floor plan engine.
#[derive(Debug, Error)]
pub enum FloorplanError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error(transparent)]
    Plan(#[from] PlanError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors related to polygon operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("operation failed: {0}")]
    Failed(String),
}

/// Errors raised by the floor plan builder and the frozen plan.
#[derive(Debug, Error)]
pub enum PlanError {
    /// The plan is in a state that forbids the call (e.g. mutation after freeze).
    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("unknown room: {0}")]
    UnknownRoom(RoomId),

    /// An internal consistency check failed. Indicates inconsistent winding
    /// upstream; callers should treat it as fatal.
    #[error("internal invariant violated: {0}")]
    InvariantViolated(String),
}

/// Convenience type alias for results using [`FloorplanError`].
pub type Result<T> = std::result::Result<T, FloorplanError>;
