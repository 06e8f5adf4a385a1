use thiserror::Error;

/// Top-level error type for visibility computations.
#[derive(Debug, Error)]
pub enum VisipolError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Errors caused by the shape of the input geometry.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("polygon has {count} vertices, at least 3 are required")]
    TooFewVertices { count: usize },

    #[error("polygon is wound clockwise (signed area {signed_area})")]
    ClockwiseWinding { signed_area: f64 },

    #[error("viewpoint ({x}, {y}) lies outside the polygon")]
    ViewpointOutside { x: f64, y: f64 },
}

/// Errors raised while running an operation.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("operation failed: {0}")]
    Failed(String),
}

/// Convenience type alias for results using [`VisipolError`].
pub type Result<T> = std::result::Result<T, VisipolError>;
