use thiserror::Error;

/// Top-level error type for opening placement.
#[derive(Debug, Error)]
pub enum OpeningsError {
    #[error(transparent)]
    Precondition(#[from] PreconditionError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Host(#[from] HostError),
}

/// Conditions that stop a run before any placement work begins.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PreconditionError {
    #[error("linked model with conduits not found")]
    MissingConduitModel,

    #[error("opening template \"{0}\" not found")]
    MissingOpeningTemplate(String),

    #[error("no 3D view available for intersection queries")]
    MissingSpatialContext,
}

/// Errors related to conduit geometry.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
    #[error("zero-length vector")]
    ZeroVector,

    #[error("direction is not unit length (norm = {0})")]
    NonUnitDirection(f64),

    #[error("diameter must be positive and finite, got {0}")]
    InvalidDiameter(f64),

    #[error("length must be non-negative and finite, got {0}")]
    InvalidLength(f64),

    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("unsupported conduit shape: {0}")]
    UnsupportedShape(String),
}

/// Errors reported by the modeling host.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HostError {
    #[error("parameter \"{0}\" not found on opening")]
    ParameterNotFound(String),

    #[error("element not found: {0}")]
    ElementNotFound(String),

    #[error("element is not a {0}")]
    WrongElementKind(&'static str),

    #[error("no unit of work is open")]
    NoOpenUnit,

    #[error("unit of work \"{0}\" is already open")]
    UnitAlreadyOpen(String),

    #[error("host rejected the request: {0}")]
    Rejected(String),
}

/// Convenience type alias for results using [`OpeningsError`].
pub type Result<T> = std::result::Result<T, OpeningsError>;
