//! Errors raised while loading or validating a scene.

use thiserror::Error;

/// Errors that can occur while building scene records.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Scene file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("This scene file is empty; expected object definitions")]
    EmptyScene,

    #[error("There was no camera in the scene file")]
    MissingCamera,

    #[error("No {field} specified for {record}")]
    MissingField {
        record: &'static str,
        field: &'static str,
    },

    #[error("Camera has {field} <= 0")]
    NonPositiveCamera { field: &'static str },

    #[error("Camera {field} vector has zero length")]
    ZeroCameraVector { field: &'static str },

    #[error("Camera facing and up vectors must not be parallel")]
    ParallelCameraBasis,

    #[error("No {0} specified for spot-light")]
    IncompleteSpotlight(&'static str),

    #[error("Spot-light direction has zero length")]
    ZeroSpotlightDirection,

    #[error("Plane normal has zero length")]
    ZeroPlaneNormal,

    #[error("Sphere radius must be positive, got {0}")]
    NonPositiveRadius(f64),

    #[error("{field} must be within [0, 1], got {value}")]
    OutOfUnitRange { field: &'static str, value: f64 },

    #[error("reflectivity + refractivity must not exceed 1, got {0}")]
    EnergyOverBudget(f64),

    #[error("Index of refraction must be positive, got {0}")]
    NonPositiveIor(f64),
}

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;
