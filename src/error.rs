use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeoError {
    #[error("Projection error: {0}")]
    Projection(#[from] ProjError),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid affine transform: {0}")]
    Affine(String),
}

#[derive(Error, Debug, PartialEq)]
pub enum ProjError {
    #[error("Projection has no inverse")]
    NoInverse,

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Cannot fit geometry without finite bounds")]
    EmptyGeometry,

    #[error("Unknown projection: {0}")]
    UnknownProjection(String),
}
