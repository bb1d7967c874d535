use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeoError {
    #[error("unknown city preset: {0}")]
    UnknownCity(String),

    #[error("unknown sort key: {0} (expected distance, score or name)")]
    UnknownSortKey(String),

    #[error("invalid coordinates: {0}")]
    InvalidCoordinates(String),
}
