use thiserror::Error;

/// Failures surfaced by article stores. "Not found" is not an error here:
/// reads return `None` and mutations report whether anything changed.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}
