use thiserror::Error;

/// Error taxonomy surfaced by the service layer. Every variant is returned as
/// a typed result; the HTTP layer decides how each one renders.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("unsupported media: {0}")]
    UnsupportedMedia(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("database error: {0}")]
    Db(String),
    /// Startup probe failure. Always recovered into fallback mode and never
    /// returned to request-time callers.
    #[error("backend unavailable: {0}")]
    BackendUnavailable(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self {
        Self::NotFound(format!("{entity} not found"))
    }
}
