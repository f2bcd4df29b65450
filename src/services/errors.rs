use thiserror::Error;

/// Generic error type used by service layer functions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// Requested resource was not found.
    #[error("not found")]
    NotFound,
    /// The request failed a domain constraint.
    #[error("{0}")]
    Validation(String),
    /// The request collides with an existing resource.
    #[error("{0}")]
    Duplicate(String),
    /// One or more asset uploads failed; nothing was persisted.
    #[error("image upload failed: {0}")]
    Upload(String),
    /// An unexpected internal error occurred.
    #[error("internal error")]
    Internal,
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;
