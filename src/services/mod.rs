use thiserror::Error;

use crate::repository::errors::RepositoryError;
use crate::services::criteria::ValidationError;

pub mod criteria;
pub mod search;

/// Errors surfaced to the transport layer.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The caller lacks the permission required for the operation.
    #[error("unauthorized")]
    Unauthorized,

    /// The request carried an invalid parameter combination; nothing was
    /// queried.
    #[error(transparent)]
    InvalidQuery(#[from] ValidationError),

    /// The persistence layer failed; passed through unchanged.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
