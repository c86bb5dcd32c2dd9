//! Application error types

use crudcheck_domain::DomainError;
use thiserror::Error;

use crate::execute_request::ExecuteRequestError;

/// Application-level errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A domain validation error occurred.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// A payload could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The request could not be executed.
    #[error(transparent)]
    Execute(#[from] ExecuteRequestError),
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
