//! Execute Request Use Case
//!
//! Validates a request and hands it to the HTTP client port.

use std::sync::Arc;

use crudcheck_domain::{request::RequestSpec, response::ResponseSpec};
use thiserror::Error;

use crate::ports::{HttpClient, HttpClientError};

/// Result type for request execution.
pub type ExecuteResult = Result<ResponseSpec, ExecuteRequestError>;

/// Error type for the execute request use case.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExecuteRequestError {
    /// URL is empty.
    #[error("URL is required")]
    EmptyUrl,

    /// URL is invalid.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTTP request failed.
    #[error("{0}")]
    HttpError(#[from] HttpClientError),
}

/// Use case for executing HTTP requests.
///
/// # Example
///
/// ```ignore
/// let use_case = ExecuteRequest::new(Arc::new(ReqwestHttpClient::new()?));
/// let response = use_case.execute(&RequestSpec::get("https://api.restful-api.dev/objects")).await?;
/// ```
pub struct ExecuteRequest<C: HttpClient> {
    client: Arc<C>,
}

impl<C: HttpClient> ExecuteRequest<C> {
    /// Creates a new `ExecuteRequest` use case with the given HTTP client.
    pub const fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    /// Executes the request and returns the response.
    ///
    /// # Validation
    ///
    /// - URL must not be empty
    /// - URL must start with http:// or https://
    ///
    /// # Errors
    ///
    /// Returns `ExecuteRequestError` on validation or transport failures.
    pub async fn execute(&self, request: &RequestSpec) -> ExecuteResult {
        Self::validate(request)?;

        tracing::debug!(
            request_id = %request.id,
            method = %request.method,
            url = %request.url,
            "sending request"
        );

        let response = self.client.execute(request).await.inspect_err(|e| {
            tracing::warn!(request_id = %request.id, error = %e, "request failed");
        })?;

        tracing::debug!(
            request_id = %request.id,
            status = response.status,
            duration = %response.duration_display(),
            "received response"
        );

        Ok(response)
    }

    fn validate(request: &RequestSpec) -> Result<(), ExecuteRequestError> {
        if request.url.trim().is_empty() {
            return Err(ExecuteRequestError::EmptyUrl);
        }

        if !request.url.starts_with("http://") && !request.url.starts_with("https://") {
            return Err(ExecuteRequestError::InvalidUrl(
                "URL must start with http:// or https://".to_string(),
            ));
        }

        Ok(())
    }
}
