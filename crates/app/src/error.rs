//! Scenario error types

use crudcheck_application::{ApplicationError, ExecuteRequestError, HttpClientError};
use crudcheck_infrastructure::{ConfigError, SerializationError};
use thiserror::Error;

/// Why a scenario failed. Every variant is terminal for the scenario.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// The suite context could not be created.
    #[error("suite setup failed: {0}")]
    Setup(String),

    /// The request could not be built.
    #[error("request could not be built: {0}")]
    Request(String),

    /// The call did not complete.
    #[error("transport failure: {0}")]
    Transport(#[from] ExecuteRequestError),

    /// The service answered with an unexpected status.
    #[error("expected status {expected}, got {actual}: {body}")]
    UnexpectedStatus {
        /// Status the scenario requires.
        expected: u16,
        /// Status received.
        actual: u16,
        /// Response body, for the report.
        body: String,
    },

    /// The body was empty, `null` or not the expected JSON shape.
    #[error("response body could not be decoded: {0}")]
    Decode(#[from] SerializationError),

    /// The resource came back without its attributes record.
    #[error("{scenario}: response carries no attributes record")]
    MissingAttributes {
        /// Scenario that received the response.
        scenario: &'static str,
    },

    /// The collection endpoint returned no resources.
    #[error("expected a non-empty list of objects")]
    EmptyCollection,

    /// A decoded field differs from what was expected.
    #[error("field '{field}' mismatch: expected {expected}, got {actual}")]
    FieldMismatch {
        /// Field name.
        field: String,
        /// Expected value.
        expected: String,
        /// Value received.
        actual: String,
    },

    /// One or more declarative assertions failed.
    #[error("{suite}: {} assertion(s) failed: {}", .failures.len(), .failures.join("; "))]
    AssertionsFailed {
        /// Name of the assertion suite.
        suite: String,
        /// One summary per failed assertion.
        failures: Vec<String>,
    },

    /// A resource scenario ran before anything was created.
    #[error("no product has been created in this run")]
    NoCachedIdentifier,
}

impl From<ApplicationError> for ScenarioError {
    fn from(error: ApplicationError) -> Self {
        match error {
            ApplicationError::Execute(e) => Self::Transport(e),
            ApplicationError::Domain(e) => Self::Request(e.to_string()),
            ApplicationError::Serialization(e) => Self::Request(e.to_string()),
        }
    }
}

impl From<ConfigError> for ScenarioError {
    fn from(error: ConfigError) -> Self {
        Self::Setup(error.to_string())
    }
}

impl From<HttpClientError> for ScenarioError {
    fn from(error: HttpClientError) -> Self {
        Self::Setup(error.to_string())
    }
}

/// Result type alias for scenarios.
pub type ScenarioResult<T> = Result<T, ScenarioError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crudcheck_domain::DomainError;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_assertion_failures_are_listed() {
        let error = ScenarioError::AssertionsFailed {
            suite: "update product".to_string(),
            failures: vec!["JSON $.data.color equals \"silver\"".to_string(), "x".to_string()],
        };
        assert_eq!(
            error.to_string(),
            "update product: 2 assertion(s) failed: JSON $.data.color equals \"silver\"; x"
        );
    }

    #[test]
    fn test_application_errors_are_classified() {
        let error: ScenarioError =
            ApplicationError::Domain(DomainError::InvalidIdentifier("empty".to_string())).into();
        assert!(matches!(error, ScenarioError::Request(_)));

        let error: ScenarioError = ApplicationError::Execute(ExecuteRequestError::HttpError(
            HttpClientError::ConnectionFailed("reset".to_string()),
        ))
        .into();
        assert!(matches!(error, ScenarioError::Transport(_)));
    }
}
