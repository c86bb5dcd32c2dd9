//! Delete scenario: `DELETE /objects/{id}`.

use crudcheck_domain::{Assertion, DeletionMessage, ResponseSpec, TestSuite};
use crudcheck_infrastructure::TestRunner;

use crate::checks::{EXPECTED_STATUS, expect_status, run_suite};
use crate::context::SuiteContext;
use crate::error::{ScenarioError, ScenarioResult};
use crate::fixtures;

/// Scenario name used in logs and reports.
pub const NAME: &str = "delete product";

/// Body is exactly the confirmation for `id`.
///
/// # Errors
///
/// Returns `ScenarioError::Request` if the confirmation cannot be built.
pub fn expectations(id: &str) -> ScenarioResult<TestSuite> {
    let expected = DeletionMessage::for_id(id)
        .to_body()
        .map_err(|e| ScenarioError::Request(e.to_string()))?;
    Ok(TestSuite::new(NAME).with_assertion(Assertion::BodyEquals { expected }))
}

/// Judges a delete response for `id`.
///
/// # Errors
///
/// Fails on a non-200 status or a body other than the confirmation.
pub fn verify(runner: &TestRunner, response: &ResponseSpec, id: &str) -> ScenarioResult<()> {
    expect_status(runner, response, EXPECTED_STATUS)?;
    run_suite(runner, &expectations(id)?, response)?;
    Ok(())
}

/// Creates and updates a product, then deletes it by the cached
/// identifier. Returns the deleted identifier.
///
/// # Errors
///
/// Propagates fixture failures, then see [`verify`].
pub async fn run(ctx: &mut SuiteContext) -> ScenarioResult<String> {
    tracing::info!(scenario = NAME, "scenario started");

    fixtures::updated_product(ctx).await?;
    let id = ctx.last_created_id()?.to_string();

    let response = ctx.api().delete(&id).await?;
    verify(ctx.runner(), &response, &id)?;

    tracing::info!(scenario = NAME, id = %id, "scenario passed");
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::time::Duration;

    fn response(status: u16, body: &str) -> ResponseSpec {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        ResponseSpec::new(status, headers, body.as_bytes().to_vec(), Duration::from_millis(20))
    }

    #[test]
    fn test_confirmation_passes() {
        let body = r#"{"message":"Object with id = ff80818193 has been deleted."}"#;
        assert!(verify(&TestRunner::new(), &response(200, body), "ff80818193").is_ok());
    }

    #[test]
    fn test_confirmation_for_other_id_fails() {
        let body = r#"{"message":"Object with id = ff80818194 has been deleted."}"#;
        let result = verify(&TestRunner::new(), &response(200, body), "ff80818193");
        assert!(matches!(result, Err(ScenarioError::AssertionsFailed { .. })));
    }

    #[test]
    fn test_reformatted_body_fails() {
        let body = r#"{ "message": "Object with id = ff80818193 has been deleted." }"#;
        let result = verify(&TestRunner::new(), &response(200, body), "ff80818193");
        assert!(matches!(result, Err(ScenarioError::AssertionsFailed { .. })));
    }

    #[test]
    fn test_not_found_fails() {
        let body = r#"{"error":"Object with id = ff80818193 doesn't exist."}"#;
        let result = verify(&TestRunner::new(), &response(404, body), "ff80818193");
        assert!(matches!(
            result,
            Err(ScenarioError::UnexpectedStatus { actual: 404, .. })
        ));
    }
}
