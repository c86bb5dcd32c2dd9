//! Read scenario: `GET /objects/{id}`.

use crudcheck_domain::{Product, ResponseSpec, TestSuite};
use crudcheck_infrastructure::TestRunner;

use crate::checks::{
    EXPECTED_STATUS, decode_product, echo_assertions, expect_field, expect_status, run_suite,
};
use crate::context::SuiteContext;
use crate::error::ScenarioResult;
use crate::fixtures;

/// Scenario name used in logs and reports.
pub const NAME: &str = "read product";

/// Name and attributes equal what the create call sent.
///
/// # Errors
///
/// Returns an error if the sent attributes cannot be serialized.
pub fn expectations(sent: &Product) -> ScenarioResult<TestSuite> {
    Ok(TestSuite::new(NAME).with_assertions(echo_assertions(sent)?))
}

/// Judges a read response for `expected_id`.
///
/// # Errors
///
/// Fails on a non-200 status, an undecodable body, a missing attributes
/// record, a different identifier or any field mismatch.
pub fn verify(
    runner: &TestRunner,
    response: &ResponseSpec,
    expected_id: &str,
    sent: &Product,
) -> ScenarioResult<Product> {
    expect_status(runner, response, EXPECTED_STATUS)?;
    let product = decode_product(response, NAME)?;
    expect_field("id", expected_id, product.id.as_deref())?;
    run_suite(runner, &expectations(sent)?, response)?;
    Ok(product)
}

/// Creates a product, then reads it back by the cached identifier.
///
/// # Errors
///
/// Propagates fixture failures, then see [`verify`].
pub async fn run(ctx: &mut SuiteContext) -> ScenarioResult<Product> {
    tracing::info!(scenario = NAME, "scenario started");

    let created = fixtures::created_product(ctx).await?;
    let id = ctx.last_created_id()?.to_string();

    let response = ctx.api().get(&id).await?;
    let product = verify(ctx.runner(), &response, &id, &created.sent)?;

    tracing::info!(scenario = NAME, id = %id, "scenario passed");
    Ok(product)
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::time::Duration;

    use pretty_assertions::assert_eq;

    use crate::error::ScenarioError;

    fn response(status: u16, body: &str) -> ResponseSpec {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        ResponseSpec::new(status, headers, body.as_bytes().to_vec(), Duration::from_millis(20))
    }

    const STORED: &str = r#"{"id":"ff80818193","name":"Apple MacBook Pro 16","data":{"year":2019,"price":1849.99,"cpuModel":"Intel Core i9","hardDiskSize":"1 TB"}}"#;

    #[test]
    fn test_stored_product_passes() {
        let product = verify(
            &TestRunner::new(),
            &response(200, STORED),
            "ff80818193",
            &fixtures::macbook(),
        )
        .expect("stored product matches");

        assert_eq!(product.identifier(), Some("ff80818193"));
        assert_eq!(product.to_payload(), fixtures::macbook());
    }

    #[test]
    fn test_other_identifier_fails() {
        let result = verify(
            &TestRunner::new(),
            &response(200, STORED),
            "ff80818194",
            &fixtures::macbook(),
        );
        assert!(matches!(
            result,
            Err(ScenarioError::FieldMismatch { ref field, .. }) if field == "id"
        ));
    }

    #[test]
    fn test_unknown_identifier_reports_status() {
        let body = r#"{"error":"Oject with id=ff80818194 was not found."}"#;
        let result = verify(
            &TestRunner::new(),
            &response(404, body),
            "ff80818194",
            &fixtures::macbook(),
        );
        assert!(matches!(
            result,
            Err(ScenarioError::UnexpectedStatus { actual: 404, .. })
        ));
    }

    #[test]
    fn test_different_cpu_fails() {
        let body = STORED.replace("Intel Core i9", "Intel Core i7");
        let result = verify(
            &TestRunner::new(),
            &response(200, &body),
            "ff80818193",
            &fixtures::macbook(),
        );
        assert!(matches!(result, Err(ScenarioError::AssertionsFailed { .. })));
    }
}
