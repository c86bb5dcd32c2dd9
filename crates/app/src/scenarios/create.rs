//! Create scenario: `POST /objects`.

use crudcheck_domain::{Assertion, Product, ResponseSpec, TestSuite};
use crudcheck_infrastructure::{TestRunner, to_json_pretty};

use crate::checks::{
    EXPECTED_STATUS, decode_product, echo_assertions, expect_status, non_empty_id,
    require_identifier, run_suite,
};
use crate::context::SuiteContext;
use crate::error::ScenarioResult;
use crate::fixtures;

/// Scenario name used in logs and reports.
pub const NAME: &str = "create product";

/// Non-empty id, echoed name and attributes, valid `createdAt`.
///
/// # Errors
///
/// Returns an error if the sent attributes cannot be serialized.
pub fn expectations(sent: &Product) -> ScenarioResult<TestSuite> {
    Ok(TestSuite::new(NAME)
        .with_assertion(non_empty_id())
        .with_assertions(echo_assertions(sent)?)
        .with_assertion(Assertion::Timestamp {
            path: "$.createdAt".to_string(),
        }))
}

/// Judges a create response against the payload that was sent.
///
/// # Errors
///
/// Fails on a non-200 status, an undecodable body, a missing attributes
/// record, a missing identifier or any field mismatch.
pub fn verify(runner: &TestRunner, response: &ResponseSpec, sent: &Product) -> ScenarioResult<Product> {
    expect_status(runner, response, EXPECTED_STATUS)?;
    let product = decode_product(response, NAME)?;
    require_identifier(&product)?;
    run_suite(runner, &expectations(sent)?, response)?;
    Ok(product)
}

/// Sends `sent`, verifies the response and caches the new identifier.
pub(crate) async fn submit(
    ctx: &mut SuiteContext,
    sent: &Product,
) -> ScenarioResult<(String, Product)> {
    if let Ok(payload) = to_json_pretty(&sent.to_payload()) {
        tracing::debug!(scenario = NAME, %payload, "posting product");
    }

    let response = ctx.api().create(sent).await?;
    let product = verify(ctx.runner(), &response, sent)?;
    let id = require_identifier(&product)?;

    ctx.remember_created(id.as_str());
    tracing::info!(scenario = NAME, id = %id, "product created");
    Ok((id, product))
}

/// Creates the fixture product.
///
/// # Errors
///
/// See [`verify`]; transport failures are returned as-is.
pub async fn run(ctx: &mut SuiteContext) -> ScenarioResult<Product> {
    tracing::info!(scenario = NAME, "scenario started");

    let created = fixtures::created_product(ctx).await?;

    tracing::info!(scenario = NAME, id = %created.id, "scenario passed");
    Ok(created.received)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::time::Duration;

    use crudcheck_domain::ProductAttributes;
    use pretty_assertions::assert_eq;

    use crate::error::ScenarioError;

    fn response(status: u16, body: &str) -> ResponseSpec {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        ResponseSpec::new(status, headers, body.as_bytes().to_vec(), Duration::from_millis(20))
    }

    const CREATED: &str = r#"{"id":"ff808181932badb60193c1b7e4dd1b4b","name":"Apple MacBook Pro 16","createdAt":"2024-12-12T10:11:12.345+00:00","data":{"year":2019,"price":1849.99,"cpuModel":"Intel Core i9","hardDiskSize":"1 TB"}}"#;

    #[test]
    fn test_echoed_product_passes() {
        let product = verify(&TestRunner::new(), &response(200, CREATED), &fixtures::macbook())
            .expect("response echoes the payload");

        assert_eq!(product.identifier(), Some("ff808181932badb60193c1b7e4dd1b4b"));
        assert_eq!(product.name.as_deref(), Some(fixtures::PRODUCT_NAME));
        assert_eq!(
            product.data,
            Some(ProductAttributes::laptop(2019, 1849.99, "Intel Core i9", "1 TB"))
        );
        assert!(product.has_valid_created_at());
    }

    #[test]
    fn test_changed_price_is_reported_by_field() {
        let body = CREATED.replace("1849.99", "1799.99");
        let error = verify(&TestRunner::new(), &response(200, &body), &fixtures::macbook())
            .expect_err("price differs");

        match error {
            ScenarioError::AssertionsFailed { failures, .. } => {
                assert_eq!(failures.len(), 1);
                assert!(failures[0].contains("$.data.price"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_created_at_fails() {
        let body = CREATED.replace(r#""createdAt":"2024-12-12T10:11:12.345+00:00","#, "");
        let result = verify(&TestRunner::new(), &response(200, &body), &fixtures::macbook());
        assert!(matches!(result, Err(ScenarioError::AssertionsFailed { .. })));
    }

    #[test]
    fn test_response_without_attributes_fails() {
        let body = r#"{"id":"1","name":"Apple MacBook Pro 16","createdAt":"2024-12-12T10:11:12Z"}"#;
        let result = verify(&TestRunner::new(), &response(200, body), &fixtures::macbook());
        assert!(matches!(
            result,
            Err(ScenarioError::MissingAttributes { scenario: NAME })
        ));
    }

    #[test]
    fn test_empty_identifier_fails() {
        let body = CREATED.replace("ff808181932badb60193c1b7e4dd1b4b", "");
        let result = verify(&TestRunner::new(), &response(200, &body), &fixtures::macbook());
        assert!(matches!(result, Err(ScenarioError::FieldMismatch { .. })));
    }

    #[test]
    fn test_identifier_must_be_a_string() {
        for id in ["null", "7", "false"] {
            let body = CREATED.replace(r#""ff808181932badb60193c1b7e4dd1b4b""#, id);
            let result = verify(&TestRunner::new(), &response(200, &body), &fixtures::macbook());
            assert!(result.is_err(), "id {id} must not verify");
        }

        let body = CREATED.replace(r#""ff808181932badb60193c1b7e4dd1b4b""#, "null");
        let result = verify(&TestRunner::new(), &response(200, &body), &fixtures::macbook());
        assert!(matches!(
            result,
            Err(ScenarioError::FieldMismatch { ref field, .. }) if field == "id"
        ));
    }

    #[test]
    fn test_zero_created_at_fails() {
        let body = CREATED.replace("2024-12-12T10:11:12.345+00:00", "0001-01-01T00:00:00+00:00");
        let error = verify(&TestRunner::new(), &response(200, &body), &fixtures::macbook())
            .expect_err("zero date-time is not a server timestamp");

        match error {
            ScenarioError::AssertionsFailed { failures, .. } => {
                assert_eq!(failures.len(), 1);
                assert!(failures[0].contains("$.createdAt"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
