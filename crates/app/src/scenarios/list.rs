//! List scenario: `GET /objects`.

use crudcheck_domain::{Assertion, ComparisonOperator, Product, ResponseSpec, TestSuite};
use crudcheck_infrastructure::TestRunner;

use crate::checks::{EXPECTED_STATUS, JSON_MEDIA_TYPE, decode, expect_status, run_suite};
use crate::context::SuiteContext;
use crate::error::{ScenarioError, ScenarioResult};

/// Scenario name used in logs and reports.
pub const NAME: &str = "list products";

/// Body checks: JSON media type, non-empty, parseable. Each check is a
/// precondition of the next, so the suite stops at the first failure.
#[must_use]
pub fn expectations() -> TestSuite {
    let mut suite = TestSuite::new(NAME).with_assertions([
        Assertion::ContentType {
            expected: JSON_MEDIA_TYPE.to_string(),
        },
        Assertion::BodyLength {
            operator: ComparisonOperator::GreaterThan,
            length: 0,
        },
        Assertion::IsJson,
    ]);
    suite.stop_on_failure = true;
    suite
}

/// Judges a list response and returns the decoded products.
///
/// # Errors
///
/// Fails on a non-200 status, a failed body check, an undecodable body or
/// an empty collection.
pub fn verify(runner: &TestRunner, response: &ResponseSpec) -> ScenarioResult<Vec<Product>> {
    expect_status(runner, response, EXPECTED_STATUS)?;
    run_suite(runner, &expectations(), response)?;

    let products: Vec<Product> = decode(response)?;
    if products.is_empty() {
        return Err(ScenarioError::EmptyCollection);
    }
    Ok(products)
}

/// Lists every product.
///
/// # Errors
///
/// See [`verify`]; transport failures are returned as-is.
pub async fn run(ctx: &SuiteContext) -> ScenarioResult<Vec<Product>> {
    tracing::info!(scenario = NAME, "scenario started");

    let response = ctx.api().list().await?;
    let products = verify(ctx.runner(), &response)?;

    tracing::info!(scenario = NAME, count = products.len(), "scenario passed");
    Ok(products)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::time::Duration;

    use pretty_assertions::assert_eq;

    fn response(status: u16, content_type: &str, body: &str) -> ResponseSpec {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), content_type.to_string());
        ResponseSpec::new(status, headers, body.as_bytes().to_vec(), Duration::from_millis(20))
    }

    const SEED: &str = r#"[
        {"id":"1","name":"Google Pixel 6 Pro","data":{"color":"Cloudy White","capacity":"128 GB"}},
        {"id":"2","name":"Apple iPhone 12 Mini, 256GB, Blue","data":null},
        {"id":"7","name":"Apple MacBook Pro 16","data":{"year":2019,"price":1849.99,"CPU model":"Intel Core i9","Hard disk size":"1 TB"}}
    ]"#;

    #[test]
    fn test_seed_list_passes() {
        let products = verify(
            &TestRunner::new(),
            &response(200, "application/json", SEED),
        )
        .expect("seed list is valid");

        assert_eq!(products.len(), 3);
        assert_eq!(products[2].identifier(), Some("7"));
    }

    #[test]
    fn test_empty_list_is_a_failure() {
        let result = verify(&TestRunner::new(), &response(200, "application/json", "[]"));
        assert!(matches!(result, Err(ScenarioError::EmptyCollection)));
    }

    #[test]
    fn test_wrong_status_fails_first() {
        let result = verify(&TestRunner::new(), &response(503, "text/html", ""));
        assert!(matches!(
            result,
            Err(ScenarioError::UnexpectedStatus {
                expected: 200,
                actual: 503,
                ..
            })
        ));
    }

    #[test]
    fn test_non_json_media_type_fails() {
        let result = verify(&TestRunner::new(), &response(200, "text/plain", SEED));
        assert!(matches!(result, Err(ScenarioError::AssertionsFailed { .. })));
    }

    #[test]
    fn test_empty_body_stops_at_length_check() {
        let result = verify(&TestRunner::new(), &response(200, "application/json", ""));
        match result {
            Err(ScenarioError::AssertionsFailed { failures, .. }) => {
                assert_eq!(failures.len(), 1);
                assert!(failures[0].starts_with("Body length > 0"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_object_instead_of_array_fails_to_decode() {
        let result = verify(
            &TestRunner::new(),
            &response(200, "application/json", r#"{"id":"1"}"#),
        );
        assert!(matches!(result, Err(ScenarioError::Decode(_))));
    }
}
