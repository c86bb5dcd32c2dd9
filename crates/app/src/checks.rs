//! Shared response checks.
//!
//! Status is checked first and is terminal; field-level checks are expressed
//! as assertions so every mismatch of a response is reported together.

use crudcheck_domain::{
    Assertion, Product, ProductAttributes, ResponseSpec, TestResults, TestSuite,
};
use crudcheck_infrastructure::{TestRunner, from_json, to_json_value};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::error::{ScenarioError, ScenarioResult};

/// Every scenario expects this status.
pub const EXPECTED_STATUS: u16 = 200;

/// Media type of every body the service returns.
pub const JSON_MEDIA_TYPE: &str = "application/json";

/// Fails unless the response carries `expected`.
///
/// # Errors
///
/// Returns `ScenarioError::UnexpectedStatus` naming both codes.
pub fn expect_status(
    runner: &TestRunner,
    response: &ResponseSpec,
    expected: u16,
) -> ScenarioResult<()> {
    if runner.run_assertion(&Assertion::status(expected), response).passed {
        Ok(())
    } else {
        Err(ScenarioError::UnexpectedStatus {
            expected,
            actual: response.status,
            body: response.body.clone(),
        })
    }
}

/// Decodes the body as `T`.
///
/// # Errors
///
/// Returns `ScenarioError::Decode` for an empty, `null` or malformed body.
pub fn decode<T: DeserializeOwned>(response: &ResponseSpec) -> ScenarioResult<T> {
    Ok(from_json(&response.body)?)
}

/// Decodes a single product and requires its attributes record.
///
/// # Errors
///
/// Returns `ScenarioError::Decode` or `ScenarioError::MissingAttributes`.
pub fn decode_product(response: &ResponseSpec, scenario: &'static str) -> ScenarioResult<Product> {
    let product: Product = decode(response)?;
    if product.data.is_none() {
        return Err(ScenarioError::MissingAttributes { scenario });
    }
    Ok(product)
}

/// Returns the product's identifier.
///
/// # Errors
///
/// Returns `ScenarioError::FieldMismatch` if it is absent or empty.
pub fn require_identifier(product: &Product) -> ScenarioResult<String> {
    product
        .identifier()
        .map(str::to_string)
        .ok_or_else(|| ScenarioError::FieldMismatch {
            field: "id".to_string(),
            expected: "a non-empty identifier".to_string(),
            actual: format!("{:?}", product.id),
        })
}

/// Compares one decoded field.
///
/// # Errors
///
/// Returns `ScenarioError::FieldMismatch` naming the field.
pub fn expect_field(field: &str, expected: &str, actual: Option<&str>) -> ScenarioResult<()> {
    if actual == Some(expected) {
        Ok(())
    } else {
        Err(ScenarioError::FieldMismatch {
            field: field.to_string(),
            expected: expected.to_string(),
            actual: actual.unwrap_or("<absent>").to_string(),
        })
    }
}

/// `$.id` is a string with at least one character.
#[must_use]
pub fn non_empty_id() -> Assertion {
    Assertion::NonEmptyString {
        path: "$.id".to_string(),
    }
}

/// One equality assertion per attribute that was sent; absent attributes
/// produce nothing.
///
/// # Errors
///
/// Returns `ScenarioError::Request` if the attributes cannot be serialized.
pub fn attribute_assertions(attributes: &ProductAttributes) -> ScenarioResult<Vec<Assertion>> {
    let value = to_json_value(attributes).map_err(|e| ScenarioError::Request(e.to_string()))?;
    let Value::Object(fields) = value else {
        return Err(ScenarioError::Request(
            "attributes did not serialize to an object".to_string(),
        ));
    };

    Ok(fields
        .into_iter()
        .map(|(key, value)| Assertion::json_equals(format!("$.data.{key}"), value))
        .collect())
}

/// Name and every sent attribute of `sent` must come back unchanged.
///
/// # Errors
///
/// Returns `ScenarioError::Request` if the attributes cannot be serialized.
pub fn echo_assertions(sent: &Product) -> ScenarioResult<Vec<Assertion>> {
    let mut assertions = Vec::new();
    if let Some(name) = &sent.name {
        assertions.push(Assertion::json_equals("$.name", json!(name)));
    }
    if let Some(attributes) = &sent.data {
        assertions.extend(attribute_assertions(attributes)?);
    }
    Ok(assertions)
}

/// Runs the suite and turns any failure into an error.
///
/// # Errors
///
/// Returns `ScenarioError::AssertionsFailed` listing every failed assertion.
pub fn run_suite(
    runner: &TestRunner,
    suite: &TestSuite,
    response: &ResponseSpec,
) -> ScenarioResult<TestResults> {
    let results = runner.run(suite, response);
    tracing::debug!(
        suite = %results.suite_name,
        passed = results.passed,
        failed = results.failed,
        duration_ms = results.duration_ms,
        "assertions evaluated"
    );

    if results.all_passed() {
        Ok(results)
    } else {
        Err(ScenarioError::AssertionsFailed {
            suite: results.suite_name.clone(),
            failures: results.failures().map(|r| r.summary()).collect(),
        })
    }
}
