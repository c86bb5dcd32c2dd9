//! Test runner implementation.
//!
//! Executes assertions against HTTP responses and produces test results.

use std::time::Instant;

use chrono::{DateTime, Utc};
use crudcheck_domain::response::ResponseSpec;
use crudcheck_domain::testing::{
    Assertion, AssertionResult, ComparisonOperator, TestResults, TestSuite,
};
use crudcheck_domain::{MIN_VALID_TIMESTAMP, is_valid_timestamp};
use serde_json::Value;

/// Test runner that executes assertions against responses.
///
/// Every assertion of a suite runs unless the suite sets `stop_on_failure`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TestRunner;

#[allow(clippy::unused_self)]
impl TestRunner {
    /// Create a new test runner.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Run a test suite against a response.
    #[must_use]
    pub fn run(&self, suite: &TestSuite, response: &ResponseSpec) -> TestResults {
        let start = Instant::now();
        // Parsed once; every path assertion reads from the same tree.
        let json = serde_json::from_str::<Value>(&response.body).map_err(|e| e.to_string());
        let mut results = Vec::with_capacity(suite.assertions.len());

        for assertion in &suite.assertions {
            let result = Self::evaluate(assertion, response, json.as_ref());
            let failed = !result.passed;
            results.push(result);

            if failed && suite.stop_on_failure {
                break;
            }
        }

        #[allow(clippy::cast_possible_truncation)]
        let duration_ms = start.elapsed().as_millis() as u64;
        TestResults::new(&suite.name, results, duration_ms)
    }

    /// Run a single assertion against a response.
    #[must_use]
    pub fn run_assertion(&self, assertion: &Assertion, response: &ResponseSpec) -> AssertionResult {
        let json = serde_json::from_str::<Value>(&response.body).map_err(|e| e.to_string());
        Self::evaluate(assertion, response, json.as_ref())
    }

    fn evaluate(
        assertion: &Assertion,
        response: &ResponseSpec,
        json: Result<&Value, &String>,
    ) -> AssertionResult {
        match assertion {
            Assertion::StatusCode { expected } => check_status_code(assertion, response, *expected),
            Assertion::ContentType { expected } => {
                check_content_type(assertion, response, expected)
            }
            Assertion::IsJson => match json {
                Ok(_) => AssertionResult::pass(assertion.clone()),
                Err(e) => {
                    AssertionResult::fail(assertion.clone(), format!("Body is not valid JSON: {e}"))
                }
            },
            Assertion::BodyLength { operator, length } => {
                check_body_length(assertion, response, *operator, *length)
            }
            Assertion::BodyEquals { expected } => check_body_equals(assertion, response, expected),
            Assertion::JsonPath { path, expected } => {
                with_path_value(assertion, json, path, |value| match expected {
                    Some(expected) if value != expected => AssertionResult::fail_with_value(
                        assertion.clone(),
                        value.to_string(),
                        format!("JSON path '{path}' value mismatch: expected {expected}, got {value}"),
                    ),
                    _ => AssertionResult::pass_with_value(assertion.clone(), value.to_string()),
                })
            }
            Assertion::JsonPathMatches {
                path,
                operator,
                value: expected,
            } => with_path_value(assertion, json, path, |value| {
                if compare_json_values(value, *operator, expected) {
                    AssertionResult::pass_with_value(assertion.clone(), value.to_string())
                } else {
                    AssertionResult::fail_with_value(
                        assertion.clone(),
                        value.to_string(),
                        format!(
                            "JSON path '{path}' comparison failed: {value} {} {expected}",
                            operator.symbol()
                        ),
                    )
                }
            }),
            Assertion::NonEmptyString { path } => with_path_value(assertion, json, path, |value| {
                check_non_empty_string(assertion, path, value)
            }),
            Assertion::Timestamp { path } => with_path_value(assertion, json, path, |value| {
                check_timestamp(assertion, path, value)
            }),
        }
    }
}

fn check_status_code(
    assertion: &Assertion,
    response: &ResponseSpec,
    expected: u16,
) -> AssertionResult {
    let actual = response.status;
    if actual == expected {
        AssertionResult::pass_with_value(assertion.clone(), actual.to_string())
    } else {
        AssertionResult::fail_with_value(
            assertion.clone(),
            actual.to_string(),
            format!("Expected status {expected}, got {actual}"),
        )
    }
}

fn check_content_type(
    assertion: &Assertion,
    response: &ResponseSpec,
    expected: &str,
) -> AssertionResult {
    match response.media_type() {
        Some(actual) if actual.eq_ignore_ascii_case(expected) => {
            AssertionResult::pass_with_value(assertion.clone(), actual)
        }
        Some(actual) => AssertionResult::fail_with_value(
            assertion.clone(),
            actual,
            format!("Content-Type '{actual}' is not '{expected}'"),
        ),
        None => AssertionResult::fail(assertion.clone(), "No Content-Type header present"),
    }
}

fn check_body_length(
    assertion: &Assertion,
    response: &ResponseSpec,
    operator: ComparisonOperator,
    expected_length: usize,
) -> AssertionResult {
    let actual_length = response.body.len();
    let matches = match operator {
        ComparisonOperator::Equals => actual_length == expected_length,
        ComparisonOperator::NotEquals => actual_length != expected_length,
        ComparisonOperator::GreaterThan => actual_length > expected_length,
        ComparisonOperator::GreaterThanOrEqual => actual_length >= expected_length,
        ComparisonOperator::LessThan => actual_length < expected_length,
        ComparisonOperator::LessThanOrEqual => actual_length <= expected_length,
        ComparisonOperator::Contains => false,
    };

    if matches {
        AssertionResult::pass_with_value(assertion.clone(), actual_length.to_string())
    } else {
        AssertionResult::fail_with_value(
            assertion.clone(),
            actual_length.to_string(),
            format!(
                "Body length {actual_length} does not satisfy {} {expected_length}",
                operator.symbol()
            ),
        )
    }
}

fn check_body_equals(assertion: &Assertion, response: &ResponseSpec, expected: &str) -> AssertionResult {
    if response.body == expected {
        AssertionResult::pass(assertion.clone())
    } else {
        AssertionResult::fail_with_value(
            assertion.clone(),
            preview(&response.body),
            "Body does not match expected value",
        )
    }
}

fn check_non_empty_string(assertion: &Assertion, path: &str, value: &Value) -> AssertionResult {
    match value {
        Value::String(text) if !text.is_empty() => {
            AssertionResult::pass_with_value(assertion.clone(), text.as_str())
        }
        Value::String(_) => AssertionResult::fail_with_value(
            assertion.clone(),
            "\"\"",
            format!("JSON path '{path}' is an empty string"),
        ),
        other => AssertionResult::fail_with_value(
            assertion.clone(),
            other.to_string(),
            format!("JSON path '{path}' is not a string"),
        ),
    }
}

fn check_timestamp(assertion: &Assertion, path: &str, value: &Value) -> AssertionResult {
    let Some(text) = value.as_str() else {
        return AssertionResult::fail_with_value(
            assertion.clone(),
            value.to_string(),
            format!("JSON path '{path}' is not a string"),
        );
    };

    match DateTime::parse_from_rfc3339(text) {
        Ok(parsed) if is_valid_timestamp(parsed.with_timezone(&Utc)) => {
            AssertionResult::pass_with_value(assertion.clone(), text)
        }
        Ok(_) => AssertionResult::fail_with_value(
            assertion.clone(),
            text,
            format!("JSON path '{path}' is not later than {MIN_VALID_TIMESTAMP}"),
        ),
        Err(e) => AssertionResult::fail_with_value(
            assertion.clone(),
            text,
            format!("JSON path '{path}' is not an RFC 3339 date-time: {e}"),
        ),
    }
}

/// Resolves `path` in the parsed body and hands the value to `check`.
fn with_path_value(
    assertion: &Assertion,
    json: Result<&Value, &String>,
    path: &str,
    check: impl FnOnce(&Value) -> AssertionResult,
) -> AssertionResult {
    let json = match json {
        Ok(json) => json,
        Err(e) => {
            return AssertionResult::fail(
                assertion.clone(),
                format!("Failed to parse body as JSON: {e}"),
            );
        }
    };

    match query_json_path(json, path) {
        Ok(Some(value)) => check(value),
        Ok(None) => AssertionResult::fail(assertion.clone(), format!("JSON path '{path}' not found")),
        Err(e) => AssertionResult::fail(assertion.clone(), format!("Invalid JSON path '{path}': {e}")),
    }
}

fn preview(body: &str) -> String {
    match body.char_indices().nth(100) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

/// Query a JSON value using a simple JSONPath-like syntax.
/// Supports: $.field, $.field.nested, $.array[0]
fn query_json_path<'a>(json: &'a Value, path: &str) -> Result<Option<&'a Value>, String> {
    let Some(rest) = path.trim().strip_prefix('$') else {
        return Err("JSON path must start with '$'".to_string());
    };
    let rest = rest.strip_prefix('.').unwrap_or(rest);

    let mut current = json;
    for segment in rest.split('.').filter(|s| !s.is_empty()) {
        let (name, index) = match parse_array_access(segment) {
            Some((name, index)) => (name, Some(index)),
            None => (segment, None),
        };

        if !name.is_empty() {
            current = match current.get(name) {
                Some(v) => v,
                None => return Ok(None),
            };
        }

        if let Some(index) = index {
            let idx: usize = index
                .parse()
                .map_err(|_| format!("Invalid array index: {index}"))?;
            current = match current.get(idx) {
                Some(v) => v,
                None => return Ok(None),
            };
        }
    }

    Ok(Some(current))
}

/// Parse array access like "field[0]" into ("field", "0").
fn parse_array_access(segment: &str) -> Option<(&str, &str)> {
    let bracket_start = segment.find('[')?;
    let inner = segment[bracket_start + 1..].strip_suffix(']')?;
    Some((&segment[..bracket_start], inner))
}

/// Compare two JSON values using the given operator.
fn compare_json_values(actual: &Value, operator: ComparisonOperator, expected: &Value) -> bool {
    match operator {
        ComparisonOperator::Equals => actual == expected,
        ComparisonOperator::NotEquals => actual != expected,
        ComparisonOperator::GreaterThan => compare_numeric(actual, expected, |a, b| a > b),
        ComparisonOperator::GreaterThanOrEqual => compare_numeric(actual, expected, |a, b| a >= b),
        ComparisonOperator::LessThan => compare_numeric(actual, expected, |a, b| a < b),
        ComparisonOperator::LessThanOrEqual => compare_numeric(actual, expected, |a, b| a <= b),
        ComparisonOperator::Contains => match (actual, expected) {
            (Value::String(s), Value::String(needle)) => s.contains(needle.as_str()),
            (Value::Array(arr), _) => arr.contains(expected),
            _ => false,
        },
    }
}

/// Compare numeric values.
fn compare_numeric<F>(actual: &Value, expected: &Value, cmp: F) -> bool
where
    F: Fn(f64, f64) -> bool,
{
    match (actual.as_f64(), expected.as_f64()) {
        (Some(a), Some(b)) => cmp(a, b),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::time::Duration;

    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn create_response(status: u16, body: &str, headers: HashMap<String, String>) -> ResponseSpec {
        ResponseSpec::new(status, headers, body.as_bytes().to_vec(), Duration::from_millis(50))
    }

    fn json_response(status: u16, body: &str) -> ResponseSpec {
        let mut headers = HashMap::new();
        headers.insert(
            "Content-Type".to_string(),
            "application/json; charset=utf-8".to_string(),
        );
        create_response(status, body, headers)
    }

    const CREATED: &str = r#"{"id":"ff80818193","name":"Apple MacBook Pro 16","createdAt":"2024-12-12T10:11:12.345+00:00","data":{"year":2019,"price":1849.99,"cpuModel":"Intel Core i9","hardDiskSize":"1 TB"}}"#;

    #[test]
    fn test_status_code_exact() {
        let runner = TestRunner::new();
        let response = create_response(200, "", HashMap::new());

        assert!(runner.run_assertion(&Assertion::status(200), &response).passed);

        let result = runner.run_assertion(&Assertion::status(201), &response);
        assert!(!result.passed);
        assert_eq!(result.error.as_deref(), Some("Expected status = 201, got 200"));
    }

    #[test]
    fn test_content_type_compares_media_type() {
        let runner = TestRunner::new();
        let assertion = Assertion::ContentType {
            expected: "application/json".to_string(),
        };

        assert!(runner.run_assertion(&assertion, &json_response(200, "[]")).passed);

        let plain = create_response(200, "[]", HashMap::new());
        assert!(!runner.run_assertion(&assertion, &plain).passed);
    }

    #[test]
    fn test_is_json() {
        let runner = TestRunner::new();

        let response = create_response(200, r#"{"valid": true}"#, HashMap::new());
        assert!(runner.run_assertion(&Assertion::IsJson, &response).passed);

        let response = create_response(200, "not json", HashMap::new());
        assert!(!runner.run_assertion(&Assertion::IsJson, &response).passed);
    }

    #[test]
    fn test_body_length() {
        let runner = TestRunner::new();
        let assertion = Assertion::BodyLength {
            operator: ComparisonOperator::GreaterThan,
            length: 0,
        };

        assert!(runner.run_assertion(&assertion, &json_response(200, "[]")).passed);
        assert!(!runner.run_assertion(&assertion, &json_response(200, "")).passed);
    }

    #[test]
    fn test_body_equals_is_exact() {
        let runner = TestRunner::new();
        let expected = r#"{"message":"Object with id = 7 has been deleted."}"#;
        let assertion = Assertion::BodyEquals {
            expected: expected.to_string(),
        };

        assert!(runner.run_assertion(&assertion, &json_response(200, expected)).passed);

        let spaced = r#"{"message": "Object with id = 7 has been deleted."}"#;
        assert!(!runner.run_assertion(&assertion, &json_response(200, spaced)).passed);
    }

    #[test]
    fn test_json_path_equality() {
        let runner = TestRunner::new();
        let response = json_response(200, CREATED);

        let result = runner.run_assertion(
            &Assertion::json_equals("$.data.price", json!(1849.99)),
            &response,
        );
        assert!(result.passed);

        let result = runner.run_assertion(
            &Assertion::json_equals("$.data.cpuModel", json!("AMD")),
            &response,
        );
        assert!(!result.passed);
        assert_eq!(result.actual.as_deref(), Some("\"Intel Core i9\""));

        let result = runner.run_assertion(
            &Assertion::JsonPath {
                path: "$.data.color".to_string(),
                expected: None,
            },
            &response,
        );
        assert!(!result.passed);
    }

    #[test]
    fn test_json_path_with_array() {
        let runner = TestRunner::new();
        let response = json_response(200, r#"[{"id":"1"},{"id":"2"}]"#);

        let result = runner.run_assertion(&Assertion::json_equals("$[1].id", json!("2")), &response);
        assert!(result.passed);

        let result = runner.run_assertion(&Assertion::json_equals("$[5].id", json!("2")), &response);
        assert!(!result.passed);
    }

    #[test]
    fn test_json_path_matches() {
        let runner = TestRunner::new();
        let response = json_response(200, CREATED);

        let non_empty_id = Assertion::JsonPathMatches {
            path: "$.id".to_string(),
            operator: ComparisonOperator::NotEquals,
            value: json!(""),
        };
        assert!(runner.run_assertion(&non_empty_id, &response).passed);

        let cheap = Assertion::JsonPathMatches {
            path: "$.data.price".to_string(),
            operator: ComparisonOperator::LessThan,
            value: json!(1000),
        };
        assert!(!runner.run_assertion(&cheap, &response).passed);
    }

    #[test]
    fn test_timestamp() {
        let runner = TestRunner::new();
        let assertion = Assertion::Timestamp {
            path: "$.createdAt".to_string(),
        };

        assert!(runner.run_assertion(&assertion, &json_response(200, CREATED)).passed);

        let missing = json_response(200, r#"{"id":"1"}"#);
        assert!(!runner.run_assertion(&assertion, &missing).passed);

        let garbage = json_response(200, r#"{"createdAt":"yesterday"}"#);
        assert!(!runner.run_assertion(&assertion, &garbage).passed);
    }

    #[test]
    fn test_timestamp_rejects_zero_date() {
        let runner = TestRunner::new();
        for path in ["$.createdAt", "$.updatedAt"] {
            let assertion = Assertion::Timestamp {
                path: path.to_string(),
            };
            let zero = json_response(
                200,
                r#"{"createdAt":"0001-01-01T00:00:00+00:00","updatedAt":"0001-01-01T00:00:00Z"}"#,
            );

            let result = runner.run_assertion(&assertion, &zero);
            assert!(!result.passed);
            assert!(
                result
                    .error
                    .as_deref()
                    .is_some_and(|e| e.ends_with("is not later than 0001-01-01T00:00:00Z"))
            );
        }

        let just_after = json_response(200, r#"{"updatedAt":"0001-01-01T00:00:01Z"}"#);
        let assertion = Assertion::Timestamp {
            path: "$.updatedAt".to_string(),
        };
        assert!(runner.run_assertion(&assertion, &just_after).passed);
    }

    #[test]
    fn test_non_empty_string() {
        let runner = TestRunner::new();
        let assertion = Assertion::NonEmptyString {
            path: "$.id".to_string(),
        };

        assert!(runner.run_assertion(&assertion, &json_response(200, CREATED)).passed);

        for body in [
            r#"{"id":""}"#,
            r#"{"id":null}"#,
            r#"{"id":7}"#,
            r#"{"id":true}"#,
            r#"{"name":"no id"}"#,
        ] {
            let result = runner.run_assertion(&assertion, &json_response(200, body));
            assert!(!result.passed, "{body} should fail");
        }

        let result = runner.run_assertion(&assertion, &json_response(200, r#"{"id":null}"#));
        assert_eq!(result.actual.as_deref(), Some("null"));
    }

    #[test]
    fn test_path_assertion_on_malformed_body() {
        let runner = TestRunner::new();
        let result = runner.run_assertion(
            &Assertion::json_equals("$.id", json!("1")),
            &json_response(200, "<html>"),
        );
        assert!(!result.passed);
        assert!(
            result
                .error
                .as_deref()
                .is_some_and(|e| e.starts_with("Failed to parse body as JSON"))
        );
    }

    #[test]
    fn test_run_suite_reports_every_failure() {
        let runner = TestRunner::new();
        let response = json_response(200, CREATED);

        let suite = TestSuite::new("create product").with_assertions([
            Assertion::status(200),
            Assertion::json_equals("$.name", json!("Dell XPS")),
            Assertion::json_equals("$.data.year", json!(2019)),
            Assertion::json_equals("$.data.hardDiskSize", json!("2 TB")),
        ]);

        let results = runner.run(&suite, &response);
        assert_eq!(results.total, 4);
        assert_eq!(results.passed, 2);
        assert_eq!(results.failed, 2);
    }

    #[test]
    fn test_stop_on_failure() {
        let runner = TestRunner::new();
        let response = create_response(404, "Not Found", HashMap::new());

        let mut suite = TestSuite::new("Failing Test")
            .with_assertion(Assertion::status(200))
            .with_assertion(Assertion::IsJson);
        suite.stop_on_failure = true;

        let results = runner.run(&suite, &response);
        assert!(!results.all_passed());
        assert_eq!(results.results.len(), 1);
    }

    #[test]
    fn test_preview_truncates_long_bodies() {
        let long = "x".repeat(150);
        assert_eq!(preview(&long).len(), 103);
        assert_eq!(preview("short"), "short");
    }
}
