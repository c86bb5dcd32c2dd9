//! Update scenario: `PUT /objects/{id}`.

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
pub const NAME: &str = "update product";

/// Non-empty id, echoed name and sent attributes, valid `updatedAt`.
///
/// Only the attributes in `sent` are checked; the service may drop or keep
/// the others.
///
/// # Errors
///
/// Returns an error if the sent attributes cannot be serialized.
pub fn expectations(sent: &Product) -> ScenarioResult<TestSuite> {
    Ok(TestSuite::new(NAME)
        .with_assertion(non_empty_id())
        .with_assertions(echo_assertions(sent)?)
        .with_assertion(Assertion::Timestamp {
            path: "$.updatedAt".to_string(),
        }))
}

/// Judges an update response against the payload that was sent.
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

/// Replaces product `id` with `sent` and verifies the response.
pub(crate) async fn submit(ctx: &SuiteContext, id: &str, sent: &Product) -> ScenarioResult<Product> {
    if let Ok(payload) = to_json_pretty(&sent.to_payload()) {
        tracing::debug!(scenario = NAME, id, %payload, "putting product");
    }

    let response = ctx.api().update(id, sent).await?;
    let product = verify(ctx.runner(), &response, sent)?;

    tracing::info!(scenario = NAME, id, "product updated");
    Ok(product)
}

/// Creates a product, then changes its price and colour.
///
/// # Errors
///
/// Propagates fixture failures, then see [`verify`].
pub async fn run(ctx: &mut SuiteContext) -> ScenarioResult<Product> {
    tracing::info!(scenario = NAME, "scenario started");

    fixtures::created_product(ctx).await?;
    let id = ctx.last_created_id()?.to_string();
    let product = submit(ctx, &id, &fixtures::price_and_color_update()).await?;

    tracing::info!(scenario = NAME, id = %id, "scenario passed");
    Ok(product)
}
