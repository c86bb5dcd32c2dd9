//! Prerequisite remote state for scenarios.
//!
//! A scenario that needs an existing product asks for one here instead of
//! invoking another scenario. Each fixture issues its calls exactly once.

use crudcheck_domain::{Product, ProductAttributes};

use crate::context::SuiteContext;
use crate::error::ScenarioResult;
use crate::scenarios::{create, update};

/// Name every fixture product is created with.
pub const PRODUCT_NAME: &str = "Apple MacBook Pro 16";

/// The product the create fixture sends.
#[must_use]
pub fn macbook() -> Product {
    Product::new(PRODUCT_NAME).with_attributes(ProductAttributes::laptop(
        2019,
        1849.99,
        "Intel Core i9",
        "1 TB",
    ))
}

/// The partial payload the update fixture sends.
#[must_use]
pub fn price_and_color_update() -> Product {
    Product::new(PRODUCT_NAME).with_attributes(ProductAttributes::priced(2049.99, "silver"))
}

/// A product that exists on the server, with what was sent and what came back.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedProduct {
    /// Server-assigned identifier.
    pub id: String,
    /// Payload sent.
    pub sent: Product,
    /// Verified response.
    pub received: Product,
}

/// Creates the MacBook product, verifies the response and caches its
/// identifier in the context.
///
/// # Errors
///
/// Propagates any failure of the create call or its checks.
pub async fn created_product(ctx: &mut SuiteContext) -> ScenarioResult<CreatedProduct> {
    let sent = macbook();
    let (id, received) = create::submit(ctx, &sent).await?;
    Ok(CreatedProduct { id, sent, received })
}

/// Creates the MacBook product and then applies the partial update to it.
/// The returned `sent`/`received` describe the update.
///
/// # Errors
///
/// Propagates any failure of either call or their checks.
pub async fn updated_product(ctx: &mut SuiteContext) -> ScenarioResult<CreatedProduct> {
    let created = created_product(ctx).await?;
    let sent = price_and_color_update();
    let received = update::submit(ctx, &created.id, &sent).await?;
    Ok(CreatedProduct {
        id: created.id,
        sent,
        received,
    })
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_macbook_payload() {
        let json = serde_json::to_value(macbook().to_payload()).expect("serializable");
        assert_eq!(
            json,
            serde_json::json!({
                "name": "Apple MacBook Pro 16",
                "data": {
                    "year": 2019,
                    "price": 1849.99,
                    "cpuModel": "Intel Core i9",
                    "hardDiskSize": "1 TB"
                }
            })
        );
    }

    #[test]
    fn test_update_payload_is_partial() {
        let data = price_and_color_update().data.expect("attributes");
        assert_eq!(data.price, Some(2049.99));
        assert_eq!(data.color.as_deref(), Some("silver"));
        assert_eq!(data.year, None);
        assert_eq!(data.cpu_model, None);
    }
}
