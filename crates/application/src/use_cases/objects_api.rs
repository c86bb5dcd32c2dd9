//! Objects API use case.
//!
//! Builds and sends the five calls the remote service exposes:
//! `GET`/`POST` on the collection and `GET`/`PUT`/`DELETE` on a resource.

use std::sync::Arc;

use crudcheck_domain::{
    DomainError, Product,
    request::{RequestBody, RequestSpec},
    response::ResponseSpec,
};

use crate::error::ApplicationResult;
use crate::execute_request::ExecuteRequest;
use crate::ports::HttpClient;

/// Path of the collection endpoint relative to the base address.
pub const OBJECTS_PATH: &str = "/objects";

/// Client-side view of the objects API.
///
/// Every method returns the raw response; judging it is the caller's job.
pub struct ObjectsApi<C: HttpClient> {
    executor: ExecuteRequest<C>,
    base_url: String,
}

impl<C: HttpClient> ObjectsApi<C> {
    /// Creates the use case for the service at `base_url`.
    pub fn new(client: Arc<C>, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            executor: ExecuteRequest::new(client),
            base_url,
        }
    }

    /// The base address requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the collection endpoint.
    #[must_use]
    pub fn collection_url(&self) -> String {
        format!("{}{OBJECTS_PATH}", self.base_url)
    }

    /// URL of a single resource.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidIdentifier` for an empty identifier.
    pub fn resource_url(&self, id: &str) -> ApplicationResult<String> {
        let id = id.trim();
        if id.is_empty() {
            return Err(DomainError::InvalidIdentifier("identifier is empty".to_string()).into());
        }
        Ok(format!("{}{OBJECTS_PATH}/{id}", self.base_url))
    }

    /// Builds the list request.
    #[must_use]
    pub fn list_request(&self) -> RequestSpec {
        RequestSpec::get(self.collection_url()).with_header("Accept", "application/json")
    }

    /// Builds the create request. Only name and attributes are sent.
    ///
    /// # Errors
    ///
    /// Returns an error if the product cannot be serialized.
    pub fn create_request(&self, product: &Product) -> ApplicationResult<RequestSpec> {
        Ok(RequestSpec::post(self.collection_url())
            .with_header("Accept", "application/json")
            .with_body(payload(product)?))
    }

    /// Builds the read-one request.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty identifier.
    pub fn get_request(&self, id: &str) -> ApplicationResult<RequestSpec> {
        Ok(RequestSpec::get(self.resource_url(id)?).with_header("Accept", "application/json"))
    }

    /// Builds the update request. Only name and attributes are sent.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty identifier or an unserializable product.
    pub fn update_request(&self, id: &str, product: &Product) -> ApplicationResult<RequestSpec> {
        Ok(RequestSpec::put(self.resource_url(id)?)
            .with_header("Accept", "application/json")
            .with_body(payload(product)?))
    }

    /// Builds the delete request.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty identifier.
    pub fn delete_request(&self, id: &str) -> ApplicationResult<RequestSpec> {
        Ok(RequestSpec::delete(self.resource_url(id)?).with_header("Accept", "application/json"))
    }

    /// `GET /objects`
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure.
    pub async fn list(&self) -> ApplicationResult<ResponseSpec> {
        self.send(&self.list_request()).await
    }

    /// `POST /objects`
    ///
    /// # Errors
    ///
    /// Returns an error on serialization or transport failure.
    pub async fn create(&self, product: &Product) -> ApplicationResult<ResponseSpec> {
        self.send(&self.create_request(product)?).await
    }

    /// `GET /objects/{id}`
    ///
    /// # Errors
    ///
    /// Returns an error for an empty identifier or on transport failure.
    pub async fn get(&self, id: &str) -> ApplicationResult<ResponseSpec> {
        self.send(&self.get_request(id)?).await
    }

    /// `PUT /objects/{id}`
    ///
    /// # Errors
    ///
    /// Returns an error for an empty identifier, on serialization or transport failure.
    pub async fn update(&self, id: &str, product: &Product) -> ApplicationResult<ResponseSpec> {
        self.send(&self.update_request(id, product)?).await
    }

    /// `DELETE /objects/{id}`
    ///
    /// # Errors
    ///
    /// Returns an error for an empty identifier or on transport failure.
    pub async fn delete(&self, id: &str) -> ApplicationResult<ResponseSpec> {
        self.send(&self.delete_request(id)?).await
    }

    async fn send(&self, request: &RequestSpec) -> ApplicationResult<ResponseSpec> {
        Ok(self.executor.execute(request).await?)
    }
}

fn payload(product: &Product) -> ApplicationResult<RequestBody> {
    let json = serde_json::to_string(&product.to_payload())?;
    Ok(RequestBody::json(json))
}
