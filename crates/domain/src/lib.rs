//! crudcheck Domain - Core types for the objects API suite
//!
//! This crate defines the product resource model, the request and response
//! shapes exchanged with the remote service, and the assertion model the
//! suite evaluates. All types here are pure Rust with no I/O dependencies.

pub mod error;
pub mod product;
pub mod request;
pub mod response;
pub mod testing;

pub use error::{DomainError, DomainResult};
pub use product::{
    DeletionMessage, MIN_VALID_TIMESTAMP, MIN_VALID_TIMESTAMP_SECS, Product, ProductAttributes,
    is_valid_timestamp,
};
pub use request::{HttpMethod, RequestBody, RequestSpec};
pub use response::{ResponseSpec, StatusCode};
pub use testing::{Assertion, AssertionResult, ComparisonOperator, TestResults, TestSuite};
