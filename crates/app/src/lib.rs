//! crudcheck - End-to-end CRUD suite for the objects REST API
//!
//! A [`SuiteContext`] owns the HTTP client for one run. Each scenario in
//! [`scenarios`] builds its prerequisite remote state through [`fixtures`],
//! sends one call and judges the response with the assertion runner.

pub mod checks;
pub mod context;
pub mod error;
pub mod fixtures;
pub mod scenarios;

pub use context::SuiteContext;
pub use error::{ScenarioError, ScenarioResult};
pub use fixtures::CreatedProduct;
