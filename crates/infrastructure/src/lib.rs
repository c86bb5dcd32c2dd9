//! crudcheck Infrastructure - Adapters and implementations
//!
//! This crate provides the reqwest-backed HTTP adapter, the assertion
//! runner, JSON helpers, configuration loading and tracing setup.

pub mod adapters;
pub mod config;
pub mod logging;
pub mod serialization;
pub mod testing;

pub use adapters::ReqwestHttpClient;
pub use config::{ConfigError, SuiteConfig};
pub use logging::init_tracing;
pub use serialization::{SerializationError, from_json, to_json_pretty, to_json_value};
pub use testing::TestRunner;
