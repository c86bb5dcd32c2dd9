//! HTTP request types
//!
//! Describes an outbound call independent of the HTTP library that sends it.

mod body;
mod method;
mod spec;

pub use body::{RequestBody, RequestBodyKind};
pub use method::HttpMethod;
pub use spec::{RequestHeader, RequestSpec};
