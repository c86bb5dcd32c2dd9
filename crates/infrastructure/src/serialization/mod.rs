//! JSON helpers shared by the suite.
//!
//! Decoding of response bodies and pretty rendering of payloads for logs.

mod json;

pub use json::*;
