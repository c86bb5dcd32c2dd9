//! Use cases for the objects API endpoints.

mod objects_api;

pub use objects_api::{OBJECTS_PATH, ObjectsApi};
