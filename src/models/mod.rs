//! Data models module
//!
//! Defines the response envelope and the request parameters handled by the proxy

pub mod envelope;
pub mod request;

pub use envelope::{HealthResponse, ResponseEnvelope};
pub use request::{CoordinateQuery, Coordinates, RestaurantId};
