//! Service layer module
//!
//! Contains the upstream API client

pub mod client;

pub use client::{RestaurantApi, UpstreamClient};
