//! Food delivery API proxy library
//!
//! Relays a food-delivery platform's restaurant listing and menu endpoints,
//! wrapping every answer in a uniform JSON envelope

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;

// Re-export common types
pub use config::Settings;
pub use handlers::{create_router, create_router_with_upstream, AppState};
pub use models::{Coordinates, ResponseEnvelope, RestaurantId};
pub use services::{RestaurantApi, UpstreamClient};
pub use utils::error::{ApiError, AppError, AppResult};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Library description
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Get version information
pub fn version_info() -> String {
    format!("{} v{} - {}", NAME, VERSION, DESCRIPTION)
}
