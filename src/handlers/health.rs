//! Health check handler

use crate::models::HealthResponse;
use axum::response::Json;
use tracing::debug;

/// Basic health check
///
/// GET /
pub async fn health_check() -> Json<HealthResponse> {
    debug!("Executing health check");

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        message: "✅ Food delivery proxy is live".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_check() {
        let response = health_check().await.0;

        assert_eq!(response.status, "healthy");
        assert_eq!(response.version, "1.0.0");
    }
}
