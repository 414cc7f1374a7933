//! Error handling module unit tests

use axum::{http::StatusCode, response::IntoResponse};
use foodproxy::utils::error::{panic_response, AppError};
use serde_json::{json, Value};

async fn body_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[test]
fn test_status_codes() {
    let cases = [
        (AppError::InvalidRestaurantId("x".to_string()), StatusCode::BAD_REQUEST),
        (AppError::InvalidQuery("dup".to_string()), StatusCode::BAD_REQUEST),
        (AppError::RestaurantsUnavailable("down".to_string()), StatusCode::INTERNAL_SERVER_ERROR),
        (
            AppError::MenuUnavailable {
                restaurant_id: "1".to_string(),
                detail: "down".to_string(),
            },
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
        (AppError::NotFound("/foo".to_string()), StatusCode::NOT_FOUND),
        (AppError::RateLimited { retry_after_secs: 3 }, StatusCode::TOO_MANY_REQUESTS),
        (AppError::Internal("bug".to_string()), StatusCode::INTERNAL_SERVER_ERROR),
    ];

    for (error, status) in cases {
        assert_eq!(error.status_code(), status, "{}", error);
    }
}

#[test]
fn test_public_messages() {
    assert_eq!(AppError::InvalidRestaurantId("x".to_string()).public_message(), "Invalid restaurant ID format");
    assert_eq!(AppError::RestaurantsUnavailable("e".to_string()).public_message(), "Failed to fetch restaurants");
    assert_eq!(AppError::NotFound("/".to_string()).public_message(), "Endpoint not found");
    assert_eq!(AppError::Internal("e".to_string()).public_message(), "Internal server error");
}

#[test]
fn test_menu_envelope_carries_restaurant_id() {
    let error = AppError::MenuUnavailable {
        restaurant_id: "4242".to_string(),
        detail: "Upstream API responded with status 500".to_string(),
    };

    let envelope = serde_json::to_value(error.to_envelope(false)).unwrap();
    assert_eq!(
        envelope,
        json!({"success": false, "error": "Failed to fetch menu", "restaurantId": "4242"})
    );

    let envelope = error.to_envelope(true);
    assert_eq!(envelope.details.as_deref(), Some("Upstream API responded with status 500"));
}

#[test]
fn test_validation_error_has_no_details() {
    let error = AppError::InvalidRestaurantId("abc".to_string());
    assert!(error.to_envelope(true).details.is_none());
}

#[tokio::test]
async fn test_into_response_hides_details() {
    let response = AppError::RestaurantsUnavailable("connection refused".to_string()).into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({"success": false, "error": "Failed to fetch restaurants"})
    );
}

#[tokio::test]
async fn test_dev_mode_response_includes_details() {
    let response = AppError::Internal("boom".to_string()).with_mode(true).into_response();

    let body = body_json(response).await;
    assert_eq!(body["error"], "Internal server error");
    assert_eq!(body["details"], "boom");
}

#[tokio::test]
async fn test_rate_limited_sets_retry_after() {
    let response = AppError::RateLimited { retry_after_secs: 42 }.into_response();

    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(response.headers()["retry-after"], "42");
}

#[tokio::test]
async fn test_panic_response() {
    let response = panic_response(Box::new(String::from("index out of bounds")), true);
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Internal server error");
    assert!(body["details"].as_str().unwrap().contains("index out of bounds"));

    let response = panic_response(Box::new(7_u8), false);
    let body = body_json(response).await;
    assert!(body.get("details").is_none());
}
