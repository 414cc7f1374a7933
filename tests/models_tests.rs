//! Data models unit tests

use foodproxy::config::DefaultCoordinates;
use foodproxy::models::{CoordinateQuery, HealthResponse, ResponseEnvelope, RestaurantId};
use foodproxy::AppError;
use serde_json::json;

fn defaults() -> DefaultCoordinates {
    DefaultCoordinates {
        lat: "28.7040592".to_string(),
        lng: "77.10249019999999".to_string(),
    }
}

#[test]
fn test_restaurant_id_accepts_digits() {
    for raw in ["0", "7", "12345", "000123", "98765432109876543210"] {
        let id = RestaurantId::parse(raw).unwrap();
        assert_eq!(id.as_str(), raw);
        assert_eq!(id.to_string(), raw);
    }
}

#[test]
fn test_restaurant_id_rejects_non_digits() {
    for raw in ["", "abc", "12a", "a12", "-1", "+1", "1.5", "1 2", " 12", "12 ", "１２"] {
        let result = RestaurantId::parse(raw);
        assert!(
            matches!(result, Err(AppError::InvalidRestaurantId(_))),
            "{:?} should be rejected",
            raw
        );
    }
}

#[test]
fn test_coordinates_default_when_missing() {
    let coords = CoordinateQuery::default().resolve(&defaults());

    assert_eq!(coords.lat, "28.7040592");
    assert_eq!(coords.lng, "77.10249019999999");
}

#[test]
fn test_coordinates_passed_through_unchanged() {
    let query: CoordinateQuery =
        serde_json::from_value(json!({"lat": "19.0760000", "lng": "72.8777"})).unwrap();
    let coords = query.resolve(&defaults());

    assert_eq!(coords.lat, "19.0760000");
    assert_eq!(coords.lng, "72.8777");
}

#[test]
fn test_success_envelope_serialization() {
    let upstream = json!({"data": {"cards": []}});
    let envelope = ResponseEnvelope::success(upstream.clone())
        .with_restaurant_id(Some("123".to_string()));

    let value = serde_json::to_value(&envelope).unwrap();
    assert_eq!(value["success"], true);
    assert_eq!(value["data"], upstream);
    assert_eq!(value["restaurantId"], "123");
    assert!(value["timestamp"].is_string());
    assert!(value.get("error").is_none());
    assert!(value.get("details").is_none());
}

#[test]
fn test_envelope_deserialization() {
    let envelope: ResponseEnvelope = serde_json::from_value(json!({
        "success": false,
        "error": "Failed to fetch menu",
        "restaurantId": "55"
    }))
    .unwrap();

    assert!(!envelope.success);
    assert_eq!(envelope.error.as_deref(), Some("Failed to fetch menu"));
    assert_eq!(envelope.restaurant_id.as_deref(), Some("55"));
    assert!(envelope.data.is_none());
}

#[test]
fn test_health_response_shape() {
    let health = HealthResponse {
        status: "healthy".to_string(),
        version: "1.0.0".to_string(),
        message: "ok".to_string(),
    };

    assert_eq!(
        serde_json::to_value(health).unwrap(),
        json!({"status": "healthy", "version": "1.0.0", "message": "ok"})
    );
}
