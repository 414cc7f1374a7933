//! Restaurant proxy handlers
//!
//! Relay the upstream listing and menu endpoints inside a `ResponseEnvelope`

use crate::handlers::AppState;
use crate::models::{CoordinateQuery, ResponseEnvelope, RestaurantId};
use crate::utils::error::{ApiError, AppError};
use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use std::sync::Arc;
use tracing::info;

/// Handle restaurant listing requests
///
/// GET /restaurants?lat&lng
pub async fn list_restaurants(
    State(state): State<Arc<AppState>>,
    query: Result<Query<CoordinateQuery>, QueryRejection>,
) -> Result<Json<ResponseEnvelope>, ApiError> {
    let dev_mode = state.settings.is_dev_mode();

    let Query(query) = query.map_err(|e| AppError::InvalidQuery(e.body_text()).with_mode(dev_mode))?;
    let coords = query.resolve(&state.settings.defaults);

    info!("Listing restaurants at lat={} lng={}", coords.lat, coords.lng);

    let data = state
        .upstream
        .list_restaurants(&coords)
        .await
        .map_err(|e| AppError::RestaurantsUnavailable(format!("{:#}", e)).with_mode(dev_mode))?;

    Ok(Json(ResponseEnvelope::success(data)))
}

/// Handle restaurant menu requests
///
/// GET /restaurant-menu/:id?lat&lng
///
/// The id is validated before anything is sent upstream.
pub async fn restaurant_menu(
    State(state): State<Arc<AppState>>,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<CoordinateQuery>, QueryRejection>,
) -> Result<Json<ResponseEnvelope>, ApiError> {
    let dev_mode = state.settings.is_dev_mode();

    let raw_id = match path {
        Ok(Path(raw_id)) => raw_id,
        Err(e) => return Err(AppError::InvalidRestaurantId(e.body_text()).with_mode(dev_mode)),
    };
    let id = RestaurantId::parse(&raw_id).map_err(|e| e.with_mode(dev_mode))?;

    let Query(query) = query.map_err(|e| AppError::InvalidQuery(e.body_text()).with_mode(dev_mode))?;
    let coords = query.resolve(&state.settings.defaults);

    info!("Fetching menu for restaurant {} at lat={} lng={}", id, coords.lat, coords.lng);

    let data = state
        .upstream
        .restaurant_menu(&id, &coords)
        .await
        .map_err(|e| {
            AppError::MenuUnavailable {
                restaurant_id: id.to_string(),
                detail: format!("{:#}", e),
            }
            .with_mode(dev_mode)
        })?;

    Ok(Json(
        ResponseEnvelope::success(data).with_restaurant_id(Some(id.to_string())),
    ))
}
