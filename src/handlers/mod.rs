//! HTTP handlers module
//!
//! Contains all HTTP endpoint handling logic and the router assembly

pub mod health;
pub mod restaurants;

use crate::config::Settings;
use crate::middleware::{rate_limit_middleware, request_logging_middleware, RateLimiter};
use crate::services::{RestaurantApi, UpstreamClient};
use crate::utils::error::{panic_response, ApiError, AppError};
use anyhow::Result;
use axum::{
    extract::State,
    http::{header, HeaderValue, Method, Uri},
    middleware,
    routing::get,
    Router,
};
use std::any::Any;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, Any as AnyOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub upstream: Arc<dyn RestaurantApi>,
    pub rate_limiter: Arc<RateLimiter>,
}

/// Create application router backed by the real upstream API
pub async fn create_router(settings: Settings) -> Result<Router> {
    let upstream = Arc::new(UpstreamClient::new(&settings)?);
    Ok(create_router_with_upstream(settings, upstream))
}

/// Create application router with an explicit restaurant data source
pub fn create_router_with_upstream(settings: Settings, upstream: Arc<dyn RestaurantApi>) -> Router {
    let dev_mode = settings.is_dev_mode();
    let cors = build_cors_layer(&settings);

    let app_state = Arc::new(AppState {
        rate_limiter: Arc::new(RateLimiter::from_settings(&settings)),
        settings,
        upstream,
    });

    // Outermost first: panics anywhere below become a 500 envelope
    let middleware_stack = ServiceBuilder::new()
        .layer(CatchPanicLayer::custom(
            move |panic: Box<dyn Any + Send + 'static>| panic_response(panic, dev_mode),
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(middleware::from_fn_with_state(
            app_state.clone(),
            rate_limit_middleware,
        ));

    Router::new()
        .route("/", get(health::health_check).fallback(not_found))
        .route(
            "/restaurants",
            get(restaurants::list_restaurants).fallback(not_found),
        )
        .route(
            "/restaurant-menu/:id",
            get(restaurants::restaurant_menu).fallback(not_found),
        )
        .fallback(not_found)
        .with_state(app_state)
        .layer(middleware_stack)
}

/// Unmatched path or method
pub async fn not_found(State(state): State<Arc<AppState>>, uri: Uri) -> ApiError {
    AppError::NotFound(uri.path().to_string()).with_mode(state.settings.is_dev_mode())
}

fn build_cors_layer(settings: &Settings) -> CorsLayer {
    let origin = if settings.allows_any_origin() {
        AllowOrigin::from(AnyOrigin)
    } else {
        let origins: Vec<HeaderValue> = settings
            .security
            .cors_origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!("Ignoring invalid CORS origin: {}", origin);
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}
