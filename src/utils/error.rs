//! Error handling module
//!
//! Defines error types and how they are rendered as response envelopes

use crate::models::ResponseEnvelope;
use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::any::Any;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Restaurant id path parameter is not all digits
    #[error("Invalid restaurant ID format: {0:?}")]
    InvalidRestaurantId(String),

    /// Query string could not be decoded
    #[error("Invalid query parameters: {0}")]
    InvalidQuery(String),

    /// Restaurant listing call failed
    #[error("Restaurant listing request failed: {0}")]
    RestaurantsUnavailable(String),

    /// Menu call failed
    #[error("Menu request for restaurant {restaurant_id} failed: {detail}")]
    MenuUnavailable { restaurant_id: String, detail: String },

    /// No route matched
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    /// Internal server error
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidRestaurantId(_) | AppError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::RestaurantsUnavailable(_)
            | AppError::MenuUnavailable { .. }
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message exposed to clients in the envelope's `error` field
    pub fn public_message(&self) -> &'static str {
        match self {
            AppError::InvalidRestaurantId(_) => "Invalid restaurant ID format",
            AppError::InvalidQuery(_) => "Invalid query parameters",
            AppError::RestaurantsUnavailable(_) => "Failed to fetch restaurants",
            AppError::MenuUnavailable { .. } => "Failed to fetch menu",
            AppError::NotFound(_) => "Endpoint not found",
            AppError::RateLimited { .. } => "Too many requests, please try again later.",
            AppError::Internal(_) => "Internal server error",
        }
    }

    /// Restaurant id echoed back in the envelope, if any
    pub fn restaurant_id(&self) -> Option<&str> {
        match self {
            AppError::MenuUnavailable { restaurant_id, .. } => Some(restaurant_id),
            _ => None,
        }
    }

    /// Underlying cause, only shown in development mode
    pub fn detail(&self) -> Option<String> {
        match self {
            AppError::InvalidQuery(detail)
            | AppError::RestaurantsUnavailable(detail)
            | AppError::MenuUnavailable { detail, .. }
            | AppError::Internal(detail) => Some(detail.clone()),
            _ => None,
        }
    }

    /// Build the failure envelope, attaching `details` only in development mode
    pub fn to_envelope(&self, dev_mode: bool) -> ResponseEnvelope {
        ResponseEnvelope::failure(self.public_message())
            .with_restaurant_id(self.restaurant_id().map(str::to_string))
            .with_details(if dev_mode { self.detail() } else { None })
    }

    /// Pair the error with the rendering mode so it can be returned from a handler
    pub fn with_mode(self, dev_mode: bool) -> ApiError {
        ApiError {
            error: self,
            dev_mode,
        }
    }
}

/// An `AppError` ready to be turned into an HTTP response
#[derive(Debug)]
pub struct ApiError {
    pub error: AppError,
    pub dev_mode: bool,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.error.status_code();

        if status.is_server_error() {
            tracing::error!("Application error: {} - Status code: {}", self.error, status);
        } else {
            tracing::warn!("Client error: {} - Status code: {}", self.error, status);
        }

        let mut response = (status, Json(self.error.to_envelope(self.dev_mode))).into_response();

        if let AppError::RateLimited { retry_after_secs } = self.error {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(retry_after_secs));
        }

        response
    }
}

/// Render without development details
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.with_mode(false).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Response for a panic caught while handling a request
pub fn panic_response(panic: Box<dyn Any + Send + 'static>, dev_mode: bool) -> Response {
    let message = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    AppError::Internal(format!("handler panicked: {}", message))
        .with_mode(dev_mode)
        .into_response()
}
