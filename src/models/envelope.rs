//! Response envelope models
//!
//! Every proxied route answers with the same `ResponseEnvelope` shape

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Uniform response wrapper
///
/// Optional fields are omitted from the JSON output when unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restaurant_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl ResponseEnvelope {
    /// Successful envelope carrying the upstream body, stamped with the current time
    pub fn success(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            timestamp: Some(iso_timestamp()),
            ..Default::default()
        }
    }

    /// Failed envelope with a public error message
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            ..Default::default()
        }
    }

    pub fn with_restaurant_id(mut self, restaurant_id: Option<String>) -> Self {
        self.restaurant_id = restaurant_id;
        self
    }

    pub fn with_details(mut self, details: Option<String>) -> Self {
        self.details = details;
        self
    }
}

/// Health check response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Version information
    pub version: String,
    /// Human readable status line
    pub message: String,
}

/// Current UTC time as ISO 8601 with millisecond precision, e.g. `2024-01-01T12:00:00.000Z`
pub fn iso_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
