//! Inbound request parameters
//!
//! Coordinates and restaurant identifiers extracted from the query string and path

use crate::config::DefaultCoordinates;
use crate::utils::error::{AppError, AppResult};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// ASCII digits only; `\d` would also admit non-ASCII Unicode digits
static RESTAURANT_ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+$").expect("restaurant id pattern is valid"));

/// `lat`/`lng` query parameters as sent by the client
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoordinateQuery {
    pub lat: Option<String>,
    pub lng: Option<String>,
}

/// Resolved coordinates, forwarded to the upstream API as-is
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Coordinates {
    pub lat: String,
    pub lng: String,
}

impl CoordinateQuery {
    /// Fill missing or empty values from the configured defaults
    pub fn resolve(self, defaults: &DefaultCoordinates) -> Coordinates {
        let pick = |value: Option<String>, default: &str| {
            value
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Coordinates {
            lat: pick(self.lat, &defaults.lat),
            lng: pick(self.lng, &defaults.lng),
        }
    }
}

/// Validated upstream restaurant identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RestaurantId(String);

impl RestaurantId {
    /// Accept only non-empty strings of ASCII digits
    pub fn parse(raw: &str) -> AppResult<Self> {
        if RESTAURANT_ID_PATTERN.is_match(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(AppError::InvalidRestaurantId(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RestaurantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restaurant_id_rejects_unicode_digits() {
        assert!(RestaurantId::parse("١٢٣").is_err());
        assert!(RestaurantId::parse("12\n").is_err());
    }

    #[test]
    fn test_resolve_keeps_supplied_values() {
        let defaults = DefaultCoordinates {
            lat: "1.0".to_string(),
            lng: "2.0".to_string(),
        };
        let coords = CoordinateQuery {
            lat: Some("12.9716".to_string()),
            lng: None,
        }
        .resolve(&defaults);

        assert_eq!(coords.lat, "12.9716");
        assert_eq!(coords.lng, "2.0");
    }
}
