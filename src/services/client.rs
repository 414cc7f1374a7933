//! HTTP client service
//!
//! Encapsulates HTTP communication with the upstream restaurant API

use crate::config::Settings;
use crate::models::{Coordinates, RestaurantId};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{header, Client, RequestBuilder};
use serde_json::Value;
use tracing::debug;

/// Restaurant listing path on the upstream host
pub const RESTAURANTS_PATH: &str = "/dapi/restaurants/list/v5";

/// Menu path on the upstream host
pub const MENU_PATH: &str = "/mapi/menu/pl";

/// Source of restaurant data
///
/// Implementations return the upstream JSON body untouched; any failure
/// (transport, timeout, non-2xx status, undecodable body) is an error.
#[async_trait]
pub trait RestaurantApi: Send + Sync {
    /// Fetch restaurants near the given coordinates
    async fn list_restaurants(&self, coords: &Coordinates) -> Result<Value>;

    /// Fetch the complete menu of one restaurant
    async fn restaurant_menu(&self, id: &RestaurantId, coords: &Coordinates) -> Result<Value>;
}

/// reqwest-backed client for the upstream API
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: Client,
    base_url: String,
}

impl UpstreamClient {
    /// Create a new client instance
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = Client::builder()
            .timeout(settings.request_timeout())
            .user_agent(settings.upstream.user_agent.clone())
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: settings.upstream.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send the request and decode a successful JSON body
    async fn fetch_json(&self, request: RequestBuilder) -> Result<Value> {
        let response = request
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .context("Failed to send request to upstream API")?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Upstream API responded with status {}", status);
        }

        let body = response
            .json::<Value>()
            .await
            .context("Failed to parse upstream response as JSON")?;

        debug!("Upstream request completed with status {}", status);
        Ok(body)
    }
}

#[async_trait]
impl RestaurantApi for UpstreamClient {
    async fn list_restaurants(&self, coords: &Coordinates) -> Result<Value> {
        let url = format!("{}{}", self.base_url, RESTAURANTS_PATH);
        debug!("Fetching restaurants at lat={} lng={}", coords.lat, coords.lng);

        let request = self
            .client
            .get(&url)
            .query(&[
                ("lat", coords.lat.as_str()),
                ("lng", coords.lng.as_str()),
                ("is-seo-homepage-enabled", "true"),
            ])
            .header(header::CACHE_CONTROL, "no-cache");

        self.fetch_json(request).await
    }

    async fn restaurant_menu(&self, id: &RestaurantId, coords: &Coordinates) -> Result<Value> {
        let url = format!("{}{}", self.base_url, MENU_PATH);
        debug!("Fetching menu for restaurant {} at lat={} lng={}", id, coords.lat, coords.lng);

        let request = self.client.get(&url).query(&[
            ("page-type", "REGULAR_MENU"),
            ("complete-menu", "true"),
            ("lat", coords.lat.as_str()),
            ("lng", coords.lng.as_str()),
            ("restaurantId", id.as_str()),
        ]);

        self.fetch_json(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = UpstreamClient::new(&Settings::default());
        assert!(client.is_ok());
        assert_eq!(client.unwrap().base_url(), "https://www.swiggy.com");
    }
}
