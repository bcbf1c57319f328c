use crate::config::StoreSettings;
use crate::models::Product;
use crate::services::provider::{ProductSearch, ProviderError};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// WooCommerce REST API client (`/wp-json/wc/v3`)
///
/// Authenticates with the store's consumer key/secret pair over HTTP Basic.
pub struct WooCommerceClient {
    base_url: String,
    consumer_key: String,
    consumer_secret: String,
    client: Client,
}

impl WooCommerceClient {
    /// Create a new WooCommerce client
    pub fn new(settings: &StoreSettings) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            base_url: format!("{}/wp-json/wc/v3", settings.url.trim_end_matches('/')),
            consumer_key: settings.consumer_key.clone(),
            consumer_secret: settings.consumer_secret.clone(),
            client,
        })
    }

    fn products_url(&self, query: &str, limit: usize) -> String {
        format!(
            "{}/products?search={}&per_page={}",
            self.base_url,
            urlencoding::encode(query),
            limit
        )
    }
}

#[async_trait]
impl ProductSearch for WooCommerceClient {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Product>, ProviderError> {
        let url = self.products_url(query, limit);

        tracing::debug!("Searching products: {}", url);

        let response = self
            .client
            .get(&url)
            .basic_auth(&self.consumer_key, Some(&self.consumer_secret))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Product search for {:?} failed: {} - {}", query, status, body);
            return Err(ProviderError::from_status(status, "Failed to search products"));
        }

        let json: Value = response.json().await?;

        let items = json
            .as_array()
            .ok_or_else(|| ProviderError::InvalidResponse("Expected an array of products".into()))?;

        let products: Vec<Product> = items
            .iter()
            .filter_map(|item| serde_json::from_value(item.clone()).ok())
            .take(limit)
            .collect();

        tracing::debug!("Product search for {:?} returned {} of {} items", query, products.len(), items.len());

        Ok(products)
    }
}
