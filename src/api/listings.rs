//! Listing endpoints

use anyhow::Result;

use super::client::MarketClient;
use super::models::Listing;

impl MarketClient {
    /// List published listings, optionally filtered by category.
    /// `all` is the unfiltered view.
    pub async fn list_listings(&self, category: &str) -> Result<Vec<Listing>> {
        let path = if category == "all" {
            "/api/listings".to_string()
        } else {
            format!("/api/listings?category={}", category)
        };
        self.get_json(&path).await
    }
}
