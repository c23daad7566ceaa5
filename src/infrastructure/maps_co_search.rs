// geocode.maps.co place search
use crate::application::geocode_service::{Place, PlaceSearch};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct MapsCoSearch {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl MapsCoSearch {
    pub fn new(base_url: String, api_key: Option<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build geocoder HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn build_search_url(&self, text: &str) -> String {
        let mut url = format!("{}/search?q={}", self.base_url, urlencoding::encode(text));
        if let Some(key) = &self.api_key {
            url.push_str("&api_key=");
            url.push_str(&urlencoding::encode(key));
        }
        url
    }
}

#[async_trait]
impl PlaceSearch for MapsCoSearch {
    async fn search(&self, text: &str) -> Result<Vec<Place>> {
        let url = self.build_search_url(text);
        tracing::debug!("Searching upstream geocoder for {}", text);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .context("Failed to send request to geocoder")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Geocoder search failed with status {}: {}", status, body);
        }

        response
            .json::<Vec<Place>>()
            .await
            .context("Failed to parse geocoder response")
    }
}
