// Geocode service - resolves a location through an upstream place search
use crate::domain::location::{Coordinates, LocationQuery};
use async_trait::async_trait;
use moka::future::Cache;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// One search hit as returned by the upstream service.
#[derive(Debug, Clone, Deserialize)]
pub struct Place {
    pub lat: String,
    pub lon: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[async_trait]
pub trait PlaceSearch: Send + Sync {
    /// Free-text search, best match first.
    async fn search(&self, text: &str) -> anyhow::Result<Vec<Place>>;
}

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("location is empty")]
    EmptyQuery,
    #[error("no match found for {0}")]
    NotFound(String),
    #[error("geocoding service unavailable: {0}")]
    Upstream(String),
}

#[derive(Debug, Clone)]
pub struct CacheSettings {
    pub capacity: u64,
    pub ttl: Duration,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            capacity: 1000,
            ttl: Duration::from_secs(3600),
        }
    }
}

#[derive(Clone)]
pub struct GeocodeService {
    search: Arc<dyn PlaceSearch>,
    country: String,
    cache: Cache<String, Coordinates>,
}

impl GeocodeService {
    pub fn new(search: Arc<dyn PlaceSearch>, country: String, cache: CacheSettings) -> Self {
        let cache = Cache::builder()
            .max_capacity(cache.capacity)
            .time_to_live(cache.ttl)
            .build();
        Self {
            search,
            country,
            cache,
        }
    }

    pub async fn locate(&self, query: &LocationQuery) -> Result<Coordinates, LookupError> {
        let text = query.search_text();
        if text.trim_matches(|c: char| c == ',' || c.is_whitespace()).is_empty() {
            return Err(LookupError::EmptyQuery);
        }

        let search_text = if self.country.is_empty() {
            text
        } else {
            format!("{} {}", text, self.country)
        };
        let key = search_text.to_lowercase();

        if let Some(coordinates) = self.cache.get(&key).await {
            tracing::debug!("Geocode cache hit for {}", search_text);
            return Ok(coordinates);
        }

        let places = self.search.search(&search_text).await.map_err(|e| {
            tracing::error!("Upstream geocoder failed for {}: {:#}", search_text, e);
            LookupError::Upstream(format!("{:#}", e))
        })?;

        let place = places
            .first()
            .ok_or_else(|| LookupError::NotFound(query.search_text()))?;
        let coordinates = parse_place(place)?;

        tracing::info!(
            "Geocoded {} to ({}, {}) [{}]",
            search_text,
            coordinates.latitude,
            coordinates.longitude,
            place.display_name.as_deref().unwrap_or("unnamed")
        );
        self.cache.insert(key, coordinates).await;
        Ok(coordinates)
    }
}

fn parse_place(place: &Place) -> Result<Coordinates, LookupError> {
    let latitude = place.lat.trim().parse::<f64>();
    let longitude = place.lon.trim().parse::<f64>();
    match (latitude, longitude) {
        (Ok(latitude), Ok(longitude)) => Ok(Coordinates::new(latitude, longitude)),
        _ => Err(LookupError::Upstream(format!(
            "unreadable coordinates ({}, {})",
            place.lat, place.lon
        ))),
    }
}
