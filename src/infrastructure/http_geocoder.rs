// Geocoder that calls the same-origin `/api/geocode/{location}/` endpoint
use crate::application::geocoder::{GeocodeError, Geocoder};
use crate::domain::location::{Coordinates, GeocodeResponse, LocationQuery};
use async_trait::async_trait;

/// No request timeout is applied; a lookup resolves, fails, or waits.
#[derive(Debug, Clone)]
pub struct HttpGeocoder {
    client: reqwest::Client,
    base_url: String,
}

impl HttpGeocoder {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn endpoint(&self, query: &LocationQuery) -> String {
        format!("{}/api/geocode/{}/", self.base_url, query.path_segment())
    }
}

#[async_trait]
impl Geocoder for HttpGeocoder {
    async fn geocode(&self, query: &LocationQuery) -> Result<Coordinates, GeocodeError> {
        let url = self.endpoint(query);

        // The body decides success, whatever the status code.
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| GeocodeError::Transport(e.to_string()))?;
        let body = response
            .json::<GeocodeResponse>()
            .await
            .map_err(|e| GeocodeError::Transport(e.to_string()))?;

        match body {
            GeocodeResponse::Found(coordinates) => Ok(coordinates),
            GeocodeResponse::Error { error } => Err(GeocodeError::Service(error)),
        }
    }
}
