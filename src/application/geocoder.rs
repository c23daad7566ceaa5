// Geocoder port used by the form controller
use crate::domain::location::{Coordinates, LocationQuery};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum GeocodeError {
    /// The request never produced a readable payload.
    #[error("request failed: {0}")]
    Transport(String),
    /// The service answered with an `error` field.
    #[error("geocoding failed: {0}")]
    Service(String),
}

#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, query: &LocationQuery) -> Result<Coordinates, GeocodeError>;
}
