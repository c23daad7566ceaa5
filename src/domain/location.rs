// Location domain model - what the user typed and where it resolves to
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationQuery {
    CityState { city: String, state: String },
    Combined(String),
}

impl LocationQuery {
    pub fn city_state(city: impl Into<String>, state: impl Into<String>) -> Self {
        Self::CityState {
            city: city.into(),
            state: state.into(),
        }
    }

    /// The `city/state` text carried as a single path segment.
    pub fn location_text(&self) -> String {
        match self {
            Self::CityState { city, state } => format!("{}/{}", city, state),
            Self::Combined(location) => location.clone(),
        }
    }

    /// Percent-encode the location so that `/` stays inside one segment.
    pub fn path_segment(&self) -> String {
        urlencoding::encode(&self.location_text()).into_owned()
    }

    /// Rebuild a query from an already-decoded path segment.
    pub fn from_location_text(text: &str) -> Self {
        match text.rsplit_once('/') {
            Some((city, state)) => Self::city_state(city, state),
            None => Self::Combined(text.to_string()),
        }
    }

    /// Free-text form handed to a search geocoder. Blank parts are left out.
    pub fn search_text(&self) -> String {
        match self {
            Self::CityState { city, state } => [city.trim(), state.trim()]
                .into_iter()
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join(", "),
            Self::Combined(location) => location.trim().to_string(),
        }
    }
}

impl fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.location_text())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// JSON body of `GET /api/geocode/{location}/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GeocodeResponse {
    Error { error: String },
    Found(Coordinates),
}
