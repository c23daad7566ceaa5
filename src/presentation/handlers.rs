// HTTP request handlers
use crate::application::energy_service::{SimulationError, SimulationRequest};
use crate::application::geocode_service::LookupError;
use crate::domain::chart::ColorScheme;
use crate::domain::location::{GeocodeResponse, LocationQuery};
use crate::infrastructure::http_response::{
    chart_response, error_response, json_response, COLOR_SCHEME_HINT,
};
use crate::presentation::app_state::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::{HeaderMap, StatusCode},
    response::Response,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct ComparisonQuery {
    pub heat_load_kwh: f64,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Geocode a single `city/state` segment (sent percent-encoded by the form)
pub async fn geocode_location(
    State(state): State<Arc<AppState>>,
    path: Result<Path<String>, PathRejection>,
) -> Response {
    match path {
        Ok(Path(location)) => geocode(&state, LocationQuery::from_location_text(&location)).await,
        Err(rejection) => path_error(rejection),
    }
}

/// Geocode an unencoded `/{city}/{state}/` pair
pub async fn geocode_city_state(
    State(state): State<Arc<AppState>>,
    path: Result<Path<(String, String)>, PathRejection>,
) -> Response {
    match path {
        Ok(Path((city, region))) => geocode(&state, LocationQuery::city_state(city, region)).await,
        Err(rejection) => path_error(rejection),
    }
}

fn path_error(rejection: PathRejection) -> Response {
    tracing::warn!("Rejected geocode path: {}", rejection.body_text());
    error_response(StatusCode::BAD_REQUEST, rejection.body_text())
}

async fn geocode(state: &AppState, query: LocationQuery) -> Response {
    match state.geocode_service.locate(&query).await {
        Ok(coordinates) => json_response(StatusCode::OK, &GeocodeResponse::Found(coordinates)),
        Err(e) => {
            let status = match e {
                LookupError::EmptyQuery => StatusCode::BAD_REQUEST,
                LookupError::NotFound(_) => StatusCode::NOT_FOUND,
                LookupError::Upstream(_) => StatusCode::BAD_GATEWAY,
            };
            tracing::warn!("Geocode lookup for {} failed: {}", query, e);
            error_response(status, e.to_string())
        }
    }
}

/// Run the home energy model over the supplied weather series
pub async fn simulate(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SimulationRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return error_response(StatusCode::BAD_REQUEST, rejection.body_text()),
    };

    match state
        .energy_service
        .simulate(&request, preferred_color_scheme(&headers))
    {
        Ok(report) => chart_response(&report),
        Err(e) => simulation_error(e),
    }
}

/// Heating cost/CO2 comparison charts for a given annual heat load
pub async fn heating_comparison(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    query: Result<Query<ComparisonQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return error_response(StatusCode::BAD_REQUEST, rejection.body_text()),
    };

    match state
        .energy_service
        .compare(query.heat_load_kwh, preferred_color_scheme(&headers))
    {
        Ok(report) => chart_response(&report),
        Err(e) => simulation_error(e),
    }
}

fn simulation_error(e: SimulationError) -> Response {
    tracing::warn!("Rejected simulation input: {}", e);
    error_response(StatusCode::BAD_REQUEST, e.to_string())
}

/// Viewer preference from the `Sec-CH-Prefers-Color-Scheme` client hint; light when absent.
pub fn preferred_color_scheme(headers: &HeaderMap) -> ColorScheme {
    let dark = headers
        .get(COLOR_SCHEME_HINT)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.trim().trim_matches('"').eq_ignore_ascii_case("dark"))
        .unwrap_or(false);

    if dark {
        ColorScheme::Dark
    } else {
        ColorScheme::Light
    }
}
