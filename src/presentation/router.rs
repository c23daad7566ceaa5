// Route table
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    geocode_city_state, geocode_location, health_check, heating_comparison, simulate,
};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/api/geocode/:location/", get(geocode_location))
        .route("/api/geocode/:location/:state/", get(geocode_city_state))
        .route("/api/simulate", post(simulate))
        .route("/api/heating-comparison", get(heating_comparison))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::energy_service::EnergyService;
    use crate::application::geocode_service::tests::StubPlaceSearch;
    use crate::application::geocode_service::{CacheSettings, GeocodeService};
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app(search: Arc<StubPlaceSearch>) -> Router {
        router(Arc::new(AppState {
            geocode_service: GeocodeService::new(search, "US".to_string(), CacheSettings::default()),
            energy_service: EnergyService::new(),
        }))
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(Arc::new(StubPlaceSearch::empty()))
            .oneshot(get_request("/healthz"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_geocode_encoded_segment() {
        let search = Arc::new(StubPlaceSearch::with_hit("30.2672", "-97.7431"));
        let (status, body) = send(
            app(search.clone()),
            get_request("/api/geocode/Round%20Rock%2FTX/"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"latitude": 30.2672, "longitude": -97.7431}));
        assert_eq!(*search.searches.lock().unwrap(), vec!["Round Rock, TX US".to_string()]);
    }

    #[tokio::test]
    async fn test_geocode_two_segments() {
        let search = Arc::new(StubPlaceSearch::with_hit("1.5", "2.5"));
        let (status, body) = send(app(search.clone()), get_request("/api/geocode/Austin/TX/")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["latitude"], json!(1.5));
        assert_eq!(*search.searches.lock().unwrap(), vec!["Austin, TX US".to_string()]);
    }

    #[tokio::test]
    async fn test_geocode_errors_carry_error_field() {
        let (status, body) = send(
            app(Arc::new(StubPlaceSearch::empty())),
            get_request("/api/geocode/Atlantis%2FXX/"),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].is_string());

        let (status, body) = send(
            app(Arc::new(StubPlaceSearch::failing())),
            get_request("/api/geocode/Austin%2FTX/"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_geocode_invalid_utf8_is_json_error() {
        for uri in ["/api/geocode/%FF%2FTX/", "/api/geocode/%FF/TX/"] {
            let search = Arc::new(StubPlaceSearch::with_hit("1", "2"));
            let (status, body) = send(app(search.clone()), get_request(uri)).await;

            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert!(body["error"].as_str().unwrap().contains("UTF-8"), "{uri}");
            assert!(search.searches.lock().unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn test_simulate() {
        let payload = json!({
            "home": {"heat_temperature": 68, "cool_temperature": 76, "latitude": 30.27, "longitude": -97.74},
            "weather": [
                {"timestamp": "2024-01-01T00:00:00", "temp_air_c": -3.0, "irradiance_w_per_sq_m": 0.0},
                {"timestamp": "2024-01-01T01:00:00", "temp_air_c": -4.0, "irradiance_w_per_sq_m": 0.0}
            ],
            "timestep_minutes": 60
        });
        let request = Request::builder()
            .method("POST")
            .uri("/api/simulate")
            .header("content-type", "application/json")
            .header("sec-ch-prefers-color-scheme", "\"dark\"")
            .body(Body::from(payload.to_string()))
            .unwrap();

        let (status, body) = send(app(Arc::new(StubPlaceSearch::empty())), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["latitude"], json!(30.27));
        assert_eq!(body["heating_type"], "natural_gas");
        assert!(body["monthly_energy_use_kwh"]["1"].as_f64().unwrap() > 0.0);
        assert_eq!(body["charts"][0]["charts"][0]["themes"], json!(["Animated", "Dark"]));
    }

    #[tokio::test]
    async fn test_simulate_rejects_bad_input() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/simulate")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"home": {"heat_temperature": 80, "cool_temperature": 70}}"#))
            .unwrap();
        let (status, body) = send(app(Arc::new(StubPlaceSearch::empty())), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("setpoint"));

        let request = Request::builder()
            .method("POST")
            .uri("/api/simulate")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, body) = send(app(Arc::new(StubPlaceSearch::empty())), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_heating_comparison() {
        let response = app(Arc::new(StubPlaceSearch::empty()))
            .oneshot(get_request("/api/heating-comparison?heat_load_kwh=8000"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("accept-ch"));

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        let columns = &body["charts"][1]["charts"][0]["series"]["columns"];
        assert_eq!(columns[0]["category"], "Natural Gas");
        assert_eq!(columns[0]["fill"], "#800020");
        assert_eq!(columns[1]["fill"], "#04aa6d");
        assert_eq!(body["charts"][0]["charts"][0]["themes"], json!(["Animated"]));

        let (status, _) = send(
            app(Arc::new(StubPlaceSearch::empty())),
            get_request("/api/heating-comparison?heat_load_kwh=lots"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
