// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod http_geocoder;
pub mod http_response;
pub mod maps_co_search;
