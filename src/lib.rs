// Home energy estimator: location geocoding, form glue and comparison charts
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
