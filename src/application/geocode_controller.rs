// Geocode form controller - resolves the typed location into hidden lat/lon fields
// and mirrors the result into the page URL
use crate::application::geocoder::Geocoder;
use crate::application::page::{FieldId, PageView};
use crate::domain::location::{Coordinates, LocationQuery};
use crate::domain::url_state::{QueryString, UrlState};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

pub const FAILURE_ALERT: &str = "Error fetching data. Please try again.";
pub const SUBMITTING_CLASS: &str = "submitting";

#[derive(Debug, Clone, PartialEq)]
pub enum LookupState {
    Idle,
    Loading,
    Success(Coordinates),
    Failure(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    Located(Coordinates),
    Failed(String),
    /// Another lookup for this form was still outstanding; nothing was touched.
    AlreadyInFlight,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ControllerOptions {
    /// Hide the loading indicator when a lookup fails. Off by default, which
    /// leaves the indicator showing after a failure.
    pub hide_spinner_on_failure: bool,
}

pub struct GeocodeFormController {
    page: Arc<dyn PageView>,
    geocoder: Arc<dyn Geocoder>,
    options: ControllerOptions,
    state: Mutex<LookupState>,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag even if the lookup future is dropped.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl GeocodeFormController {
    pub fn new(page: Arc<dyn PageView>, geocoder: Arc<dyn Geocoder>) -> Self {
        Self::with_options(page, geocoder, ControllerOptions::default())
    }

    pub fn with_options(
        page: Arc<dyn PageView>,
        geocoder: Arc<dyn Geocoder>,
        options: ControllerOptions,
    ) -> Self {
        Self {
            page,
            geocoder,
            options,
            state: Mutex::new(LookupState::Idle),
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn state(&self) -> LookupState {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_state(&self, state: LookupState) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = state;
    }

    /// Geocode whatever is currently typed into the form.
    pub async fn lookup(&self) -> LookupOutcome {
        if self.in_flight.swap(true, Ordering::AcqRel) {
            tracing::warn!("geocode lookup already in flight, ignoring");
            return LookupOutcome::AlreadyInFlight;
        }
        let _guard = InFlightGuard(&self.in_flight);

        let query = self.read_query();
        self.set_state(LookupState::Loading);
        self.page.set_visible(FieldId::LoadingSpinner, true);

        match self.geocoder.geocode(&query).await {
            Ok(coordinates) => {
                self.page
                    .set_field_value(FieldId::Latitude, &coordinates.latitude.to_string());
                self.page
                    .set_field_value(FieldId::Longitude, &coordinates.longitude.to_string());
                self.page.set_visible(FieldId::LoadingSpinner, false);

                match &query {
                    LocationQuery::CityState { city, state } => self.update_url(
                        city,
                        state,
                        coordinates.latitude,
                        coordinates.longitude,
                    ),
                    // No city/state to mirror, so stale ones are cleared.
                    LocationQuery::Combined(_) => self.sync_url(&UrlState {
                        latitude: Some(coordinates.latitude.to_string()),
                        longitude: Some(coordinates.longitude.to_string()),
                        ..UrlState::default()
                    }),
                }

                tracing::info!(
                    location = %query,
                    latitude = coordinates.latitude,
                    longitude = coordinates.longitude,
                    "location geocoded"
                );
                self.set_state(LookupState::Success(coordinates));
                LookupOutcome::Located(coordinates)
            }
            Err(e) => {
                tracing::error!(location = %query, error = %e, "Error fetching data");
                self.page.alert(FAILURE_ALERT);
                if self.options.hide_spinner_on_failure {
                    self.page.set_visible(FieldId::LoadingSpinner, false);
                }
                let message = e.to_string();
                self.set_state(LookupState::Failure(message.clone()));
                LookupOutcome::Failed(message)
            }
        }
    }

    fn read_query(&self) -> LocationQuery {
        if !self.page.has_field(FieldId::City) && self.page.has_field(FieldId::Location) {
            let location = self.page.field_value(FieldId::Location).unwrap_or_default();
            return LocationQuery::Combined(location);
        }
        LocationQuery::city_state(
            self.page.field_value(FieldId::City).unwrap_or_default(),
            self.page.field_value(FieldId::State).unwrap_or_default(),
        )
    }

    /// Restore city/state/lat/lon from the URL and geocode when coordinates are missing.
    ///
    /// Returns the lookup outcome if one was triggered.
    pub async fn on_page_load(&self) -> Option<LookupOutcome> {
        let url = UrlState::from_query(&QueryString::parse(&self.page.location_query()));

        let city = self.restore_param(FieldId::City, url.city.as_deref());
        let state = self.restore_param(FieldId::State, url.state.as_deref());
        let latitude = self.restore_param(FieldId::Latitude, url.latitude.as_deref());
        let longitude = self.restore_param(FieldId::Longitude, url.longitude.as_deref());

        if city && state && !(latitude && longitude) {
            tracing::debug!("coordinates missing from URL, geocoding restored location");
            Some(self.lookup().await)
        } else {
            None
        }
    }

    /// A parameter counts as present only if its field exists and the value is non-empty.
    fn restore_param(&self, field: FieldId, value: Option<&str>) -> bool {
        if !self.page.has_field(field) {
            return false;
        }
        match value {
            Some(value) if !value.is_empty() => {
                tracing::debug!(field = field.dom_id(), value, "restored from URL");
                self.page.set_field_value(field, value);
                true
            }
            _ => false,
        }
    }

    /// Mirror the location into the current URL, keeping unrelated parameters.
    pub fn update_url(&self, city: &str, state: &str, latitude: f64, longitude: f64) {
        self.sync_url(&UrlState::located(city, state, latitude, longitude));
    }

    fn sync_url(&self, url_state: &UrlState) {
        let mut query = QueryString::parse(&self.page.location_query());
        url_state.apply_to(&mut query);
        self.page.replace_location_query(&query.to_string());
    }

    /// Mark the submit button and status message as submitting. There is no way back.
    pub fn disappear_submit_button(&self) {
        self.page.add_class(FieldId::SubmitButton, SUBMITTING_CLASS);
        self.page.add_class(FieldId::LoadingMessage, SUBMITTING_CLASS);
    }
}
