// Test doubles for the page and geocoder ports
use crate::application::geocoder::{GeocodeError, Geocoder};
use crate::application::page::{FieldId, PageView};
use crate::domain::location::{Coordinates, LocationQuery};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

#[derive(Debug, Default, Clone)]
struct FakeField {
    value: String,
    visible: Option<bool>,
    classes: HashSet<String>,
}

#[derive(Default)]
struct FakePageInner {
    fields: HashMap<FieldId, FakeField>,
    alerts: Vec<String>,
    query: String,
    replace_count: usize,
}

/// In-memory page; writes to fields that do not exist are dropped.
#[derive(Default)]
pub struct FakePage {
    inner: Mutex<FakePageInner>,
}

impl FakePage {
    pub fn with_fields(fields: &[FieldId]) -> Self {
        let page = Self::default();
        {
            let mut inner = page.inner.lock().unwrap();
            for field in fields {
                inner.fields.insert(*field, FakeField::default());
            }
        }
        page
    }

    pub fn standard_form() -> Self {
        Self::with_fields(&[
            FieldId::City,
            FieldId::State,
            FieldId::Latitude,
            FieldId::Longitude,
            FieldId::LoadingSpinner,
            FieldId::SubmitButton,
            FieldId::LoadingMessage,
        ])
    }

    pub fn set_location_query(&self, query: &str) {
        self.inner.lock().unwrap().query = query.to_string();
    }

    pub fn value(&self, field: FieldId) -> Option<String> {
        self.field_value(field)
    }

    pub fn visible(&self, field: FieldId) -> Option<bool> {
        self.inner
            .lock()
            .unwrap()
            .fields
            .get(&field)
            .and_then(|f| f.visible)
    }

    pub fn has_class(&self, field: FieldId, class: &str) -> bool {
        self.inner
            .lock()
            .unwrap()
            .fields
            .get(&field)
            .map(|f| f.classes.contains(class))
            .unwrap_or(false)
    }

    pub fn alerts(&self) -> Vec<String> {
        self.inner.lock().unwrap().alerts.clone()
    }

    pub fn replace_count(&self) -> usize {
        self.inner.lock().unwrap().replace_count
    }
}

impl PageView for FakePage {
    fn has_field(&self, field: FieldId) -> bool {
        self.inner.lock().unwrap().fields.contains_key(&field)
    }

    fn field_value(&self, field: FieldId) -> Option<String> {
        self.inner
            .lock()
            .unwrap()
            .fields
            .get(&field)
            .map(|f| f.value.clone())
    }

    fn set_field_value(&self, field: FieldId, value: &str) {
        if let Some(f) = self.inner.lock().unwrap().fields.get_mut(&field) {
            f.value = value.to_string();
        }
    }

    fn set_visible(&self, field: FieldId, visible: bool) {
        if let Some(f) = self.inner.lock().unwrap().fields.get_mut(&field) {
            f.visible = Some(visible);
        }
    }

    fn add_class(&self, field: FieldId, class: &str) {
        if let Some(f) = self.inner.lock().unwrap().fields.get_mut(&field) {
            f.classes.insert(class.to_string());
        }
    }

    fn alert(&self, message: &str) {
        self.inner.lock().unwrap().alerts.push(message.to_string());
    }

    fn location_query(&self) -> String {
        self.inner.lock().unwrap().query.clone()
    }

    fn replace_location_query(&self, query: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.query = query.to_string();
        inner.replace_count += 1;
    }
}

/// Geocoder returning a fixed answer, optionally held until a gate opens.
pub struct StubGeocoder {
    result: Result<Coordinates, GeocodeError>,
    gate: Option<Arc<Notify>>,
    queries: Mutex<Vec<LocationQuery>>,
}

impl StubGeocoder {
    pub fn found(latitude: f64, longitude: f64) -> Self {
        Self {
            result: Ok(Coordinates::new(latitude, longitude)),
            gate: None,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: GeocodeError) -> Self {
        Self {
            result: Err(error),
            gate: None,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn queries(&self) -> Vec<LocationQuery> {
        self.queries.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.queries.lock().unwrap().len()
    }
}

#[async_trait]
impl Geocoder for StubGeocoder {
    async fn geocode(&self, query: &LocationQuery) -> Result<Coordinates, GeocodeError> {
        self.queries.lock().unwrap().push(query.clone());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.result.clone()
    }
}
