// Application state for HTTP handlers
use crate::application::energy_service::EnergyService;
use crate::application::geocode_service::GeocodeService;

#[derive(Clone)]
pub struct AppState {
    pub geocode_service: GeocodeService,
    pub energy_service: EnergyService,
}
