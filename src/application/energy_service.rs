// Energy service - runs the home model and charts heating options side by side
use crate::application::chart_renderer::{ChartCanvas, ChartRenderer, ColorSchemePreference};
use crate::domain::chart::AxisOptions;
use crate::domain::energy_model::{
    delivered_heat_kwh, monthly_energy_use, simulate, WeatherSample, DEFAULT_TIMESTEP,
};
use crate::domain::heating::{
    HeatingComparison, HeatingType, FIELD_CO2, FIELD_COST, FIELD_ENERGY_KWH,
};
use crate::domain::home::{HomeCharacteristics, HomeError, HomeForm};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;
use std::time::Duration;
use thiserror::Error;

pub const ENERGY_CHART_ID: &str = "energy-chart";
pub const COST_CHART_ID: &str = "cost-chart";
pub const CO2_CHART_ID: &str = "co2-chart";

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error(transparent)]
    Home(#[from] HomeError),
    #[error("timestep must be at least one minute")]
    InvalidTimestep,
    #[error("heat load must be a finite, non-negative number of kWh")]
    InvalidHeatLoad,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimulationRequest {
    pub home: HomeForm,
    #[serde(default)]
    pub weather: Vec<WeatherSample>,
    #[serde(default)]
    pub timestep_minutes: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub heating_type: HeatingType,
    pub monthly_energy_use_kwh: BTreeMap<u32, f64>,
    pub yearly_energy_use_kwh: f64,
    pub heat_load_kwh: f64,
    pub comparison: HeatingComparison,
    pub charts: Vec<ChartCanvas>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    pub comparison: HeatingComparison,
    pub charts: Vec<ChartCanvas>,
}

#[derive(Debug, Clone, Default)]
pub struct EnergyService;

impl EnergyService {
    pub fn new() -> Self {
        Self
    }

    pub fn simulate<P: ColorSchemePreference>(
        &self,
        request: &SimulationRequest,
        preference: P,
    ) -> Result<SimulationReport, SimulationError> {
        let home = HomeCharacteristics::from_form(&request.home)?;
        let dt = match request.timestep_minutes {
            None => DEFAULT_TIMESTEP,
            Some(0) => return Err(SimulationError::InvalidTimestep),
            Some(minutes) => Duration::from_secs(u64::from(minutes) * 60),
        };

        let timesteps = simulate(&home, &request.weather, dt);
        let monthly = monthly_energy_use(&timesteps);
        let yearly_energy_use_kwh: f64 = monthly.values().sum();
        let heat_load_kwh = delivered_heat_kwh(&timesteps);

        tracing::info!(
            steps = timesteps.len(),
            heating_type = home.heating_type.value(),
            yearly_energy_use_kwh,
            "simulation finished"
        );

        let comparison = HeatingComparison::for_heat_load(heat_load_kwh);
        let charts = comparison_charts(&comparison, preference);

        Ok(SimulationReport {
            latitude: request.home.latitude,
            longitude: request.home.longitude,
            heating_type: home.heating_type,
            monthly_energy_use_kwh: monthly,
            yearly_energy_use_kwh,
            heat_load_kwh,
            comparison,
            charts,
        })
    }

    pub fn compare<P: ColorSchemePreference>(
        &self,
        heat_load_kwh: f64,
        preference: P,
    ) -> Result<ComparisonReport, SimulationError> {
        if !heat_load_kwh.is_finite() || heat_load_kwh < 0.0 {
            return Err(SimulationError::InvalidHeatLoad);
        }
        let comparison = HeatingComparison::for_heat_load(heat_load_kwh);
        let charts = comparison_charts(&comparison, preference);
        Ok(ComparisonReport { comparison, charts })
    }
}

/// One canvas per figure, each holding a single bar chart.
fn comparison_charts<P: ColorSchemePreference>(
    comparison: &HeatingComparison,
    preference: P,
) -> Vec<ChartCanvas> {
    let renderer = ChartRenderer::new(preference);
    let points = comparison.points();

    let mut co2_axis = AxisOptions::new();
    co2_axis.insert("numberFormat".to_string(), json!("#.###"));

    let figures: [(&str, &str, &str, Option<&AxisOptions>); 3] = [
        (ENERGY_CHART_ID, "Energy Use (kWh)", FIELD_ENERGY_KWH, None),
        (COST_CHART_ID, "Cost ($)", FIELD_COST, None),
        (CO2_CHART_ID, "CO2 (metric tons)", FIELD_CO2, Some(&co2_axis)),
    ];

    figures
        .into_iter()
        .map(|(id, title, field, axis)| {
            let mut canvas = ChartCanvas::new(id);
            renderer.render(&mut canvas, title, field, &points, axis);
            canvas
        })
        .collect()
}
