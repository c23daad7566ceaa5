// Single-zone thermal model of a home, stepped over a weather series
//
// Three outside sources move indoor temperature: conduction through walls and
// roof, air exchange with outdoor air, and sun through south-facing windows.
// The HVAC system is on/off against the heating and cooling setpoints.
use super::home::HomeCharacteristics;
use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

pub const JOULES_PER_KWH: f64 = 3.6e6;
pub const SECONDS_PER_HOUR: f64 = 3600.0;
/// Joules per cubic meter of air per kelvin.
pub const AIR_VOLUMETRIC_HEAT_CAPACITY: f64 = 1200.0;
pub const DEFAULT_TIMESTEP: Duration = Duration::from_secs(10 * 60);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSample {
    pub timestamp: NaiveDateTime,
    pub temp_air_c: f64,
    /// Direct irradiance on a vertical south-facing surface, W/m².
    pub irradiance_w_per_sq_m: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HvacMode {
    Heating,
    Cooling,
    Off,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Timestep {
    pub timestamp: NaiveDateTime,
    pub temperature_difference_c: f64,
    pub conduction_j: f64,
    pub air_change_j: f64,
    pub radiant_j: f64,
    pub hvac_j: f64,
    pub hvac_mode: HvacMode,
    pub net_energy_j: f64,
    pub delta_t_c: f64,
    pub outdoor_temperature_c: f64,
    pub indoor_temperature_c: f64,
    /// Energy the HVAC system consumed to deliver `hvac_j`.
    pub hvac_energy_use_kwh: f64,
}

impl Timestep {
    /// Heat moved by the HVAC system, before efficiency.
    pub fn delivered_kwh(&self) -> f64 {
        self.hvac_j.abs() / JOULES_PER_KWH
    }
}

pub fn calculate_next_timestep(
    indoor_temperature_c: f64,
    sample: &WeatherSample,
    home: &HomeCharacteristics,
    dt: Duration,
) -> Timestep {
    let seconds = dt.as_secs_f64();
    let temperature_difference_c = sample.temp_air_c - indoor_temperature_c;

    // Q = U·A·ΔT with U = 1/R
    let conduction_w =
        temperature_difference_c * home.surface_area_sq_m() / home.wall_insulation_r_value_si();
    let conduction_j = conduction_w * seconds;

    let air_change_volume =
        seconds * home.building_volume_cu_m() * home.ach_natural() / SECONDS_PER_HOUR;
    let air_change_j = temperature_difference_c * air_change_volume * AIR_VOLUMETRIC_HEAT_CAPACITY;

    let radiant_j = home.south_facing_window_size_sq_m
        * home.window_solar_heat_gain_coefficient
        * sample.irradiance_w_per_sq_m
        * seconds;

    let (hvac_mode, hvac_j) = if indoor_temperature_c < home.heating_setpoint_c {
        (HvacMode::Heating, home.hvac_capacity_w * seconds)
    } else if indoor_temperature_c > home.cooling_setpoint_c {
        (HvacMode::Cooling, -home.hvac_capacity_w * seconds)
    } else {
        (HvacMode::Off, 0.0)
    };

    let net_energy_j = conduction_j + air_change_j + radiant_j + hvac_j;
    let delta_t_c = net_energy_j / home.building_heat_capacity();

    Timestep {
        timestamp: sample.timestamp,
        temperature_difference_c,
        conduction_j,
        air_change_j,
        radiant_j,
        hvac_j,
        hvac_mode,
        net_energy_j,
        delta_t_c,
        outdoor_temperature_c: sample.temp_air_c,
        indoor_temperature_c: indoor_temperature_c + delta_t_c,
        hvac_energy_use_kwh: hvac_j.abs() / (JOULES_PER_KWH * home.heating_type.efficiency()),
    }
}

/// Run the model over `weather`, starting indoors at the heating setpoint.
pub fn simulate(home: &HomeCharacteristics, weather: &[WeatherSample], dt: Duration) -> Vec<Timestep> {
    let mut indoor = home.heating_setpoint_c;
    weather
        .iter()
        .map(|sample| {
            let step = calculate_next_timestep(indoor, sample, home, dt);
            indoor = step.indoor_temperature_c;
            step
        })
        .collect()
}

/// HVAC energy use per calendar month (1-12), kWh.
pub fn monthly_energy_use(timesteps: &[Timestep]) -> BTreeMap<u32, f64> {
    let mut months = BTreeMap::new();
    for step in timesteps {
        *months.entry(step.timestamp.month()).or_insert(0.0) += step.hvac_energy_use_kwh;
    }
    months
}

pub fn delivered_heat_kwh(timesteps: &[Timestep]) -> f64 {
    timesteps.iter().map(Timestep::delivered_kwh).sum()
}
