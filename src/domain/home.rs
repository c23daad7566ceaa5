// Home description - imperial form input and the SI model derived from it
use super::conversions::{fahrenheit_to_celsius, feet_to_meters, square_feet_to_square_meters};
use super::heating::HeatingType;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Empirical ACH50 to natural air change divisor.
const LBL_FACTOR: f64 = 17.0;
/// Imperial (ft² °F h/Btu) to SI (m² K/W) R-value divisor.
const R_VALUE_IMPERIAL_PER_SI: f64 = 5.67;
const HEAT_CAPACITY_PER_CUBIC_METER: f64 = 1e5;

#[derive(Debug, Error, PartialEq)]
pub enum HomeError {
    #[error("{field} must be greater than zero")]
    NotPositive { field: &'static str },
    #[error("heating setpoint {heating_f}°F is above cooling setpoint {cooling_f}°F")]
    SetpointsInverted { heating_f: f64, cooling_f: f64 },
}

fn default_square_footage() -> f64 {
    2000.0
}
fn default_ceiling_height() -> f64 {
    9.0
}
fn default_air_change_rate() -> f64 {
    16.0
}
fn default_wall_insulation_rvalue() -> f64 {
    10.0
}
fn default_hvac_capacity_w() -> f64 {
    10_000.0
}
fn default_heating_type() -> HeatingType {
    HeatingType::NaturalGas
}
fn default_south_facing_window_size() -> f64 {
    100.0
}
fn default_window_solar_heat_gain_coefficient() -> f64 {
    0.5
}

/// The home form as the user fills it in (feet, square feet, °F).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomeForm {
    #[serde(default = "default_square_footage")]
    pub square_footage: f64,
    #[serde(default = "default_ceiling_height")]
    pub ceiling_height: f64,
    #[serde(default = "default_air_change_rate")]
    pub air_change_rate: f64,
    #[serde(default = "default_wall_insulation_rvalue")]
    pub wall_insulation_rvalue: f64,
    #[serde(default = "default_hvac_capacity_w")]
    pub hvac_capacity_w: f64,
    #[serde(default = "default_heating_type")]
    pub heating_type: HeatingType,
    #[serde(default = "default_south_facing_window_size")]
    pub south_facing_window_size: f64,
    #[serde(default = "default_window_solar_heat_gain_coefficient")]
    pub window_solar_heat_gain_coefficient: f64,
    pub heat_temperature: f64,
    pub cool_temperature: f64,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl HomeForm {
    pub fn with_setpoints(heat_temperature: f64, cool_temperature: f64) -> Self {
        Self {
            square_footage: default_square_footage(),
            ceiling_height: default_ceiling_height(),
            air_change_rate: default_air_change_rate(),
            wall_insulation_rvalue: default_wall_insulation_rvalue(),
            hvac_capacity_w: default_hvac_capacity_w(),
            heating_type: default_heating_type(),
            south_facing_window_size: default_south_facing_window_size(),
            window_solar_heat_gain_coefficient: default_window_solar_heat_gain_coefficient(),
            heat_temperature,
            cool_temperature,
            latitude: None,
            longitude: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HomeCharacteristics {
    pub heating_setpoint_c: f64,
    pub cooling_setpoint_c: f64,
    pub hvac_capacity_w: f64,
    pub conditioned_floor_area_sq_m: f64,
    pub ceiling_height_m: f64,
    pub wall_insulation_r_value_imperial: f64,
    pub ach50: f64,
    pub south_facing_window_size_sq_m: f64,
    pub window_solar_heat_gain_coefficient: f64,
    pub heating_type: HeatingType,
}

impl HomeCharacteristics {
    pub fn from_form(form: &HomeForm) -> Result<Self, HomeError> {
        let positive = [
            ("square_footage", form.square_footage),
            ("ceiling_height", form.ceiling_height),
            ("wall_insulation_rvalue", form.wall_insulation_rvalue),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(HomeError::NotPositive { field });
            }
        }
        if form.heat_temperature > form.cool_temperature {
            return Err(HomeError::SetpointsInverted {
                heating_f: form.heat_temperature,
                cooling_f: form.cool_temperature,
            });
        }

        Ok(Self {
            heating_setpoint_c: fahrenheit_to_celsius(form.heat_temperature),
            cooling_setpoint_c: fahrenheit_to_celsius(form.cool_temperature),
            hvac_capacity_w: form.hvac_capacity_w,
            conditioned_floor_area_sq_m: square_feet_to_square_meters(form.square_footage),
            ceiling_height_m: feet_to_meters(form.ceiling_height),
            wall_insulation_r_value_imperial: form.wall_insulation_rvalue,
            ach50: form.air_change_rate,
            south_facing_window_size_sq_m: square_feet_to_square_meters(
                form.south_facing_window_size,
            ),
            window_solar_heat_gain_coefficient: form.window_solar_heat_gain_coefficient,
            heating_type: form.heating_type,
        })
    }

    pub fn building_volume_cu_m(&self) -> f64 {
        self.conditioned_floor_area_sq_m * self.ceiling_height_m
    }

    /// Perimeter of a one-story square footprint.
    pub fn building_perimeter_m(&self) -> f64 {
        self.conditioned_floor_area_sq_m.sqrt() * 4.0
    }

    /// Walls plus roof; the floor is ignored.
    pub fn surface_area_sq_m(&self) -> f64 {
        self.building_perimeter_m() * self.ceiling_height_m + self.conditioned_floor_area_sq_m
    }

    pub fn ach_natural(&self) -> f64 {
        self.ach50 / LBL_FACTOR
    }

    pub fn wall_insulation_r_value_si(&self) -> f64 {
        self.wall_insulation_r_value_imperial / R_VALUE_IMPERIAL_PER_SI
    }

    /// Joules needed to move the indoor temperature by one kelvin.
    pub fn building_heat_capacity(&self) -> f64 {
        self.building_volume_cu_m() * HEAT_CAPACITY_PER_CUBIC_METER
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_defaults_from_json() {
        let form: HomeForm =
            serde_json::from_str(r#"{"heat_temperature": 68, "cool_temperature": 76, "heating_type": "heat_pump"}"#)
                .unwrap();
        assert_eq!(form.square_footage, 2000.0);
        assert_eq!(form.heating_type, HeatingType::HeatPump);
        assert_eq!(form.latitude, None);
    }

    #[test]
    fn test_derived_geometry() {
        let mut form = HomeForm::with_setpoints(68.0, 76.0);
        form.square_footage = 100.0 / 0.092_903_04;
        form.ceiling_height = 3.0 / 0.3048;
        let home = HomeCharacteristics::from_form(&form).unwrap();

        assert!((home.conditioned_floor_area_sq_m - 100.0).abs() < 1e-9);
        assert!((home.building_volume_cu_m() - 300.0).abs() < 1e-9);
        assert!((home.building_perimeter_m() - 40.0).abs() < 1e-9);
        assert!((home.surface_area_sq_m() - 220.0).abs() < 1e-9);
        assert!((home.heating_setpoint_c - 20.0).abs() < 1e-9);
        assert!((home.building_heat_capacity() - 3.0e7).abs() < 1e-3);
    }

    #[test]
    fn test_rejects_bad_input() {
        let mut form = HomeForm::with_setpoints(80.0, 70.0);
        assert!(matches!(
            HomeCharacteristics::from_form(&form),
            Err(HomeError::SetpointsInverted { .. })
        ));

        form.cool_temperature = 85.0;
        form.ceiling_height = 0.0;
        assert_eq!(
            HomeCharacteristics::from_form(&form),
            Err(HomeError::NotPositive {
                field: "ceiling_height"
            })
        );
    }
}
