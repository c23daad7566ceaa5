// Heating systems and their running cost / emissions
use super::chart::ChartSeriesPoint;
use serde::{Deserialize, Serialize};

pub const FIELD_ENERGY_KWH: &str = "energy_kwh";
pub const FIELD_COST: &str = "cost";
pub const FIELD_CO2: &str = "co2";

/// kWh in one therm of natural gas.
const KWH_PER_THERM: f64 = 29.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeatingType {
    NaturalGas,
    HeatPump,
}

impl HeatingType {
    pub const ALL: [HeatingType; 2] = [HeatingType::NaturalGas, HeatingType::HeatPump];

    pub fn value(&self) -> &'static str {
        match self {
            Self::NaturalGas => "natural_gas",
            Self::HeatPump => "heat_pump",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::NaturalGas => "Natural Gas",
            Self::HeatPump => "Heat Pump",
        }
    }

    /// Delivered heat per unit of consumed energy (COP for heat pumps).
    pub fn efficiency(&self) -> f64 {
        match self {
            Self::NaturalGas => 0.8,
            Self::HeatPump => 4.0,
        }
    }

    /// Cost in dollars of consuming `kwh`.
    pub fn cost(&self, kwh: f64) -> f64 {
        match self {
            Self::NaturalGas => kwh / KWH_PER_THERM * 1.0092,
            Self::HeatPump => kwh * 0.1921,
        }
    }

    /// Metric tons of CO2 from consuming `kwh`.
    pub fn co2(&self, kwh: f64) -> f64 {
        match self {
            Self::NaturalGas => kwh / KWH_PER_THERM * 0.0053,
            Self::HeatPump => kwh * 0.000305,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatingEstimate {
    pub heating_type: HeatingType,
    pub energy_kwh: f64,
    pub cost: f64,
    pub co2: f64,
}

impl HeatingEstimate {
    pub fn for_heat_load(heating_type: HeatingType, heat_load_kwh: f64) -> Self {
        let energy_kwh = heat_load_kwh / heating_type.efficiency();
        Self {
            heating_type,
            energy_kwh,
            cost: heating_type.cost(energy_kwh),
            co2: heating_type.co2(energy_kwh),
        }
    }

    pub fn to_point(&self) -> ChartSeriesPoint {
        ChartSeriesPoint::new(self.heating_type.label())
            .with_value(FIELD_ENERGY_KWH, self.energy_kwh)
            .with_value(FIELD_COST, self.cost)
            .with_value(FIELD_CO2, self.co2)
    }
}

/// Side-by-side running figures for every heating type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatingComparison {
    pub heat_load_kwh: f64,
    pub estimates: Vec<HeatingEstimate>,
}

impl HeatingComparison {
    pub fn for_heat_load(heat_load_kwh: f64) -> Self {
        let estimates = HeatingType::ALL
            .into_iter()
            .map(|t| HeatingEstimate::for_heat_load(t, heat_load_kwh))
            .collect();
        Self {
            heat_load_kwh,
            estimates,
        }
    }

    pub fn points(&self) -> Vec<ChartSeriesPoint> {
        self.estimates.iter().map(HeatingEstimate::to_point).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heat_pump_uses_less_energy() {
        let comparison = HeatingComparison::for_heat_load(8000.0);
        let gas = &comparison.estimates[0];
        let pump = &comparison.estimates[1];

        assert_eq!(gas.heating_type, HeatingType::NaturalGas);
        assert!((gas.energy_kwh - 10_000.0).abs() < 1e-9);
        assert!((pump.energy_kwh - 2000.0).abs() < 1e-9);
        assert!((pump.cost - 384.2).abs() < 1e-9);
        assert!((gas.cost - 10_000.0 / 29.3 * 1.0092).abs() < 1e-9);
    }

    #[test]
    fn test_points_use_labels_as_categories() {
        let points = HeatingComparison::for_heat_load(100.0).points();
        let categories: Vec<&str> = points.iter().map(|p| p.category.as_str()).collect();
        assert_eq!(categories, vec!["Natural Gas", "Heat Pump"]);
        assert!(points.iter().all(|p| p.value(FIELD_CO2).is_some()));
    }
}
