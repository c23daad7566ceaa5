// Imperial/SI conversions for form inputs

pub const FEET_TO_METERS: f64 = 0.3048;
pub const SQUARE_FEET_TO_SQUARE_METERS: f64 = 0.092_903_04;
pub const CELSIUS_FAHRENHEIT_MULTIPLIER: f64 = 1.8;
pub const FAHRENHEIT_FREEZE_POINT: f64 = 32.0;

pub fn feet_to_meters(value: f64) -> f64 {
    value * FEET_TO_METERS
}

pub fn square_feet_to_square_meters(value: f64) -> f64 {
    value * SQUARE_FEET_TO_SQUARE_METERS
}

pub fn celsius_to_fahrenheit(value: f64) -> f64 {
    value * CELSIUS_FAHRENHEIT_MULTIPLIER + FAHRENHEIT_FREEZE_POINT
}

pub fn fahrenheit_to_celsius(value: f64) -> f64 {
    (value - FAHRENHEIT_FREEZE_POINT) / CELSIUS_FAHRENHEIT_MULTIPLIER
}
