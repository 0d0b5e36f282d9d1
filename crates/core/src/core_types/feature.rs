//! Fixed-order feature record consumed by the burn-area model
//!
//! Column order is part of the model contract: the network was trained on
//! exactly this layout and silently produces wrong answers if columns are
//! permuted. [`FEATURE_NAMES`] is the single source of truth for that order.

use super::calendar::{Month, Weekday};
use std::fmt;

/// Number of model input columns
pub const FEATURE_COUNT: usize = 12;

/// Model input column names, in training order
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "X", "Y", "month", "day", "FFMC", "DMC", "DC", "ISI", "temp", "RH", "wind", "rain",
];

/// One observation, already coerced to the model's column types
///
/// Spatial coordinates and relative humidity are integers; the fire-weather
/// indices, temperature, wind and rain are floating point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureRecord {
    /// Spatial x coordinate within the park map grid
    pub x: i64,
    /// Spatial y coordinate within the park map grid
    pub y: i64,
    pub month: Month,
    pub day: Weekday,
    /// Fine Fuel Moisture Code
    pub ffmc: f64,
    /// Duff Moisture Code
    pub dmc: f64,
    /// Drought Code
    pub dc: f64,
    /// Initial Spread Index
    pub isi: f64,
    /// Air temperature (°C)
    pub temp: f64,
    /// Relative humidity (%)
    pub rh: i64,
    /// Wind speed (km/h)
    pub wind: f64,
    /// Outside rain (mm/m²)
    pub rain: f64,
}

/// A single feature value tagged with its declared type, for display
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeatureValue {
    Int(i64),
    Float(f64),
}

impl FeatureValue {
    /// Value widened to the model's numeric type
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Int(v) => v as f64,
            Self::Float(v) => v,
        }
    }
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            // Debug keeps the trailing ".0" so floats read as floats
            Self::Float(v) => write!(f, "{v:?}"),
        }
    }
}

impl FeatureRecord {
    /// Values paired with their column names, in model order
    ///
    /// Month and day appear as their integer codes, exactly as the model sees them.
    pub fn named_values(&self) -> [(&'static str, FeatureValue); FEATURE_COUNT] {
        use FeatureValue::{Float, Int};
        [
            (FEATURE_NAMES[0], Int(self.x)),
            (FEATURE_NAMES[1], Int(self.y)),
            (FEATURE_NAMES[2], Int(i64::from(self.month.code()))),
            (FEATURE_NAMES[3], Int(i64::from(self.day.code()))),
            (FEATURE_NAMES[4], Float(self.ffmc)),
            (FEATURE_NAMES[5], Float(self.dmc)),
            (FEATURE_NAMES[6], Float(self.dc)),
            (FEATURE_NAMES[7], Float(self.isi)),
            (FEATURE_NAMES[8], Float(self.temp)),
            (FEATURE_NAMES[9], Int(self.rh)),
            (FEATURE_NAMES[10], Float(self.wind)),
            (FEATURE_NAMES[11], Float(self.rain)),
        ]
    }

    /// Single model input row in [`FEATURE_NAMES`] order
    pub fn to_row(&self) -> [f64; FEATURE_COUNT] {
        self.named_values().map(|(_, value)| value.as_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FeatureRecord {
        FeatureRecord {
            x: 7,
            y: 5,
            month: Month::Aug,
            day: Weekday::Fri,
            ffmc: 91.0,
            dmc: 166.9,
            dc: 752.6,
            isi: 7.1,
            temp: 25.9,
            rh: 41,
            wind: 3.6,
            rain: 0.0,
        }
    }

    #[test]
    fn test_row_follows_feature_order() {
        let row = sample().to_row();
        assert_eq!(
            row,
            [7.0, 5.0, 8.0, 5.0, 91.0, 166.9, 752.6, 7.1, 25.9, 41.0, 3.6, 0.0]
        );
    }

    #[test]
    fn test_named_values_use_schema_names() {
        let names: Vec<&str> = sample().named_values().iter().map(|(n, _)| *n).collect();
        assert_eq!(names, FEATURE_NAMES);
    }

    #[test]
    fn test_feature_value_display_keeps_type() {
        assert_eq!(FeatureValue::Int(41).to_string(), "41");
        assert_eq!(FeatureValue::Float(91.0).to_string(), "91.0");
        assert_eq!(FeatureValue::Float(166.9).to_string(), "166.9");
    }
}
