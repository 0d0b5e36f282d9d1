//! Core types shared by the form adapter and the prediction service

pub mod calendar;
pub mod feature;

pub use calendar::{Month, Weekday};
pub use feature::{FeatureRecord, FeatureValue, FEATURE_COUNT, FEATURE_NAMES};
