//! Forest Fire Burn Area Core Library
//!
//! Turns a submitted set of fire-weather observations into a predicted burned
//! area using a pre-trained regression network.
//!
//! ## Pipeline
//!
//! - [`form`]: raw string form fields → typed [`FeatureRecord`] (fails closed with
//!   a [`ValidationError`] naming the offending field)
//! - [`model`]: JSON model artifact, named computation hooks, dense-network inference
//! - [`prediction`]: inference + inverse target transform + clamp + rounding
//!
//! ```
//! use fire_area_core::{parse_form, FEATURE_NAMES};
//! use std::collections::HashMap;
//!
//! let values = ["7", "5", "aug", "fri", "91.0", "166.9", "752.6", "7.1", "25.9", "41", "3.6", "0.0"];
//! let fields: HashMap<String, String> = FEATURE_NAMES
//!     .iter()
//!     .zip(values)
//!     .map(|(k, v)| ((*k).to_owned(), v.to_owned()))
//!     .collect();
//!
//! let parsed = parse_form(&fields).unwrap();
//! assert_eq!(parsed.record.month.code(), 8);
//! assert_eq!(parsed.record.day.code(), 5);
//! ```

// Core types
pub mod core_types;

// Request-side adapter
pub mod form;

// Model artifact and inference
pub mod model;

// Post-processing service
pub mod prediction;

// Re-export core types
pub use core_types::{FeatureRecord, FeatureValue, Month, Weekday, FEATURE_COUNT, FEATURE_NAMES};

// Re-export adapter and service types
pub use form::{parse_form, ParsedForm, ValidationError};
pub use model::{DenseNetwork, HookRegistry, InferenceError, ModelError, Regressor, TargetTransform};
pub use prediction::{BurnArea, PredictionError, PredictionService};
