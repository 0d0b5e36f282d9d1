//! Form adapter: raw string fields → typed [`FeatureRecord`]
//!
//! The web form submits every value as text. This module coerces each field
//! to its declared column type, maps the month/day tokens through the closed
//! calendar tables, and fails closed with a [`ValidationError`] that names the
//! first offending field. Nothing downstream runs unless parsing succeeds.

use crate::core_types::{FeatureRecord, Month, Weekday, FEATURE_NAMES};
use std::collections::HashMap;
use std::fmt;
use std::hash::BuildHasher;

/// Parsed form: the numeric record plus the categorical tokens as submitted
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedForm {
    pub record: FeatureRecord,
    /// Month token exactly as received (e.g. `"aug"`)
    pub month_token: String,
    /// Day token exactly as received (e.g. `"fri"`)
    pub day_token: String,
}

/// Reasons a submitted form is rejected before inference
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is absent
    Missing { field: &'static str },
    /// A numeric field did not coerce to its declared type
    Malformed {
        field: &'static str,
        value: String,
        expected: &'static str,
    },
    /// A categorical field holds a token outside its closed table
    UnknownToken { field: &'static str, value: String },
    /// A field outside the model schema was submitted
    Unexpected { field: String },
}

impl ValidationError {
    /// Name of the offending form field
    pub fn field(&self) -> &str {
        match self {
            Self::Missing { field }
            | Self::Malformed { field, .. }
            | Self::UnknownToken { field, .. } => *field,
            Self::Unexpected { field } => field.as_str(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { field } => write!(f, "Missing or invalid form field: '{field}'"),
            Self::Malformed {
                field,
                value,
                expected,
            } => write!(
                f,
                "Missing or invalid form field: '{field}' (expected {expected}, got {value:?})"
            ),
            Self::UnknownToken { field, value } => write!(
                f,
                "Missing or invalid form field: '{field}' (unknown token {value:?})"
            ),
            Self::Unexpected { field } => write!(f, "Unexpected form field: '{field}'"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Build a [`ParsedForm`] from submitted form fields
///
/// Fields are checked in model column order and the first failure is
/// reported. Keys outside the schema are rejected after that.
///
/// # Errors
/// Returns [`ValidationError`] naming the missing, malformed, unknown or
/// unexpected field.
pub fn parse_form<S: BuildHasher>(
    fields: &HashMap<String, String, S>,
) -> Result<ParsedForm, ValidationError> {
    let x = int_field(fields, "X")?;
    let y = int_field(fields, "Y")?;

    let month_token = raw_field(fields, "month")?;
    let month = Month::from_token(month_token).ok_or_else(|| ValidationError::UnknownToken {
        field: "month",
        value: month_token.to_owned(),
    })?;

    let day_token = raw_field(fields, "day")?;
    let day = Weekday::from_token(day_token).ok_or_else(|| ValidationError::UnknownToken {
        field: "day",
        value: day_token.to_owned(),
    })?;

    let record = FeatureRecord {
        x,
        y,
        month,
        day,
        ffmc: float_field(fields, "FFMC")?,
        dmc: float_field(fields, "DMC")?,
        dc: float_field(fields, "DC")?,
        isi: float_field(fields, "ISI")?,
        temp: float_field(fields, "temp")?,
        rh: int_field(fields, "RH")?,
        wind: float_field(fields, "wind")?,
        rain: float_field(fields, "rain")?,
    };

    let mut unexpected: Vec<&String> = fields
        .keys()
        .filter(|key| !FEATURE_NAMES.contains(&key.as_str()))
        .collect();
    unexpected.sort();
    if let Some(key) = unexpected.first() {
        return Err(ValidationError::Unexpected {
            field: (*key).clone(),
        });
    }

    Ok(ParsedForm {
        record,
        month_token: month_token.to_owned(),
        day_token: day_token.to_owned(),
    })
}

fn raw_field<'a, S: BuildHasher>(
    fields: &'a HashMap<String, String, S>,
    field: &'static str,
) -> Result<&'a str, ValidationError> {
    fields
        .get(field)
        .map(String::as_str)
        .ok_or(ValidationError::Missing { field })
}

fn int_field<S: BuildHasher>(
    fields: &HashMap<String, String, S>,
    field: &'static str,
) -> Result<i64, ValidationError> {
    let raw = raw_field(fields, field)?;
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::Malformed {
            field,
            value: raw.to_owned(),
            expected: "an integer",
        })
}

fn float_field<S: BuildHasher>(
    fields: &HashMap<String, String, S>,
    field: &'static str,
) -> Result<f64, ValidationError> {
    let raw = raw_field(fields, field)?;
    // NaN/inf parse fine but cannot be fed to the network
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ValidationError::Malformed {
            field,
            value: raw.to_owned(),
            expected: "a finite number",
        }),
    }
}
