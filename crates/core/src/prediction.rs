//! Prediction service: feature record → predicted burn area
//!
//! Wraps a shared, read-only [`Regressor`] and applies the post-processing the
//! model's training implies:
//! 1. Run inference on the single-row record
//! 2. Invert the target transform (`exp(x) - 1` for log1p-trained models)
//! 3. Clamp to a floor of zero
//! 4. Round to 2 decimal places (ties to even)
//!
//! The service is constructed once at startup and shared by handle; it holds
//! no per-request state, so identical records always give identical results.

use crate::core_types::{FeatureRecord, FEATURE_COUNT, FEATURE_NAMES};
use crate::model::{InferenceError, ModelError, Regressor, TargetTransform};
use nalgebra::DMatrix;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Predicted burned area in hectares
///
/// Always finite, non-negative and rounded to 2 decimal places.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct BurnArea(f64);

impl BurnArea {
    /// Post-process a raw model output into a burn area
    ///
    /// # Errors
    /// Returns [`InferenceError::NonFinite`] if the raw value or its inverse is
    /// NaN or infinite (positive or negative).
    pub fn from_raw(raw: f64, transform: TargetTransform) -> Result<Self, InferenceError> {
        let inverted = transform.invert(raw);
        if !inverted.is_finite() {
            return Err(InferenceError::NonFinite(inverted));
        }
        // Written as a comparison so -0.0 also lands on +0.0
        let clamped = if inverted > 0.0 { inverted } else { 0.0 };
        Ok(Self(round_to_cents(clamped)))
    }

    /// Area in hectares
    pub fn hectares(self) -> f64 {
        self.0
    }
}

impl fmt::Display for BurnArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Round half-to-even at the second decimal
///
/// Values too large to scale by 100 have no fractional digits and are
/// returned unchanged.
fn round_to_cents(value: f64) -> f64 {
    let scaled = value * 100.0;
    if scaled.is_finite() {
        scaled.round_ties_even() / 100.0
    } else {
        value
    }
}

/// Errors from a single prediction request
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionError {
    /// The model failed to produce a usable value
    Inference(InferenceError),
}

impl fmt::Display for PredictionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredictionError::Inference(e) => write!(f, "Inference failed: {e}"),
        }
    }
}

impl std::error::Error for PredictionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PredictionError::Inference(e) => Some(e),
        }
    }
}

impl From<InferenceError> for PredictionError {
    fn from(e: InferenceError) -> Self {
        PredictionError::Inference(e)
    }
}

/// Burn-area prediction over a shared regression model
#[derive(Clone)]
pub struct PredictionService {
    model: Arc<dyn Regressor>,
    transform: TargetTransform,
}

impl PredictionService {
    /// Wrap a loaded model
    ///
    /// The model must take exactly the [`FEATURE_NAMES`] columns in that order
    /// and produce a single output. The inverse transform is the one the model
    /// declares.
    ///
    /// # Errors
    /// Returns [`ModelError::SchemaMismatch`] if the model's inputs or output
    /// width do not match.
    pub fn new(model: Arc<dyn Regressor>) -> Result<Self, ModelError> {
        let inputs = model.input_names();
        if inputs.len() != FEATURE_COUNT || inputs.iter().zip(FEATURE_NAMES).any(|(a, b)| a != b) {
            return Err(ModelError::SchemaMismatch(format!(
                "model inputs {inputs:?} differ from expected {FEATURE_NAMES:?}"
            )));
        }
        if model.output_width() != 1 {
            return Err(ModelError::SchemaMismatch(format!(
                "model produces {} outputs, expected 1",
                model.output_width()
            )));
        }
        let transform = model.target_transform();
        Ok(Self { model, transform })
    }

    /// Override the inverse transform declared by the model
    pub fn with_transform(mut self, transform: TargetTransform) -> Self {
        self.transform = transform;
        self
    }

    /// Name of the wrapped model
    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// Transform that predictions are inverted through
    pub fn transform(&self) -> TargetTransform {
        self.transform
    }

    /// Predict the burn area for one observation
    ///
    /// # Errors
    /// Returns [`PredictionError::Inference`] if the model rejects the input or
    /// produces no finite value. Errors are never replaced by a default.
    pub fn predict(&self, record: &FeatureRecord) -> Result<BurnArea, PredictionError> {
        let row = record.to_row();
        let batch = DMatrix::from_row_slice(1, FEATURE_COUNT, &row);
        let output = self.model.predict(&batch)?;
        let raw = output.iter().next().copied().ok_or(InferenceError::EmptyOutput)?;
        let area = BurnArea::from_raw(raw, self.transform)?;
        debug!("Raw model output {raw} → {area} ha");
        Ok(area)
    }
}

impl fmt::Debug for PredictionService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PredictionService")
            .field("model", &self.model.name())
            .field("transform", &self.transform)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::{Month, Weekday};
    use approx::assert_relative_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Model returning a fixed raw value and counting calls
    struct FixedModel {
        inputs: Vec<String>,
        raw: f64,
        outputs: usize,
        calls: AtomicUsize,
    }

    impl FixedModel {
        fn new(raw: f64) -> Self {
            Self {
                inputs: FEATURE_NAMES.iter().map(|s| (*s).to_owned()).collect(),
                raw,
                outputs: 1,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl Regressor for FixedModel {
        fn name(&self) -> &str {
            "fixed"
        }
        fn input_names(&self) -> &[String] {
            &self.inputs
        }
        fn output_width(&self) -> usize {
            self.outputs
        }
        fn target_transform(&self) -> TargetTransform {
            TargetTransform::Log1p
        }
        fn predict(&self, batch: &DMatrix<f64>) -> Result<DMatrix<f64>, InferenceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(DMatrix::from_element(batch.nrows(), self.outputs, self.raw))
        }
    }

    fn record() -> FeatureRecord {
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
    fn test_inverse_log_transform_applied() {
        let service = PredictionService::new(Arc::new(FixedModel::new(2.0))).unwrap();
        let area = service.predict(&record()).unwrap();
        // expm1(2) = 6.389056...
        assert_relative_eq!(area.hectares(), 6.39);
    }

    #[test]
    fn test_negative_output_clamped_to_zero() {
        // expm1(-3) ≈ -0.95
        let service = PredictionService::new(Arc::new(FixedModel::new(-3.0))).unwrap();
        assert_eq!(service.predict(&record()).unwrap().hectares(), 0.0);

        let identity = service.with_transform(TargetTransform::Identity);
        let area = identity.predict(&record()).unwrap();
        assert_eq!(area.hectares(), 0.0);
        assert!(area.hectares().is_sign_positive());
    }

    #[test]
    fn test_rounding_is_two_decimals_ties_even() {
        assert_eq!(round_to_cents(1.234_567), 1.23);
        assert_eq!(round_to_cents(0.125), 0.12);
        assert_eq!(round_to_cents(0.375), 0.38);
        for raw in [0.1, 0.5, 1.3, 2.71, 4.0, 7.77] {
            let area = BurnArea::from_raw(raw, TargetTransform::Log1p).unwrap().hectares();
            let cents = area * 100.0;
            assert!((cents - cents.round()).abs() < 1e-6, "{area} has more than 2 decimals");
        }
    }

    #[test]
    fn test_repeated_predictions_identical() {
        let service = PredictionService::new(Arc::new(FixedModel::new(1.1))).unwrap();
        let a = service.predict(&record()).unwrap();
        let b = service.predict(&record()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_non_finite_output_is_error() {
        let service = PredictionService::new(Arc::new(FixedModel::new(f64::NAN))).unwrap();
        assert!(matches!(
            service.predict(&record()),
            Err(PredictionError::Inference(InferenceError::NonFinite(_)))
        ));

        let overflow = PredictionService::new(Arc::new(FixedModel::new(1.0e6))).unwrap();
        assert!(overflow.predict(&record()).is_err());
    }

    #[test]
    fn test_huge_finite_output_stays_finite() {
        // expm1(708) ≈ 3.0e307: finite, but overflows once scaled by 100
        let area = BurnArea::from_raw(708.0, TargetTransform::Log1p).unwrap();
        assert!(area.hectares().is_finite());
        assert_eq!(area.hectares(), 708.0f64.exp_m1());

        let max = BurnArea::from_raw(f64::MAX, TargetTransform::Identity).unwrap();
        assert_eq!(max.hectares(), f64::MAX);

        // Just past the largest finite expm1
        assert!(matches!(
            BurnArea::from_raw(710.0, TargetTransform::Log1p),
            Err(InferenceError::NonFinite(v)) if v.is_infinite()
        ));
    }

    #[test]
    fn test_schema_order_enforced() {
        let mut model = FixedModel::new(0.0);
        model.inputs.swap(2, 3);
        assert!(matches!(
            PredictionService::new(Arc::new(model)),
            Err(ModelError::SchemaMismatch(_))
        ));
    }

    #[test]
    fn test_multi_output_model_rejected() {
        let mut model = FixedModel::new(0.0);
        model.outputs = 2;
        assert!(PredictionService::new(Arc::new(model)).is_err());
    }

    #[test]
    fn test_single_inference_per_request() {
        let model = Arc::new(FixedModel::new(0.5));
        let service = PredictionService::new(model.clone()).unwrap();
        service.predict(&record()).unwrap();
        assert_eq!(model.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_display_two_decimals() {
        let area = BurnArea::from_raw(0.0, TargetTransform::Log1p).unwrap();
        assert_eq!(area.to_string(), "0.00");
    }
}
