//! Backend-agnostic regression model interface
//!
//! The prediction service only depends on this trait, so a different model
//! backend can be plugged in without touching request handling.

use super::artifact::TargetTransform;
use super::error::InferenceError;
use nalgebra::DMatrix;

/// A loaded, read-only regression model
///
/// Implementations must be safe to call concurrently from many request tasks:
/// `predict` takes `&self` and must not mutate shared state. A backend that
/// cannot guarantee that must serialize calls internally.
pub trait Regressor: Send + Sync {
    /// Human-readable model name (for logs and health checks)
    fn name(&self) -> &str;

    /// Input column names, in the order the model was trained on
    fn input_names(&self) -> &[String];

    /// Number of values produced per input row
    fn output_width(&self) -> usize;

    /// Transform applied to the target during training
    fn target_transform(&self) -> TargetTransform;

    /// Run inference on a batch
    ///
    /// # Arguments
    ///
    /// * `batch` - One row per sample, one column per input feature
    ///
    /// # Returns
    ///
    /// Raw model output, one row per sample and
    /// [`output_width`](Self::output_width) columns. Values are still in the
    /// training-target space (see [`target_transform`](Self::target_transform)).
    ///
    /// # Errors
    ///
    /// Returns [`InferenceError::ShapeMismatch`] when the batch width differs
    /// from the model's input width.
    fn predict(&self, batch: &DMatrix<f64>) -> Result<DMatrix<f64>, InferenceError>;
}
