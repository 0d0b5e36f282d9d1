//! Feed-forward regression network built from a [`ModelArtifact`]
//!
//! Weights live in `nalgebra` matrices and inference is a batched forward pass:
//! rows are samples, columns are features. The network is immutable once
//! built, so a single instance can be shared across threads behind an `Arc`.

use super::artifact::{LayerSpec, ModelArtifact, TargetTransform};
use super::error::{InferenceError, ModelError};
use super::hooks::{ActivationFn, HookRegistry, LossFn};
use super::regressor::Regressor;
use nalgebra::{DMatrix, DVector};
use std::fmt;
use std::path::Path;
use tracing::{debug, info};

/// Variance floor used by normalization layers
const NORMALIZATION_EPSILON: f64 = 1e-7;

enum Layer {
    Normalization {
        mean: DVector<f64>,
        inv_std: DVector<f64>,
    },
    Dense {
        /// `inputs × units`
        weights: DMatrix<f64>,
        bias: DVector<f64>,
        activation: ActivationFn,
        activation_name: String,
    },
}

impl Layer {
    fn forward(&self, mut x: DMatrix<f64>) -> DMatrix<f64> {
        match self {
            Layer::Normalization { mean, inv_std } => {
                for (j, mut column) in x.column_iter_mut().enumerate() {
                    let (m, s) = (mean[j], inv_std[j]);
                    column.apply(|v| *v = (*v - m) * s);
                }
                x
            }
            Layer::Dense {
                weights,
                bias,
                activation,
                ..
            } => {
                let mut out = &x * weights;
                for (j, mut column) in out.column_iter_mut().enumerate() {
                    column.add_scalar_mut(bias[j]);
                }
                out.apply(|v| *v = activation(*v));
                out
            }
        }
    }
}

/// Dense regression network ready for inference
pub struct DenseNetwork {
    name: String,
    input_names: Vec<String>,
    target_transform: TargetTransform,
    layers: Vec<Layer>,
    input_width: usize,
    output_width: usize,
    loss: Option<(String, LossFn)>,
}

impl DenseNetwork {
    /// Build a network from a parsed artifact, resolving hooks by name
    ///
    /// # Errors
    /// Returns [`ModelError::Shape`] if layer dimensions do not chain,
    /// or [`ModelError::UnknownHook`] if an activation or loss is not registered.
    pub fn from_artifact(
        artifact: ModelArtifact,
        hooks: &HookRegistry,
    ) -> Result<Self, ModelError> {
        let input_width = artifact.input_features.len();
        if input_width == 0 {
            return Err(ModelError::Shape("artifact declares no input features".into()));
        }

        let loss = match &artifact.loss {
            Some(name) => Some((name.clone(), hooks.loss(name)?)),
            None => None,
        };

        let mut width = input_width;
        let mut layers = Vec::with_capacity(artifact.layers.len());
        for (index, spec) in artifact.layers.into_iter().enumerate() {
            match spec {
                LayerSpec::Normalization { mean, variance } => {
                    if mean.len() != width || variance.len() != width {
                        return Err(ModelError::Shape(format!(
                            "layer {index}: normalization expects {width} values, got mean={} variance={}",
                            mean.len(),
                            variance.len()
                        )));
                    }
                    let inv_std = variance
                        .iter()
                        .map(|v| 1.0 / v.max(NORMALIZATION_EPSILON).sqrt())
                        .collect::<Vec<_>>();
                    layers.push(Layer::Normalization {
                        mean: DVector::from_vec(mean),
                        inv_std: DVector::from_vec(inv_std),
                    });
                }
                LayerSpec::Dense {
                    units,
                    activation,
                    kernel,
                    bias,
                } => {
                    if units == 0 {
                        return Err(ModelError::Shape(format!(
                            "layer {index}: dense layer has 0 units"
                        )));
                    }
                    if kernel.len() != width {
                        return Err(ModelError::Shape(format!(
                            "layer {index}: kernel has {} rows, expected {width}",
                            kernel.len()
                        )));
                    }
                    if let Some(row) = kernel.iter().position(|r| r.len() != units) {
                        return Err(ModelError::Shape(format!(
                            "layer {index}: kernel row {row} has {} columns, expected {units}",
                            kernel[row].len()
                        )));
                    }
                    if bias.len() != units {
                        return Err(ModelError::Shape(format!(
                            "layer {index}: bias has {} values, expected {units}",
                            bias.len()
                        )));
                    }
                    let resolved = hooks.activation(&activation)?;
                    let weights = DMatrix::from_fn(width, units, |i, j| kernel[i][j]);
                    layers.push(Layer::Dense {
                        weights,
                        bias: DVector::from_vec(bias),
                        activation: resolved,
                        activation_name: activation,
                    });
                    width = units;
                }
                LayerSpec::Dropout { .. } => {}
            }
        }

        let network = Self {
            name: artifact.name,
            input_names: artifact.input_features,
            target_transform: artifact.target_transform,
            layers,
            input_width,
            output_width: width,
            loss,
        };
        debug!("Built network {network:?}");
        Ok(network)
    }

    /// Load an artifact from disk and build the network
    ///
    /// # Errors
    /// Returns [`ModelError::Unavailable`] if the file is missing, plus any
    /// parsing or construction error.
    pub fn load<P: AsRef<Path>>(path: P, hooks: &HookRegistry) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let artifact = ModelArtifact::from_path(path)?;
        let network = Self::from_artifact(artifact, hooks)?;
        info!(
            "Loaded model '{}' from {} ({} inputs, {} layers, target transform {:?})",
            network.name,
            path.display(),
            network.input_width,
            network.layers.len(),
            network.target_transform
        );
        Ok(network)
    }

    /// Number of input columns
    pub fn input_width(&self) -> usize {
        self.input_width
    }

    /// Name of the training loss, if the artifact declared one
    pub fn loss_name(&self) -> Option<&str> {
        self.loss.as_ref().map(|(name, _)| name.as_str())
    }

    /// Evaluate the registered training loss on a pair of target vectors
    ///
    /// Returns `None` when the artifact did not declare a loss.
    pub fn evaluate_loss(&self, y_true: &[f64], y_pred: &[f64]) -> Option<f64> {
        self.loss.as_ref().map(|(_, loss)| loss(y_true, y_pred))
    }
}

impl Regressor for DenseNetwork {
    fn name(&self) -> &str {
        &self.name
    }

    fn input_names(&self) -> &[String] {
        &self.input_names
    }

    fn output_width(&self) -> usize {
        self.output_width
    }

    fn target_transform(&self) -> TargetTransform {
        self.target_transform
    }

    fn predict(&self, batch: &DMatrix<f64>) -> Result<DMatrix<f64>, InferenceError> {
        if batch.ncols() != self.input_width {
            return Err(InferenceError::ShapeMismatch {
                expected: self.input_width,
                actual: batch.ncols(),
            });
        }
        Ok(self
            .layers
            .iter()
            .fold(batch.clone(), |x, layer| layer.forward(x)))
    }
}

impl fmt::Debug for DenseNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let layers: Vec<String> = self
            .layers
            .iter()
            .map(|layer| match layer {
                Layer::Normalization { mean, .. } => format!("normalization({})", mean.len()),
                Layer::Dense {
                    weights,
                    activation_name,
                    ..
                } => format!("dense({}→{}, {activation_name})", weights.nrows(), weights.ncols()),
            })
            .collect();
        f.debug_struct("DenseNetwork")
            .field("name", &self.name)
            .field("inputs", &self.input_names)
            .field("layers", &layers)
            .field("target_transform", &self.target_transform)
            .field("loss", &self.loss_name())
            .finish_non_exhaustive()
    }
}
