//! On-disk model artifact format
//!
//! A trained regression network is exported as JSON: the input column names,
//! the transform that was applied to the training target, the name of the
//! training loss, and the layer stack with its weights.
//!
//! ```json
//! {
//!   "format_version": 1,
//!   "name": "forest_fire_model",
//!   "input_features": ["X", "Y", "month", "day", "FFMC", "DMC", "DC", "ISI", "temp", "RH", "wind", "rain"],
//!   "target_transform": "log1p",
//!   "loss": "mse",
//!   "layers": [
//!     { "type": "normalization", "mean": [...], "variance": [...] },
//!     { "type": "dense", "units": 16, "activation": "relu", "kernel": [[...]], "bias": [...] },
//!     { "type": "dense", "units": 1, "activation": "linear", "kernel": [[...]], "bias": [0.0] }
//!   ]
//! }
//! ```
//!
//! Dense kernels are stored input-major (`inputs × units`).

use super::error::ModelError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Artifact format version understood by this build
pub const FORMAT_VERSION: u32 = 1;

/// Serialized regression network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u32,
    #[serde(default = "default_name")]
    pub name: String,
    /// Input column names in training order
    pub input_features: Vec<String>,
    /// Transform applied to the target during training
    #[serde(default)]
    pub target_transform: TargetTransform,
    /// Name of the training loss; must resolve through the hook registry
    #[serde(default)]
    pub loss: Option<String>,
    pub layers: Vec<LayerSpec>,
}

fn default_name() -> String {
    "unnamed".to_owned()
}

fn default_activation() -> String {
    "linear".to_owned()
}

/// One layer of the serialized network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LayerSpec {
    /// Feature-wise standardisation: `(x - mean) / sqrt(variance)`
    Normalization { mean: Vec<f64>, variance: Vec<f64> },
    /// Fully connected layer followed by a named activation
    Dense {
        units: usize,
        #[serde(default = "default_activation")]
        activation: String,
        kernel: Vec<Vec<f64>>,
        bias: Vec<f64>,
    },
    /// Training-only regularisation; identity at inference
    Dropout {
        #[serde(default)]
        rate: f64,
    },
}

/// Transform the training target went through before fitting
///
/// Predictions are mapped back to the original scale with the inverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetTransform {
    /// Target was encoded as `ln(1 + y)`; inverse is `exp(x) - 1`
    #[default]
    Log1p,
    /// Target was used as-is
    Identity,
}

impl TargetTransform {
    /// Map a raw model output back to the target scale
    #[inline]
    pub fn invert(self, raw: f64) -> f64 {
        match self {
            TargetTransform::Log1p => raw.exp_m1(),
            TargetTransform::Identity => raw,
        }
    }
}

impl ModelArtifact {
    /// Parse an artifact from a JSON string
    ///
    /// # Errors
    /// Returns [`ModelError::Format`] for invalid JSON and
    /// [`ModelError::UnsupportedVersion`] for an unknown format version.
    pub fn from_json_str(json: &str) -> Result<Self, ModelError> {
        let artifact: Self =
            serde_json::from_str(json).map_err(|e| ModelError::Format(e.to_string()))?;
        if artifact.format_version != FORMAT_VERSION {
            return Err(ModelError::UnsupportedVersion(artifact.format_version));
        }
        Ok(artifact)
    }

    /// Read and parse an artifact file
    ///
    /// # Errors
    /// Returns [`ModelError::Unavailable`] if the file does not exist,
    /// [`ModelError::Io`] if it cannot be read, and the errors of
    /// [`from_json_str`](Self::from_json_str) otherwise.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                ModelError::Unavailable {
                    path: path.to_path_buf(),
                }
            } else {
                ModelError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        Self::from_json_str(&contents)
    }

    /// Serialize back to pretty JSON
    ///
    /// # Errors
    /// Returns [`ModelError::Format`] if serialization fails.
    pub fn to_json_string(&self) -> Result<String, ModelError> {
        serde_json::to_string_pretty(self).map_err(|e| ModelError::Format(e.to_string()))
    }
}
