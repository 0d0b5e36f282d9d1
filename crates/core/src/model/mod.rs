//! Trained regression model: artifact format, hook registry and inference

pub mod artifact;
pub mod error;
pub mod hooks;
pub mod network;
pub mod regressor;

pub use artifact::{LayerSpec, ModelArtifact, TargetTransform, FORMAT_VERSION};
pub use error::{HookKind, InferenceError, ModelError};
pub use hooks::{mean_squared_error, ActivationFn, HookRegistry, LossFn};
pub use network::DenseNetwork;
pub use regressor::Regressor;
