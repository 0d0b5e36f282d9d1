//! Named computation hooks resolved while loading a model
//!
//! Serialized networks refer to activations and training losses by name. The
//! common activations are registered up front; anything else (custom losses in
//! particular) must be registered by the caller before loading, otherwise the
//! load fails with [`ModelError::UnknownHook`].

use super::error::{HookKind, ModelError};
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::Arc;

/// Elementwise activation applied after a dense layer
pub type ActivationFn = Arc<dyn Fn(f64) -> f64 + Send + Sync>;

/// Training loss `(y_true, y_pred) -> loss`
pub type LossFn = Arc<dyn Fn(&[f64], &[f64]) -> f64 + Send + Sync>;

/// SELU constants (Klambauer et al. 2017)
const SELU_ALPHA: f64 = 1.6732632423543772;
const SELU_SCALE: f64 = 1.0507009873554805;

/// Registry of named activations and losses
#[derive(Clone)]
pub struct HookRegistry {
    activations: FxHashMap<String, ActivationFn>,
    losses: FxHashMap<String, LossFn>,
}

impl HookRegistry {
    /// Registry with the built-in activations and no losses
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry
            .register_activation("linear", |x| x)
            .register_activation("relu", |x: f64| x.max(0.0))
            .register_activation("sigmoid", sigmoid)
            .register_activation("tanh", f64::tanh)
            .register_activation("softplus", |x: f64| x.exp().ln_1p())
            .register_activation("elu", |x: f64| if x > 0.0 { x } else { x.exp_m1() })
            .register_activation("selu", |x: f64| {
                if x > 0.0 {
                    SELU_SCALE * x
                } else {
                    SELU_SCALE * SELU_ALPHA * x.exp_m1()
                }
            })
            .register_activation("swish", |x| x * sigmoid(x));
        registry
    }

    /// Registry with nothing registered
    pub fn empty() -> Self {
        Self {
            activations: FxHashMap::default(),
            losses: FxHashMap::default(),
        }
    }

    /// Register (or replace) a named activation
    pub fn register_activation<F>(&mut self, name: impl Into<String>, f: F) -> &mut Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        self.activations.insert(name.into(), Arc::new(f));
        self
    }

    /// Register (or replace) a named loss
    pub fn register_loss<F>(&mut self, name: impl Into<String>, f: F) -> &mut Self
    where
        F: Fn(&[f64], &[f64]) -> f64 + Send + Sync + 'static,
    {
        self.losses.insert(name.into(), Arc::new(f));
        self
    }

    /// Builder form of [`register_loss`](Self::register_loss)
    pub fn with_loss<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&[f64], &[f64]) -> f64 + Send + Sync + 'static,
    {
        self.register_loss(name, f);
        self
    }

    /// Builder form of [`register_activation`](Self::register_activation)
    pub fn with_activation<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        self.register_activation(name, f);
        self
    }

    /// Resolve an activation by name
    ///
    /// # Errors
    /// Returns [`ModelError::UnknownHook`] if `name` is not registered.
    pub fn activation(&self, name: &str) -> Result<ActivationFn, ModelError> {
        self.activations
            .get(name)
            .cloned()
            .ok_or_else(|| ModelError::UnknownHook {
                kind: HookKind::Activation,
                name: name.to_owned(),
            })
    }

    /// Resolve a loss by name
    ///
    /// # Errors
    /// Returns [`ModelError::UnknownHook`] if `name` is not registered.
    pub fn loss(&self, name: &str) -> Result<LossFn, ModelError> {
        self.losses
            .get(name)
            .cloned()
            .ok_or_else(|| ModelError::UnknownHook {
                kind: HookKind::Loss,
                name: name.to_owned(),
            })
    }
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut activations: Vec<&str> = self.activations.keys().map(String::as_str).collect();
        let mut losses: Vec<&str> = self.losses.keys().map(String::as_str).collect();
        activations.sort_unstable();
        losses.sort_unstable();
        f.debug_struct("HookRegistry")
            .field("activations", &activations)
            .field("losses", &losses)
            .finish()
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Mean of squared differences over the output axis
///
/// The regression model was compiled against this loss under the name `"mse"`;
/// register it before loading such an artifact.
///
/// Slices of different lengths are compared over their common prefix only.
/// Debug builds assert that the lengths match.
pub fn mean_squared_error(y_true: &[f64], y_pred: &[f64]) -> f64 {
    debug_assert_eq!(y_true.len(), y_pred.len(), "target and prediction lengths differ");
    let n = y_true.len().min(y_pred.len());
    if n == 0 {
        return 0.0;
    }
    let sum: f64 = y_true
        .iter()
        .zip(y_pred)
        .map(|(t, p)| (t - p) * (t - p))
        .sum();
    sum / n as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_builtin_activations() {
        let hooks = HookRegistry::new();
        let relu = hooks.activation("relu").unwrap();
        assert_eq!(relu(-2.0), 0.0);
        assert_eq!(relu(3.5), 3.5);

        let sigmoid = hooks.activation("sigmoid").unwrap();
        assert_relative_eq!(sigmoid(0.0), 0.5);

        let linear = hooks.activation("linear").unwrap();
        assert_eq!(linear(-7.25), -7.25);

        let softplus = hooks.activation("softplus").unwrap();
        assert_relative_eq!(softplus(0.0), std::f64::consts::LN_2, epsilon = 1e-12);

        let elu = hooks.activation("elu").unwrap();
        assert_relative_eq!(elu(-1.0), (-1.0f64).exp() - 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_unknown_hook_is_reported_by_kind() {
        let hooks = HookRegistry::new();
        match hooks.loss("mse").err() {
            Some(ModelError::UnknownHook { kind, name }) => {
                assert_eq!(kind, HookKind::Loss);
                assert_eq!(name, "mse");
            }
            other => panic!("expected unknown hook, got {other:?}"),
        }
        assert!(hooks.activation("gelu_custom").is_err());
    }

    #[test]
    fn test_registered_loss_is_resolved() {
        let hooks = HookRegistry::new().with_loss("mse", mean_squared_error);
        let mse = hooks.loss("mse").unwrap();
        assert_relative_eq!(mse(&[1.0, 2.0], &[1.0, 4.0]), 2.0);
    }

    #[test]
    fn test_custom_activation_overrides() {
        let hooks = HookRegistry::empty().with_activation("double", |x| 2.0 * x);
        assert_eq!(hooks.activation("double").unwrap()(4.0), 8.0);
        assert!(hooks.activation("relu").is_err());
    }

    #[test]
    fn test_mean_squared_error_empty_is_zero() {
        assert_eq!(mean_squared_error(&[], &[]), 0.0);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "target and prediction lengths differ")]
    fn test_mean_squared_error_length_mismatch_asserts() {
        mean_squared_error(&[1.0, 2.0, 3.0], &[1.0]);
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn test_mean_squared_error_length_mismatch_uses_common_prefix() {
        assert_relative_eq!(mean_squared_error(&[1.0, 2.0, 3.0], &[3.0]), 4.0);
    }
}
