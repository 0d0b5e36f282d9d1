//! Model loading and inference errors

use std::fmt;
use std::path::PathBuf;

/// Errors raised while loading a model artifact or wiring it into a service
///
/// All of these are startup-time failures: a process that cannot load its
/// model must not start serving.
#[derive(Debug)]
pub enum ModelError {
    /// The artifact file does not exist
    Unavailable { path: PathBuf },
    /// The artifact exists but could not be read
    Io { path: PathBuf, source: std::io::Error },
    /// The artifact is not valid model JSON
    Format(String),
    /// The artifact declares a format version this build does not understand
    UnsupportedVersion(u32),
    /// Layer dimensions do not chain together
    Shape(String),
    /// The artifact names a hook that was never registered
    UnknownHook { kind: HookKind, name: String },
    /// The model's input/output layout differs from what the caller feeds it
    SchemaMismatch(String),
}

/// Category of a named computation hook
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookKind {
    Activation,
    Loss,
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HookKind::Activation => f.write_str("activation"),
            HookKind::Loss => f.write_str("loss"),
        }
    }
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::Unavailable { path } => {
                write!(f, "Model file not found at {}", path.display())
            }
            ModelError::Io { path, source } => {
                write!(f, "Failed to read model {}: {source}", path.display())
            }
            ModelError::Format(msg) => write!(f, "Invalid model artifact: {msg}"),
            ModelError::UnsupportedVersion(v) => {
                write!(f, "Unsupported model format version {v}")
            }
            ModelError::Shape(msg) => write!(f, "Inconsistent model shape: {msg}"),
            ModelError::UnknownHook { kind, name } => {
                write!(f, "Unknown {kind} '{name}': register it before loading")
            }
            ModelError::SchemaMismatch(msg) => write!(f, "Model schema mismatch: {msg}"),
        }
    }
}

impl std::error::Error for ModelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ModelError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Errors raised by a single inference call
#[derive(Debug, Clone, PartialEq)]
pub enum InferenceError {
    /// Input batch width differs from the model's input width
    ShapeMismatch { expected: usize, actual: usize },
    /// The model produced no output values
    EmptyOutput,
    /// The model (or its post-processing) produced NaN or infinity
    NonFinite(f64),
}

impl fmt::Display for InferenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InferenceError::ShapeMismatch { expected, actual } => write!(
                f,
                "Input shape mismatch: model expects {expected} features, got {actual}"
            ),
            InferenceError::EmptyOutput => f.write_str("Model produced no output"),
            InferenceError::NonFinite(v) => write!(f, "Model produced a non-finite value ({v})"),
        }
    }
}

impl std::error::Error for InferenceError {}
