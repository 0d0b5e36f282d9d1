//! Forest fire burn area predictor web service
//!
//! Thin HTTP layer over [`fire_area_core`]: renders the input form, adapts the
//! submitted fields into a feature record and renders the predicted burn area.
//! The prediction service is built once at startup and shared by handle.

pub mod config;
pub mod error;
pub mod routes;
pub mod views;

pub use config::{init_logging, ServerConfig};
pub use error::{ApiError, ErrorBody};
pub use routes::{router, AppState};

use fire_area_core::model::mean_squared_error;
use fire_area_core::{DenseNetwork, HookRegistry, ModelError, PredictionService};
use std::path::Path;
use std::sync::Arc;

/// Hooks the bundled forest fire model needs to load
///
/// The network was compiled against a custom `"mse"` loss; it is registered
/// here so the artifact deserializes.
pub fn model_hooks() -> HookRegistry {
    HookRegistry::new().with_loss("mse", mean_squared_error)
}

/// Load the model artifact and wrap it in a prediction service
///
/// # Errors
/// Returns [`ModelError::Unavailable`] if the artifact is missing, or any
/// artifact/schema error. All of these are fatal at startup.
pub fn load_service(model_path: &Path) -> Result<PredictionService, ModelError> {
    let network = DenseNetwork::load(model_path, &model_hooks())?;
    PredictionService::new(Arc::new(network))
}
