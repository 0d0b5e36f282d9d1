//! HTTP routes
//!
//! - `GET /` → input form
//! - `POST /predict/` → URL-encoded form → prediction page (or JSON error)
//! - `GET /health` → liveness and model name
//! - `/static/*` → files from the static directory, when configured

use crate::error::ApiError;
use crate::views;
use axum::extract::State;
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use fire_area_core::{parse_form, PredictionService};
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

/// Shared application context handed to every handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub service: Arc<PredictionService>,
}

impl AppState {
    pub fn new(service: PredictionService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

/// Build the application router
pub fn router(state: AppState, static_dir: Option<&Path>) -> Router {
    let mut app = Router::new()
        .route("/", get(index))
        .route("/predict/", post(predict))
        .route("/predict", post(predict))
        .route("/health", get(health));

    if let Some(dir) = static_dir {
        debug!("Serving static assets from {}", dir.display());
        app = app.nest_service("/static", ServeDir::new(dir));
    }

    app.layer(TraceLayer::new_for_http()).with_state(state)
}

async fn index() -> Html<String> {
    Html(views::render_form())
}

async fn predict(
    State(state): State<AppState>,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<Html<String>, ApiError> {
    let parsed = parse_form(&fields).inspect_err(|e| warn!("Rejected form: {e}"))?;

    let area = state
        .service
        .predict(&parsed.record)
        .inspect_err(|e| warn!("Prediction failed: {e}"))?;

    info!(
        "Predicted {area} ha for {}/{} at ({}, {})",
        parsed.month_token, parsed.day_token, parsed.record.x, parsed.record.y
    );
    Ok(Html(views::render_result(&parsed, area)))
}

#[derive(Debug, Serialize)]
struct Health {
    status: &'static str,
    model: String,
}

async fn health(State(state): State<AppState>) -> Json<Health> {
    Json(Health {
        status: "ok",
        model: state.service.model_name().to_owned(),
    })
}
