//! Request errors and their HTTP representation

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use fire_area_core::{PredictionError, ValidationError};
use serde::Serialize;
use std::fmt;

/// JSON error payload returned for rejected requests
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// Failure of a single `/predict/` request
#[derive(Debug)]
pub enum ApiError {
    /// Form rejected before inference
    Validation(ValidationError),
    /// Inference or post-processing failed
    Prediction(PredictionError),
}

impl ApiError {
    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Prediction(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Validation(e) => e.fmt(f),
            ApiError::Prediction(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        ApiError::Validation(e)
    }
}

impl From<PredictionError> for ApiError {
    fn from(e: PredictionError) -> Self {
        ApiError::Prediction(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let field = match &self {
            ApiError::Validation(e) => Some(e.field().to_owned()),
            ApiError::Prediction(_) => None,
        };
        let body = ErrorBody {
            error: self.to_string(),
            field,
        };
        (self.status(), Json(body)).into_response()
    }
}
