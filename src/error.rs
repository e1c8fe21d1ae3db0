//! Errors raised while building, running and reporting a prediction.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;

/// Every failure a prediction action can hit.
///
/// HTML handlers render these inline on the page; JSON handlers turn them
/// into a status code through [`ResponseError`].
#[derive(Debug, thiserror::Error)]
pub enum PredictError {
    /// Local artifacts were not loaded at startup.
    #[error("prediction model is not available: {0}")]
    ModelUnavailable(String),

    #[error("invalid input: {0}")]
    InputValidation(String),

    /// The remote loan service failed (network, status, or payload).
    #[error("prediction request failed: {0}")]
    PredictionRequest(String),

    /// A category the fitted encoder never saw.
    #[error("unknown category '{value}' for {field}")]
    Encoding { field: String, value: String },

    #[error("inference failed: {0}")]
    Inference(String),
}

impl PredictError {
    pub fn code(&self) -> &'static str {
        match self {
            PredictError::ModelUnavailable(_) => "MODEL_UNAVAILABLE",
            PredictError::InputValidation(_) => "INVALID_INPUT",
            PredictError::PredictionRequest(_) => "PREDICTION_REQUEST_FAILED",
            PredictError::Encoding { .. } => "ENCODING_ERROR",
            PredictError::Inference(_) => "INFERENCE_ERROR",
        }
    }
}

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: &'static str,
    pub message: String,
}

impl ResponseError for PredictError {
    fn status_code(&self) -> StatusCode {
        match self {
            PredictError::InputValidation(_) | PredictError::Encoding { .. } => {
                StatusCode::BAD_REQUEST
            }
            PredictError::ModelUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            PredictError::PredictionRequest(_) => StatusCode::BAD_GATEWAY,
            PredictError::Inference(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ApiError {
            code: self.code(),
            message: self.to_string(),
        })
    }
}

impl From<reqwest::Error> for PredictError {
    fn from(err: reqwest::Error) -> Self {
        PredictError::PredictionRequest(err.to_string())
    }
}
