use actix_web::{error::JsonPayloadError, web, HttpRequest};

use crate::error::PredictError;
use crate::handlers;

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    PredictError::InputValidation(err.to_string()).into()
}

/// Method, path and purpose of every route `configure` registers.
pub const ENDPOINTS: [(&str, &str, &str); 8] = [
    ("GET", "/", "reservation form"),
    ("POST", "/predict", "reservation form submit"),
    ("GET", "/loan", "loan form"),
    ("POST", "/loan/predict", "loan form submit"),
    ("POST", "/api/reservations/predict", "cancellation prediction"),
    ("POST", "/api/loans/predict", "credit prediction"),
    ("GET", "/api/model-info", "model metadata"),
    ("GET", "/api/health", "health check"),
];

/// Registers every page and API route.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .route("/", web::get().to(handlers::index))
        .route("/predict", web::post().to(handlers::predict_reservation_form))
        .route("/loan", web::get().to(handlers::loan_form))
        .route("/loan/predict", web::post().to(handlers::predict_loan_form))
        .route(
            "/api/reservations/predict",
            web::post().to(handlers::api_predict_reservation),
        )
        .route("/api/loans/predict", web::post().to(handlers::api_predict_loan))
        .route("/api/model-info", web::get().to(handlers::model_info))
        .route("/api/health", web::get().to(handlers::health));
}
