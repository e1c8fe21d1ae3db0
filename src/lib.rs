//! HotelSmart prediction portal.
//!
//! Serves two forms backed by pre-trained classifiers: hotel cancellation
//! risk from a local ONNX model, and credit default from a remote service.

pub mod config;
pub mod encoder;
pub mod error;
pub mod form;
pub mod handlers;
pub mod inference;
pub mod models;
pub mod pages;
pub mod remote;
pub mod report;
pub mod request;
pub mod routes;
pub mod scaler;

pub use error::PredictError;
pub use handlers::AppState;
