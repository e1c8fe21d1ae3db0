//! Shapes raw form values into what each predictor expects.

use ndarray::Array2;
use serde_json::Value;

use crate::encoder::CategoryEncoder;
use crate::error::PredictError;
use crate::models::{LoanApplicant, ReservationFeatures};

/// Column order of the cancellation model's training schema.
pub const RESERVATION_COLUMNS: [&str; 6] = [
    "lead_time",
    "arrival_month",
    "arrival_date",
    "market_segment_type",
    "avg_price_per_room",
    "no_of_special_requests",
];

/// A single named row ready for the local classifier.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    pub columns: &'static [&'static str],
    pub values: Array2<f32>,
}

impl FeatureRow {
    pub fn get(&self, column: &str) -> Option<f32> {
        let idx = self.columns.iter().position(|c| *c == column)?;
        self.values.get((0, idx)).copied()
    }
}

pub fn reservation_row(
    features: &ReservationFeatures,
    encoder: &dyn CategoryEncoder,
) -> Result<FeatureRow, PredictError> {
    let segment = encoder.encode(features.market_segment_type.as_str())?;

    let values = vec![
        features.lead_time as f32,
        features.arrival_month as f32,
        features.arrival_date as f32,
        segment as f32,
        features.avg_price_per_room as f32,
        features.no_of_special_requests as f32,
    ];
    let values = Array2::from_shape_vec((1, RESERVATION_COLUMNS.len()), values)
        .map_err(|e| PredictError::Inference(e.to_string()))?;

    Ok(FeatureRow {
        columns: &RESERVATION_COLUMNS,
        values,
    })
}

/// Request body for the remote loan service: an array holding one record.
pub fn loan_payload(applicant: &LoanApplicant) -> Result<Value, PredictError> {
    let record =
        serde_json::to_value(applicant).map_err(|e| PredictError::InputValidation(e.to_string()))?;
    Ok(Value::Array(vec![record]))
}
