use log::{debug, error};
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;

use crate::error::PredictError;
use crate::models::{CreditDecision, LoanApplicant};
use crate::request::loan_payload;

/// Client for the remote credit-default service.
///
/// One POST per applicant, no retry and no client timeout.
#[derive(Clone)]
pub struct LoanServiceClient {
    client: reqwest::Client,
    url: String,
}

impl LoanServiceClient {
    pub fn new(url: impl Into<String>) -> Result<Self, PredictError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn predict(&self, applicant: &LoanApplicant) -> Result<CreditDecision, PredictError> {
        let payload = loan_payload(applicant)?;
        debug!("POST {} {}", self.url, payload);

        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            error!("Loan service answered {}", status);
            return Err(PredictError::PredictionRequest(format!(
                "loan service returned status {}",
                status
            )));
        }

        let body = response.bytes().await?;
        parse_prediction(&body)
    }
}

/// Reads `prediction` from the first element of the response array.
/// Later elements are not inspected.
pub fn parse_prediction(body: &[u8]) -> Result<CreditDecision, PredictError> {
    let records: Vec<Value> = serde_json::from_slice(body)
        .map_err(|e| PredictError::PredictionRequest(format!("malformed response: {}", e)))?;

    let first = records
        .first()
        .ok_or_else(|| PredictError::PredictionRequest("empty response array".to_string()))?;
    let value = first.get("prediction").ok_or_else(|| {
        PredictError::PredictionRequest("first record has no prediction field".to_string())
    })?;

    let prediction = match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        _ => None,
    }
    .ok_or_else(|| {
        PredictError::PredictionRequest(format!(
            "prediction is not an integer: {}",
            value
        ))
    })?;

    Ok(CreditDecision { prediction })
}
