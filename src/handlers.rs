use actix_web::{http::header::ContentType, web, HttpResponse};
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::PredictError;
use crate::form::{self, FormFields};
use crate::inference::LocalModel;
use crate::models::{CancellationPrediction, CreditDecision, LoanApplicant, ReservationFeatures};
use crate::pages::{self, MissingModel, Outcome};
use crate::remote::LoanServiceClient;
use crate::report::{CancellationReport, CreditReport, Locale};

/// Shared by every worker; built once at startup.
pub struct AppState {
    pub model: LocalModel,
    pub loan_service: LoanServiceClient,
    /// Artifact paths listed when the local model is unavailable.
    pub artifact_files: Vec<String>,
    pub validate_ranges: bool,
}

impl AppState {
    fn missing_model(&self) -> Option<MissingModel<'_>> {
        match &self.model {
            LocalModel::Unavailable(reason) => Some(MissingModel {
                reason,
                files: &self.artifact_files,
            }),
            LocalModel::Ready(_) => None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LangQuery {
    lang: Option<String>,
}

impl LangQuery {
    pub fn locale(&self) -> Locale {
        match self.lang.as_deref() {
            Some("pt") | Some("pt-BR") | Some("pt_BR") => Locale::Pt,
            _ => Locale::En,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReservationResponse {
    pub id: Uuid,
    pub label: i64,
    pub probabilities: [f32; 2],
    pub report: CancellationReport,
}

#[derive(Debug, Serialize)]
pub struct LoanResponse {
    pub id: Uuid,
    pub prediction: i64,
    pub report: CreditReport,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub model_available: bool,
    pub loan_service: String,
}

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(body)
}

async fn predict_cancellation(
    state: &AppState,
    features: &ReservationFeatures,
) -> Result<CancellationPrediction, PredictError> {
    if state.validate_ranges {
        features.validate().map_err(PredictError::InputValidation)?;
    }
    let model = state.model.get()?;

    let features = features.clone();
    web::block(move || model.predict(&features))
        .await
        .map_err(|e| PredictError::Inference(e.to_string()))?
}

async fn predict_credit(
    state: &AppState,
    applicant: &LoanApplicant,
) -> Result<CreditDecision, PredictError> {
    applicant.validate().map_err(PredictError::InputValidation)?;
    state.loan_service.predict(applicant).await
}

pub async fn index(state: web::Data<AppState>, query: web::Query<LangQuery>) -> HttpResponse {
    html(pages::reservation_page(
        query.locale(),
        state.missing_model().as_ref(),
        &ReservationFeatures::default(),
        &Outcome::Empty,
    ))
}

pub async fn predict_reservation_form(
    state: web::Data<AppState>,
    query: web::Query<LangQuery>,
    body: Result<web::Form<FormFields>, actix_web::Error>,
) -> HttpResponse {
    let locale = query.locale();
    let unavailable = state.missing_model();

    let fields = body.map(web::Form::into_inner).map_err(|e| e.to_string());
    let decoded = fields
        .as_ref()
        .map_err(String::clone)
        .and_then(form::decode::<ReservationFeatures>);
    let features = match decoded {
        Ok(features) => features,
        Err(e) => {
            warn!("Rejected reservation form: {}", e);
            let err = PredictError::InputValidation(e);
            let submitted = fields
                .as_ref()
                .map(form::salvage::<ReservationFeatures>)
                .unwrap_or_default();
            return html(pages::reservation_page(
                locale,
                unavailable.as_ref(),
                &submitted,
                &Outcome::Error(err.to_string()),
            ));
        }
    };

    let outcome = match predict_cancellation(&state, &features).await {
        Ok(prediction) => {
            info!(
                "Reservation prediction label={} p_cancel={:.3}",
                prediction.label, prediction.probabilities[1]
            );
            Outcome::Result(CancellationReport::new(&prediction, &features, locale))
        }
        Err(e) => {
            error!("Reservation prediction failed: {}", e);
            Outcome::Error(e.to_string())
        }
    };

    html(pages::reservation_page(locale, unavailable.as_ref(), &features, &outcome))
}

pub async fn loan_form(query: web::Query<LangQuery>) -> HttpResponse {
    html(pages::loan_page(
        query.locale(),
        &LoanApplicant::default(),
        &Outcome::Empty,
    ))
}

pub async fn predict_loan_form(
    state: web::Data<AppState>,
    query: web::Query<LangQuery>,
    body: Result<web::Form<FormFields>, actix_web::Error>,
) -> HttpResponse {
    let locale = query.locale();

    let fields = body.map(web::Form::into_inner).map_err(|e| e.to_string());
    let decoded = fields
        .as_ref()
        .map_err(String::clone)
        .and_then(form::decode::<LoanApplicant>);
    let applicant = match decoded {
        Ok(applicant) => applicant,
        Err(e) => {
            warn!("Rejected loan form: {}", e);
            let err = PredictError::InputValidation(e);
            let submitted = fields
                .as_ref()
                .map(form::salvage::<LoanApplicant>)
                .unwrap_or_default();
            return html(pages::loan_page(
                locale,
                &submitted,
                &Outcome::Error(err.to_string()),
            ));
        }
    };

    let outcome = match predict_credit(&state, &applicant).await {
        Ok(decision) => {
            info!("Loan prediction={}", decision.prediction);
            Outcome::Result(CreditReport::new(&decision, locale))
        }
        Err(e) => {
            error!("Loan prediction failed: {}", e);
            Outcome::Error(e.to_string())
        }
    };

    html(pages::loan_page(locale, &applicant, &outcome))
}

pub async fn api_predict_reservation(
    state: web::Data<AppState>,
    query: web::Query<LangQuery>,
    body: web::Json<ReservationFeatures>,
) -> Result<HttpResponse, PredictError> {
    let id = Uuid::new_v4();
    let features = body.into_inner();

    let prediction = predict_cancellation(&state, &features).await.map_err(|e| {
        error!("Prediction {} failed: {}", id, e);
        e
    })?;
    info!(
        "Prediction {} label={} p_cancel={:.3}",
        id, prediction.label, prediction.probabilities[1]
    );

    Ok(HttpResponse::Ok().json(ReservationResponse {
        id,
        label: prediction.label,
        probabilities: prediction.probabilities,
        report: CancellationReport::new(&prediction, &features, query.locale()),
    }))
}

pub async fn api_predict_loan(
    state: web::Data<AppState>,
    query: web::Query<LangQuery>,
    body: web::Json<LoanApplicant>,
) -> Result<HttpResponse, PredictError> {
    let id = Uuid::new_v4();
    let applicant = body.into_inner();

    let decision = predict_credit(&state, &applicant).await.map_err(|e| {
        error!("Loan prediction {} failed: {}", id, e);
        e
    })?;
    info!("Loan prediction {} prediction={}", id, decision.prediction);

    Ok(HttpResponse::Ok().json(LoanResponse {
        id,
        prediction: decision.prediction,
        report: CreditReport::new(&decision, query.locale()),
    }))
}

pub async fn model_info(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.model.info())
}

pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        model_available: state.model.is_available(),
        loan_service: state.loan_service.url().to_string(),
    })
}
