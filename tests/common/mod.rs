#![allow(dead_code)]

use actix_web::http::header::CONTENT_TYPE;
use actix_web::http::StatusCode;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Mutex;

use hotelsmart::config::ArtifactSettings;
use hotelsmart::encoder::LabelEncoder;
use hotelsmart::error::PredictError;
use hotelsmart::inference::{Classifier, LocalModel, ModelArtifacts};
use hotelsmart::remote::LoanServiceClient;
use hotelsmart::request::FeatureRow;
use hotelsmart::scaler::StandardScaler;
use hotelsmart::AppState;

pub struct StubClassifier {
    pub label: i64,
    pub proba: [f32; 2],
}

impl Classifier for StubClassifier {
    fn predict(&self, _row: &FeatureRow) -> Result<i64, PredictError> {
        Ok(self.label)
    }

    fn predict_proba(&self, _row: &FeatureRow) -> Result<[f32; 2], PredictError> {
        Ok(self.proba)
    }
}

pub fn ready_model(label: i64, proba: [f32; 2]) -> LocalModel {
    let encoder = LabelEncoder::from_json(
        r#"{"classes": ["Aviation", "Complementary", "Corporate", "Offline", "Online"]}"#,
    )
    .unwrap();
    let scaler = StandardScaler::from_json(
        r#"{"mean": [0, 0, 0, 0, 0, 0], "scale": [1, 1, 1, 1, 1, 1]}"#,
    )
    .unwrap();
    LocalModel::Ready(std::sync::Arc::new(ModelArtifacts::new(
        Box::new(StubClassifier { label, proba }),
        Box::new(encoder),
        scaler,
        false,
    )))
}

pub fn state(model: LocalModel, loan_url: &str) -> web::Data<AppState> {
    web::Data::new(AppState {
        model,
        loan_service: LoanServiceClient::new(loan_url).unwrap(),
        artifact_files: ArtifactSettings::default().files(),
        validate_ranges: true,
    })
}

/// Requests received by the stand-in loan service: content type and JSON body.
pub type Seen = Mutex<Vec<(Option<String>, Value)>>;

struct Reply {
    status: u16,
    body: &'static str,
}

async fn empresa_predict(
    req: HttpRequest,
    body: web::Bytes,
    seen: web::Data<Seen>,
    reply: web::Data<Reply>,
) -> HttpResponse {
    let content_type = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    seen.lock().unwrap().push((content_type, value));

    HttpResponse::build(StatusCode::from_u16(reply.status).unwrap())
        .content_type("application/json")
        .body(reply.body)
}

/// Starts a throw-away loan service answering every POST with `status` and `body`.
pub fn spawn_loan_service(status: u16, body: &'static str) -> (String, web::Data<Seen>) {
    let seen = web::Data::new(Seen::default());
    let reply = web::Data::new(Reply { status, body });

    let seen_for_app = seen.clone();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(seen_for_app.clone())
            .app_data(reply.clone())
            .route("/empresa/predict", web::post().to(empresa_predict))
    })
    .workers(1)
    .disable_signals()
    .bind(("127.0.0.1", 0))
    .unwrap();

    let addr: SocketAddr = server.addrs()[0];
    actix_rt::spawn(server.run());

    (format!("http://{}/empresa/predict", addr), seen)
}

/// A URL nothing is listening on.
pub fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/empresa/predict", addr)
}
