mod common;

use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use serde_json::{json, Value};

use hotelsmart::handlers::AppState;
use hotelsmart::inference::LocalModel;
use hotelsmart::remote::LoanServiceClient;
use hotelsmart::routes;

use common::{closed_port_url, ready_model, state};

fn reservation() -> Value {
    json!({
        "lead_time": 120,
        "arrival_month": 10,
        "arrival_date": 3,
        "market_segment_type": "Online",
        "avg_price_per_room": 210.0,
        "no_of_special_requests": 0
    })
}

#[actix_rt::test]
async fn likely_cancellation_is_reported_with_its_probability() {
    let app = test::init_service(
        App::new()
            .app_data(state(ready_model(1, [0.2, 0.8]), &closed_port_url()))
            .configure(routes::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/reservations/predict")
        .set_json(reservation())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["label"], 1);
    assert_eq!(body["report"]["probability"], "80.00%");
    assert!(body["report"]["headline"]
        .as_str()
        .unwrap()
        .to_lowercase()
        .contains("high probability of cancellation"));
    assert!(body["id"].is_string());
}

#[actix_rt::test]
async fn form_submit_renders_result_page() {
    let app = test::init_service(
        App::new()
            .app_data(state(ready_model(1, [0.2, 0.8]), &closed_port_url()))
            .configure(routes::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/predict")
        .set_form([
            ("lead_time", "120"),
            ("arrival_month", "10"),
            ("arrival_date", "3"),
            ("market_segment_type", "Corporate"),
            ("avg_price_per_room", "210.0"),
            ("no_of_special_requests", "0"),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(html.contains("High probability of cancellation"));
    assert!(html.contains("80.00%"));
    // the submitted values stay in the form
    assert!(html.contains(r#"name="lead_time" value="120""#));
}

#[actix_rt::test]
async fn portuguese_result_page() {
    let app = test::init_service(
        App::new()
            .app_data(state(ready_model(0, [0.9, 0.1]), &closed_port_url()))
            .configure(routes::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/predict?lang=pt")
        .set_form([
            ("lead_time", "5"),
            ("arrival_month", "1"),
            ("arrival_date", "1"),
            ("market_segment_type", "Aviation"),
            ("avg_price_per_room", "80"),
            ("no_of_special_requests", "2"),
        ])
        .to_request();
    let html = String::from_utf8(
        test::read_body(test::call_service(&app, req).await)
            .await
            .to_vec(),
    )
    .unwrap();
    assert!(html.contains("Baixa probabilidade de cancelamento"));
    assert!(html.contains("90.00%"));
}

#[actix_rt::test]
async fn non_numeric_form_value_is_shown_inline() {
    let app = test::init_service(
        App::new()
            .app_data(state(ready_model(1, [0.2, 0.8]), &closed_port_url()))
            .configure(routes::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/predict")
        .set_form([
            ("lead_time", "soon"),
            ("arrival_month", "10"),
            ("arrival_date", "3"),
            ("market_segment_type", "Corporate"),
            ("avg_price_per_room", "210.5"),
            ("no_of_special_requests", "2"),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(html.contains("Prediction failed: invalid input"));

    // the rest of the submission is kept in the form
    assert!(html.contains(r#"name="arrival_date" value="3""#));
    assert!(html.contains(r#"name="avg_price_per_room" value="210.5""#));
    assert!(html.contains(r#"name="no_of_special_requests" value="2""#));
    assert!(html.contains(r#"<option value="10" selected>"#));
    assert!(html.contains(r#"<option value="Corporate" selected>"#));
}

#[actix_rt::test]
async fn out_of_range_and_unknown_values_are_rejected() {
    let app = test::init_service(
        App::new()
            .app_data(state(ready_model(1, [0.2, 0.8]), &closed_port_url()))
            .configure(routes::configure),
    )
    .await;

    let mut body = reservation();
    body["arrival_month"] = json!(13);
    let req = test::TestRequest::post()
        .uri("/api/reservations/predict")
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let err: Value = test::read_body_json(resp).await;
    assert_eq!(err["code"], "INVALID_INPUT");

    let mut body = reservation();
    body["market_segment_type"] = json!("Cruise");
    let req = test::TestRequest::post()
        .uri("/api/reservations/predict")
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn identical_requests_get_identical_labels() {
    let app = test::init_service(
        App::new()
            .app_data(state(ready_model(0, [0.55, 0.45]), &closed_port_url()))
            .configure(routes::configure),
    )
    .await;

    let mut labels = Vec::new();
    for _ in 0..2 {
        let req = test::TestRequest::post()
            .uri("/api/reservations/predict")
            .set_json(reservation())
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        labels.push(body["label"].clone());
    }
    assert_eq!(labels[0], labels[1]);
}

#[actix_rt::test]
async fn unavailable_model_shows_banner_and_refuses_predictions() {
    let model = LocalModel::Unavailable("model/final_model.onnx: No such file".to_string());
    let app = test::init_service(
        App::new()
            .app_data(state(model, &closed_port_url()))
            .configure(routes::configure),
    )
    .await;

    let req = test::TestRequest::get().uri("/").to_request();
    let html = String::from_utf8(
        test::read_body(test::call_service(&app, req).await)
            .await
            .to_vec(),
    )
    .unwrap();
    assert!(html.contains("The prediction models could not be loaded."));

    let req = test::TestRequest::post()
        .uri("/api/reservations/predict")
        .set_json(reservation())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let err: Value = test::read_body_json(resp).await;
    assert_eq!(err["code"], "MODEL_UNAVAILABLE");

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let health: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(health["status"], "ok");
    assert_eq!(health["model_available"], false);
}

#[actix_rt::test]
async fn model_info_lists_training_features() {
    let app = test::init_service(
        App::new()
            .app_data(state(ready_model(0, [0.5, 0.5]), &closed_port_url()))
            .configure(routes::configure),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/model-info").to_request();
    let info: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(info["available"], true);
    assert_eq!(info["scaler_applied"], false);
    assert_eq!(info["features"][3], "market_segment_type");
    assert_eq!(info["features"].as_array().unwrap().len(), 6);
}

#[actix_rt::test]
async fn unavailable_banner_lists_configured_artifacts() {
    let files = vec![
        "/srv/hotelsmart/cancel.onnx".to_string(),
        "/srv/hotelsmart/scaler.json".to_string(),
        "/srv/hotelsmart/segments.json".to_string(),
    ];
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(AppState {
                model: LocalModel::Unavailable(
                    "/srv/hotelsmart/cancel.onnx: No such file".to_string(),
                ),
                loan_service: LoanServiceClient::new(closed_port_url()).unwrap(),
                artifact_files: files.clone(),
                validate_ranges: true,
            }))
            .configure(routes::configure),
    )
    .await;

    let req = test::TestRequest::get().uri("/").to_request();
    let html = String::from_utf8(
        test::read_body(test::call_service(&app, req).await)
            .await
            .to_vec(),
    )
    .unwrap();
    for file in &files {
        assert!(html.contains(&format!("<li>{}</li>", file)), "{} not listed", file);
    }
    assert!(!html.contains("model/final_model.onnx"));
}

#[actix_rt::test]
async fn every_listed_endpoint_is_routed() {
    let app = test::init_service(
        App::new()
            .app_data(state(ready_model(0, [0.5, 0.5]), &closed_port_url()))
            .configure(routes::configure),
    )
    .await;

    for (method, path, _) in routes::ENDPOINTS {
        let req = match method {
            "GET" => test::TestRequest::get(),
            "POST" => test::TestRequest::post(),
            other => panic!("unexpected method {}", other),
        }
        .uri(path)
        .to_request();
        let resp = test::call_service(&app, req).await;
        assert_ne!(resp.status(), StatusCode::NOT_FOUND, "{} {}", method, path);
        assert_ne!(resp.status(), StatusCode::METHOD_NOT_ALLOWED, "{} {}", method, path);
    }
}
