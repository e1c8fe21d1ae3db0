use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use log::{error, info};

use hotelsmart::config::Settings;
use hotelsmart::inference::LocalModel;
use hotelsmart::remote::LoanServiceClient;
use hotelsmart::{routes, AppState};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let settings = Settings::load().map_err(|e| {
        error!("{}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    // loaded once; a failure disables the reservation form until restart
    let model = LocalModel::load(&settings.artifacts, &settings.preprocessing);
    if let LocalModel::Unavailable(reason) = &model {
        error!("Local model unavailable: {}", reason);
    }

    let loan_service = LoanServiceClient::new(settings.loan_service.predict_url())
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;

    let state = web::Data::new(AppState {
        model,
        loan_service,
        artifact_files: settings.artifacts.files(),
        validate_ranges: settings.preprocessing.validate_ranges,
    });

    let bind_address = settings.bind_address();
    info!("Server running at http://{}", bind_address);
    info!("Loan service: {}", settings.loan_service.predict_url());
    for (method, path, purpose) in routes::ENDPOINTS {
        info!("   {:<4} {:<27} - {}", method, path, purpose);
    }

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header();

        App::new()
            .wrap(Logger::default())
            .wrap(cors)
            .app_data(state.clone())
            .configure(routes::configure)
    })
    .bind(&bind_address)?
    .run()
    .await
}
